//! Resource namespaces and their wire models.
//!
//! # Design
//! Each resource module declares its `Endpoint` constants, the typed records
//! its responses decode into, and a borrowed namespace handle
//! (`client.customer()`, `client.product()`, ...). Records are flat
//! compositions with `Option` for every field the platform may omit; unknown
//! fields are ignored. Models are defined independently from the mock
//! server; the integration tests catch schema drift.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::fields::{count, FieldRule};
use crate::format::FormattedValue;

pub mod cart;
pub mod coupon;
pub mod customer;
pub mod discount;
pub mod order;
pub mod product;

pub use cart::CartApi;
pub use coupon::CouponApi;
pub use customer::CustomerApi;
pub use discount::DiscountApi;
pub use order::OrderApi;
pub use product::ProductApi;

/// A monetary amount: `{raw, convertedRaw, formatted, converted}`.
pub type Price = FormattedValue<Number>;
/// A count, quantity or measurement: `{raw, formatted, converted}`.
pub type Count = FormattedValue<Number>;
/// A timestamp: `{raw, formatted, ago}`.
pub type Time = FormattedValue<String>;

/// Body of every `count` operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountResponse {
    pub count: Count,
}

pub(crate) const COUNT_RULES: &[FieldRule] = &[count("count")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
}

/// A reference to another record by id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}
