//! Coupon namespace.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Count, CountResponse, Price, Time, COUNT_RULES};
use crate::client::{ClayfulClient, Endpoint};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::fields::{count, price, time, FieldRule};
use crate::http::{HttpMethod, Transport};

const COUPON_RULES: &[FieldRule] = &[
    price("discount.min"),
    price("discount.max"),
    count("discount.value"),
    count("amount.total"),
    count("amount.used"),
    count("amount.left"),
    count("amount.issued"),
    count("amount.unissued"),
    price("price.min"),
    price("price.max"),
    time("expiresAt"),
    time("createdAt"),
    time("updatedAt"),
];

pub const LIST: Endpoint = Endpoint {
    model: "Coupon",
    method: "list",
    http_method: HttpMethod::Get,
    path: "/v1/coupons",
    rules: COUPON_RULES,
};

pub const COUNT: Endpoint = Endpoint {
    model: "Coupon",
    method: "count",
    http_method: HttpMethod::Get,
    path: "/v1/coupons/count",
    rules: COUNT_RULES,
};

pub const GET: Endpoint = Endpoint {
    model: "Coupon",
    method: "get",
    http_method: HttpMethod::Get,
    path: "/v1/coupons/{couponId}",
    rules: COUPON_RULES,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CouponDiscount {
    pub min: Option<Price>,
    pub max: Option<Price>,
    /// `percentage` or `fixed`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<Count>,
}

/// Issuance counters. `None` totals mean unlimited.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CouponAmount {
    pub total: Option<Count>,
    pub used: Option<Count>,
    pub left: Option<Count>,
    pub issued: Option<Count>,
    pub unissued: Option<Count>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CouponCategory {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Order price range the coupon applies to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PriceRange {
    pub min: Option<Price>,
    pub max: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub discount: CouponDiscount,
    #[serde(default)]
    pub amount: CouponAmount,
    pub category: Option<CouponCategory>,
    #[serde(default)]
    pub price: PriceRange,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub only: bool,
    pub expires_at: Option<Time>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub created_at: Option<Time>,
    pub updated_at: Option<Time>,
}

/// `client.coupon()`.
pub struct CouponApi<'a, T> {
    client: &'a ClayfulClient<T>,
}

impl<'a, T: Transport> CouponApi<'a, T> {
    pub(crate) fn new(client: &'a ClayfulClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self, options: Option<&RequestOptions>) -> Result<Vec<CouponItem>> {
        self.client.dispatch(&LIST, &[], None, options)
    }

    pub fn count(&self, options: Option<&RequestOptions>) -> Result<CountResponse> {
        self.client.dispatch(&COUNT, &[], None, options)
    }

    pub fn get(&self, coupon_id: &str, options: Option<&RequestOptions>) -> Result<CouponItem> {
        self.client.dispatch(&GET, &[coupon_id], None, options)
    }
}
