//! Product namespace.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Count, CountResponse, ImageRef, NamedRef, Price, Time, COUNT_RULES};
use crate::client::{ClayfulClient, Endpoint};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::fields::{count, price, time, FieldRule};
use crate::http::{HttpMethod, Transport};

const PRODUCT_RULES: &[FieldRule] = &[
    price("price.original"),
    price("price.sale"),
    count("discount.value"),
    price("discount.discounted"),
    count("rating.count"),
    count("rating.sum"),
    count("rating.average"),
    count("totalReview"),
    price("variants.*.price.original"),
    price("variants.*.price.sale"),
    count("variants.*.discount.value"),
    price("variants.*.discount.discounted"),
    count("variants.*.quantity"),
    count("variants.*.weight"),
    count("variants.*.width"),
    count("variants.*.height"),
    count("variants.*.depth"),
    time("createdAt"),
    time("updatedAt"),
];

pub const LIST: Endpoint = Endpoint {
    model: "Product",
    method: "list",
    http_method: HttpMethod::Get,
    path: "/v1/products",
    rules: PRODUCT_RULES,
};

pub const COUNT: Endpoint = Endpoint {
    model: "Product",
    method: "count",
    http_method: HttpMethod::Get,
    path: "/v1/products/count",
    rules: COUNT_RULES,
};

pub const GET: Endpoint = Endpoint {
    model: "Product",
    method: "get",
    http_method: HttpMethod::Get,
    path: "/v1/products/{productId}",
    rules: PRODUCT_RULES,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPrice {
    pub original: Option<Price>,
    pub sale: Option<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductDiscount {
    /// `percentage`, `fixed`, or `None` when no discount applies.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<Count>,
    /// Amount taken off the original price.
    pub discounted: Option<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Shipping {
    #[serde(default)]
    pub methods: Vec<NamedRef>,
    pub calculation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Rating {
    pub count: Option<Count>,
    pub sum: Option<Count>,
    pub average: Option<Count>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub path: Vec<NamedRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Variation {
    #[serde(rename = "_id")]
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductOption {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub priority: i64,
}

/// One option/variation pair identifying a variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantType {
    pub option: OptionRef,
    pub variation: Variation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub price: ProductPrice,
    pub discount: Option<ProductDiscount>,
    #[serde(default)]
    pub available: bool,
    pub thumbnail: Option<String>,
    pub quantity: Option<Count>,
    pub sku: Option<String>,
    #[serde(default)]
    pub types: Vec<VariantType>,
    pub weight: Option<Count>,
    pub width: Option<Count>,
    pub height: Option<Count>,
    pub depth: Option<Count>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub price: ProductPrice,
    pub discount: Option<ProductDiscount>,
    pub shipping: Option<Shipping>,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub bundled: bool,
    #[serde(default)]
    pub available: bool,
    pub thumbnail: Option<ImageRef>,
    pub total_review: Option<Count>,
    pub brand: Option<NamedRef>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub catalogs: Vec<Catalog>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub slug: Option<String>,
    pub created_at: Option<Time>,
    pub updated_at: Option<Time>,
}

/// `client.product()`.
pub struct ProductApi<'a, T> {
    client: &'a ClayfulClient<T>,
}

impl<'a, T: Transport> ProductApi<'a, T> {
    pub(crate) fn new(client: &'a ClayfulClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self, options: Option<&RequestOptions>) -> Result<Vec<ProductItem>> {
        self.client.dispatch(&LIST, &[], None, options)
    }

    pub fn count(&self, options: Option<&RequestOptions>) -> Result<CountResponse> {
        self.client.dispatch(&COUNT, &[], None, options)
    }

    pub fn get(&self, product_id: &str, options: Option<&RequestOptions>) -> Result<ProductItem> {
        self.client.dispatch(&GET, &[product_id], None, options)
    }
}
