//! Order namespace, including the current customer's orders.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Count, CountResponse, NamedRef, Price, Time, COUNT_RULES};
use crate::client::{ClayfulClient, Endpoint};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::fields::{count, price, time, FieldRule};
use crate::http::{HttpMethod, Transport};

const ORDER_RULES: &[FieldRule] = &[
    price("items.*.price.original"),
    price("items.*.price.sale"),
    price("items.*.price.withTax"),
    count("items.*.quantity"),
    price("total.price.original"),
    price("total.price.sale"),
    price("total.price.withTax"),
    price("total.shipping.fee"),
    price("total.amount"),
    time("paidAt"),
    time("cancelledAt"),
    time("createdAt"),
    time("updatedAt"),
];

const fn endpoint(method: &'static str, path: &'static str, rules: &'static [FieldRule]) -> Endpoint {
    Endpoint {
        model: "Order",
        method,
        http_method: HttpMethod::Get,
        path,
        rules,
    }
}

pub const LIST: Endpoint = endpoint("list", "/v1/orders", ORDER_RULES);
pub const COUNT: Endpoint = endpoint("count", "/v1/orders/count", COUNT_RULES);
pub const GET: Endpoint = endpoint("get", "/v1/orders/{orderId}", ORDER_RULES);
pub const LIST_FOR_ME: Endpoint = endpoint("listForMe", "/v1/me/orders", ORDER_RULES);
pub const GET_FOR_ME: Endpoint = endpoint("getForMe", "/v1/me/orders/{orderId}", ORDER_RULES);

/// Price breakdown of an order line or total.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePrice {
    pub original: Option<Price>,
    pub sale: Option<Price>,
    pub with_tax: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "_id")]
    pub id: String,
    pub product: Option<NamedRef>,
    pub quantity: Option<Count>,
    #[serde(default)]
    pub price: LinePrice,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShippingFee {
    pub fee: Option<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderTotal {
    #[serde(default)]
    pub price: LinePrice,
    pub shipping: Option<ShippingFee>,
    pub amount: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: Option<String>,
    pub currency: Option<Value>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total: OrderTotal,
    pub paid_at: Option<Time>,
    pub cancelled_at: Option<Time>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub created_at: Option<Time>,
    pub updated_at: Option<Time>,
}

/// `client.order()`.
pub struct OrderApi<'a, T> {
    client: &'a ClayfulClient<T>,
}

impl<'a, T: Transport> OrderApi<'a, T> {
    pub(crate) fn new(client: &'a ClayfulClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self, options: Option<&RequestOptions>) -> Result<Vec<OrderItem>> {
        self.client.dispatch(&LIST, &[], None, options)
    }

    pub fn count(&self, options: Option<&RequestOptions>) -> Result<CountResponse> {
        self.client.dispatch(&COUNT, &[], None, options)
    }

    pub fn get(&self, order_id: &str, options: Option<&RequestOptions>) -> Result<OrderItem> {
        self.client.dispatch(&GET, &[order_id], None, options)
    }

    pub fn list_for_me(&self, options: Option<&RequestOptions>) -> Result<Vec<OrderItem>> {
        self.client.dispatch(&LIST_FOR_ME, &[], None, options)
    }

    pub fn get_for_me(&self, order_id: &str, options: Option<&RequestOptions>) -> Result<OrderItem> {
        self.client.dispatch(&GET_FOR_ME, &[order_id], None, options)
    }
}
