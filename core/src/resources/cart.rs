//! Cart namespace. The cart only exists for the current customer.

use serde::Deserialize;

use super::order::LinePrice;
use super::{Count, NamedRef, Price};
use crate::client::{ClayfulClient, Endpoint};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::fields::{count, price, FieldRule};
use crate::http::{HttpMethod, Transport};

const CART_RULES: &[FieldRule] = &[
    price("items.*.price.original"),
    price("items.*.price.sale"),
    price("items.*.price.withTax"),
    count("items.*.quantity"),
    price("total.price.original"),
    price("total.price.sale"),
    price("total.price.withTax"),
    price("total.amount"),
];

pub const GET_FOR_ME: Endpoint = Endpoint {
    model: "Cart",
    method: "getForMe",
    http_method: HttpMethod::Get,
    path: "/v1/me/cart",
    rules: CART_RULES,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartLine {
    #[serde(rename = "_id")]
    pub id: String,
    pub product: Option<NamedRef>,
    pub variant: Option<String>,
    pub quantity: Option<Count>,
    #[serde(default)]
    pub price: LinePrice,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CartTotal {
    #[serde(default)]
    pub price: LinePrice,
    pub amount: Option<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total: CartTotal,
}

/// `client.cart()`.
pub struct CartApi<'a, T> {
    client: &'a ClayfulClient<T>,
}

impl<'a, T: Transport> CartApi<'a, T> {
    pub(crate) fn new(client: &'a ClayfulClient<T>) -> Self {
        Self { client }
    }

    pub fn get_for_me(&self, options: Option<&RequestOptions>) -> Result<Cart> {
        self.client.dispatch(&GET_FOR_ME, &[], None, options)
    }
}
