//! Discount namespace.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Count, CountResponse, Price, Time, COUNT_RULES};
use crate::client::{ClayfulClient, Endpoint};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::fields::{count, price, time, FieldRule};
use crate::http::{HttpMethod, Transport};

const DISCOUNT_RULES: &[FieldRule] = &[
    count("discount.value"),
    price("discount.min"),
    price("discount.max"),
    time("expiresAt"),
    time("createdAt"),
    time("updatedAt"),
];

pub const LIST: Endpoint = Endpoint {
    model: "Discount",
    method: "list",
    http_method: HttpMethod::Get,
    path: "/v1/discounts",
    rules: DISCOUNT_RULES,
};

pub const COUNT: Endpoint = Endpoint {
    model: "Discount",
    method: "count",
    http_method: HttpMethod::Get,
    path: "/v1/discounts/count",
    rules: COUNT_RULES,
};

pub const GET: Endpoint = Endpoint {
    model: "Discount",
    method: "get",
    http_method: HttpMethod::Get,
    path: "/v1/discounts/{discountId}",
    rules: DISCOUNT_RULES,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DiscountRule {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<Count>,
    pub min: Option<Price>,
    pub max: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub discount: DiscountRule,
    #[serde(default)]
    pub active: bool,
    pub expires_at: Option<Time>,
    pub slug: Option<String>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub created_at: Option<Time>,
    pub updated_at: Option<Time>,
}

/// `client.discount()`.
pub struct DiscountApi<'a, T> {
    client: &'a ClayfulClient<T>,
}

impl<'a, T: Transport> DiscountApi<'a, T> {
    pub(crate) fn new(client: &'a ClayfulClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self, options: Option<&RequestOptions>) -> Result<Vec<DiscountItem>> {
        self.client.dispatch(&LIST, &[], None, options)
    }

    pub fn count(&self, options: Option<&RequestOptions>) -> Result<CountResponse> {
        self.client.dispatch(&COUNT, &[], None, options)
    }

    pub fn get(&self, discount_id: &str, options: Option<&RequestOptions>) -> Result<DiscountItem> {
        self.client.dispatch(&GET, &[discount_id], None, options)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::fields::format_fields;
    use crate::locale::LocaleContext;

    #[test]
    fn discount_list_formats_each_element() {
        let mut value = json!([
            {
                "_id": "d1",
                "name": "Summer",
                "discount": {"type": "fixed", "value": 3000, "min": 10000, "max": null},
                "active": true,
                "createdAt": "2018-09-19T00:00:00Z"
            },
            {"_id": "d2", "name": "Empty"}
        ]);
        let now = Utc.with_ymd_and_hms(2018, 9, 19, 2, 0, 0).unwrap();
        format_fields(&mut value, DISCOUNT_RULES, &LocaleContext::default(), now);
        let items: Vec<DiscountItem> = serde_json::from_value(value).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].discount.min.as_ref().map(|p| p.formatted()), Some("10,000원"));
        assert_eq!(items[0].discount.value.as_ref().map(|v| v.formatted()), Some("3,000"));
        assert!(items[0].discount.max.is_none());
        assert_eq!(items[0].created_at.as_ref().and_then(|t| t.ago()), Some("2 hours ago"));
        assert_eq!(items[1].discount, DiscountRule::default());
        assert!(!items[1].active);
    }
}
