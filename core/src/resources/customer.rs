//! Customer namespace: admin CRUD, authentication, and the `/v1/me` routes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::coupon::CouponItem;
use super::{CountResponse, ImageRef, Time, COUNT_RULES};
use crate::client::{ClayfulClient, Endpoint, Payload};
use crate::config::RequestOptions;
use crate::error::Result;
use crate::fields::{count, price, time, FieldRule};
use crate::http::{HttpMethod, Transport};

const MODEL: &str = "Customer";

const CUSTOMER_RULES: &[FieldRule] = &[
    time("deactivatedAt"),
    time("lastLoggedInAt"),
    time("createdAt"),
    time("updatedAt"),
];

const USER_COUPON_RULES: &[FieldRule] = &[
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
    time("issuedAt"),
];

const fn endpoint(method: &'static str, http_method: HttpMethod, path: &'static str, rules: &'static [FieldRule]) -> Endpoint {
    Endpoint {
        model: MODEL,
        method,
        http_method,
        path,
        rules,
    }
}

pub const LIST: Endpoint = endpoint("list", HttpMethod::Get, "/v1/customers", CUSTOMER_RULES);
pub const COUNT: Endpoint = endpoint("count", HttpMethod::Get, "/v1/customers/count", COUNT_RULES);
pub const GET: Endpoint = endpoint("get", HttpMethod::Get, "/v1/customers/{customerId}", CUSTOMER_RULES);
pub const CREATE: Endpoint = endpoint("create", HttpMethod::Post, "/v1/customers", CUSTOMER_RULES);
pub const UPDATE: Endpoint = endpoint("update", HttpMethod::Put, "/v1/customers/{customerId}", CUSTOMER_RULES);
pub const DELETE: Endpoint = endpoint("delete", HttpMethod::Delete, "/v1/customers/{customerId}", &[]);
pub const AUTHENTICATE: Endpoint = endpoint("authenticate", HttpMethod::Post, "/v1/customers/auth", &[]);
pub const IS_AUTHENTICATED: Endpoint = endpoint("isAuthenticated", HttpMethod::Get, "/v1/customers/auth", &[]);
pub const GET_ME: Endpoint = endpoint("getMe", HttpMethod::Get, "/v1/me", CUSTOMER_RULES);
pub const UPDATE_ME: Endpoint = endpoint("updateMe", HttpMethod::Put, "/v1/me", CUSTOMER_RULES);
pub const DELETE_ME: Endpoint = endpoint("deleteMe", HttpMethod::Delete, "/v1/me", &[]);
pub const LIST_COUPONS_FOR_ME: Endpoint =
    endpoint("listCouponsForMe", HttpMethod::Get, "/v1/me/coupons", USER_COUPON_RULES);
pub const COUNT_COUPONS_FOR_ME: Endpoint =
    endpoint("countCouponsForMe", HttpMethod::Get, "/v1/me/coupons/count", COUNT_RULES);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<AddressEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondaries: Vec<AddressEntry>,
}

/// Body of `create`, `update` and `updateMe`. Unset fields are omitted so an
/// update only touches what it names. `userId` is always sent, as `null`
/// when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CustomerAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<bool>,
}

impl Payload for CustomerPayload {
    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Credentials for `authenticate`: a password plus either `userId` or `email`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AuthPayload {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn with_user_id(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl Payload for AuthPayload {
    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.user_id) && is_blank(&self.email) {
            missing.push("userId");
        }
        if is_blank(&self.password) {
            missing.push("password");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Id of the authenticated customer.
    pub customer: String,
    /// Value for `Authorization-Customer` on later calls.
    pub token: String,
    /// Seconds until `token` expires.
    pub expires_in: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Authenticated {
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: PersonName,
    #[serde(default)]
    pub address: CustomerAddress,
    #[serde(default)]
    pub connect: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub groups: Vec<Value>,
    pub user_id: Option<String>,
    pub alias: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<ImageRef>,
    pub gender: Option<String>,
    pub birthdate: Option<String>,
    pub country: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub deactivated_at: Option<Time>,
    pub last_logged_in_at: Option<Time>,
    #[serde(default)]
    pub social: Vec<Value>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub created_at: Option<Time>,
    pub updated_at: Option<Time>,
}

/// A coupon issued to the current customer: the coupon's own fields plus
/// `issuedAt` on the same object.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCouponItem {
    pub coupon: CouponItem,
    pub issued_at: Option<Time>,
}

// Decoded through `Value` rather than `#[serde(flatten)]`, which buffers
// numbers in a form `arbitrary_precision` numbers cannot be read back from.
impl<'de> Deserialize<'de> for UserCouponItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        let issued_at = value
            .as_object_mut()
            .and_then(|object| object.remove("issuedAt"))
            .unwrap_or(Value::Null);
        let issued_at = Option::<Time>::deserialize(issued_at).map_err(D::Error::custom)?;
        let coupon = CouponItem::deserialize(value).map_err(D::Error::custom)?;
        Ok(Self { coupon, issued_at })
    }
}

/// `client.customer()`.
pub struct CustomerApi<'a, T> {
    client: &'a ClayfulClient<T>,
}

impl<'a, T: Transport> CustomerApi<'a, T> {
    pub(crate) fn new(client: &'a ClayfulClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self, options: Option<&RequestOptions>) -> Result<Vec<CustomerItem>> {
        self.client.dispatch(&LIST, &[], None, options)
    }

    pub fn count(&self, options: Option<&RequestOptions>) -> Result<CountResponse> {
        self.client.dispatch(&COUNT, &[], None, options)
    }

    pub fn get(&self, customer_id: &str, options: Option<&RequestOptions>) -> Result<CustomerItem> {
        self.client.dispatch(&GET, &[customer_id], None, options)
    }

    pub fn create(&self, payload: &CustomerPayload, options: Option<&RequestOptions>) -> Result<CustomerItem> {
        self.client.dispatch(&CREATE, &[], Some(payload), options)
    }

    pub fn update(
        &self,
        customer_id: &str,
        payload: &CustomerPayload,
        options: Option<&RequestOptions>,
    ) -> Result<CustomerItem> {
        self.client.dispatch(&UPDATE, &[customer_id], Some(payload), options)
    }

    pub fn delete(&self, customer_id: &str, options: Option<&RequestOptions>) -> Result<()> {
        self.client.dispatch(&DELETE, &[customer_id], None, options)
    }

    pub fn authenticate(&self, payload: &AuthPayload, options: Option<&RequestOptions>) -> Result<AuthResponse> {
        self.client.dispatch(&AUTHENTICATE, &[], Some(payload), options)
    }

    pub fn is_authenticated(&self, options: Option<&RequestOptions>) -> Result<Authenticated> {
        self.client.dispatch(&IS_AUTHENTICATED, &[], None, options)
    }

    pub fn get_me(&self, options: Option<&RequestOptions>) -> Result<CustomerItem> {
        self.client.dispatch(&GET_ME, &[], None, options)
    }

    pub fn update_me(&self, payload: &CustomerPayload, options: Option<&RequestOptions>) -> Result<CustomerItem> {
        self.client.dispatch(&UPDATE_ME, &[], Some(payload), options)
    }

    pub fn delete_me(&self, options: Option<&RequestOptions>) -> Result<()> {
        self.client.dispatch(&DELETE_ME, &[], None, options)
    }

    pub fn list_coupons_for_me(&self, options: Option<&RequestOptions>) -> Result<Vec<UserCouponItem>> {
        self.client.dispatch(&LIST_COUPONS_FOR_ME, &[], None, options)
    }

    pub fn count_coupons_for_me(&self, options: Option<&RequestOptions>) -> Result<CountResponse> {
        self.client.dispatch(&COUNT_COUPONS_FOR_ME, &[], None, options)
    }
}
