//! In-memory imitation of the Clayful REST surface used by the client core's
//! integration tests.
//!
//! Responses carry raw scalars (plain numbers, RFC 3339 strings) so the
//! client's formatting runs end to end. Failures use the platform's
//! structured body: `{code, message, validation?}`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

/// Seconds a customer session token stays valid.
pub const SESSION_TTL: i64 = 3600;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Name {
    pub first: Option<String>,
    pub last: Option<String>,
    pub full: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub primary: Option<Value>,
    #[serde(default)]
    pub secondaries: Vec<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Name,
    pub address: Address,
    pub connect: bool,
    pub verified: bool,
    pub groups: Vec<String>,
    pub user_id: Option<String>,
    pub alias: Option<String>,
    pub email: Option<String>,
    #[serde(skip)]
    pub password: Option<String>,
    pub avatar: Option<Value>,
    pub gender: Option<String>,
    pub birthdate: Option<String>,
    pub country: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub deactivated_at: Option<String>,
    pub last_logged_in_at: Option<String>,
    pub social: Vec<Value>,
    pub meta: Map<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

/// Create/update body. Every field is optional; updates only touch what
/// is present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub connect: Option<bool>,
    pub verified: Option<bool>,
    pub groups: Option<Vec<String>>,
    pub user_id: Option<String>,
    pub alias: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<Name>,
    pub address: Option<Address>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub meta: Option<Map<String, Value>>,
    pub deactivated: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInput {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Structured error body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    validation: Option<Map<String, Value>>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            validation: None,
        }
    }

    fn field(mut self, field: &str, reason: &str) -> Self {
        self.validation
            .get_or_insert_with(Map::new)
            .insert(field.to_string(), Value::String(reason.to_string()));
        self
    }

    fn not_found(code: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, "resource does not exist")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({"code": self.code, "message": self.message});
        if let Some(validation) = self.validation {
            body["validation"] = Value::Object(validation);
        }
        (self.status, Json(body)).into_response()
    }
}

/// A customer login. Rejected once `expires_at` has passed.
#[derive(Debug, Clone)]
struct Session {
    token: String,
    customer: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Store {
    customers: Vec<Customer>,
    sessions: Vec<Session>,
    products: Vec<Value>,
    coupons: Vec<Value>,
    discounts: Vec<Value>,
    orders: Vec<Value>,
}

impl Store {
    pub fn seeded() -> Self {
        Self {
            products: seed_products(),
            coupons: seed_coupons(),
            discounts: seed_discounts(),
            orders: seed_orders(),
            ..Self::default()
        }
    }

    fn customer_mut(&mut self, id: &str) -> Result<&mut Customer, ApiError> {
        self.customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::not_found("not-existing-customer"))
    }

    fn session(&self, headers: &HeaderMap) -> Option<&str> {
        let token = headers.get("authorization-customer")?.to_str().ok()?;
        let now = Utc::now();
        self.sessions
            .iter()
            .find(|s| s.token == token && s.expires_at > now)
            .map(|s| s.customer.as_str())
    }

    fn start_session(&mut self, customer: String) -> String {
        let now = Utc::now();
        self.sessions.retain(|s| s.expires_at > now);
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.push(Session {
            token: token.clone(),
            customer,
            expires_at: now + Duration::seconds(SESSION_TTL),
        });
        token
    }

    fn current_customer_id(&self, headers: &HeaderMap) -> Result<String, ApiError> {
        self.session(headers).map(str::to_string).ok_or_else(|| {
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                "unauthorized-customer",
                "a valid Authorization-Customer header is required",
            )
        })
    }

    fn email_taken(&self, email: &str, except: Option<&str>) -> bool {
        self.customers
            .iter()
            .any(|c| c.email.as_deref() == Some(email) && Some(c.id.as_str()) != except)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/v1/customers", get(list_customers).post(create_customer))
        .route("/v1/customers/count", get(count_customers))
        .route("/v1/customers/auth", get(is_authenticated).post(authenticate))
        .route(
            "/v1/customers/{customer_id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/v1/me", get(get_me).put(update_me).delete(delete_me))
        .route("/v1/me/coupons", get(list_my_coupons))
        .route("/v1/me/coupons/count", get(count_my_coupons))
        .route("/v1/me/orders", get(list_my_orders))
        .route("/v1/me/orders/{order_id}", get(get_my_order))
        .route("/v1/me/cart", get(get_my_cart))
        .route("/v1/products", get(list_products))
        .route("/v1/products/count", get(count_products))
        .route("/v1/products/{product_id}", get(get_product))
        .route("/v1/coupons", get(list_coupons))
        .route("/v1/coupons/count", get(count_coupons))
        .route("/v1/coupons/{coupon_id}", get(get_coupon))
        .route("/v1/discounts", get(list_discounts))
        .route("/v1/discounts/count", get(count_discounts))
        .route("/v1/discounts/{discount_id}", get(get_discount))
        .route("/v1/orders", get(list_orders))
        .route("/v1/orders/count", get(count_orders))
        .route("/v1/orders/{order_id}", get(get_order))
        .layer(middleware::from_fn(require_client))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Every route needs a client token in `Authorization`.
async fn require_client(request: Request, next: Next) -> Result<Response, ApiError> {
    debug!(method = %request.method(), uri = %request.uri(), "request");
    let present = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty());
    if !present {
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized-client",
            "an Authorization header is required",
        ));
    }
    Ok(next.run(request).await)
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn check_email(email: Option<&str>, required: bool) -> Result<(), ApiError> {
    let invalid = || ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_email", "email is invalid");
    match email {
        None | Some("") if required => Err(invalid().field("email", "required")),
        Some(email) if !email.is_empty() && !email.contains('@') => Err(invalid().field("email", "invalid")),
        _ => Ok(()),
    }
}

fn apply(customer: &mut Customer, input: CustomerInput) {
    macro_rules! set {
        ($($field:ident),*) => {
            $(if let Some(value) = input.$field {
                customer.$field = Some(value);
            })*
        };
    }
    set!(user_id, alias, email, password, mobile, phone, gender, birthdate, country, language, currency, timezone);
    if let Some(connect) = input.connect {
        customer.connect = connect;
    }
    if let Some(verified) = input.verified {
        customer.verified = verified;
    }
    if let Some(groups) = input.groups {
        customer.groups = groups;
    }
    if let Some(name) = input.name {
        customer.name = name;
    }
    if let Some(address) = input.address {
        customer.address = address;
    }
    if let Some(meta) = input.meta {
        customer.meta = meta;
    }
    match input.deactivated {
        Some(true) if customer.deactivated_at.is_none() => customer.deactivated_at = Some(now()),
        Some(false) => customer.deactivated_at = None,
        _ => {}
    }
    customer.updated_at = now();
}

fn limited<T: Clone>(items: &[T], query: &ListQuery) -> Vec<T> {
    let limit = query.limit.unwrap_or(items.len());
    items.iter().take(limit).cloned().collect()
}

async fn list_customers(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Customer>> {
    let store = db.read().await;
    Json(limited(&store.customers, &query))
}

async fn count_customers(State(db): State<Db>) -> Json<Value> {
    Json(json!({"count": db.read().await.customers.len()}))
}

async fn create_customer(
    State(db): State<Db>,
    Json(input): Json<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    check_email(input.email.as_deref(), true)?;
    let mut store = db.write().await;
    if let Some(email) = input.email.as_deref() {
        if store.email_taken(email, None) {
            return Err(ApiError::new(StatusCode::CONFLICT, "duplicated-email", "email is already in use"));
        }
    }

    let created = now();
    let mut customer = Customer {
        id: Uuid::new_v4().simple().to_string(),
        name: Name::default(),
        address: Address::default(),
        connect: false,
        verified: false,
        groups: Vec::new(),
        user_id: None,
        alias: None,
        email: None,
        password: None,
        avatar: None,
        gender: None,
        birthdate: None,
        country: None,
        mobile: None,
        phone: None,
        language: None,
        currency: None,
        timezone: None,
        deactivated_at: None,
        last_logged_in_at: None,
        social: Vec::new(),
        meta: Map::new(),
        created_at: created.clone(),
        updated_at: created,
    };
    apply(&mut customer, input);
    debug!(id = %customer.id, "customer created");
    store.customers.push(customer.clone());
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn get_customer(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Customer>, ApiError> {
    let mut store = db.write().await;
    store.customer_mut(&id).map(|c| Json(c.clone()))
}

async fn update_customer(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>, ApiError> {
    check_email(input.email.as_deref(), false)?;
    let mut store = db.write().await;
    if let Some(email) = input.email.as_deref() {
        if store.email_taken(email, Some(&id)) {
            return Err(ApiError::new(StatusCode::CONFLICT, "duplicated-email", "email is already in use"));
        }
    }
    let customer = store.customer_mut(&id)?;
    apply(customer, input);
    Ok(Json(customer.clone()))
}

async fn delete_customer(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let before = store.customers.len();
    store.customers.retain(|c| c.id != id);
    if store.customers.len() == before {
        return Err(ApiError::not_found("not-existing-customer"));
    }
    store.sessions.retain(|s| s.customer != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn authenticate(State(db): State<Db>, Json(input): Json<AuthInput>) -> Result<Json<Value>, ApiError> {
    let password = input.password.filter(|p| !p.is_empty()).ok_or_else(|| {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid-credentials", "password is required")
            .field("password", "required")
    })?;

    let mut store = db.write().await;
    let customer = store
        .customers
        .iter_mut()
        .find(|c| {
            let by_email = input.email.is_some() && c.email == input.email;
            let by_user_id = input.user_id.is_some() && c.user_id == input.user_id;
            (by_email || by_user_id) && c.password.as_deref() == Some(password.as_str())
        })
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "invalid-credentials", "credentials do not match"))?;

    customer.last_logged_in_at = Some(now());
    let id = customer.id.clone();
    let token = store.start_session(id.clone());
    Ok(Json(json!({"customer": id, "token": token, "expiresIn": SESSION_TTL})))
}

async fn is_authenticated(State(db): State<Db>, headers: HeaderMap) -> Json<Value> {
    let store = db.read().await;
    Json(json!({"authenticated": store.session(&headers).is_some()}))
}

async fn get_me(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Customer>, ApiError> {
    let mut store = db.write().await;
    let id = store.current_customer_id(&headers)?;
    store.customer_mut(&id).map(|c| Json(c.clone()))
}

async fn update_me(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>, ApiError> {
    check_email(input.email.as_deref(), false)?;
    let mut store = db.write().await;
    let id = store.current_customer_id(&headers)?;
    let customer = store.customer_mut(&id)?;
    apply(customer, input);
    Ok(Json(customer.clone()))
}

async fn delete_me(State(db): State<Db>, headers: HeaderMap) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let id = store.current_customer_id(&headers)?;
    store.customers.retain(|c| c.id != id);
    store.sessions.retain(|s| s.customer != id);
    Ok(StatusCode::NO_CONTENT)
}

/// Every customer holds each seeded coupon, issued when the account was created.
fn coupons_for(store: &Store, id: &str) -> Result<Vec<Value>, ApiError> {
    let customer = store
        .customers
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| ApiError::not_found("not-existing-customer"))?;
    Ok(store
        .coupons
        .iter()
        .map(|coupon| {
            let mut coupon = coupon.clone();
            coupon["issuedAt"] = Value::String(customer.created_at.clone());
            coupon
        })
        .collect())
}

async fn list_my_coupons(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let store = db.read().await;
    let id = store.current_customer_id(&headers)?;
    Ok(Json(limited(&coupons_for(&store, &id)?, &query)))
}

async fn count_my_coupons(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let id = store.current_customer_id(&headers)?;
    Ok(Json(json!({"count": coupons_for(&store, &id)?.len()})))
}

fn orders_of<'a>(store: &'a Store, id: &'a str) -> impl Iterator<Item = &'a Value> {
    store.orders.iter().filter(move |order| order["customer"]["_id"] == id)
}

async fn list_my_orders(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let store = db.read().await;
    let id = store.current_customer_id(&headers)?;
    let orders: Vec<Value> = orders_of(&store, &id).cloned().collect();
    Ok(Json(limited(&orders, &query)))
}

async fn get_my_order(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let id = store.current_customer_id(&headers)?;
    let orders: Vec<Value> = orders_of(&store, &id).cloned().collect();
    find_by_id(&orders, &order_id, "not-existing-order")
}

async fn get_my_cart(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    store.current_customer_id(&headers)?;
    Ok(Json(json!({
        "items": [],
        "total": {"price": {"original": 0, "sale": 0, "withTax": 0}, "amount": 0}
    })))
}

fn find_by_id(items: &[Value], id: &str, code: &'static str) -> Result<Json<Value>, ApiError> {
    items
        .iter()
        .find(|item| item["_id"] == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(code))
}

async fn list_products(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Value>> {
    Json(limited(&db.read().await.products, &query))
}

async fn count_products(State(db): State<Db>) -> Json<Value> {
    Json(json!({"count": db.read().await.products.len()}))
}

async fn get_product(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    find_by_id(&db.read().await.products, &id, "not-existing-product")
}

async fn list_coupons(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Value>> {
    Json(limited(&db.read().await.coupons, &query))
}

async fn count_coupons(State(db): State<Db>) -> Json<Value> {
    Json(json!({"count": db.read().await.coupons.len()}))
}

async fn get_coupon(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    find_by_id(&db.read().await.coupons, &id, "not-existing-coupon")
}

async fn list_discounts(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Value>> {
    Json(limited(&db.read().await.discounts, &query))
}

async fn count_discounts(State(db): State<Db>) -> Json<Value> {
    Json(json!({"count": db.read().await.discounts.len()}))
}

async fn get_discount(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    find_by_id(&db.read().await.discounts, &id, "not-existing-discount")
}

async fn list_orders(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Value>> {
    Json(limited(&db.read().await.orders, &query))
}

async fn count_orders(State(db): State<Db>) -> Json<Value> {
    Json(json!({"count": db.read().await.orders.len()}))
}

async fn get_order(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    find_by_id(&db.read().await.orders, &id, "not-existing-order")
}

fn seed_products() -> Vec<Value> {
    vec![
        json!({
            "_id": "linen-shirt",
            "name": "Linen Shirt",
            "summary": "Breathable summer shirt",
            "description": "<p>100% linen.</p>",
            "price": {"original": 39000, "sale": 35100},
            "discount": {"type": "percentage", "value": 10, "discounted": 3900},
            "shipping": {"methods": [{"_id": "parcel", "name": "Parcel", "slug": "parcel"}], "calculation": "bundled"},
            "rating": {"count": 12, "sum": 54, "average": 4.5},
            "bundled": false,
            "available": true,
            "thumbnail": {"_id": "img1", "url": "https://img.example.com/linen.jpg"},
            "totalReview": 12,
            "brand": {"_id": "acme", "name": "Acme", "slug": "acme"},
            "collections": [{"path": [{"_id": "tops", "name": "Tops", "slug": "tops"}]}],
            "catalogs": [],
            "options": [{
                "_id": "size", "name": "Size", "priority": 1,
                "variations": [
                    {"_id": "m", "value": "M", "priority": 1},
                    {"_id": "l", "value": "L", "priority": 2}
                ]
            }],
            "variants": [
                {
                    "_id": "linen-shirt-m",
                    "price": {"original": 39000, "sale": 35100},
                    "discount": {"type": "percentage", "value": 10, "discounted": 3900},
                    "available": true,
                    "thumbnail": null,
                    "quantity": 1500,
                    "sku": "LS-M",
                    "types": [{
                        "option": {"_id": "size", "name": "Size", "priority": 1},
                        "variation": {"_id": "m", "value": "M", "priority": 1}
                    }],
                    "weight": 0.35,
                    "width": null,
                    "height": null,
                    "depth": null
                }
            ],
            "meta": {},
            "type": "tangible",
            "slug": "linen-shirt",
            "createdAt": "2018-09-19T04:22:30.195Z",
            "updatedAt": "2018-09-19T04:22:30.195Z"
        }),
        json!({
            "_id": "gift-card",
            "name": "Gift Card",
            "summary": null,
            "description": null,
            "price": {"original": 50000, "sale": 50000},
            "discount": {"type": null, "value": null, "discounted": 0},
            "rating": {"count": 0, "sum": 0, "average": 0},
            "bundled": false,
            "available": true,
            "totalReview": 0,
            "variants": [],
            "type": "intangible",
            "slug": "gift-card",
            "createdAt": "2019-01-01T00:00:00.000Z",
            "updatedAt": "2019-01-01T00:00:00.000Z"
        }),
    ]
}

fn seed_coupons() -> Vec<Value> {
    vec![json!({
        "_id": "welcome",
        "name": "Welcome 10%",
        "description": "10% off your first order",
        "discount": {"min": null, "max": 5000, "type": "percentage", "value": 10},
        "amount": {"total": null, "used": 0, "left": null, "issued": 1, "unissued": null},
        "category": {"type": "cart"},
        "price": {"min": 20000, "max": null},
        "subscription": {"type": null, "value": null},
        "active": true,
        "only": false,
        "expiresAt": "2099-12-31T15:00:00.000Z",
        "type": "customer",
        "meta": {},
        "slug": "welcome",
        "createdAt": "2018-09-01T00:00:00.000Z",
        "updatedAt": "2018-09-01T00:00:00.000Z"
    })]
}

fn seed_discounts() -> Vec<Value> {
    vec![json!({
        "_id": "autumn",
        "name": "Autumn Sale",
        "description": "5,000 off orders over 30,000",
        "discount": {"type": "fixed", "value": 5000, "min": 30000, "max": null},
        "active": true,
        "expiresAt": "2099-11-30T15:00:00.000Z",
        "slug": "autumn",
        "meta": {},
        "createdAt": "2018-09-01T00:00:00.000Z",
        "updatedAt": "2018-09-01T00:00:00.000Z"
    })]
}

/// One guest order; customers created at runtime start with none.
fn seed_orders() -> Vec<Value> {
    vec![json!({
        "_id": "guest-order",
        "customer": {"_id": "guest", "name": "Guest"},
        "status": "paid",
        "currency": {"base": {"code": "KRW"}},
        "items": [{
            "_id": "guest-order-line",
            "product": {"_id": "linen-shirt", "name": "Linen Shirt", "slug": "linen-shirt"},
            "quantity": 2,
            "price": {"original": 78000, "sale": 70200, "withTax": 70200}
        }],
        "total": {
            "price": {"original": 78000, "sale": 70200, "withTax": 70200},
            "shipping": {"fee": 2500},
            "amount": 72700
        },
        "paidAt": "2018-09-19T05:00:00.000Z",
        "cancelledAt": null,
        "meta": {},
        "createdAt": "2018-09-19T04:50:00.000Z",
        "updatedAt": "2018-09-19T05:00:00.000Z"
    })]
}
