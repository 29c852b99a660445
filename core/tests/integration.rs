//! End-to-end lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives every namespace
//! through a blocking ureq `Transport`. Status interpretation stays in the
//! client: ureq is configured to hand back 4xx/5xx as data.

use clayful_core::resources::customer::{AuthPayload, CustomerPayload};
use clayful_core::resources::product;
use clayful_core::{
    ClayfulClient, ClientSettings, ConfigUpdate, CountResponse, HttpMethod, HttpRequest, HttpResponse,
    RequestOptions, Result, Transport, TransportFailure, TransportFailureKind,
};

struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn failure(error: ureq::Error) -> TransportFailure {
    let kind = match &error {
        ureq::Error::Timeout(_) => TransportFailureKind::Timeout,
        ureq::Error::ConnectionFailed | ureq::Error::HostNotFound | ureq::Error::Io(_) => {
            TransportFailureKind::Connect
        }
        _ => TransportFailureKind::Other,
    };
    TransportFailure::new(kind, error.to_string())
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportFailure> {
        let url = request.url.as_str();
        let body = request.body.as_deref().unwrap_or_default().as_bytes();
        let sent = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), &request.headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url), &request.headers).send(body),
            HttpMethod::Put => with_headers(self.agent.put(url), &request.headers).send(body),
        };
        let mut response = sent.map_err(failure)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str().to_string(), value.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.body_mut().read_to_string().map_err(failure)?;
        Ok(HttpResponse { status, headers, body })
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

#[test]
fn customer_lifecycle() {
    let addr = start_server();
    let client = ClayfulClient::new(ClientSettings::new(format!("http://{addr}")), UreqTransport::new()).unwrap();

    // No client token configured: the server rejects with a structured body.
    let err = client.customer().count(None).unwrap_err();
    assert_eq!(err.kind.code(), "api_error");
    assert_eq!(err.code, "unauthorized-client");
    assert_eq!(err.status, 401);
    assert_eq!((err.model.as_str(), err.method.as_str()), ("Customer", "count"));

    client.configure(ConfigUpdate::default().client("client-token"));
    let count = client.customer().count(None).unwrap();
    assert_eq!(count.count.raw().as_u64(), Some(0));

    // Server-side validation.
    let err = client
        .customer()
        .create(&CustomerPayload { alias: Some("kim".to_string()), ..Default::default() }, None)
        .unwrap_err();
    assert_eq!(err.kind.code(), "api_error");
    assert_eq!(err.code, "invalid_email");
    assert_eq!(err.status, 422);
    assert_eq!(err.validation_field("email"), Some("required"));

    // Create, read, update.
    let payload = CustomerPayload {
        email: Some("kim@example.com".to_string()),
        password: Some("pw".to_string()),
        alias: Some("kim".to_string()),
        ..Default::default()
    };
    let created = client.customer().create(&payload, None).unwrap();
    assert_eq!(created.email.as_deref(), Some("kim@example.com"));
    let created_at = created.created_at.as_ref().unwrap();
    assert!(created_at.raw().ends_with('Z'));
    assert!(!created_at.formatted().is_empty());
    assert!(created_at.ago().is_some());

    let fetched = client.customer().get(&created.id, None).unwrap();
    assert_eq!(fetched.id, created.id);

    let update = CustomerPayload { phone: Some("010-0000".to_string()), ..Default::default() };
    let updated = client.customer().update(&created.id, &update, None).unwrap();
    assert_eq!(updated.phone.as_deref(), Some("010-0000"));
    assert_eq!(updated.alias.as_deref(), Some("kim"));
    assert_eq!(client.customer().list(None).unwrap().len(), 1);

    // Local validation never reaches the server.
    let err = client.customer().authenticate(&AuthPayload::with_email("kim@example.com", ""), None).unwrap_err();
    assert_eq!(err.kind.code(), "validation_failed");
    assert_eq!(err.status, 0);
    assert_eq!(err.validation_field("password"), Some("required"));

    let err = client.customer().get("", None).unwrap_err();
    assert_eq!(err.kind.code(), "validation_failed");

    // Authentication and per-call customer token.
    let auth = client
        .customer()
        .authenticate(&AuthPayload::with_email("kim@example.com", "pw"), None)
        .unwrap();
    assert_eq!(auth.customer, created.id);
    assert_eq!(auth.expires_in, 3600);

    assert!(!client.customer().is_authenticated(None).unwrap().authenticated);
    let as_customer = RequestOptions::new().customer(auth.token.clone());
    assert!(client.customer().is_authenticated(Some(&as_customer)).unwrap().authenticated);

    // Configured customer token applies to every later call.
    client.configure(ConfigUpdate::default().customer(auth.token.clone()));
    let me = client.customer().get_me(None).unwrap();
    assert_eq!(me.id, created.id);
    assert!(me.last_logged_in_at.is_some());

    let me = client
        .customer()
        .update_me(&CustomerPayload { alias: Some("me".to_string()), ..Default::default() }, None)
        .unwrap();
    assert_eq!(me.alias.as_deref(), Some("me"));

    let coupons = client.customer().list_coupons_for_me(None).unwrap();
    assert_eq!(coupons.len(), 1);
    assert_eq!(coupons[0].coupon.id, "welcome");
    assert!(coupons[0].issued_at.is_some());
    let max = coupons[0].coupon.discount.max.as_ref().unwrap();
    assert_eq!(max.raw().as_u64(), Some(5000));
    let count = client.customer().count_coupons_for_me(None).unwrap();
    assert_eq!(count.count.raw().as_u64(), Some(1));

    let cart = client.cart().get_for_me(None).unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total.amount.as_ref().and_then(|a| a.raw().as_u64()), Some(0));
    assert!(client.order().list_for_me(None).unwrap().is_empty());
    let err = client.order().get_for_me("guest-order", None).unwrap_err();
    assert_eq!(err.code, "not-existing-order");
    assert_eq!(err.status, 404);

    // An empty option suppresses the configured customer token.
    let anonymous = RequestOptions::new().customer("");
    let err = client.customer().get_me(Some(&anonymous)).unwrap_err();
    assert_eq!(err.code, "unauthorized-customer");

    // Delete through the session, then by id.
    client.customer().delete_me(None).unwrap();
    let err = client.customer().get_me(None).unwrap_err();
    assert_eq!(err.status, 401);

    let err = client.customer().get(&created.id, None).unwrap_err();
    assert_eq!(err.kind.code(), "api_error");
    assert_eq!(err.code, "not-existing-customer");
    assert_eq!(err.status, 404);

    let err = client.customer().delete(&created.id, None).unwrap_err();
    assert_eq!(err.status, 404);
}

#[test]
fn catalog_reads_are_formatted() {
    let addr = start_server();
    let client = ClayfulClient::new(ClientSettings::new(format!("http://{addr}")), UreqTransport::new()).unwrap();
    client.configure(ConfigUpdate::default().client("client-token"));

    let limited = RequestOptions::new().query("limit", 1);
    let products = client.product().list(Some(&limited)).unwrap();
    assert_eq!(products.len(), 1);

    let shirt = client.product().get("linen-shirt", None).unwrap();
    let original = shirt.price.original.as_ref().unwrap();
    assert_eq!(original.raw().as_u64(), Some(39000));
    assert!(original.formatted().contains("39,000"));
    assert_eq!(shirt.variants.len(), 1);
    assert_eq!(shirt.variants[0].quantity.as_ref().map(|q| q.formatted()), Some("1,500"));

    let err = client.product().get("missing", None).unwrap_err();
    assert_eq!(err.code, "not-existing-product");

    let coupon = client.coupon().get("welcome", None).unwrap();
    assert_eq!(coupon.discount.kind, "percentage");
    assert_eq!(client.coupon().count(None).unwrap().count.raw().as_u64(), Some(1));

    let mut total = None;
    client.call_with(&product::COUNT, &[], None, None, |result: Result<CountResponse>| {
        total = result.ok().and_then(|c| c.count.raw().as_u64());
    });
    assert_eq!(total, Some(2));
}

#[test]
fn orders_and_discounts_are_formatted() {
    let addr = start_server();
    let client = ClayfulClient::new(ClientSettings::new(format!("http://{addr}")), UreqTransport::new()).unwrap();
    client.configure(ConfigUpdate::default().client("client-token"));

    assert_eq!(client.order().list(None).unwrap().len(), 1);
    assert_eq!(client.order().count(None).unwrap().count.raw().as_u64(), Some(1));

    let order = client.order().get("guest-order", None).unwrap();
    let amount = order.total.amount.as_ref().unwrap();
    assert_eq!(amount.raw().as_u64(), Some(72700));
    assert!(amount.formatted().contains("72,700"));
    let fee = order.total.shipping.as_ref().and_then(|s| s.fee.as_ref()).unwrap();
    assert_eq!(fee.raw().as_u64(), Some(2500));
    assert_eq!(order.items[0].quantity.as_ref().map(|q| q.formatted()), Some("2"));
    assert!(order.paid_at.is_some());
    assert!(order.cancelled_at.is_none());

    let err = client.order().get("missing", None).unwrap_err();
    assert_eq!(err.code, "not-existing-order");

    assert_eq!(client.discount().list(None).unwrap().len(), 1);
    assert_eq!(client.discount().count(None).unwrap().count.raw().as_u64(), Some(1));

    let autumn = client.discount().get("autumn", None).unwrap();
    assert_eq!(autumn.discount.kind.as_deref(), Some("fixed"));
    let min = autumn.discount.min.as_ref().unwrap();
    assert_eq!(min.raw().as_u64(), Some(30000));
    assert!(min.formatted().contains("30,000"));
    assert!(autumn.discount.max.is_none());

    let err = client.discount().get("missing", None).unwrap_err();
    assert_eq!(err.kind.code(), "api_error");
    assert_eq!(err.code, "not-existing-discount");
}

#[test]
fn unreachable_server_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = ClayfulClient::new(ClientSettings::new(format!("http://{addr}")), UreqTransport::new()).unwrap();
    client.configure(ConfigUpdate::default().client("client-token"));

    let err = client.product().list(None).unwrap_err();
    assert_eq!(err.kind.code(), "transport_error");
    assert_eq!(err.status, 0);
    assert!(err.is_clayful());
    assert_eq!((err.model.as_str(), err.method.as_str()), ("Product", "list"));
}
