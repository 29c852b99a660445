//! Resource namespace dispatcher.
//!
//! # Design
//! `ClayfulClient` owns three things: the static `ClientSettings`, the
//! mutable `ClientConfig` behind a lock, and the `Transport` that performs
//! the round-trip. Every call is split into `prepare` (validate, resolve
//! headers, build the `HttpRequest`) and `parse` (format or normalize the
//! `HttpResponse`). `dispatch` runs both around one `Transport::send`; hosts
//! that own their I/O loop can call the two halves themselves.
//!
//! The config lock is only held long enough to clone a snapshot, so a
//! `configure` racing with in-flight calls never tears a header set.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::{ClientConfig, ConfigUpdate, RequestOptions};
use crate::error::{normalize, ClayfulError, ErrorContext, Failure, Result};
use crate::fields::{format_fields, FieldRule};
use crate::headers::{resolve, HeaderName, HeaderSet};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportFailure};
use crate::locale::LocaleContext;
use crate::resources::{CartApi, CouponApi, CustomerApi, DiscountApi, OrderApi, ProductApi};
use crate::settings::{ClientSettings, SettingsError};

/// One operation of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub model: &'static str,
    pub method: &'static str,
    pub http_method: HttpMethod,
    /// Path below `base_url`; `{name}` segments are filled from the call's ids.
    pub path: &'static str,
    pub rules: &'static [FieldRule],
}

impl Endpoint {
    pub fn context(&self) -> ErrorContext {
        ErrorContext::new(self.model, self.method)
    }

    /// Names of the `{name}` placeholders, in order.
    pub fn params(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter_map(placeholder)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Request bodies. `missing_fields` lets a payload fail locally before any
/// request is sent.
pub trait Payload {
    fn to_json(&self) -> serde_json::Result<Value>;

    fn missing_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl Payload for Value {
    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(self.clone())
    }
}

/// Output of `prepare`: the request to send and the locale its response
/// must be rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub request: HttpRequest,
    pub locale: LocaleContext,
    pub headers: HeaderSet,
}

pub struct ClayfulClient<T> {
    settings: ClientSettings,
    base_url: Url,
    config: RwLock<ClientConfig>,
    transport: T,
}

impl<T: Transport> ClayfulClient<T> {
    pub fn new(settings: ClientSettings, transport: T) -> std::result::Result<Self, SettingsError> {
        settings.validate()?;
        let base_url = settings.parsed_base_url()?;
        Ok(Self {
            settings,
            base_url,
            config: RwLock::new(ClientConfig::default()),
            transport,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Update identity defaults. Fields absent from `update` keep their value.
    pub fn configure(&self, update: ConfigUpdate) {
        self.config.write().apply(update);
    }

    pub fn config_snapshot(&self) -> ClientConfig {
        self.config.read().clone()
    }

    pub fn customer(&self) -> CustomerApi<'_, T> {
        CustomerApi::new(self)
    }

    pub fn product(&self) -> ProductApi<'_, T> {
        ProductApi::new(self)
    }

    pub fn coupon(&self) -> CouponApi<'_, T> {
        CouponApi::new(self)
    }

    pub fn discount(&self) -> DiscountApi<'_, T> {
        DiscountApi::new(self)
    }

    pub fn order(&self) -> OrderApi<'_, T> {
        OrderApi::new(self)
    }

    pub fn cart(&self) -> CartApi<'_, T> {
        CartApi::new(self)
    }

    /// Resolve headers for one call without building a request.
    pub fn resolve_headers(&self, options: Option<&RequestOptions>) -> HeaderSet {
        let config = self.config_snapshot();
        resolve(&config, options, self.settings.production)
    }

    /// Validate arguments and build the request for `endpoint`.
    pub fn prepare(
        &self,
        endpoint: &Endpoint,
        ids: &[&str],
        payload: Option<&dyn Payload>,
        options: Option<&RequestOptions>,
    ) -> Result<PreparedRequest> {
        self.try_prepare(endpoint, ids, payload, options)
            .map_err(|failure| fail(endpoint, failure))
    }

    fn try_prepare(
        &self,
        endpoint: &Endpoint,
        ids: &[&str],
        payload: Option<&dyn Payload>,
        options: Option<&RequestOptions>,
    ) -> std::result::Result<PreparedRequest, Failure> {
        let missing: Vec<&str> = endpoint
            .params()
            .enumerate()
            .filter(|(index, _)| ids.get(*index).map_or(true, |id| id.is_empty()))
            .map(|(_, name)| name)
            .collect();
        if !missing.is_empty() {
            return Err(Failure::missing(missing));
        }
        // Dot segments would be normalized away and hit a different route.
        let invalid: Vec<&str> = endpoint
            .params()
            .zip(ids)
            .filter(|&(_, id)| *id == "." || *id == "..")
            .map(|(name, _)| name)
            .collect();
        if !invalid.is_empty() {
            return Err(Failure::invalid(invalid));
        }

        let body = match payload {
            Some(payload) => {
                let missing = payload.missing_fields();
                if !missing.is_empty() {
                    return Err(Failure::missing(missing));
                }
                let json = payload
                    .to_json()
                    .map_err(|e| Failure::Encode(format!("payload could not be serialized: {e}")))?;
                Some(json.to_string())
            }
            None => None,
        };

        let url = self.build_url(endpoint, ids, options.map_or(&[][..], |o| &o.query[..]))?;
        let headers = self.resolve_headers(options);
        let locale = LocaleContext::from_headers(&headers, &self.settings);

        let mut pairs = headers.to_pairs();
        if let Some(options) = options {
            pairs.extend(
                options
                    .headers
                    .iter()
                    .filter(|(name, _)| HeaderName::from_wire(name).is_none())
                    .cloned(),
            );
        }
        if body.is_some() {
            pairs.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method: endpoint.http_method,
            url: url.to_string(),
            headers: pairs,
            body,
        };
        debug!(url = %request.url, headers = request.headers.len(), "request built");
        Ok(PreparedRequest {
            request,
            locale,
            headers,
        })
    }

    fn build_url(&self, endpoint: &Endpoint, ids: &[&str], query: &[(String, String)]) -> std::result::Result<Url, Failure> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Failure::Encode(format!("{} cannot carry a path", self.base_url)))?;
            segments.pop_if_empty();
            let mut ids = ids.iter();
            for segment in endpoint.path.trim_start_matches('/').split('/') {
                match placeholder(segment) {
                    Some(_) => {
                        segments.push(ids.next().copied().unwrap_or_default());
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Turn the transport's outcome into the typed result.
    pub fn parse<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        locale: &LocaleContext,
        outcome: std::result::Result<HttpResponse, TransportFailure>,
    ) -> Result<R> {
        self.parse_at(endpoint, locale, outcome, Utc::now())
    }

    /// `parse` with an explicit instant for relative times.
    pub fn parse_at<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        locale: &LocaleContext,
        outcome: std::result::Result<HttpResponse, TransportFailure>,
        now: DateTime<Utc>,
    ) -> Result<R> {
        let response = match outcome {
            Ok(response) if response.is_success() => response,
            Ok(response) => return Err(fail(endpoint, Failure::Http(response))),
            Err(transport) => return Err(fail(endpoint, Failure::Transport(transport))),
        };

        let decoded = if response.body.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str::<Value>(&response.body)
        };
        let mut value = match decoded {
            Ok(value) => value,
            Err(e) => {
                return Err(fail(
                    endpoint,
                    Failure::Decode {
                        response,
                        message: e.to_string(),
                    },
                ))
            }
        };

        format_fields(&mut value, endpoint.rules, locale, now);
        match serde_json::from_value::<R>(value) {
            Ok(result) => {
                debug!(status = response.status, "request succeeded");
                Ok(result)
            }
            Err(e) => Err(fail(
                endpoint,
                Failure::Decode {
                    response,
                    message: e.to_string(),
                },
            )),
        }
    }

    /// Prepare, send and parse one call.
    #[instrument(
        skip_all,
        fields(model = endpoint.model, method = endpoint.method, http = %endpoint.http_method)
    )]
    pub fn dispatch<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        ids: &[&str],
        payload: Option<&dyn Payload>,
        options: Option<&RequestOptions>,
    ) -> Result<R> {
        let prepared = self.prepare(endpoint, ids, payload, options)?;
        let outcome = self.transport.send(&prepared.request);
        self.parse(endpoint, &prepared.locale, outcome)
    }

    /// `dispatch`, completing through `callback`. The callback runs exactly
    /// once, on the calling thread, with either the result or the error.
    pub fn call_with<R, F>(
        &self,
        endpoint: &Endpoint,
        ids: &[&str],
        payload: Option<&dyn Payload>,
        options: Option<&RequestOptions>,
        callback: F,
    ) where
        R: DeserializeOwned,
        F: FnOnce(Result<R>),
    {
        callback(self.dispatch(endpoint, ids, payload, options));
    }
}

fn fail(endpoint: &Endpoint, failure: Failure) -> ClayfulError {
    let error = normalize(failure, endpoint.context());
    warn!(
        model = endpoint.model,
        method = endpoint.method,
        code = %error.code,
        status = error.status,
        "call failed"
    );
    error
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::fields::{count, time};
    use crate::http::TransportFailureKind;

    const GET_THING: Endpoint = Endpoint {
        model: "Thing",
        method: "get",
        http_method: HttpMethod::Get,
        path: "/v1/things/{thingId}",
        rules: &[count("stock"), time("createdAt")],
    };

    const CREATE_THING: Endpoint = Endpoint {
        model: "Thing",
        method: "create",
        http_method: HttpMethod::Post,
        path: "/v1/things",
        rules: &[],
    };

    /// Replies with a canned outcome and records every request.
    struct Canned {
        outcome: std::result::Result<HttpResponse, TransportFailure>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Canned {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                outcome: Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(failure: TransportFailure) -> Self {
            Self {
                outcome: Err(failure),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for Canned {
        fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportFailure> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn client(transport: Canned) -> ClayfulClient<Canned> {
        ClayfulClient::new(ClientSettings::new("https://api.example.com/"), transport).unwrap()
    }

    struct Named {
        name: Option<String>,
    }

    impl Payload for Named {
        fn to_json(&self) -> serde_json::Result<Value> {
            Ok(json!({ "name": self.name }))
        }

        fn missing_fields(&self) -> Vec<&'static str> {
            if self.name.is_none() {
                vec!["name"]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn configured_client_sent_and_customer_omitted() {
        let client = client(Canned::ok(200, "{}"));
        client.configure(ConfigUpdate::default().client("c1"));
        let _: Value = client.dispatch(&GET_THING, &["x"], None, None).unwrap();

        let request = &client.transport().requests()[0];
        assert_eq!(request.header("Authorization"), Some("c1"));
        assert_eq!(request.header("Authorization-Customer"), None);
        assert_eq!(request.url, "https://api.example.com/v1/things/x");
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_none());
    }

    #[test]
    fn per_call_customer_overrides_configured_one() {
        let client = client(Canned::ok(200, "{}"));
        client.configure(ConfigUpdate::default().client("c1").customer("cu1"));
        let options = RequestOptions::new().customer("cu2");
        let _: Value = client.dispatch(&GET_THING, &["x"], None, Some(&options)).unwrap();
        assert_eq!(
            client.transport().requests()[0].header("Authorization-Customer"),
            Some("cu2")
        );
    }

    #[test]
    fn ids_and_query_are_encoded() {
        let client = client(Canned::ok(200, "{}"));
        let options = RequestOptions::new().query("q", "a b&c").query("limit", 5);
        let prepared = client.prepare(&GET_THING, &["a/b"], None, Some(&options)).unwrap();
        assert_eq!(
            prepared.request.url,
            "https://api.example.com/v1/things/a%2Fb?q=a+b%26c&limit=5"
        );
    }

    #[test]
    fn extra_headers_never_replace_fixed_ones() {
        let client = client(Canned::ok(200, "{}"));
        client.configure(ConfigUpdate::default().client("c1"));
        let options = RequestOptions::new()
            .header("X-Trace", "t-1")
            .header("authorization", "spoofed");
        let prepared = client.prepare(&GET_THING, &["x"], None, Some(&options)).unwrap();
        assert_eq!(prepared.request.header("X-Trace"), Some("t-1"));
        let auth: Vec<_> = prepared
            .request
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0].1, "c1");
    }

    #[test]
    fn empty_id_fails_locally_without_sending() {
        let client = client(Canned::ok(200, "{}"));
        let err = client.dispatch::<Value>(&GET_THING, &[""], None, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValidationFailed);
        assert_eq!(err.status, 0);
        assert_eq!(err.validation_field("thingId"), Some("required"));
        assert!(err.is_clayful());
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn dot_segment_ids_fail_locally() {
        let client = client(Canned::ok(200, "{}"));
        for id in [".", ".."] {
            let err = client.prepare(&GET_THING, &[id], None, None).unwrap_err();
            assert_eq!(err.kind, ErrorKind::ValidationFailed);
            assert_eq!(err.validation_field("thingId"), Some("invalid"));
        }
        let prepared = client.prepare(&GET_THING, &["..x"], None, None).unwrap();
        assert_eq!(prepared.request.url, "https://api.example.com/v1/things/..x");
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn ids_are_percent_encoded_as_one_segment() {
        let client = client(Canned::ok(200, "{}"));
        let prepared = client.prepare(&GET_THING, &["a/b c"], None, None).unwrap();
        assert_eq!(prepared.request.url, "https://api.example.com/v1/things/a%2Fb%20c");
    }

    #[test]
    fn missing_payload_field_fails_locally() {
        let client = client(Canned::ok(201, "{}"));
        let payload = Named { name: None };
        let err = client
            .dispatch::<Value>(&CREATE_THING, &[], Some(&payload), None)
            .unwrap_err();
        assert_eq!(err.code, "validation_failed");
        assert_eq!(err.validation_field("name"), Some("required"));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn payload_is_sent_as_json() {
        let client = client(Canned::ok(201, r#"{"name":"n"}"#));
        let payload = Named {
            name: Some("n".to_string()),
        };
        let created: Value = client.dispatch(&CREATE_THING, &[], Some(&payload), None).unwrap();
        assert_eq!(created["name"], "n");
        let request = &client.transport().requests()[0];
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"n"}"#));
    }

    #[test]
    fn structured_error_response_is_normalized() {
        let body = r#"{"code":"invalid_email","validation":{"email":"required"}}"#;
        let client = client(Canned::ok(422, body));
        let err = client.dispatch::<Value>(&GET_THING, &["x"], None, None).unwrap_err();
        assert_eq!(err.code, "invalid_email");
        assert_eq!(err.status, 422);
        assert_eq!(err.validation_field("email"), Some("required"));
        assert_eq!(err.model, "Thing");
        assert_eq!(err.method, "get");
    }

    #[test]
    fn transport_timeout_is_normalized() {
        let client = client(Canned::failing(TransportFailure::timeout("30s")));
        let err = client.dispatch::<Value>(&GET_THING, &["x"], None, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TransportError);
        assert_eq!(err.status, 0);
    }

    #[test]
    fn cancellation_is_an_ordinary_failure() {
        let client = client(Canned::failing(TransportFailure::new(
            TransportFailureKind::Cancelled,
            "aborted",
        )));
        let err = client.dispatch::<Value>(&GET_THING, &["x"], None, None).unwrap_err();
        assert_eq!(err.code, "transport_error");
    }

    #[test]
    fn body_of_wrong_shape_is_unknown_error() {
        let client = client(Canned::ok(200, "not json"));
        let err = client.dispatch::<Value>(&GET_THING, &["x"], None, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownError);
        assert_eq!(err.status, 200);
    }

    #[test]
    fn success_fields_are_formatted() {
        let client = client(Canned::ok(
            200,
            r#"{"stock":2500,"createdAt":"2018-09-19T04:22:30Z","note":"kept"}"#,
        ));
        let prepared = client.prepare(&GET_THING, &["x"], None, None).unwrap();
        let outcome = client.transport().send(&prepared.request);
        let now = Utc.with_ymd_and_hms(2018, 9, 19, 6, 22, 30).unwrap();
        let value: Value = client.parse_at(&GET_THING, &prepared.locale, outcome, now).unwrap();
        assert_eq!(value["stock"]["formatted"], "2,500");
        assert_eq!(value["createdAt"]["ago"], "2 hours ago");
        assert_eq!(value["note"], "kept");
    }

    #[test]
    fn raw_number_text_survives_dispatch() {
        let client = client(Canned::ok(200, r#"{"stock":1.50}"#));
        let value: Value = client.dispatch(&GET_THING, &["x"], None, None).unwrap();
        assert_eq!(value["stock"]["raw"].to_string(), "1.50");
        assert_eq!(value["stock"]["formatted"], "1.5");
    }

    #[test]
    fn server_sent_envelope_is_rendered_again() {
        let body = r#"{"stock":{"raw":2500,"formatted":"lies","converted":"lies"}}"#;
        let client = client(Canned::ok(200, body));
        let value: Value = client.dispatch(&GET_THING, &["x"], None, None).unwrap();
        assert_eq!(value["stock"]["formatted"], "2,500");
        assert_eq!(value["stock"]["converted"], "2,500");
    }

    #[test]
    fn empty_success_body_decodes_as_unit() {
        let client = client(Canned::ok(204, ""));
        let result: Result<()> = client.dispatch(&GET_THING, &["x"], None, None);
        assert!(result.is_ok());
    }

    #[test]
    fn callback_runs_exactly_once_on_each_channel() {
        let client = client(Canned::ok(200, "{}"));
        let mut calls = Vec::new();
        client.call_with::<Value, _>(&GET_THING, &["x"], None, None, |r| calls.push(r.is_ok()));
        client.call_with::<Value, _>(&GET_THING, &[], None, None, |r| calls.push(r.is_ok()));
        assert_eq!(calls, vec![true, false]);
    }

    #[test]
    fn configure_after_prepare_does_not_touch_prepared_headers() {
        let client = client(Canned::ok(200, "{}"));
        client.configure(ConfigUpdate::default().client("c1"));
        let prepared = client.prepare(&GET_THING, &["x"], None, None).unwrap();
        client.configure(ConfigUpdate::default().client("c2"));
        assert_eq!(prepared.request.header("Authorization"), Some("c1"));
        assert_eq!(client.config_snapshot().client.as_deref(), Some("c2"));
    }

    #[test]
    fn locale_follows_request_options() {
        let client = client(Canned::ok(200, "{}"));
        let options = RequestOptions::new().language("ko").currency("USD");
        let prepared = client.prepare(&GET_THING, &["x"], None, Some(&options)).unwrap();
        assert_eq!(prepared.locale.language, crate::locale::Language::Ko);
        assert_eq!(prepared.locale.currency, "USD");
        assert_eq!(prepared.request.header("Accept-Language"), Some("ko"));
    }

    #[test]
    fn base_url_with_path_prefix_is_kept() {
        let client = ClayfulClient::new(ClientSettings::new("http://localhost:8080/api"), Canned::ok(200, "{}")).unwrap();
        let prepared = client.prepare(&CREATE_THING, &[], None, None).unwrap();
        assert_eq!(prepared.request.url, "http://localhost:8080/api/v1/things");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ClayfulClient::new(ClientSettings::new("mailto:x@y.z"), Canned::ok(200, "{}"));
        assert!(matches!(result, Err(SettingsError::BaseUrl { .. })));
    }
}
