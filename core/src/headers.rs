//! Request configuration resolver.
//!
//! Merges a `ClientConfig` snapshot with optional per-call `RequestOptions`
//! into the seven fixed outbound headers. Pure: no I/O, no validation of
//! values, only presence and precedence.

use std::collections::BTreeMap;

use crate::config::{ClientConfig, RequestOptions};

/// The fixed header keys the platform understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderName {
    AcceptLanguage,
    AcceptCurrency,
    AcceptTimeZone,
    Authorization,
    AuthorizationCustomer,
    RecaptchaResponse,
    AcceptDebugLanguage,
}

impl HeaderName {
    pub const ALL: [HeaderName; 7] = [
        HeaderName::AcceptLanguage,
        HeaderName::AcceptCurrency,
        HeaderName::AcceptTimeZone,
        HeaderName::Authorization,
        HeaderName::AuthorizationCustomer,
        HeaderName::RecaptchaResponse,
        HeaderName::AcceptDebugLanguage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::AcceptLanguage => "Accept-Language",
            HeaderName::AcceptCurrency => "Accept-Currency",
            HeaderName::AcceptTimeZone => "Accept-Time-Zone",
            HeaderName::Authorization => "Authorization",
            HeaderName::AuthorizationCustomer => "Authorization-Customer",
            HeaderName::RecaptchaResponse => "reCAPTCHA-Response",
            HeaderName::AcceptDebugLanguage => "Accept-Debug-Language",
        }
    }

    pub fn from_wire(name: &str) -> Option<HeaderName> {
        HeaderName::ALL
            .into_iter()
            .find(|header| header.as_str().eq_ignore_ascii_case(name))
    }
}

/// Resolved outbound headers. Only non-empty values are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    values: BTreeMap<HeaderName, String>,
}

impl HeaderSet {
    fn set(&mut self, name: HeaderName, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.values.insert(name, value.to_string());
        }
    }

    pub fn get(&self, name: HeaderName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    pub fn contains(&self, name: HeaderName) -> bool {
        self.values.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Wire form, in `HeaderName::ALL` order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(name, value)| (name.as_str().to_string(), value.to_string()))
            .collect()
    }
}

/// `options[K] ?? config[K]`: an option that is present wins even when empty.
fn pick<'a>(option: Option<&'a String>, config: Option<&'a String>) -> Option<&'a str> {
    option.or(config).map(String::as_str)
}

/// Build the header set for one call.
///
/// `production` gates the config-level debug language; a per-call
/// `debug_language` is always honoured.
pub fn resolve(config: &ClientConfig, options: Option<&RequestOptions>, production: bool) -> HeaderSet {
    let mut headers = HeaderSet::default();

    let Some(options) = options else {
        headers.set(HeaderName::Authorization, config.client.as_deref());
        headers.set(HeaderName::AuthorizationCustomer, config.customer.as_deref());
        if !production {
            headers.set(HeaderName::AcceptDebugLanguage, config.debug_language.as_deref());
        }
        return headers;
    };

    headers.set(HeaderName::AcceptLanguage, options.language.as_deref());
    headers.set(HeaderName::AcceptCurrency, options.currency.as_deref());
    headers.set(HeaderName::AcceptTimeZone, options.time_zone.as_deref());
    headers.set(
        HeaderName::Authorization,
        pick(options.client.as_ref(), config.client.as_ref()),
    );
    headers.set(
        HeaderName::AuthorizationCustomer,
        pick(options.customer.as_ref(), config.customer.as_ref()),
    );
    headers.set(HeaderName::RecaptchaResponse, options.recaptcha.as_deref());

    let debug_fallback = if production { None } else { config.debug_language.as_ref() };
    headers.set(
        HeaderName::AcceptDebugLanguage,
        pick(options.debug_language.as_ref(), debug_fallback),
    );

    headers
}
