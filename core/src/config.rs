//! Process-wide identity defaults and per-call request options.
//!
//! # Design
//! `ClientConfig` is owned by the `ClayfulClient` instance (no statics) and
//! changed only through `configure`. `RequestOptions` is built by the caller
//! for a single call and is never stored.

/// Identity defaults read by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub client: Option<String>,
    pub customer: Option<String>,
    pub debug_language: Option<String>,
}

impl ClientConfig {
    /// Apply only the fields present in `update`. An empty string is stored
    /// as-is, which the resolver treats as "send nothing".
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(client) = update.client {
            self.client = Some(client);
        }
        if let Some(customer) = update.customer {
            self.customer = Some(customer);
        }
        if let Some(debug_language) = update.debug_language {
            self.debug_language = Some(debug_language);
        }
    }
}

/// Argument of `ClayfulClient::configure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub client: Option<String>,
    pub customer: Option<String>,
    pub debug_language: Option<String>,
}

impl ConfigUpdate {
    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn debug_language(mut self, language: impl Into<String>) -> Self {
        self.debug_language = Some(language.into());
        self
    }
}

/// Per-call options. Every field is optional; `None` defers to
/// `ClientConfig` (for identity fields) or to nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub time_zone: Option<String>,
    pub recaptcha: Option<String>,
    pub client: Option<String>,
    pub customer: Option<String>,
    pub debug_language: Option<String>,
    /// Extra raw headers appended after the resolved set.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn recaptcha(mut self, response: impl Into<String>) -> Self {
        self.recaptcha = Some(response.into());
        self
    }

    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn debug_language(mut self, language: impl Into<String>) -> Self {
        self.debug_language = Some(language.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
