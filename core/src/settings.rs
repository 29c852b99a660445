//! Client settings loaded from TOML.
//!
//! ```toml
//! base_url = "https://api.clayful.io"
//! production = false
//! store_currency = "KRW"
//!
//! [defaults]
//! language = "ko"
//! currency = "KRW"
//! time_zone = "Asia/Seoul"
//!
//! [exchange_rates]
//! USD = "0.00075"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.clayful.io";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid base_url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("exchange rate for {0} must be positive")]
    Rate(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub base_url: String,
    /// In production the config-level debug language is never sent.
    pub production: bool,
    /// Currency every monetary value in responses is denominated in.
    pub store_currency: String,
    pub defaults: LocaleDefaults,
    /// Units of the keyed currency per one unit of `store_currency`.
    pub exchange_rates: BTreeMap<String, Decimal>,
}

/// Used when a call does not send the corresponding locale header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocaleDefaults {
    pub language: String,
    pub currency: String,
    pub time_zone: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            production: true,
            store_currency: "KRW".to_string(),
            defaults: LocaleDefaults::default(),
            exchange_rates: BTreeMap::new(),
        }
    }
}

impl Default for LocaleDefaults {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            currency: "KRW".to_string(),
            time_zone: "Asia/Seoul".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        let settings: ClientSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.parsed_base_url()?;
        if let Some((code, _)) = self.exchange_rates.iter().find(|(_, rate)| **rate <= Decimal::ZERO) {
            return Err(SettingsError::Rate(code.clone()));
        }
        Ok(())
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url, SettingsError> {
        let invalid = |reason: String| SettingsError::BaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = ClientSettings::from_toml("").unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert!(settings.production);
        assert_eq!(settings.defaults.time_zone, "Asia/Seoul");
    }

    #[test]
    fn full_document() {
        let settings = ClientSettings::from_toml(
            r#"
            base_url = "http://127.0.0.1:3000"
            production = false
            store_currency = "USD"

            [defaults]
            language = "ko"

            [exchange_rates]
            KRW = "1330.5"
            "#,
        )
        .unwrap();
        assert!(!settings.production);
        assert_eq!(settings.store_currency, "USD");
        assert_eq!(settings.defaults.language, "ko");
        assert_eq!(settings.defaults.currency, "KRW");
        assert_eq!(settings.exchange_rates["KRW"], Decimal::new(13305, 1));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ClientSettings::from_toml(r#"base_url = "ftp://example.com""#).unwrap_err();
        assert!(matches!(err, SettingsError::BaseUrl { .. }));
        let err = ClientSettings::from_toml(r#"base_url = "not a url""#).unwrap_err();
        assert!(matches!(err, SettingsError::BaseUrl { .. }));
    }

    #[test]
    fn rejects_non_positive_rate() {
        let err = ClientSettings::from_toml("[exchange_rates]\nUSD = \"0\"").unwrap_err();
        assert!(matches!(err, SettingsError::Rate(code) if code == "USD"));
    }

    #[test]
    fn unknown_type_is_a_parse_error() {
        let err = ClientSettings::from_toml("production = \"yes\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
