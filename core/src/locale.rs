//! Locale context used to render formatted values.
//!
//! Built once per call from the resolved headers plus the client settings,
//! so every value in one response is rendered against the same language,
//! currency and time zone.

use std::collections::BTreeMap;

use chrono::{FixedOffset, Offset, Utc, Weekday};
use rust_decimal::Decimal;
use tracing::warn;

use crate::headers::{HeaderName, HeaderSet};
use crate::settings::ClientSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ko,
    Ja,
    Zh,
}

impl Language {
    /// Accepts bare codes and region-qualified tags (`ko-KR`, `zh_CN`).
    /// Anything unrecognised renders as English.
    pub fn parse(tag: &str) -> Language {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ko" => Language::Ko,
            "ja" => Language::Ja,
            "zh" => Language::Zh,
            _ => Language::En,
        }
    }

    pub(crate) fn month_name(&self, month: u32) -> String {
        const EN: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        match self {
            Language::En => EN[(month as usize).saturating_sub(1) % 12].to_string(),
            Language::Ko => format!("{month}월"),
            Language::Ja | Language::Zh => format!("{month}月"),
        }
    }

    pub(crate) fn weekday_name(&self, weekday: Weekday) -> &'static str {
        let index = weekday.num_days_from_monday() as usize;
        match self {
            Language::En => [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ][index],
            Language::Ko => ["월요일", "화요일", "수요일", "목요일", "금요일", "토요일", "일요일"][index],
            Language::Ja => ["月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日", "日曜日"][index],
            Language::Zh => ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"][index],
        }
    }
}

/// Fixed-offset zones only. Zones with daylight saving are not in the table.
const ZONES: &[(&str, i32)] = &[
    ("UTC", 0),
    ("Etc/UTC", 0),
    ("GMT", 0),
    ("Asia/Seoul", 9 * 3600),
    ("Asia/Tokyo", 9 * 3600),
    ("Asia/Shanghai", 8 * 3600),
    ("Asia/Hong_Kong", 8 * 3600),
    ("Asia/Taipei", 8 * 3600),
    ("Asia/Singapore", 8 * 3600),
    ("Asia/Bangkok", 7 * 3600),
    ("Asia/Ho_Chi_Minh", 7 * 3600),
    ("Asia/Jakarta", 7 * 3600),
    ("Asia/Kolkata", 5 * 3600 + 1800),
    ("Asia/Dubai", 4 * 3600),
];

/// Parse an IANA name from the table above, or a numeric offset such as
/// `+09:00`, `-0530` or `+9`.
pub fn parse_time_zone(name: &str) -> Option<FixedOffset> {
    if let Some((_, seconds)) = ZONES.iter().find(|(zone, _)| zone.eq_ignore_ascii_case(name)) {
        return FixedOffset::east_opt(*seconds);
    }

    let (sign, rest) = match name.as_bytes().first()? {
        b'+' => (1, &name[1..]),
        b'-' => (-1, &name[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// How an amount in a given currency is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub precision: u32,
    pub prefix: String,
    pub suffix: String,
}

impl CurrencyFormat {
    pub fn for_code(code: &str) -> CurrencyFormat {
        let (precision, prefix, suffix) = match code.to_ascii_uppercase().as_str() {
            "KRW" => (0, "", "원"),
            "USD" => (2, "$", ""),
            "JPY" => (0, "¥", ""),
            "EUR" => (2, "€", ""),
            "CNY" => (2, "CN¥", ""),
            other => {
                return CurrencyFormat {
                    precision: 2,
                    prefix: String::new(),
                    suffix: format!(" {other}"),
                }
            }
        };
        CurrencyFormat {
            precision,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

/// Everything the envelope needs to render a raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleContext {
    pub language: Language,
    /// Currency values are displayed in.
    pub currency: String,
    /// Currency monetary values are denominated in.
    pub store_currency: String,
    pub time_zone: FixedOffset,
    /// Units of target currency per one unit of `store_currency`.
    pub rates: BTreeMap<String, Decimal>,
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self {
            language: Language::En,
            currency: "KRW".to_string(),
            store_currency: "KRW".to_string(),
            time_zone: utc(),
            rates: BTreeMap::new(),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

impl LocaleContext {
    /// Headers win over settings defaults. Unknown zones fall back to the
    /// default zone, then to UTC.
    pub fn from_headers(headers: &HeaderSet, settings: &ClientSettings) -> LocaleContext {
        let defaults = &settings.defaults;
        let language = headers
            .get(HeaderName::AcceptLanguage)
            .unwrap_or(defaults.language.as_str());
        let currency = headers
            .get(HeaderName::AcceptCurrency)
            .unwrap_or(defaults.currency.as_str());
        let zone_name = headers
            .get(HeaderName::AcceptTimeZone)
            .unwrap_or(defaults.time_zone.as_str());

        let time_zone = parse_time_zone(zone_name)
            .or_else(|| {
                warn!(zone = zone_name, "unknown time zone, using default");
                parse_time_zone(&defaults.time_zone)
            })
            .unwrap_or_else(utc);

        let context = LocaleContext {
            language: Language::parse(language),
            currency: currency.to_ascii_uppercase(),
            store_currency: settings.store_currency.to_ascii_uppercase(),
            time_zone,
            rates: settings.exchange_rates.clone(),
        };
        if context.currency != context.store_currency && context.conversion_rate().is_none() {
            warn!(currency = %context.currency, "no exchange rate, showing store currency");
        }
        context
    }

    /// Rate from store currency into the display currency, when conversion applies.
    pub fn conversion_rate(&self) -> Option<Decimal> {
        if self.currency.eq_ignore_ascii_case(&self.store_currency) {
            return None;
        }
        self.rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(&self.currency))
            .map(|(_, rate)| *rate)
    }
}
