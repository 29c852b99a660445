//! Formatted value envelope.
//!
//! # Design
//! A `FormattedValue` pairs a raw API value with its rendered forms. The
//! rendered fields are private and only ever produced by the constructors
//! here, from `raw` plus a `LocaleContext` (and, for `ago`, the instant of
//! formatting). Nothing downstream can set them independently, and `raw` is
//! kept exactly as received.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::locale::{CurrencyFormat, Language, LocaleContext};

/// The shapes the envelope knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Monetary amount in the store currency.
    Price,
    /// Counts, quantities, measurements and ratings.
    Count,
    /// RFC 3339 timestamp.
    Time,
}

/// A raw value with its rendered forms.
///
/// `Deserialize` only reads an envelope back. Response bodies pass through
/// `format_fields` first, which renders every rule-matched leaf again from
/// its `raw`, so envelopes sent by the server are never trusted. Decoding an
/// envelope from any other source trusts that source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedValue<T> {
    raw: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    converted_raw: Option<Number>,
    formatted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    converted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ago: Option<String>,
}

impl<T> FormattedValue<T> {
    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    pub fn converted(&self) -> Option<&str> {
        self.converted.as_deref()
    }

    pub fn converted_raw(&self) -> Option<&Number> {
        self.converted_raw.as_ref()
    }

    pub fn ago(&self) -> Option<&str> {
        self.ago.as_deref()
    }

    pub fn into_raw(self) -> T {
        self.raw
    }
}

impl FormattedValue<Number> {
    /// Render a monetary amount. `converted` is the amount in the display
    /// currency, or equal to `formatted` when no conversion applies.
    pub fn price(raw: Number, locale: &LocaleContext) -> Self {
        let Some(amount) = to_decimal(&raw) else {
            return Self::unrenderable(raw);
        };

        let formatted = render_money(amount, &locale.store_currency);
        // Amounts too large to convert are shown in the store currency.
        let converted_amount = locale
            .conversion_rate()
            .and_then(|rate| amount.checked_mul(rate));
        let (converted, converted_raw) = match converted_amount {
            Some(value) => {
                let target = CurrencyFormat::for_code(&locale.currency);
                let value = value.round_dp_with_strategy(target.precision, RoundingStrategy::MidpointAwayFromZero);
                (render_money(value, &locale.currency), to_number(value))
            }
            None => (formatted.clone(), Some(raw.clone())),
        };

        Self {
            raw,
            converted_raw,
            formatted,
            converted: Some(converted),
            ago: None,
        }
    }

    /// Render a count. Counts never change with currency, so `converted`
    /// always mirrors `formatted`.
    pub fn count(raw: Number, _locale: &LocaleContext) -> Self {
        let Some(amount) = to_decimal(&raw) else {
            return Self::unrenderable(raw);
        };
        let formatted = group_digits(&amount.normalize().to_string());
        Self {
            raw,
            converted_raw: None,
            converted: Some(formatted.clone()),
            formatted,
            ago: None,
        }
    }

    fn unrenderable(raw: Number) -> Self {
        let text = raw.to_string();
        Self {
            raw,
            converted_raw: None,
            converted: Some(text.clone()),
            formatted: text,
            ago: None,
        }
    }
}

impl FormattedValue<String> {
    /// Render a timestamp as of now.
    pub fn time(raw: String, locale: &LocaleContext) -> Self {
        Self::time_at(raw, locale, Utc::now())
    }

    /// Render a timestamp relative to `now`. Unparseable input keeps the raw
    /// text as `formatted` and has no `ago`.
    pub fn time_at(raw: String, locale: &LocaleContext, now: DateTime<Utc>) -> Self {
        let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) else {
            return Self {
                formatted: raw.clone(),
                raw,
                converted_raw: None,
                converted: None,
                ago: None,
            };
        };
        let instant = parsed.with_timezone(&Utc);
        let local = instant.with_timezone(&locale.time_zone);
        let language = locale.language;

        let month = language.month_name(local.month());
        let weekday = language.weekday_name(local.weekday());
        let (year, day) = (local.year(), local.day());
        let formatted = match language {
            Language::En => format!("{weekday}, {month} {day}, {year}"),
            Language::Ko => format!("{year}년 {month} {day}일 {weekday}"),
            Language::Ja | Language::Zh => format!("{year}年{month}{day}日{weekday}"),
        };

        Self {
            raw,
            converted_raw: None,
            formatted,
            converted: None,
            ago: Some(relative_time(instant, now, language)),
        }
    }
}

/// Parse the JSON number text exactly; fall back to the float value for
/// exponent forms outside `Decimal`'s textual grammar.
fn to_decimal(number: &Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .or_else(|| number.as_f64().and_then(Decimal::from_f64))
}

fn to_number(value: Decimal) -> Option<Number> {
    if value.fract().is_zero() {
        if let Some(integer) = value.to_i64() {
            return Some(Number::from(integer));
        }
    }
    Number::from_str(&value.to_string())
        .ok()
        .or_else(|| value.to_f64().and_then(Number::from_f64))
}

fn render_money(amount: Decimal, currency: &str) -> String {
    let format = CurrencyFormat::for_code(currency);
    let mut value = amount.round_dp_with_strategy(format.precision, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(format.precision);
    let digits = group_digits(&value.abs().to_string());
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{sign}{}{digits}{}", format.prefix, format.suffix)
}

/// Insert thousands separators into the integer part of a decimal string.
fn group_digits(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Seconds,
    Minute,
    Minutes(i64),
    Hour,
    Hours(i64),
    Day,
    Days(i64),
    Month,
    Months(i64),
    Year,
    Years(i64),
}

/// Bucket an absolute distance in seconds, rounding each unit to nearest.
fn span(seconds: i64) -> Span {
    let minutes = (seconds + 30) / 60;
    let hours = (seconds + 1800) / 3600;
    let days = (seconds + 43_200) / 86_400;
    let exact_days = seconds as f64 / 86_400.0;
    let months = (exact_days / 30.436_875).round() as i64;
    let years = (exact_days / 365.242_5).round() as i64;

    if seconds < 45 {
        Span::Seconds
    } else if minutes <= 1 {
        Span::Minute
    } else if minutes < 45 {
        Span::Minutes(minutes)
    } else if hours <= 1 {
        Span::Hour
    } else if hours < 22 {
        Span::Hours(hours)
    } else if days <= 1 {
        Span::Day
    } else if days < 26 {
        Span::Days(days)
    } else if months <= 1 {
        Span::Month
    } else if months < 11 {
        Span::Months(months)
    } else if years <= 1 {
        Span::Year
    } else {
        Span::Years(years)
    }
}

fn relative_time(instant: DateTime<Utc>, now: DateTime<Utc>, language: Language) -> String {
    let delta = now.signed_duration_since(instant).num_seconds();
    let phrase = span_phrase(span(delta.abs()), language);
    let future = delta < 0;
    match (language, future) {
        (Language::En, false) => format!("{phrase} ago"),
        (Language::En, true) => format!("in {phrase}"),
        (Language::Ko, false) => format!("{phrase} 전"),
        (Language::Ko, true) => format!("{phrase} 후"),
        (Language::Ja, false) | (Language::Zh, false) => format!("{phrase}前"),
        (Language::Ja, true) => format!("{phrase}後"),
        (Language::Zh, true) => format!("{phrase}后"),
    }
}

fn span_phrase(span: Span, language: Language) -> String {
    match language {
        Language::En => match span {
            Span::Seconds => "a few seconds".to_string(),
            Span::Minute => "a minute".to_string(),
            Span::Minutes(n) => format!("{n} minutes"),
            Span::Hour => "an hour".to_string(),
            Span::Hours(n) => format!("{n} hours"),
            Span::Day => "a day".to_string(),
            Span::Days(n) => format!("{n} days"),
            Span::Month => "a month".to_string(),
            Span::Months(n) => format!("{n} months"),
            Span::Year => "a year".to_string(),
            Span::Years(n) => format!("{n} years"),
        },
        Language::Ko => match span {
            Span::Seconds => "몇 초".to_string(),
            Span::Minute => "1분".to_string(),
            Span::Minutes(n) => format!("{n}분"),
            Span::Hour => "한 시간".to_string(),
            Span::Hours(n) => format!("{n}시간"),
            Span::Day => "하루".to_string(),
            Span::Days(n) => format!("{n}일"),
            Span::Month => "한 달".to_string(),
            Span::Months(n) => format!("{n}달"),
            Span::Year => "일 년".to_string(),
            Span::Years(n) => format!("{n}년"),
        },
        Language::Ja => match span {
            Span::Seconds => "数秒".to_string(),
            Span::Minute => "1分".to_string(),
            Span::Minutes(n) => format!("{n}分"),
            Span::Hour => "1時間".to_string(),
            Span::Hours(n) => format!("{n}時間"),
            Span::Day => "1日".to_string(),
            Span::Days(n) => format!("{n}日"),
            Span::Month => "1ヶ月".to_string(),
            Span::Months(n) => format!("{n}ヶ月"),
            Span::Year => "1年".to_string(),
            Span::Years(n) => format!("{n}年"),
        },
        Language::Zh => match span {
            Span::Seconds => "几秒".to_string(),
            Span::Minute => "1 分钟".to_string(),
            Span::Minutes(n) => format!("{n} 分钟"),
            Span::Hour => "1 小时".to_string(),
            Span::Hours(n) => format!("{n} 小时"),
            Span::Day => "1 天".to_string(),
            Span::Days(n) => format!("{n} 天"),
            Span::Month => "1 个月".to_string(),
            Span::Months(n) => format!("{n} 个月"),
            Span::Year => "1 年".to_string(),
            Span::Years(n) => format!("{n} 年"),
        },
    }
}
