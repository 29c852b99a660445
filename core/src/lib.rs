//! Client core for the Clayful e-commerce API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values; the actual
//! round-trip is delegated to a host-supplied `Transport` (host-does-IO
//! pattern). Between the two halves the core resolves request headers from
//! client-wide identity plus per-call options, renders raw prices, counts
//! and timestamps into formatted envelopes, and normalizes every failure
//! into a single `ClayfulError`.
//!
//! # Design
//! - `ClayfulClient` owns its `ClientConfig`; there is no global state.
//! - Each operation is described by a static `Endpoint` (verb, path
//!   template, formattable field paths). Resource namespaces are thin typed
//!   wrappers over `ClayfulClient::dispatch`.
//! - Wire models are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod format;
pub mod headers;
pub mod http;
pub mod locale;
pub mod resources;
pub mod settings;

pub use client::{ClayfulClient, Endpoint, Payload, PreparedRequest};
pub use config::{ClientConfig, ConfigUpdate, RequestOptions};
pub use error::{normalize, ClayfulError, ErrorContext, ErrorKind, Failure, Result};
pub use format::{FormattedValue, ValueKind};
pub use headers::{resolve, HeaderName, HeaderSet};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportFailure, TransportFailureKind};
pub use locale::{Language, LocaleContext};
pub use resources::CountResponse;
pub use settings::{ClientSettings, SettingsError};
