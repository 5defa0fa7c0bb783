//! Client for CPF validation providers.
//!
//! One parameterized implementation covers every provider dialect: the
//! endpoint path, HTTP method, field name and verdict key all come from a
//! [`ProviderProfile`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
mod http;
pub mod report;
pub mod service;

pub use config::{ClientConfig, ProviderProfile, Transport, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use report::ValidationReport;
pub use service::{decode_verdict, CpfService, HttpCpfService, LocalCpfService};
