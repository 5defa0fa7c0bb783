//! HTTP provider for CPF check-digit validation.
//!
//! Serves `/cpf` (GET query or POST JSON body) and the alternate `/validar`
//! dialect, both backed by [`praxis_core::validate`]. Request handling is
//! stateless; the only shared state is the immutable [`config::GatewayConfig`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
