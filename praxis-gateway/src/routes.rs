//! Axum route handlers for the CPF provider API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::GatewayConfig, error::GatewayError};

// ── Shared state ─────────────────────────────────────────────────────────────

type Config = Arc<GatewayConfig>;

type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Largest accepted `POST /cpf` body, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// ── Request / response types ──────────────────────────────────────────────────

/// JSON body accepted by `POST /cpf`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CpfBody {
    pub cpf: String,
}

/// Verdict returned by `/cpf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpfVerdict {
    /// The CPF exactly as the caller supplied it.
    pub cpf: String,
    pub valid: bool,
}

/// Verdict returned by `/validar`; same content, Portuguese key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidarVerdict {
    pub cpf: String,
    pub valido: bool,
}

impl CpfVerdict {
    fn check(cpf: String) -> Self {
        let valid = praxis_core::validate(&cpf);
        tracing::debug!(%cpf, valid, "cpf checked");
        Self { cpf, valid }
    }
}

impl From<CpfVerdict> for ValidarVerdict {
    fn from(v: CpfVerdict) -> Self {
        Self { cpf: v.cpf, valido: v.valid }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given configuration.
pub fn create_router(config: GatewayConfig) -> Router {
    Router::new()
        .route(
            "/cpf",
            get(cpf_query).post(cpf_body).fallback(cpf_method_not_allowed),
        )
        .route(
            "/validar",
            get(validar_query).fallback(get_method_not_allowed),
        )
        .route("/health", get(health).fallback(get_method_not_allowed))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(Arc::new(config))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /cpf?cpf=<value>` (or `?numero=<value>`, per configuration).
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the parameter is absent or empty.
pub async fn cpf_query(
    State(config): State<Config>,
    query: QueryPairs,
) -> Result<Json<CpfVerdict>, GatewayError> {
    let cpf = query_value(query, &config.query_field)?;
    Ok(Json(CpfVerdict::check(cpf)))
}

/// `POST /cpf` with body `{"cpf": "<value>"}`.
///
/// # Errors
/// Returns [`GatewayError::PayloadTooLarge`] if the body exceeds
/// [`MAX_BODY_BYTES`], and [`GatewayError::InvalidRequest`] if it is not JSON,
/// lacks a string `cpf` field, or the field is empty.
pub async fn cpf_body(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CpfVerdict>, GatewayError> {
    let body = body.map_err(|e| {
        tracing::warn!(error = %e, "rejected cpf body");
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge(e.body_text())
        } else {
            GatewayError::InvalidRequest(e.body_text())
        }
    })?;
    let cpf = parse_cpf_body(&body)?;
    Ok(Json(CpfVerdict::check(cpf)))
}

/// `GET /validar?cpf=<value>`, the alternate provider dialect.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if `cpf` is absent or empty.
pub async fn validar_query(query: QueryPairs) -> Result<Json<ValidarVerdict>, GatewayError> {
    let cpf = query_value(query, "cpf")?;
    Ok(Json(CpfVerdict::check(cpf).into()))
}

async fn cpf_method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed { allow: "GET, POST" }
}

async fn get_method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed { allow: "GET" }
}

async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

// ── Extraction helpers ────────────────────────────────────────────────────────

/// Parse a `POST /cpf` body and return the non-empty `cpf` field.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] for malformed JSON, a missing or
/// non-string `cpf` field, or an empty value.
pub fn parse_cpf_body(body: &[u8]) -> Result<String, GatewayError> {
    let parsed: CpfBody = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "rejected cpf body");
        GatewayError::InvalidRequest(format!("invalid JSON body: {e}"))
    })?;
    if parsed.cpf.is_empty() {
        return Err(GatewayError::InvalidRequest("field 'cpf' is empty".to_owned()));
    }
    Ok(parsed.cpf)
}

/// First non-empty value of `field` in the query string.
fn query_value(query: QueryPairs, field: &str) -> Result<String, GatewayError> {
    let Query(pairs) = query.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    pairs
        .into_iter()
        .find(|(key, value)| key == field && !value.is_empty())
        .map(|(_, value)| value)
        .ok_or_else(|| {
            tracing::warn!(field, "cpf parameter missing");
            GatewayError::InvalidRequest(format!("parameter '{field}' not provided"))
        })
}
