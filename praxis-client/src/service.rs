//! CPF validation service abstraction.
//!
//! Lets callers switch between a remote provider and in-process validation
//! without changing how results are consumed.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use hyper::Method;

use crate::config::{ClientConfig, Transport};
use crate::http::send_request;
use crate::{ClientError, ValidationReport};

/// Response keys a provider may use for its verdict.
const VERDICT_KEYS: [&str; 2] = ["valid", "valido"];

/// Something that can tell whether a CPF is valid.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait CpfService: Send + Sync {
    /// Validate one CPF.
    ///
    /// # Errors
    /// Implementation-specific; see [`HttpCpfService::validate`].
    async fn validate(&self, cpf: &str) -> Result<ValidationReport, ClientError>;

    /// Check that the service is reachable.
    ///
    /// # Errors
    /// Implementation-specific; see [`HttpCpfService::health_check`].
    async fn health_check(&self) -> Result<(), ClientError>;
}

/// Validates CPFs against a remote provider over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCpfService {
    config: ClientConfig,
}

impl HttpCpfService {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn call(
        &self,
        url: &url::Url,
        method: Method,
        body: Option<String>,
    ) -> Result<String, ClientError> {
        let (status, text) =
            tokio::time::timeout(self.config.timeout, send_request(url, method, body))
                .await
                .map_err(|_| ClientError::Timeout(self.config.timeout))??;
        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[async_trait]
impl CpfService for HttpCpfService {
    /// Send `cpf` to the provider using the configured profile.
    ///
    /// # Errors
    /// Returns [`ClientError::Timeout`] if the provider is too slow,
    /// [`ClientError::Status`] for non-2xx answers (e.g. 400 on an empty CPF),
    /// [`ClientError::Decode`] or [`ClientError::MissingVerdict`] for an
    /// unexpected body, and connection errors from the transport.
    async fn validate(&self, cpf: &str) -> Result<ValidationReport, ClientError> {
        let profile = self.config.profile;
        let url = self.config.endpoint(cpf)?;
        let (method, body) = match profile.transport() {
            Transport::Query => (Method::GET, None),
            Transport::JsonBody => {
                let mut fields = serde_json::Map::new();
                fields.insert(profile.field().to_owned(), cpf.into());
                (Method::POST, Some(serde_json::Value::Object(fields).to_string()))
            }
        };

        let checked_at = Utc::now();
        let start = Instant::now();
        tracing::debug!(%url, %profile, "sending cpf to provider");

        let text = self.call(&url, method, body).await?;
        let valid = decode_verdict(&text, profile.verdict_key())?;
        let elapsed = start.elapsed();

        tracing::info!(
            cpf,
            valid,
            %profile,
            elapsed_ms = elapsed.as_millis(),
            "provider verdict received"
        );

        Ok(ValidationReport::new(cpf, valid, profile, checked_at, elapsed))
    }

    /// `GET /health` on the provider.
    ///
    /// # Errors
    /// Returns [`ClientError::Status`] for a non-2xx answer, plus any
    /// transport error.
    async fn health_check(&self) -> Result<(), ClientError> {
        let url = self.config.health_endpoint()?;
        self.call(&url, Method::GET, None).await.map(|_| ())
    }
}

/// Validates CPFs in-process with [`praxis_core::validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCpfService {
    profile: crate::ProviderProfile,
}

impl LocalCpfService {
    /// Create a local service that labels its reports with `profile`.
    #[must_use]
    pub fn new(profile: crate::ProviderProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl CpfService for LocalCpfService {
    async fn validate(&self, cpf: &str) -> Result<ValidationReport, ClientError> {
        let checked_at = Utc::now();
        let start = Instant::now();
        let valid = praxis_core::validate(cpf);
        Ok(ValidationReport::new(cpf, valid, self.profile, checked_at, start.elapsed()))
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Extract the boolean verdict from a provider response body.
///
/// `preferred` is tried first; the other known key is accepted as a
/// fallback since providers disagree on naming.
///
/// # Errors
/// Returns [`ClientError::Decode`] for invalid JSON and
/// [`ClientError::MissingVerdict`] when no boolean verdict is present.
pub fn decode_verdict(body: &str, preferred: &'static str) -> Result<bool, ClientError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))?;
    std::iter::once(preferred)
        .chain(VERDICT_KEYS)
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_bool))
        .ok_or(ClientError::MissingVerdict { key: preferred })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderProfile;

    #[test]
    fn decode_verdict_reads_preferred_key() {
        assert!(matches!(decode_verdict(r#"{"cpf":"1","valid":true}"#, "valid"), Ok(true)));
        assert!(matches!(decode_verdict(r#"{"cpf":"1","valido":false}"#, "valido"), Ok(false)));
    }

    #[test]
    fn decode_verdict_falls_back_to_other_key() {
        assert!(matches!(decode_verdict(r#"{"valido":true}"#, "valid"), Ok(true)));
    }

    #[test]
    fn decode_verdict_rejects_missing_or_non_bool() {
        assert!(matches!(
            decode_verdict(r#"{"error":"x"}"#, "valid"),
            Err(ClientError::MissingVerdict { key: "valid" })
        ));
        assert!(matches!(
            decode_verdict(r#"{"valid":"yes"}"#, "valid"),
            Err(ClientError::MissingVerdict { .. })
        ));
        assert!(matches!(decode_verdict("<html>", "valid"), Err(ClientError::Decode(_))));
    }

    proptest::proptest! {
        #[test]
        fn proptest_decode_verdict_reads_either_key(valid in proptest::bool::ANY, portuguese in proptest::bool::ANY) {
            let key = if portuguese { "valido" } else { "valid" };
            let mut fields = serde_json::Map::new();
            fields.insert("cpf".to_owned(), "11144477735".into());
            fields.insert(key.to_owned(), valid.into());
            let body = serde_json::Value::Object(fields).to_string();
            for preferred in VERDICT_KEYS {
                proptest::prop_assert!(matches!(decode_verdict(&body, preferred), Ok(v) if v == valid));
            }
        }
    }

    #[tokio::test]
    async fn local_service_matches_core_validator() {
        let service = LocalCpfService::new(ProviderProfile::CpfQuery);
        for cpf in ["11144477735", "11111111111", "abc"] {
            let report = match service.validate(cpf).await {
                Ok(r) => r,
                Err(e) => panic!("local validation failed: {e}"),
            };
            assert_eq!(report.valid, praxis_core::validate(cpf), "verdict for {cpf}");
            assert_eq!(report.cpf, cpf);
        }
        assert!(service.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn http_service_unreachable_provider_returns_connect_error() {
        let addr = match std::net::TcpListener::bind("127.0.0.1:0").and_then(|l| l.local_addr()) {
            Ok(a) => a,
            Err(e) => panic!("failed to reserve a port: {e}"),
        };
        // The listener is dropped above, so nothing accepts on `addr`.
        let base = format!("http://{addr}");
        let config = match ClientConfig::new(&base, ProviderProfile::CpfQuery) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        let service = HttpCpfService::new(config);
        let err = service.validate("11144477735").await;
        assert!(
            matches!(err, Err(ClientError::Connect(_) | ClientError::Timeout(_))),
            "expected a transport error, got {err:?}"
        );
    }
}
