use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ProviderProfile;

/// Outcome of validating one CPF against a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// The CPF as submitted.
    pub cpf: String,
    /// The provider's verdict.
    pub valid: bool,
    /// Dialect used to reach the provider.
    pub profile: ProviderProfile,
    /// When the request was started.
    pub checked_at: DateTime<Utc>,
    /// Wall-clock round-trip time.
    pub elapsed: Duration,
}

impl ValidationReport {
    #[must_use]
    pub fn new(
        cpf: impl Into<String>,
        valid: bool,
        profile: ProviderProfile,
        checked_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        Self { cpf: cpf.into(), valid, profile, checked_at, elapsed }
    }
}

/// One line: `<cpf> valid|invalid (<ms> ms, via <profile>)`.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} ms, via {})",
            self.cpf,
            if self.valid { "valid" } else { "invalid" },
            self.elapsed.as_millis(),
            self.profile,
        )
    }
}
