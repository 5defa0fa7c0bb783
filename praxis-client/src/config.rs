//! Provider profiles and client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ClientError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How a CPF is sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    /// `GET <path>?<field>=<cpf>`
    Query,
    /// `POST <path>` with body `{"<field>": "<cpf>"}`
    JsonBody,
}

/// One dialect of the CPF web service.
///
/// Providers differ in endpoint path, parameter name, HTTP method and the key
/// of the boolean verdict in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProviderProfile {
    /// `GET /cpf?cpf=` answering `{"cpf", "valid"}`.
    #[default]
    #[serde(rename = "cpf")]
    CpfQuery,
    /// `GET /cpf?numero=` answering `{"cpf", "valid"}`.
    #[serde(rename = "numero")]
    NumeroQuery,
    /// `POST /cpf` with a JSON body, answering `{"cpf", "valid"}`.
    #[serde(rename = "json")]
    CpfJson,
    /// `GET /validar?cpf=` answering `{"cpf", "valido"}`.
    #[serde(rename = "validar")]
    Validar,
}

impl ProviderProfile {
    /// All profiles, in CLI listing order.
    pub const ALL: [Self; 4] = [Self::CpfQuery, Self::NumeroQuery, Self::CpfJson, Self::Validar];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::CpfQuery | Self::NumeroQuery | Self::CpfJson => "/cpf",
            Self::Validar => "/validar",
        }
    }

    /// Name of the query parameter or body field carrying the CPF.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::NumeroQuery => "numero",
            Self::CpfQuery | Self::CpfJson | Self::Validar => "cpf",
        }
    }

    #[must_use]
    pub fn transport(self) -> Transport {
        match self {
            Self::CpfJson => Transport::JsonBody,
            Self::CpfQuery | Self::NumeroQuery | Self::Validar => Transport::Query,
        }
    }

    /// Key of the boolean verdict in the response body.
    #[must_use]
    pub fn verdict_key(self) -> &'static str {
        match self {
            Self::Validar => "valido",
            Self::CpfQuery | Self::NumeroQuery | Self::CpfJson => "valid",
        }
    }

    /// Short name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CpfQuery => "cpf",
            Self::NumeroQuery => "numero",
            Self::CpfJson => "json",
            Self::Validar => "validar",
        }
    }
}

impl fmt::Display for ProviderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown profile '{s}'; expected cpf, numero, json or validar"))
    }
}

/// Settings for an HTTP client bound to one provider.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    /// Provider root, e.g. `http://127.0.0.1:8000`.
    pub base_url: Url,
    pub profile: ProviderProfile,
    /// Upper bound on connect + request + response time.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for `base_url` with the default timeout.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse, is not
    /// `http`, or has no host.
    pub fn new(base_url: &str, profile: ProviderProfile) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.scheme() != "http" {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme '{}'; only http is supported",
                base_url.scheme()
            )));
        }
        if base_url.host_str().is_none() {
            return Err(ClientError::InvalidUrl(format!("{base_url}: missing host")));
        }
        Ok(Self { base_url, profile, timeout: DEFAULT_TIMEOUT })
    }

    /// Replace the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full request URL for validating `cpf` under this profile.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] if the endpoint cannot be joined.
    pub fn endpoint(&self, cpf: &str) -> Result<Url, ClientError> {
        let mut url = self.join(self.profile.path())?;
        if self.profile.transport() == Transport::Query {
            url.query_pairs_mut().append_pair(self.profile.field(), cpf);
        }
        Ok(url)
    }

    /// URL of the provider's liveness probe.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] if the endpoint cannot be joined.
    pub fn health_endpoint(&self) -> Result<Url, ClientError> {
        self.join("/health")
    }

    fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}{path}: {e}", self.base_url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(profile: ProviderProfile) -> ClientConfig {
        match ClientConfig::new("http://127.0.0.1:8000", profile) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn profile_from_str_accepts_cli_names() {
        for profile in ProviderProfile::ALL {
            assert_eq!(profile.name().parse::<ProviderProfile>(), Ok(profile));
        }
        assert_eq!("VALIDAR".parse::<ProviderProfile>(), Ok(ProviderProfile::Validar));
        assert!("soap".parse::<ProviderProfile>().is_err());
    }

    #[test]
    fn endpoint_builds_query_for_each_get_profile() {
        let cases = [
            (ProviderProfile::CpfQuery, "http://127.0.0.1:8000/cpf?cpf=11144477735"),
            (ProviderProfile::NumeroQuery, "http://127.0.0.1:8000/cpf?numero=11144477735"),
            (ProviderProfile::Validar, "http://127.0.0.1:8000/validar?cpf=11144477735"),
        ];
        for (profile, expected) in cases {
            let url = match config(profile).endpoint("11144477735") {
                Ok(u) => u,
                Err(e) => panic!("unexpected error: {e}"),
            };
            assert_eq!(url.as_str(), expected);
        }
    }

    #[test]
    fn endpoint_json_profile_has_no_query() {
        let url = match config(ProviderProfile::CpfJson).endpoint("11144477735") {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/cpf");
    }

    #[test]
    fn endpoint_percent_encodes_separators() {
        let url = match config(ProviderProfile::CpfQuery).endpoint("111 444&777") {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(url.query(), Some("cpf=111+444%26777"));
    }

    #[test]
    fn client_config_rejects_non_http_urls() {
        assert!(ClientConfig::new("https://example.com", ProviderProfile::CpfQuery).is_err());
        assert!(ClientConfig::new("not a url", ProviderProfile::CpfQuery).is_err());
    }

    #[test]
    fn profile_serializes_as_cli_name() {
        let json = match serde_json::to_string(&ProviderProfile::CpfJson) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"json\"");
    }

    proptest::proptest! {
        #[test]
        fn proptest_endpoint_query_decodes_to_input(cpf in ".{0,24}") {
            let url = config(ProviderProfile::CpfQuery).endpoint(&cpf);
            proptest::prop_assert!(url.is_ok());
            let pairs: Vec<(String, String)> = url
                .iter()
                .flat_map(|u| u.query_pairs().into_owned())
                .collect();
            proptest::prop_assert_eq!(pairs, vec![("cpf".to_owned(), cpf)]);
        }

        #[test]
        fn proptest_profile_name_parses_in_any_case(idx in 0usize..4, upper in proptest::bool::ANY) {
            let profile = ProviderProfile::ALL[idx];
            let name = if upper { profile.name().to_uppercase() } else { profile.name().to_owned() };
            proptest::prop_assert_eq!(name.parse::<ProviderProfile>(), Ok(profile));
        }
    }
}
