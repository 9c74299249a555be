//! Clustering client configuration.

use crate::error::{SenlinError, SenlinResult};
use heat_common::{HttpConfig, Interface};
use std::time::Duration;
use url::Url;

/// Catalog service type of the clustering service.
pub const CLUSTERING_SERVICE_TYPE: &str = "clustering";

/// Default API microversion requested from the service.
pub const DEFAULT_API_VERSION: &str = "1.10";

/// Senlin client configuration.
#[derive(Debug, Clone)]
pub struct SenlinConfig {
    /// Endpoint override; when unset the request context's catalog is used
    pub endpoint: Option<String>,
    /// Catalog service type to resolve the endpoint from
    pub service_type: String,
    /// Catalog interface to resolve the endpoint from
    pub interface: Interface,
    /// API microversion sent in `OpenStack-API-Version`
    pub api_version: String,
    /// HTTP client settings
    pub http: HttpConfig,
}

impl Default for SenlinConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            service_type: CLUSTERING_SERVICE_TYPE.to_string(),
            interface: Interface::default(),
            api_version: DEFAULT_API_VERSION.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl SenlinConfig {
    /// Create a configuration that always talks to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Default::default()
        }
    }

    /// Load configuration from `SENLIN_ENDPOINT`, `SENLIN_API_VERSION` and
    /// `OS_INTERFACE`, falling back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SenlinError::InvalidConfig`] if `OS_INTERFACE` names an
    /// unknown interface or the resulting configuration does not validate.
    pub fn from_env() -> SenlinResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SenlinResult<Self> {
        let mut config = Self::default();
        if let Some(endpoint) = lookup("SENLIN_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }
        if let Some(version) = lookup("SENLIN_API_VERSION") {
            config.api_version = version;
        }
        if let Some(interface) = lookup("OS_INTERFACE") {
            config.interface = interface
                .parse()
                .map_err(|e| SenlinError::invalid_config(format!("OS_INTERFACE: {e}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the endpoint override.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Resolve endpoints from the catalog only.
    #[must_use]
    pub fn without_endpoint(mut self) -> Self {
        self.endpoint = None;
        self
    }

    /// Set the catalog interface.
    #[must_use]
    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interface = interface;
        self
    }

    /// Set the API microversion.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Check the microversion format (`<major>.<minor>`).
    ///
    /// # Errors
    ///
    /// Returns [`SenlinError::InvalidConfig`] on a malformed version.
    pub fn validate(&self) -> SenlinResult<()> {
        let valid = self
            .api_version
            .split_once('.')
            .is_some_and(|(major, minor)| is_number(major) && is_number(minor));
        if valid {
            Ok(())
        } else {
            Err(SenlinError::invalid_config(format!(
                "malformed API version '{}'",
                self.api_version
            )))
        }
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a service endpoint into a base URL that path segments can be
/// appended to.
///
/// # Errors
///
/// Returns [`SenlinError::InvalidConfig`] if `endpoint` is not an absolute
/// http(s) URL.
pub fn parse_endpoint(endpoint: &str) -> SenlinResult<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| SenlinError::invalid_config(format!("invalid endpoint '{endpoint}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(SenlinError::invalid_config(format!(
            "endpoint '{endpoint}' is not an http(s) URL"
        )));
    }
    Ok(url)
}
