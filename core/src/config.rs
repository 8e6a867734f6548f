//! Client configuration.
//!
//! Only the API origin varies between deployments; the resource path is
//! fixed by `client::STUDENT_RESOURCE_PATH`.

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_ORIGIN: &str = "https://localhost:7233";
pub const ORIGIN_ENV: &str = "STUDENT_API_URL";
pub const INSECURE_ENV: &str = "STUDENT_API_INSECURE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub origin: String,
    /// Accept self-signed certificates, as served by local dev backends.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    /// Validate `origin` and build a config for it.
    pub fn new(origin: &str) -> Result<Self, ApiError> {
        let url = Url::parse(origin).map_err(|e| ApiError::InvalidConfig(format!("{origin}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidConfig(format!(
                "{origin}: scheme must be http or https"
            )));
        }
        if url.host_str().is_none() {
            return Err(ApiError::InvalidConfig(format!("{origin}: missing host")));
        }
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            accept_invalid_certs: false,
        })
    }

    /// Read `STUDENT_API_URL` and `STUDENT_API_INSECURE`, falling back to the
    /// defaults when unset.
    pub fn from_env() -> Result<Self, ApiError> {
        let origin = std::env::var(ORIGIN_ENV).unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        let insecure = std::env::var(INSECURE_ENV).ok();
        Ok(Self::new(&origin)?.with_accept_invalid_certs(parse_flag(insecure.as_deref())))
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
