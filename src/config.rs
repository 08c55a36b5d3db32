use std::path::PathBuf;
use std::time::Duration;

/// Path every TFaaS deployment serves protobuf predictions on.
pub const PREDICT_PATH: &str = "/proto";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8083";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_REDIRECTS: usize = 1;

/// Connection settings for one client. Explicit fields win over the
/// environment: `from_env` only fills what the process environment
/// provides, and callers may overwrite any field afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    /// Combined certificate-plus-key PEM, the grid-proxy compatibility
    /// source. Used only when no separate cert/key pair is configured.
    pub proxy_path: Option<PathBuf>,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ClientConfig {
            endpoint: endpoint.into(),
            cert_path: None,
            key_path: None,
            proxy_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("TFAAS_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let cert_path = path_env("TFAAS_CLIENT_CERT");
        let key_path = path_env("TFAAS_CLIENT_KEY");
        let proxy_path = path_env("TFAAS_PROXY").or_else(|| path_env("X509_USER_PROXY"));

        let timeout_secs = std::env::var("TFAAS_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(clamp_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_redirects = std::env::var("TFAAS_MAX_REDIRECTS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .map(clamp_max_redirects)
            .unwrap_or(DEFAULT_MAX_REDIRECTS);

        ClientConfig {
            endpoint: endpoint.trim().to_string(),
            cert_path,
            key_path,
            proxy_path,
            timeout: Duration::from_secs(timeout_secs),
            max_redirects,
        }
    }

    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.timeout = Duration::from_secs(clamp_timeout_secs(secs));
    }

    pub fn set_max_redirects(&mut self, value: usize) {
        self.max_redirects = clamp_max_redirects(value);
    }

    pub fn is_tls(&self) -> bool {
        self.endpoint
            .trim()
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("https://"))
    }

    /// Full request URL: the configured endpoint with the predict path
    /// appended, unless the endpoint already names it.
    pub fn request_url(&self) -> String {
        let base = self.endpoint.trim().trim_end_matches('/');
        if base.ends_with(PREDICT_PATH) {
            base.to_string()
        } else {
            format!("{}{}", base, PREDICT_PATH)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_ENDPOINT)
    }
}

fn path_env(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn clamp_timeout_secs(value: u64) -> u64 {
    value.clamp(1, 600)
}

fn clamp_max_redirects(value: usize) -> usize {
    value.min(5)
}
