use std::sync::OnceLock;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Identity;

use crate::config::ClientConfig;
use crate::error::{PredictError, Result};

const USER_AGENT: &str = concat!("tfaas-client/", env!("CARGO_PKG_VERSION"));

static TLS_INIT: OnceLock<()> = OnceLock::new();

/// Process-wide transport initialization. Installs the rustls crypto
/// provider exactly once; every further call, from any thread, is a
/// no-op. There is no matching teardown: the provider stays installed
/// for the life of the process. `send` calls this itself, so explicit
/// startup invocation is optional.
pub fn init() {
    TLS_INIT.get_or_init(|| {
        // A racing install from another crate is fine; exactly one
        // provider ends up active either way.
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Seam between the request pipeline and the network, so request-shaping
/// logic can be exercised against a recording stub.
pub trait Transport {
    fn send(
        &self,
        config: &ClientConfig,
        identity: Option<Identity>,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>>;
}

/// The real transport: one POST over a connection owned by this request.
/// Nothing is shared across calls, which is what makes issuing requests
/// from many threads at once safe.
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn send(
        &self,
        config: &ClientConfig,
        identity: Option<Identity>,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>> {
        init();

        let redirect_policy = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        // Server peer verification stays at the reqwest default: on.
        let mut builder = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .redirect(redirect_policy)
            .user_agent(USER_AGENT);
        if let Some(identity) = identity {
            builder = builder.identity(identity);
        }
        let client = builder.build().map_err(connection_error)?;

        let url = config.request_url();
        log::debug!("POST {} ({} byte payload)", url, payload.len());

        let response = client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(payload)
            .send()
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered HTTP {}", url, status.as_u16());
            return Err(PredictError::Http {
                status: status.as_u16(),
            });
        }

        // Buffer the whole body; decoding happens on owned bytes after
        // the connection is done.
        let body = response.bytes().map_err(connection_error)?;
        Ok(body.to_vec())
    }
}

fn connection_error(error: reqwest::Error) -> PredictError {
    let message = if error.is_redirect() {
        "redirect limit exceeded".to_string()
    } else {
        error.to_string()
    };
    PredictError::Connection {
        message,
        timeout: error.is_timeout(),
    }
}
