use crate::config::ClientConfig;
use crate::credentials::ClientCredentials;
use crate::error::{PredictError, Result};
use crate::prediction::PredictionSet;
use crate::row::FeatureRow;
use crate::transport::{HttpTransport, Transport};

/// Prediction client for one endpoint. The client itself holds no
/// per-request state: every call resolves credentials, opens its own
/// connection, and buffers its own response, so a single client can be
/// shared across threads freely.
pub struct TfaasClient {
    config: ClientConfig,
    transport: Box<dyn Transport + Send + Sync>,
}

impl TfaasClient {
    pub fn new(config: ClientConfig) -> Self {
        TfaasClient {
            config,
            transport: Box::new(HttpTransport),
        }
    }

    /// Swaps in an alternate transport. Test instrumentation mostly.
    pub fn with_transport(
        config: ClientConfig,
        transport: Box<dyn Transport + Send + Sync>,
    ) -> Self {
        TfaasClient { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a row from loose parts and scores it.
    pub fn predict(
        &self,
        model: impl Into<String>,
        keys: Vec<String>,
        values: Vec<f32>,
    ) -> Result<PredictionSet> {
        let row = FeatureRow::new(model, keys, values)?;
        self.predict_row(&row)
    }

    /// Runs one request through its phases in order: credentials, encode,
    /// send, decode. The first failing phase aborts the request and its
    /// error says which phase it was; there is no partial result.
    pub fn predict_row(&self, row: &FeatureRow) -> Result<PredictionSet> {
        let identity = match ClientCredentials::resolve(&self.config)? {
            Some(credentials) => Some(credentials.identity()?),
            None if self.config.is_tls() => {
                // An https endpoint without a client identity would be a
                // silent downgrade to unauthenticated access; refuse
                // before touching the network.
                return Err(PredictError::credential(
                    "https endpoint configured but no client certificate/key or proxy file",
                ));
            }
            None => None,
        };

        let payload = row.encode();
        let body = self.transport.send(&self.config, identity, payload)?;
        let predictions = PredictionSet::decode(&body)?;

        log::debug!(
            "model {} scored {} class(es)",
            row.model(),
            predictions.len()
        );
        Ok(predictions)
    }
}

/// One-shot convenience call: endpoint plus loose row parts, remaining
/// settings (credentials, timeout, redirects) from the environment.
pub fn predict(
    endpoint: impl Into<String>,
    model: impl Into<String>,
    keys: Vec<String>,
    values: Vec<f32>,
) -> Result<PredictionSet> {
    let mut config = ClientConfig::from_env();
    config.endpoint = endpoint.into();
    TfaasClient::new(config).predict(model, keys, values)
}
