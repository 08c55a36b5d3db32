use prost::Message;

use crate::error::{PredictError, Result};

/// One inference request unit: a model selector plus positionally paired
/// attribute names and values. Matches the service's `Row` protobuf
/// message, so `encode` produces the wire payload directly.
#[derive(Clone, PartialEq, Message)]
pub struct FeatureRow {
    #[prost(string, tag = "1")]
    model: String,
    #[prost(string, repeated, tag = "2")]
    keys: Vec<String>,
    #[prost(float, repeated, tag = "3")]
    values: Vec<f32>,
}

impl FeatureRow {
    /// Builds a row, rejecting malformed input before any bytes are
    /// produced. Empty key/value lists are allowed (model-only request);
    /// mismatched lengths and an empty model name are not.
    pub fn new(
        model: impl Into<String>,
        keys: Vec<String>,
        values: Vec<f32>,
    ) -> Result<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(PredictError::encoding("model name is empty"));
        }
        if keys.len() != values.len() {
            return Err(PredictError::encoding(format!(
                "{} attribute name(s) paired with {} value(s)",
                keys.len(),
                values.len()
            )));
        }
        Ok(FeatureRow { model, keys, values })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Serializes the row to its protobuf wire form.
    pub fn encode(&self) -> Vec<u8> {
        <Self as Message>::encode_to_vec(self)
    }

    /// Parses a wire row. Rows received off the wire are taken as-is;
    /// length validation applies at construction, not here.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        <Self as Message>::decode(bytes).map_err(|error| PredictError::Decode {
            message: error.to_string(),
            length: bytes.len(),
        })
    }
}
