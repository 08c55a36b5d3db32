use prost::Message;
use serde::Serialize;

use crate::error::{PredictError, Result};

/// One scored label from the service.
#[derive(Clone, PartialEq, Message, Serialize)]
pub struct PredictionClass {
    #[prost(string, tag = "1")]
    pub label: String,
    #[prost(float, tag = "2")]
    pub probability: f32,
}

/// The decoded response: classes in the order the service ranked them.
/// An empty set is a valid answer and is distinct from a decode failure.
#[derive(Clone, PartialEq, Message, Serialize)]
pub struct PredictionSet {
    #[prost(message, repeated, tag = "1")]
    pub predictions: Vec<PredictionClass>,
}

impl PredictionSet {
    /// Parses a response body. All-or-nothing: a malformed buffer yields
    /// `Decode` and no partial set. Probabilities are passed through
    /// unchecked apart from a debug log when one falls outside [0, 1];
    /// the wire format does not promise normalized scores.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let set: PredictionSet =
            <Self as Message>::decode(bytes).map_err(|error| PredictError::Decode {
                message: error.to_string(),
                length: bytes.len(),
            })?;

        for class in &set.predictions {
            if !(0.0..=1.0).contains(&class.probability) {
                log::debug!(
                    "class {:?} scored {} outside [0, 1]",
                    class.label,
                    class.probability
                );
            }
        }

        Ok(set)
    }

    pub fn encode(&self) -> Vec<u8> {
        <Self as Message>::encode_to_vec(self)
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PredictionClass> {
        self.predictions.iter()
    }

    /// Highest-probability class, scanning the whole set rather than
    /// trusting the service's ordering.
    pub fn best(&self) -> Option<&PredictionClass> {
        self.predictions
            .iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
    }
}

impl<'a> IntoIterator for &'a PredictionSet {
    type Item = &'a PredictionClass;
    type IntoIter = std::slice::Iter<'a, PredictionClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.predictions.iter()
    }
}
