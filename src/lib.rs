//! Client for TFaaS-style inference services.
//!
//! A request is a protobuf feature row (model name plus parallel
//! attribute/value arrays) POSTed over HTTP(S); the answer is a protobuf
//! list of (label, probability) classes. TLS endpoints authenticate with
//! a client certificate, sourced either from a separate cert/key pair or
//! from a combined grid-proxy PEM.
//!
//! ```no_run
//! use tfaas_client::predict;
//!
//! let keys = vec!["0".to_string(), "1".to_string()];
//! let values = vec![0.0, 1.0];
//! let predictions = predict("http://localhost:8083", "luca", keys, values)?;
//! for class in &predictions {
//!     println!("class: {} probability: {}", class.label, class.probability);
//! }
//! # Ok::<(), tfaas_client::PredictError>(())
//! ```

mod client;
mod config;
mod credentials;
mod error;
mod prediction;
mod row;
mod transport;

pub use client::{predict, TfaasClient};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, PREDICT_PATH};
pub use credentials::ClientCredentials;
pub use error::{Phase, PredictError, Result};
pub use prediction::{PredictionClass, PredictionSet};
pub use row::FeatureRow;
pub use transport::{init, HttpTransport, Transport};
