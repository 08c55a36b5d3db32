use std::path::{Path, PathBuf};

use crate::config::ClientConfig;
use crate::error::{PredictError, Result};

/// Client TLS identity source: either a separate certificate/key pair or
/// a single combined PEM (grid proxy style).
#[derive(Debug, Clone)]
pub enum ClientCredentials {
    Pair { cert: PathBuf, key: PathBuf },
    Combined { path: PathBuf },
}

impl ClientCredentials {
    /// Picks the credential source out of a config. A separate pair wins
    /// over the combined file; half a pair is a configuration error
    /// rather than something to patch over at the TLS layer. `None`
    /// means no identity is configured at all.
    pub fn resolve(config: &ClientConfig) -> Result<Option<Self>> {
        match (&config.cert_path, &config.key_path) {
            (Some(cert), Some(key)) => Ok(Some(ClientCredentials::Pair {
                cert: cert.clone(),
                key: key.clone(),
            })),
            (Some(_), None) => Err(PredictError::credential(
                "client certificate configured without a key",
            )),
            (None, Some(_)) => Err(PredictError::credential(
                "client key configured without a certificate",
            )),
            (None, None) => Ok(config
                .proxy_path
                .as_ref()
                .map(|path| ClientCredentials::Combined { path: path.clone() })),
        }
    }

    /// Loads and parses the PEM material. Runs before any connection
    /// attempt, so unreadable or malformed credentials never reach the
    /// network.
    pub fn identity(&self) -> Result<reqwest::Identity> {
        let pem = match self {
            ClientCredentials::Pair { cert, key } => {
                let mut buffer = read_pem(cert)?;
                if !buffer.ends_with(b"\n") {
                    buffer.push(b'\n');
                }
                buffer.extend_from_slice(&read_pem(key)?);
                buffer
            }
            ClientCredentials::Combined { path } => read_pem(path)?,
        };

        reqwest::Identity::from_pem(&pem).map_err(|error| {
            PredictError::credential(format!("invalid client identity PEM: {}", error))
        })
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|error| {
        PredictError::credential(format!("unable to read {}: {}", path.display(), error))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Phase;

    #[test]
    fn pair_preferred_over_proxy() {
        let mut config = ClientConfig::new("https://tfaas.example.org");
        config.cert_path = Some(PathBuf::from("/tmp/cert.pem"));
        config.key_path = Some(PathBuf::from("/tmp/key.pem"));
        config.proxy_path = Some(PathBuf::from("/tmp/proxy.pem"));

        match ClientCredentials::resolve(&config).unwrap() {
            Some(ClientCredentials::Pair { cert, key }) => {
                assert_eq!(cert, PathBuf::from("/tmp/cert.pem"));
                assert_eq!(key, PathBuf::from("/tmp/key.pem"));
            }
            other => panic!("expected pair, got {:?}", other),
        }
    }

    #[test]
    fn proxy_fallback() {
        let mut config = ClientConfig::new("https://tfaas.example.org");
        config.proxy_path = Some(PathBuf::from("/tmp/x509up_u1000"));

        match ClientCredentials::resolve(&config).unwrap() {
            Some(ClientCredentials::Combined { path }) => {
                assert_eq!(path, PathBuf::from("/tmp/x509up_u1000"));
            }
            other => panic!("expected combined source, got {:?}", other),
        }
    }

    #[test]
    fn half_a_pair_is_an_error() {
        let mut config = ClientConfig::new("https://tfaas.example.org");
        config.cert_path = Some(PathBuf::from("/tmp/cert.pem"));
        let error = ClientCredentials::resolve(&config).unwrap_err();
        assert_eq!(error.phase(), Phase::Credential);

        let mut config = ClientConfig::new("https://tfaas.example.org");
        config.key_path = Some(PathBuf::from("/tmp/key.pem"));
        let error = ClientCredentials::resolve(&config).unwrap_err();
        assert_eq!(error.phase(), Phase::Credential);
    }

    #[test]
    fn nothing_configured_resolves_to_none() {
        let config = ClientConfig::new("http://localhost:8083");
        assert!(ClientCredentials::resolve(&config).unwrap().is_none());
    }

    #[test]
    fn missing_file_is_a_credential_error() {
        let credentials = ClientCredentials::Combined {
            path: PathBuf::from("/nonexistent/x509up_u0"),
        };
        let error = credentials.identity().unwrap_err();
        assert_eq!(error.phase(), Phase::Credential);
    }
}
