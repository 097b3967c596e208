use thiserror::Error;

/// Failure to retrieve a single resource from the cluster API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("giving up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: usize,
        #[source]
        last: Box<FetchError>,
    },

    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("body from {url} is not valid UTF-8: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl FetchError {
    /// Whether another attempt against the same URL may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } | FetchError::Decode { .. } => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::RetriesExhausted { .. } | FetchError::Malformed { .. } => false,
        }
    }
}

/// Configuration could not be assembled; the cycle must not run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("cannot load metric descriptor {path}: {reason}")]
    Descriptor { path: String, reason: String },
}

/// A call into the topology sink was rejected.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sink rejected {operation}: {reason}")]
    Rejected { operation: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transience() {
        let server_error = FetchError::Status { url: "u".to_string(), status: 503 };
        let client_error = FetchError::Status { url: "u".to_string(), status: 404 };
        assert!(server_error.is_transient());
        assert!(!client_error.is_transient());
    }

    #[test]
    fn test_undecodable_body_is_transient() {
        let source = String::from_utf8(vec![0x23, 0xff, 0xfe]).unwrap_err();
        let err = FetchError::Decode { url: "u".to_string(), source };
        assert!(err.is_transient());
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_exhausted_is_terminal() {
        let err = FetchError::RetriesExhausted {
            url: "https://k8s/api/v1/nodes".to_string(),
            attempts: 2,
            last: Box::new(FetchError::Status { url: "u".to_string(), status: 500 }),
        };
        assert!(!err.is_transient());
        assert!(err.to_string().contains("after 2 attempts"));
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::Missing("CLUSTER_URL").to_string(), "CLUSTER_URL must be set");
        let invalid = ConfigError::Invalid { field: "DEBUG", reason: "bad".to_string() };
        assert!(invalid.to_string().contains("DEBUG"));
    }
}
