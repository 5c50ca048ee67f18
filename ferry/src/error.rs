//! Error types for the gateway core

/// Gateway errors
///
/// Validation failures are detected before any network call. Transport
/// failures cover connection errors, timeouts and non-success statuses the
/// caller chose to reject. Both are mapped to `code = -1` envelopes at the
/// service boundary; nothing propagates past it as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Shorthand for an identifier validation failure
    pub fn illegal(what: &str) -> Self {
        Self::Validation(format!("illegal {what}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_message() {
        let err = GatewayError::illegal("index_name");
        assert_eq!(err.to_string(), "illegal index_name");
    }

    #[test]
    fn test_transport_message_embeds_cause() {
        let err = GatewayError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
