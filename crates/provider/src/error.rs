//! Provider error taxonomy.

/// Errors a wallet provider can fail with.
///
/// Every variant is recoverable: the connection core absorbs the failure
/// into its error state and the consumer retries or resets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// No provider is injected into the host environment.
    #[error("wallet not detected")]
    Unavailable,

    /// The user declined the account-access prompt.
    #[error("user rejected the connection request")]
    UserRejected,

    /// Any other provider-side failure (malformed response, timeout,
    /// internal error).
    #[error("{0}")]
    Rpc(String),
}

impl ProviderError {
    /// Human-readable message for the connection error state.
    ///
    /// Falls back to a generic message when the failure carries none.
    pub fn message(&self) -> String {
        match self {
            Self::Rpc(msg) if msg.is_empty() => "unable to connect wallet".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_never_empty() {
        assert_eq!(ProviderError::Unavailable.message(), "wallet not detected");
        assert_eq!(
            ProviderError::UserRejected.message(),
            "user rejected the connection request"
        );
        assert_eq!(
            ProviderError::Rpc("timeout".to_string()).message(),
            "timeout"
        );
        assert_eq!(
            ProviderError::Rpc(String::new()).message(),
            "unable to connect wallet"
        );
    }
}
