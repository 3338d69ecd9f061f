//! Connection state types.

/// Connection lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No connection and no attempt in progress.
    #[default]
    Idle,
    /// A connect request is in flight.
    Connecting,
    /// Connected to a wallet account.
    Connected,
    /// The last attempt failed, or the provider is missing.
    Error,
}

impl ConnectionStatus {
    /// Returns true if no connection or attempt exists.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a connect request is in flight.
    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }

    /// Returns true if a wallet account is connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns true if the connection is in the error state.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// The sole mutable entity of the wallet core.
///
/// Created once per consumer scope, initialized to `Idle`, mutated only
/// through the transition function. Account and chain identifiers
/// are opaque hex strings as the provider delivered them; the
/// human-readable forms are derived on read, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionState {
    /// Current lifecycle phase.
    pub status: ConnectionStatus,
    /// Connected account identifier, if any.
    pub account: Option<String>,
    /// Selected chain identifier, if any.
    pub chain_id: Option<String>,
    /// Failure message when `status` is `Error`.
    pub error: Option<String>,
}

impl ConnectionState {
    /// Whether the state satisfies the per-status field constraints:
    ///
    /// - `Idle` carries no account, chain id, or error
    /// - `Connecting` carries no error
    /// - `Connected` carries an account
    /// - `Error` carries an error message
    pub fn is_consistent(&self) -> bool {
        match self.status {
            ConnectionStatus::Idle => {
                self.account.is_none() && self.chain_id.is_none() && self.error.is_none()
            }
            ConnectionStatus::Connecting => self.error.is_none(),
            ConnectionStatus::Connected => self.account.is_some(),
            ConnectionStatus::Error => self.error.is_some(),
        }
    }

    /// Reset every field back to the initial `Idle` state.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_idle_and_consistent() {
        let state = ConnectionState::default();
        assert!(state.status.is_idle());
        assert!(state.account.is_none());
        assert!(state.chain_id.is_none());
        assert!(state.error.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn consistency_catches_field_violations() {
        let connected_without_account = ConnectionState {
            status: ConnectionStatus::Connected,
            ..Default::default()
        };
        assert!(!connected_without_account.is_consistent());

        let error_without_message = ConnectionState {
            status: ConnectionStatus::Error,
            ..Default::default()
        };
        assert!(!error_without_message.is_consistent());

        let connecting_with_error = ConnectionState {
            status: ConnectionStatus::Connecting,
            error: Some("stale".to_string()),
            ..Default::default()
        };
        assert!(!connecting_with_error.is_consistent());

        let idle_with_chain = ConnectionState {
            chain_id: Some("0x1".to_string()),
            ..Default::default()
        };
        assert!(!idle_with_chain.is_consistent());
    }
}
