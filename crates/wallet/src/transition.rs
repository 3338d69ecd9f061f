//! The connection transition function.
//!
//! Consumer commands, provider events, and settling connect requests all
//! converge here, so there is exactly one place that moves the state and
//! enforces its field constraints. Inputs are applied against the live
//! state at the moment they fire; the store keeps no history, so the last
//! mutation wins regardless of when its cause was initiated.

use atelier_provider::{ProviderError, ProviderEvent};
use tracing::{debug, trace};

use crate::state::{ConnectionState, ConnectionStatus};

/// Outcome of a settled connect request: the granted accounts and the
/// selected chain id, or the first failure of the two adapter calls.
pub type ConnectOutcome = Result<(Vec<String>, String), ProviderError>;

/// An input that can move the connection state.
#[derive(Debug, Clone)]
pub enum Transition {
    /// A connect command was accepted and the request is now in flight.
    ConnectRequested,
    /// The in-flight connect request settled.
    ConnectSettled(ConnectOutcome),
    /// Provider pushed a new account set; empty means disconnected.
    AccountsChanged(Vec<String>),
    /// Provider pushed a new selected chain.
    ChainChanged(String),
    /// A reset command.
    Reset,
}

impl From<ProviderEvent> for Transition {
    fn from(event: ProviderEvent) -> Self {
        match event {
            ProviderEvent::AccountsChanged(accounts) => Self::AccountsChanged(accounts),
            ProviderEvent::ChainChanged(chain_id) => Self::ChainChanged(chain_id),
        }
    }
}

/// Apply one transition to the live state.
pub(crate) fn apply(state: &mut ConnectionState, transition: Transition) {
    match transition {
        Transition::ConnectRequested => {
            if state.status.is_connecting() {
                // The service never re-issues the request; nothing to do
                // here either.
                trace!("connect requested while already connecting");
                return;
            }
            state.status = ConnectionStatus::Connecting;
            state.error = None;
        }
        Transition::ConnectSettled(Ok((accounts, chain_id))) => {
            match accounts.into_iter().next() {
                Some(account) => {
                    debug!(%account, %chain_id, "wallet connected");
                    state.status = ConnectionStatus::Connected;
                    state.account = Some(account);
                    state.chain_id = Some(chain_id);
                    state.error = None;
                }
                None => {
                    // Granted access but no account: treated as a failed
                    // request rather than a connection without an account.
                    debug!("connect settled with no accounts");
                    state.status = ConnectionStatus::Error;
                    state.error = Some("wallet returned no accounts".to_string());
                }
            }
        }
        Transition::ConnectSettled(Err(failure)) => {
            debug!(error = %failure, "wallet connection failed");
            state.status = ConnectionStatus::Error;
            state.error = Some(failure.message());
        }
        Transition::AccountsChanged(accounts) => match accounts.into_iter().next() {
            Some(account) => {
                debug!(%account, "provider switched accounts");
                state.status = ConnectionStatus::Connected;
                state.account = Some(account);
                state.error = None;
            }
            None => {
                debug!("provider disconnected all accounts");
                state.clear();
            }
        },
        Transition::ChainChanged(chain_id) => {
            if state.status.is_idle() {
                // An idle connection tracks no chain.
                trace!(%chain_id, "chain change ignored while idle");
                return;
            }
            debug!(%chain_id, "provider switched chains");
            state.chain_id = Some(chain_id);
        }
        Transition::Reset => {
            trace!("connection reset");
            state.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn connected_state() -> ConnectionState {
        ConnectionState {
            status: ConnectionStatus::Connected,
            account: Some("0xaaaa".to_string()),
            chain_id: Some("0x1".to_string()),
            error: None,
        }
    }

    fn error_state() -> ConnectionState {
        ConnectionState {
            status: ConnectionStatus::Error,
            account: None,
            chain_id: None,
            error: Some("user rejected the connection request".to_string()),
        }
    }

    #[test]
    fn connect_requested_clears_error() {
        let mut state = error_state();
        apply(&mut state, Transition::ConnectRequested);
        assert_matches!(state.status, ConnectionStatus::Connecting);
        assert_eq!(state.error, None);
        assert!(state.is_consistent());
    }

    #[test]
    fn connect_requested_while_connecting_is_a_noop() {
        let mut state = ConnectionState {
            status: ConnectionStatus::Connecting,
            ..Default::default()
        };
        let before = state.clone();
        apply(&mut state, Transition::ConnectRequested);
        assert_eq!(state, before);
    }

    #[test]
    fn settle_with_accounts_connects_to_the_first() {
        let mut state = ConnectionState {
            status: ConnectionStatus::Connecting,
            ..Default::default()
        };
        apply(
            &mut state,
            Transition::ConnectSettled(Ok((
                vec!["0xaaaa".to_string(), "0xbbbb".to_string()],
                "0x1".to_string(),
            ))),
        );
        assert_matches!(state.status, ConnectionStatus::Connected);
        assert_eq!(state.account.as_deref(), Some("0xaaaa"));
        assert_eq!(state.chain_id.as_deref(), Some("0x1"));
        assert!(state.is_consistent());
    }

    #[test]
    fn settle_with_no_accounts_is_a_failure() {
        let mut state = ConnectionState {
            status: ConnectionStatus::Connecting,
            ..Default::default()
        };
        apply(
            &mut state,
            Transition::ConnectSettled(Ok((vec![], "0x1".to_string()))),
        );
        assert_matches!(state.status, ConnectionStatus::Error);
        assert_eq!(state.error.as_deref(), Some("wallet returned no accounts"));
        assert_eq!(state.account, None);
        assert!(state.is_consistent());
    }

    #[test]
    fn settle_failure_keeps_prior_fields() {
        let mut state = ConnectionState {
            status: ConnectionStatus::Connecting,
            account: Some("0xaaaa".to_string()),
            chain_id: Some("0x1".to_string()),
            error: None,
        };
        apply(
            &mut state,
            Transition::ConnectSettled(Err(ProviderError::UserRejected)),
        );
        assert_matches!(state.status, ConnectionStatus::Error);
        assert_eq!(
            state.error.as_deref(),
            Some("user rejected the connection request")
        );
        // The attempt does not clobber what was connected before it.
        assert_eq!(state.account.as_deref(), Some("0xaaaa"));
        assert_eq!(state.chain_id.as_deref(), Some("0x1"));
        assert!(state.is_consistent());
    }

    #[test]
    fn empty_accounts_event_resets_everything() {
        let mut state = connected_state();
        apply(&mut state, Transition::AccountsChanged(vec![]));
        assert_eq!(state, ConnectionState::default());
    }

    #[test]
    fn accounts_event_forces_connected_from_error() {
        let mut state = error_state();
        apply(
            &mut state,
            Transition::AccountsChanged(vec!["0xcccc".to_string()]),
        );
        assert_matches!(state.status, ConnectionStatus::Connected);
        assert_eq!(state.account.as_deref(), Some("0xcccc"));
        assert!(state.is_consistent());
    }

    #[test]
    fn accounts_event_switches_the_account() {
        let mut state = connected_state();
        apply(
            &mut state,
            Transition::AccountsChanged(vec!["0xdddd".to_string()]),
        );
        assert_eq!(state.account.as_deref(), Some("0xdddd"));
        // The chain does not move with the account.
        assert_eq!(state.chain_id.as_deref(), Some("0x1"));
    }

    #[test]
    fn chain_event_updates_connected_state() {
        let mut state = connected_state();
        apply(&mut state, Transition::ChainChanged("0x89".to_string()));
        assert_matches!(state.status, ConnectionStatus::Connected);
        assert_eq!(state.chain_id.as_deref(), Some("0x89"));
        assert_eq!(state.account.as_deref(), Some("0xaaaa"));
    }

    #[test]
    fn chain_event_is_ignored_while_idle() {
        let mut state = ConnectionState::default();
        apply(&mut state, Transition::ChainChanged("0x89".to_string()));
        assert_eq!(state, ConnectionState::default());
    }

    #[test]
    fn reset_from_every_status() {
        for state in [
            ConnectionState::default(),
            ConnectionState {
                status: ConnectionStatus::Connecting,
                ..Default::default()
            },
            connected_state(),
            error_state(),
        ] {
            let mut state = state;
            apply(&mut state, Transition::Reset);
            assert_eq!(state, ConnectionState::default());
        }
    }

    #[test]
    fn late_settle_applies_against_live_state() {
        // Reset raced ahead of the in-flight request; its success still
        // lands (last write wins, the store keeps no history).
        let mut state = ConnectionState::default();
        apply(&mut state, Transition::ConnectRequested);
        apply(&mut state, Transition::Reset);
        assert_eq!(state, ConnectionState::default());

        apply(
            &mut state,
            Transition::ConnectSettled(Ok((vec!["0xaaaa".to_string()], "0x1".to_string()))),
        );
        assert_matches!(state.status, ConnectionStatus::Connected);
        assert_eq!(state.account.as_deref(), Some("0xaaaa"));
    }
}
