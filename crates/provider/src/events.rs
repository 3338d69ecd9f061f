//! Provider-originated events.

/// Events a wallet provider pushes to its subscribers.
///
/// These fire at arbitrary times relative to any in-flight request; the
/// consumer applies them against whatever state is live when they arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The granted account set changed (`accountsChanged`).
    ///
    /// An empty list signals disconnection.
    AccountsChanged(Vec<String>),

    /// The selected chain changed (`chainChanged`).
    ChainChanged(String),
}

impl ProviderEvent {
    /// Whether this event signals a disconnect.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::AccountsChanged(accounts) if accounts.is_empty())
    }
}
