//! Wallet provider boundary.
//!
//! The host environment injects a wallet provider (in a browser this is
//! the `window.ethereum` object); the connection core never touches that
//! global directly. Instead everything it needs from the provider is
//! expressed by the [`WalletProvider`] trait, so the core can be driven by
//! a real provider bridge or by a scripted substitute in tests.
//!
//! The provider is asynchronous and event-driven: two request/response
//! calls (`eth_requestAccounts`, `eth_chainId`) plus two push events
//! (`accountsChanged`, `chainChanged`) that can fire at any time,
//! independent of any in-flight request.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use async_trait::async_trait;
use tokio::sync::mpsc;

mod error;
mod events;
mod subscription;

pub use error::ProviderError;
pub use events::ProviderEvent;
pub use subscription::{EventSinks, EventSubscription};

/// An injected wallet provider.
///
/// Implementations bridge to whatever the host environment supplies.
/// Account and chain identifiers are opaque hex-encoded strings and are
/// passed through untouched.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a provider is present in the host environment at all.
    ///
    /// When this returns `false` no request will be issued.
    fn is_available(&self) -> bool;

    /// Request access to the user's accounts (`eth_requestAccounts`).
    ///
    /// Resolves with the accounts the user granted, in provider order.
    /// Fails with [`ProviderError::UserRejected`] when the user declines
    /// the prompt.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Request the currently selected chain id (`eth_chainId`).
    async fn request_chain_id(&self) -> Result<String, ProviderError>;

    /// Attach an event sink for `accountsChanged` / `chainChanged`.
    ///
    /// The returned guard detaches the sink when dropped. Holding the
    /// guard for exactly the consumer scope's lifetime is how the core
    /// guarantees no stale handler outlives its state store.
    fn subscribe(&self, sink: mpsc::Sender<ProviderEvent>) -> EventSubscription;
}
