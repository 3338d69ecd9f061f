//! Scripted wallet provider for tests.
//!
//! [`MockProvider`] implements the provider boundary with fully scripted
//! behavior: availability, request results, call counters, an optional
//! gate holding `request_accounts` unresolved until the test releases it,
//! and manual event emission into whatever sinks are subscribed.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use atelier_provider::{EventSinks, EventSubscription, ProviderError, ProviderEvent, WalletProvider};
use parking_lot::RwLock;
use tokio::sync::{Semaphore, mpsc};

/// Account the default script resolves with.
pub const DEFAULT_ACCOUNT: &str = "0x4bbeEB066eD09B7AEd07bF39EEe0460DFa261520";
/// Chain id the default script resolves with (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: &str = "0x1";

/// Scripted wallet provider.
///
/// Cloning shares the script and the counters, so a test can hand one
/// clone to the service and keep another for steering.
#[derive(Debug, Clone)]
pub struct MockProvider {
    inner: Arc<MockInner>,
}

#[derive(Debug)]
struct MockInner {
    available: AtomicBool,
    accounts_result: RwLock<Result<Vec<String>, ProviderError>>,
    chain_result: RwLock<Result<String, ProviderError>>,
    accounts_calls: AtomicUsize,
    chain_calls: AtomicUsize,
    /// When set, `request_accounts` consumes one permit before resolving.
    accounts_gate: RwLock<Option<Arc<Semaphore>>>,
    sinks: EventSinks,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            inner: Arc::new(MockInner {
                available: AtomicBool::new(true),
                accounts_result: RwLock::new(Ok(vec![DEFAULT_ACCOUNT.to_string()])),
                chain_result: RwLock::new(Ok(DEFAULT_CHAIN_ID.to_string())),
                accounts_calls: AtomicUsize::new(0),
                chain_calls: AtomicUsize::new(0),
                accounts_gate: RwLock::new(None),
                sinks: EventSinks::new(),
            }),
        }
    }
}

impl MockProvider {
    /// A provider that resolves with the default account on mainnet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that is absent from the host environment.
    pub fn unavailable() -> Self {
        let provider = Self::new();
        provider.set_available(false);
        provider
    }

    /// Script whether the provider is injected at all.
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    /// Script `request_accounts` to resolve with these accounts.
    pub fn set_accounts(&self, accounts: &[&str]) {
        *self.inner.accounts_result.write() =
            Ok(accounts.iter().map(|a| a.to_string()).collect());
    }

    /// Script `request_accounts` to fail.
    pub fn fail_accounts(&self, error: ProviderError) {
        *self.inner.accounts_result.write() = Err(error);
    }

    /// Script `request_chain_id` to resolve with this chain id.
    pub fn set_chain_id(&self, chain_id: &str) {
        *self.inner.chain_result.write() = Ok(chain_id.to_string());
    }

    /// Script `request_chain_id` to fail.
    pub fn fail_chain_id(&self, error: ProviderError) {
        *self.inner.chain_result.write() = Err(error);
    }

    /// Hold every subsequent `request_accounts` call until
    /// [`MockProvider::release_accounts`] grants a permit. Lets tests pin
    /// a connect attempt in its in-flight phase.
    pub fn hold_accounts(&self) {
        *self.inner.accounts_gate.write() = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let one held `request_accounts` call proceed.
    pub fn release_accounts(&self) {
        if let Some(gate) = self.inner.accounts_gate.read().as_ref() {
            gate.add_permits(1);
        }
    }

    /// Number of `request_accounts` calls issued so far.
    pub fn accounts_requests(&self) -> usize {
        self.inner.accounts_calls.load(Ordering::SeqCst)
    }

    /// Number of `request_chain_id` calls issued so far.
    pub fn chain_requests(&self) -> usize {
        self.inner.chain_calls.load(Ordering::SeqCst)
    }

    /// Number of currently subscribed sinks.
    pub fn subscriber_count(&self) -> usize {
        self.inner.sinks.len()
    }

    /// Push an `accountsChanged` event to every subscriber.
    pub fn emit_accounts_changed(&self, accounts: &[&str]) {
        self.inner.sinks.dispatch(ProviderEvent::AccountsChanged(
            accounts.iter().map(|a| a.to_string()).collect(),
        ));
    }

    /// Push a `chainChanged` event to every subscriber.
    pub fn emit_chain_changed(&self, chain_id: &str) {
        self.inner
            .sinks
            .dispatch(ProviderEvent::ChainChanged(chain_id.to_string()));
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    fn is_available(&self) -> bool {
        self.inner.available.load(Ordering::SeqCst)
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.inner.accounts_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.inner.accounts_gate.read().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        self.inner.accounts_result.read().clone()
    }

    async fn request_chain_id(&self) -> Result<String, ProviderError> {
        self.inner.chain_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.chain_result.read().clone()
    }

    fn subscribe(&self, sink: mpsc::Sender<ProviderEvent>) -> EventSubscription {
        self.inner.sinks.attach(sink)
    }
}
