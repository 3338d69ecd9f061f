//! The service task that owns the connection state.

use std::sync::Arc;

use atelier_chains::ChainRegistry;
use atelier_provider::{EventSubscription, ProviderError, WalletProvider};
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace, warn};

use crate::handle::WalletHandle;
use crate::state::ConnectionState;
use crate::transition::{self, ConnectOutcome, Transition};

/// Capacity of the command channel from handles.
const COMMAND_CHANNEL_CAPACITY: usize = 16;
/// Capacity of the provider event channel. Should cover bursts; a full
/// queue drops events rather than blocking the provider.
const EVENT_CHANNEL_CAPACITY: usize = 64;
/// Capacity of the settle channel. At most a handful of requests can be
/// pending at once (one per Connecting phase entered).
const SETTLE_CHANNEL_CAPACITY: usize = 4;

/// Consumer commands. The whole external command surface.
#[derive(Debug)]
pub(crate) enum Command {
    Connect,
    Reset,
}

/// Owns the [`ConnectionState`] and applies every mutation to it.
///
/// One select loop drains three sources (consumer commands, provider
/// events, settling connect requests) and feeds them all through the
/// same transition function. Provider calls never run on the loop itself:
/// `connect`'s two sequential awaits run on a spawned task that reports
/// back as a settle message, so an event arriving mid-connect reaches the
/// state immediately instead of queuing behind the request.
///
/// The loop exits when the last handle is dropped; the provider event
/// subscription is scoped to the loop and released on every exit path.
pub struct WalletService {
    provider: Arc<dyn WalletProvider>,
    state: ConnectionState,
    state_tx: watch::Sender<ConnectionState>,
    settle_tx: mpsc::Sender<ConnectOutcome>,
}

impl WalletService {
    /// Spawn the service with the default chain registry.
    pub fn spawn(provider: Arc<dyn WalletProvider>) -> WalletHandle {
        Self::spawn_with_registry(provider, ChainRegistry::default())
    }

    /// Spawn the service with a custom chain registry.
    ///
    /// Returns the handle consumers read state from and send commands
    /// through. The service stops once every clone of the handle is gone.
    pub fn spawn_with_registry(
        provider: Arc<dyn WalletProvider>,
        registry: ChainRegistry,
    ) -> WalletHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (settle_tx, settle_rx) = mpsc::channel(SETTLE_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(ConnectionState::default());

        let subscription = provider.subscribe(event_tx);
        let service = Self {
            provider,
            state: ConnectionState::default(),
            state_tx,
            settle_tx,
        };
        tokio::spawn(service.run(cmd_rx, event_rx, settle_rx, subscription));

        WalletHandle::new(cmd_tx, state_rx, Arc::new(registry))
    }

    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<Command>,
        mut event_rx: mpsc::Receiver<atelier_provider::ProviderEvent>,
        mut settle_rx: mpsc::Receiver<ConnectOutcome>,
        subscription: EventSubscription,
    ) {
        debug!("wallet service started");
        loop {
            tokio::select! {
                maybe_cmd = cmd_rx.recv() => match maybe_cmd {
                    Some(Command::Connect) => self.handle_connect(),
                    Some(Command::Reset) => self.apply(Transition::Reset),
                    // Every handle is gone; tear down.
                    None => break,
                },
                Some(event) = event_rx.recv() => self.apply(Transition::from(event)),
                Some(outcome) = settle_rx.recv() => self.apply(Transition::ConnectSettled(outcome)),
            }
        }
        drop(subscription);
        debug!("wallet service stopped");
    }

    /// Handle a connect command.
    ///
    /// At most one request is in flight: while `Connecting`, further
    /// connects return without touching the provider. An absent provider
    /// fails immediately without entering `Connecting`.
    fn handle_connect(&mut self) {
        if self.state.status.is_connecting() {
            trace!("connect ignored, request already in flight");
            return;
        }
        if !self.provider.is_available() {
            warn!("wallet provider not detected");
            self.apply(Transition::ConnectSettled(Err(ProviderError::Unavailable)));
            return;
        }

        self.apply(Transition::ConnectRequested);

        let provider = Arc::clone(&self.provider);
        let settle_tx = self.settle_tx.clone();
        tokio::spawn(async move {
            let outcome = request_connection(provider.as_ref()).await;
            if settle_tx.send(outcome).await.is_err() {
                trace!("wallet service stopped before connect settled");
            }
        });
    }

    fn apply(&mut self, transition: Transition) {
        transition::apply(&mut self.state, transition);
        debug_assert!(
            self.state.is_consistent(),
            "transition left inconsistent connection state: {:?}",
            self.state
        );
        let _ = self.state_tx.send_replace(self.state.clone());
    }
}

/// The two sequential adapter awaits of a connect request.
async fn request_connection(provider: &dyn WalletProvider) -> ConnectOutcome {
    let accounts = provider.request_accounts().await?;
    let chain_id = provider.request_chain_id().await?;
    Ok((accounts, chain_id))
}
