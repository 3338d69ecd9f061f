//! Consumer handle.

use std::sync::Arc;

use atelier_chains::{ChainRegistry, display_address};
use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::service::Command;
use crate::state::{ConnectionState, ConnectionStatus};

/// Cloneable handle to a running [`crate::WalletService`].
///
/// This is the entire consumer contract: two commands ([`connect`],
/// [`reset`]), snapshot reads, and the derived display fields. Dropping
/// the last clone stops the service and releases its provider
/// subscription.
///
/// [`connect`]: WalletHandle::connect
/// [`reset`]: WalletHandle::reset
#[derive(Debug, Clone)]
pub struct WalletHandle {
    cmd_tx: mpsc::Sender<Command>,
    state_rx: watch::Receiver<ConnectionState>,
    registry: Arc<ChainRegistry>,
}

impl WalletHandle {
    pub(crate) fn new(
        cmd_tx: mpsc::Sender<Command>,
        state_rx: watch::Receiver<ConnectionState>,
        registry: Arc<ChainRegistry>,
    ) -> Self {
        Self {
            cmd_tx,
            state_rx,
            registry,
        }
    }

    /// Request a wallet connection.
    ///
    /// Failures are absorbed into the error state, never returned here;
    /// observe the outcome through [`WalletHandle::wait_for`] or
    /// [`WalletHandle::state`]. While a request is already in flight this
    /// is a no-op.
    pub async fn connect(&self) {
        if self.cmd_tx.send(Command::Connect).await.is_err() {
            warn!("wallet service stopped, connect dropped");
        }
    }

    /// Unconditionally reset the connection to idle.
    ///
    /// Does not cancel an in-flight request; a late success re-applies
    /// against whatever state is live when it settles.
    pub async fn reset(&self) {
        if self.cmd_tx.send(Command::Reset).await.is_err() {
            warn!("wallet service stopped, reset dropped");
        }
    }

    /// Snapshot of the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state_rx.borrow().clone()
    }

    /// Current lifecycle phase.
    pub fn status(&self) -> ConnectionStatus {
        self.state_rx.borrow().status
    }

    /// Connected account identifier, if any.
    pub fn account(&self) -> Option<String> {
        self.state_rx.borrow().account.clone()
    }

    /// Selected chain identifier, if any.
    pub fn chain_id(&self) -> Option<String> {
        self.state_rx.borrow().chain_id.clone()
    }

    /// Failure message of the last attempt, if any.
    pub fn error(&self) -> Option<String> {
        self.state_rx.borrow().error.clone()
    }

    /// Human-readable label of the selected network, derived on read.
    pub fn network_label(&self) -> String {
        self.registry.label(self.state_rx.borrow().chain_id.as_deref())
    }

    /// Shortened display form of the connected account, derived on read.
    pub fn display_address(&self) -> String {
        display_address(self.state_rx.borrow().account.as_deref())
    }

    /// Wait for the next published state change and return the snapshot.
    ///
    /// Errors only when the service is gone.
    pub async fn changed(&mut self) -> Result<ConnectionState, watch::error::RecvError> {
        self.state_rx.changed().await?;
        Ok(self.state())
    }

    /// Wait until the state satisfies `accept`, returning that snapshot.
    /// The current state is checked first.
    ///
    /// Errors only when the service is gone.
    pub async fn wait_for(
        &mut self,
        accept: impl FnMut(&ConnectionState) -> bool,
    ) -> Result<ConnectionState, watch::error::RecvError> {
        let state = self.state_rx.wait_for(accept).await?;
        Ok(state.clone())
    }
}
