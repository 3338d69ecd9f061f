//! Wallet connection lifecycle.
//!
//! This crate is the core of the marketplace's wallet integration: a
//! single state store tracking the connection to an injected wallet
//! provider, driven by exactly two consumer commands (`connect`, `reset`)
//! and by provider-originated events that can fire at any time.
//!
//! # Architecture
//!
//! A [`WalletService`] task owns the [`ConnectionState`]. Commands arrive
//! on an mpsc channel from the [`WalletHandle`]; provider events arrive on
//! a second channel the service subscribed to the provider; the two
//! adapter awaits of a `connect` run on a spawned task that reports back
//! into the same loop. All three paths converge on one transition
//! function, so there is exactly one place that moves the state and every
//! mutation is applied against the live state at the moment it fires
//! (last write wins, no history).
//!
//! Every post-transition state is published on a watch channel; the
//! handle reads snapshots from it and derives the network label and the
//! display address on read.
//!
//! ```ignore
//! let handle = WalletService::spawn(provider);
//! handle.connect().await;
//! let state = handle.wait_for(|s| !s.status.is_connecting()).await?;
//! println!("{} on {}", handle.display_address(), handle.network_label());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod handle;
mod service;
mod state;
mod transition;

pub use handle::WalletHandle;
pub use service::WalletService;
pub use state::{ConnectionState, ConnectionStatus};
pub use transition::{ConnectOutcome, Transition};
