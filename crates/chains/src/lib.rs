//! Chain identity primitives.
//!
//! This crate provides the pure, dependency-free pieces of the wallet core:
//! - [`ChainRegistry`]: hex chain id to human-readable network label
//! - [`display_address`]: shortened display form of an account identifier
//!
//! Chain ids and account identifiers are opaque hex-encoded strings as
//! delivered by the provider; nothing here validates them.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod display;
mod registry;

pub use display::display_address;
pub use registry::{ChainRegistry, UNKNOWN_NETWORK_LABEL};
