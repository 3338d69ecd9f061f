//! Network label registry.

use std::borrow::Cow;
use std::collections::HashMap;

/// Label returned when no chain id is known, or the id cannot be parsed.
pub const UNKNOWN_NETWORK_LABEL: &str = "Unknown network";

/// Maps hex-encoded chain ids to human-readable network labels.
///
/// The mapping is plain data: [`ChainRegistry::default`] carries the
/// networks the marketplace ships with, and [`ChainRegistry::with_label`]
/// extends the table without touching any connection logic. Lookups are
/// case-sensitive against the id as the provider delivered it.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    labels: HashMap<Cow<'static, str>, Cow<'static, str>>,
}

/// Networks known out of the box.
const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("0x1", "Ethereum Mainnet"),
    ("0x5", "Goerli Testnet"),
    ("0xaa36a7", "Sepolia Testnet"),
    ("0x89", "Polygon Mainnet"),
    ("0x13881", "Polygon Mumbai"),
    ("0xa4b1", "Arbitrum One"),
    ("0xa", "Optimism"),
];

impl Default for ChainRegistry {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS
                .iter()
                .map(|(id, label)| (Cow::Borrowed(*id), Cow::Borrowed(*label)))
                .collect(),
        }
    }
}

impl ChainRegistry {
    /// Create an empty registry (every lookup falls through to the
    /// numeric fallback).
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    /// Add or replace a label for a chain id.
    pub fn with_label(
        mut self,
        chain_id: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.labels.insert(chain_id.into(), label.into());
        self
    }

    /// Number of chain ids in the table.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Resolve a chain id to a network label.
    ///
    /// - no chain id: [`UNKNOWN_NETWORK_LABEL`]
    /// - id in the table: the exact label
    /// - id absent: `Chain {n}` with `n` the base-10 value of the hex id
    /// - id absent and not parseable as hex: [`UNKNOWN_NETWORK_LABEL`]
    pub fn label(&self, chain_id: Option<&str>) -> String {
        let Some(chain_id) = chain_id else {
            return UNKNOWN_NETWORK_LABEL.to_string();
        };
        if let Some(label) = self.labels.get(chain_id) {
            return label.to_string();
        }
        match parse_hex_chain_id(chain_id) {
            Some(n) => format!("Chain {n}"),
            None => UNKNOWN_NETWORK_LABEL.to_string(),
        }
    }
}

/// Parse a hex chain id, tolerating an `0x`/`0X` prefix.
fn parse_hex_chain_id(chain_id: &str) -> Option<u128> {
    let digits = chain_id
        .strip_prefix("0x")
        .or_else(|| chain_id.strip_prefix("0X"))
        .unwrap_or(chain_id);
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}
