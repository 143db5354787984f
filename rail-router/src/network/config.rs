//! Network build configuration.

use super::edges::TransferMatch;

/// Configuration parameters for building a network.
#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    /// Which same-named station pairs get a zero-cost transfer edge.
    pub transfer: TransferMatch,
}

impl NetworkConfig {
    /// Create a new configuration with the given transfer matching.
    pub fn new(transfer: TransferMatch) -> Self {
        Self { transfer }
    }
}
