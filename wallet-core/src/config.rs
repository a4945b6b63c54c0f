// wallet-core/src/config.rs
//
// Configuration values passed in by the host application.
// Không có file config mặc định: caller tự load JSON/TOML rồi deserialize vào đây.

use crate::crypto::WordCount;
use crate::error::{StorageError, WalletResult};
use crate::network::Network;
use serde::{Deserialize, Serialize};

/// Lower bound for the seed-store key derivation
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Upper bound, so a tampered record cannot stall a password check
pub const MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;

// =============================================================================
// STORE CONFIG
// =============================================================================

/// Seed store / password verifier parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    pub pbkdf2_iterations: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: MIN_PBKDF2_ITERATIONS,
        }
    }
}

impl StoreConfig {
    /// Reject iteration counts outside
    /// [`MIN_PBKDF2_ITERATIONS`]..=[`MAX_PBKDF2_ITERATIONS`]
    pub fn validate(&self) -> WalletResult<()> {
        match self.pbkdf2_iterations {
            n if n < MIN_PBKDF2_ITERATIONS => Err(StorageError::WeakKdfParameters(n).into()),
            n if n > MAX_PBKDF2_ITERATIONS => Err(StorageError::ExcessiveKdfParameters(n).into()),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// WALLET CONFIG
// =============================================================================

/// Everything `generate`/`import` needs, as one deserializable value
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletConfig {
    pub network: Network,
    pub word_count: WordCount,
    /// Optional BIP-39 passphrase ("25th word"), NFKD-normalized at expansion
    pub passphrase: Option<String>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            word_count: WordCount::Twelve,
            passphrase: None,
        }
    }
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("network", &self.network)
            .field("word_count", &self.word_count)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
