// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - BIP-32 key tree for Bitcoin script types
//
// Kiến trúc:
// ┌──────────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)                │
// │                    │                                 │
// │            master ExtendedKey ("Bitcoin seed")       │
// │     ┌─────────┬────┴─────┬──────────┐                │
// │     ▼         ▼          ▼          ▼                │
// │  m/44'/c'  m/49'/c'   m/84'/c'   m/86'/c'            │
// │  Legacy    Nested     Segwit     Taproot ─► Spark    │
// └──────────────────────────────────────────────────────┘

pub mod secp256k1;

pub use secp256k1::ExtendedKey;

use crate::crypto::paths::{AddressKind, DerivationPaths};
use crate::error::{CryptoError, WalletResult};
use crate::network::Network;
use bip32::DerivationPath;
use std::str::FromStr;
use tracing::debug;
use zeroize::Zeroizing;

// =============================================================================
// COMMON TYPES
// =============================================================================

/// Kết quả derivation chứa key pair + path thực tế đã dùng
#[derive(Debug)]
pub struct DerivedKey {
    pub key: ExtendedKey,
    /// Path actually walked (differs from the requested one only if an index was skipped)
    pub path: String,
}

impl DerivedKey {
    /// 32-byte private key, auto-zeroize khi drop
    pub fn private_key(&self) -> WalletResult<Zeroizing<[u8; 32]>> {
        self.key.private_key().ok_or_else(|| CryptoError::InvalidKeyFormat("derived key is public-only".into()).into())
    }
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Entry point for seed → master → path derivation
pub struct KeyDeriver;

impl KeyDeriver {
    /// Master extended key from a 64-byte seed
    #[inline]
    pub fn master_from_seed(seed: &[u8]) -> WalletResult<ExtendedKey> {
        ExtendedKey::master_from_seed(seed)
    }

    /// Walk `path` (e.g. `"m/84'/0'/0'/0/0"`) starting at `master`
    pub fn derive_path(master: &ExtendedKey, path: &str) -> WalletResult<DerivedKey> {
        let parsed = Self::parse_path(path)?;

        let mut walked = String::from("m");
        let mut current: Option<ExtendedKey> = None;
        for child in parsed.iter() {
            let parent = current.as_ref().unwrap_or(master);
            let next = parent.derive_child(child)?;
            let number = next.child_number();
            walked.push_str(&format!(
                "/{}{}",
                number.index(),
                if number.is_hardened() { "'" } else { "" }
            ));
            current = Some(next);
        }

        let key = current
            .ok_or_else(|| CryptoError::DerivationFailed("empty derivation path".into()))?;
        Ok(DerivedKey { key, path: walked })
    }

    /// Derive the fixed first-address key for one script type
    pub fn derive_for_kind(
        master: &ExtendedKey,
        kind: AddressKind,
        network: Network,
    ) -> WalletResult<DerivedKey> {
        let path = DerivationPaths::for_kind(kind, network);
        debug!(%kind, %network, path, "deriving address key");
        Self::derive_path(master, path)
    }

    /// Seed → master → path in one call
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<DerivedKey> {
        let master = Self::master_from_seed(seed)?;
        Self::derive_path(&master, path)
    }

    /// Validate path format
    #[inline]
    pub fn is_valid_path(path: &str) -> bool {
        Self::parse_path(path).is_ok()
    }

    fn parse_path(path: &str) -> WalletResult<DerivationPath> {
        DerivationPath::from_str(path).map_err(|e| {
            CryptoError::DerivationFailed(format!("Invalid path '{}': {}", path, e)).into()
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
