// wallet-core/src/storage/mod.rs

//! Encrypted seed storage
//!
//! - **Cipher**: password → PBKDF2-HMAC-SHA256 → AES-256-GCM via [`SeedCipher`].
//! - **Password Verifier**: salted PBKDF2 hashes with legacy migration via [`PasswordVerifier`].
//! - **Vault**: labelled, persisted seeds via [`SeedVault`] over a [`VaultBackend`].

pub mod backend;
pub mod cipher;
pub mod password;
pub mod vault;

pub use backend::{FileBackend, InMemoryBackend, VaultBackend, VaultRecord};
pub use cipher::{EncryptedBlob, SeedCipher, SharedSeedCipher, StoreState};
pub use password::{PasswordCheck, PasswordHashRecord, PasswordVerifier, StoredPassword};
pub use vault::SeedVault;

use crate::error::{CryptoError, WalletResult};
use rand::{rngs::OsRng, RngCore};

pub const SALT_LEN: usize = 16;

/// Fill an array from the OS CSPRNG; no fallback source
pub(crate) fn random_array<const N: usize>() -> WalletResult<[u8; N]> {
    let mut out = [0u8; N];
    OsRng
        .try_fill_bytes(&mut out)
        .map_err(|e| CryptoError::RandomSourceUnavailable(e.to_string()))?;
    Ok(out)
}

/// serde adapter: fixed-size byte arrays as standard base64 strings
pub(crate) mod base64_array {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = STANDARD.decode(text.as_bytes()).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| D::Error::custom(format!("expected {} bytes, got {}", N, v.len())))
    }
}
