// wallet-core/src/storage/cipher.rs
//
// Seed Cipher - password-derived AES-256-GCM key as an explicit state machine
//
//   Uninitialized ──initialize(pw)──► Initialized(key) ──clear()──► Locked
//         ▲                                  ▲                         │
//         └── salt created here, once        └──────initialize(pw)─────┘
//
// Key chỉ tồn tại trong state Initialized và được zeroize khi rời state đó.

use crate::config::StoreConfig;
use crate::error::{CryptoError, StorageError, WalletResult};
use crate::storage::{random_array, SALT_LEN};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, warn};
use zeroize::Zeroizing;

pub const IV_LEN: usize = 12;
pub const KEY_LEN: usize = 32;
pub const TAG_LEN: usize = 16;

// =============================================================================
// ENCRYPTED BLOB
// =============================================================================

/// `iv || ciphertext || tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    iv: [u8; IV_LEN],
    /// Ciphertext with the 16-byte GCM tag appended
    ciphertext: Vec<u8>,
}

impl EncryptedBlob {
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(IV_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() < IV_LEN + TAG_LEN {
            return Err(StorageError::Corrupt(format!(
                "encrypted blob too short: {} bytes",
                bytes.len()
            ))
            .into());
        }
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[..IV_LEN]);
        Ok(Self {
            iv,
            ciphertext: bytes[IV_LEN..].to_vec(),
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> WalletResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| StorageError::Corrupt(format!("blob base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Observable state of a [`SeedCipher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Initialized,
    Locked,
}

enum CipherState {
    Uninitialized,
    Initialized(Zeroizing<[u8; KEY_LEN]>),
    Locked,
}

/// Password-keyed AES-256-GCM cipher.
///
/// Owned by the caller; `&mut self` on [`initialize`](Self::initialize) and
/// [`clear`](Self::clear) means a clear can never race an in-flight encrypt.
/// Wrap in [`SharedSeedCipher`] to share across threads.
pub struct SeedCipher {
    salt: Option<[u8; SALT_LEN]>,
    iterations: u32,
    state: CipherState,
}

impl std::fmt::Debug for SeedCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedCipher")
            .field("state", &self.state())
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl SeedCipher {
    /// Fresh store; the salt is created by the first `initialize`
    pub fn new(config: StoreConfig) -> WalletResult<Self> {
        config.validate()?;
        Ok(Self {
            salt: None,
            iterations: config.pbkdf2_iterations,
            state: CipherState::Uninitialized,
        })
    }

    /// Re-open a store whose salt was persisted earlier
    pub fn with_salt(salt: [u8; SALT_LEN], config: StoreConfig) -> WalletResult<Self> {
        config.validate()?;
        Ok(Self {
            salt: Some(salt),
            iterations: config.pbkdf2_iterations,
            state: CipherState::Uninitialized,
        })
    }

    pub fn state(&self) -> StoreState {
        match self.state {
            CipherState::Uninitialized => StoreState::Uninitialized,
            CipherState::Initialized(_) => StoreState::Initialized,
            CipherState::Locked => StoreState::Locked,
        }
    }

    /// Salt to persist next to the ciphertexts; `None` before the first `initialize`
    pub fn salt(&self) -> Option<[u8; SALT_LEN]> {
        self.salt
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive the key from `password` and enter `Initialized`
    pub fn initialize(&mut self, password: &str) -> WalletResult<()> {
        let salt = match self.salt {
            Some(salt) => salt,
            None => {
                let salt = random_array::<SALT_LEN>()?;
                self.salt = Some(salt);
                salt
            }
        };

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, self.iterations, &mut key[..]);
        self.state = CipherState::Initialized(key);
        debug!(iterations = self.iterations, "seed store initialized");
        Ok(())
    }

    /// Encrypt under a fresh random IV
    pub fn encrypt(&self, plaintext: &[u8]) -> WalletResult<EncryptedBlob> {
        let cipher = self.aead()?;
        let iv = random_array::<IV_LEN>()?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&iv), plaintext)
            .map_err(|e| CryptoError::Encoding(format!("AES-GCM encrypt: {}", e)))?;
        Ok(EncryptedBlob { iv, ciphertext })
    }

    /// Decrypt and authenticate; any tag mismatch yields no plaintext at all
    pub fn decrypt(&self, blob: &EncryptedBlob) -> WalletResult<Zeroizing<Vec<u8>>> {
        let cipher = self.aead()?;
        match cipher.decrypt(Nonce::from_slice(&blob.iv), blob.ciphertext.as_slice()) {
            Ok(plaintext) => Ok(Zeroizing::new(plaintext)),
            Err(_) => {
                warn!("seed store authentication failed");
                Err(StorageError::AuthenticationFailed.into())
            }
        }
    }

    /// Drop the key and move to `Locked`
    pub fn clear(&mut self) {
        if matches!(self.state, CipherState::Initialized(_)) {
            debug!("seed store locked");
        }
        self.state = CipherState::Locked;
    }

    fn aead(&self) -> WalletResult<Aes256Gcm> {
        match &self.state {
            CipherState::Initialized(key) => Aes256Gcm::new_from_slice(&key[..])
                .map_err(|e| CryptoError::InvalidKeyFormat(format!("AES key: {}", e)).into()),
            _ => Err(StorageError::StoreNotInitialized.into()),
        }
    }
}

// =============================================================================
// THREAD-SAFE WRAPPER
// =============================================================================

/// A thread-safe handle around a [`SeedCipher`]
///
/// Every call takes the lock, so `clear` and `encrypt` from different
/// threads are serialized.
#[derive(Clone)]
pub struct SharedSeedCipher(Arc<Mutex<SeedCipher>>);

impl SharedSeedCipher {
    pub fn new(cipher: SeedCipher) -> Self {
        Self(Arc::new(Mutex::new(cipher)))
    }

    pub fn state(&self) -> StoreState {
        self.0.lock().state()
    }

    pub fn salt(&self) -> Option<[u8; SALT_LEN]> {
        self.0.lock().salt()
    }

    pub fn initialize(&self, password: &str) -> WalletResult<()> {
        self.0.lock().initialize(password)
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> WalletResult<EncryptedBlob> {
        self.0.lock().encrypt(plaintext)
    }

    pub fn decrypt(&self, blob: &EncryptedBlob) -> WalletResult<Zeroizing<Vec<u8>>> {
        self.0.lock().decrypt(blob)
    }

    pub fn clear(&self) {
        self.0.lock().clear()
    }
}

// =============================================================================
// TESTS
// =============================================================================
