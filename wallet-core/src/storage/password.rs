// wallet-core/src/storage/password.rs
//
// Password Verifier - PBKDF2-HMAC-SHA256 login hashes, constant-time compare.
// Hash cũ (SHA-256 không salt) chỉ được chấp nhận một lần rồi rehash ngay.

use crate::config::StoreConfig;
use crate::crypto::hash::sha256;
use crate::error::{StorageError, WalletResult};
use crate::storage::{base64_array, random_array, SALT_LEN};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;
use zeroize::Zeroizing;

pub const HASH_LEN: usize = 32;

/// Salted PBKDF2 password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHashRecord {
    #[serde(with = "base64_array")]
    pub salt: [u8; SALT_LEN],
    #[serde(with = "base64_array")]
    pub hash: [u8; HASH_LEN],
    pub iterations: u32,
}

/// Whatever the backend has on file for the login password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "camelCase")]
pub enum StoredPassword {
    Pbkdf2(PasswordHashRecord),
    /// Unsalted SHA-256, hex. Read-only: never produced for new passwords.
    LegacySha256 { digest: String },
}

/// Outcome of [`PasswordVerifier::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordCheck {
    Rejected,
    Accepted,
    /// Legacy hash matched; persist the contained record in its place
    Migrated(PasswordHashRecord),
}

impl PasswordCheck {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, PasswordCheck::Rejected)
    }
}

pub struct PasswordVerifier {
    config: StoreConfig,
}

impl PasswordVerifier {
    pub fn new(config: StoreConfig) -> WalletResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Hash with a fresh random salt
    pub fn hash(&self, password: &str) -> WalletResult<PasswordHashRecord> {
        let salt = random_array::<SALT_LEN>()?;
        let hash = derive(password, &salt, self.config.pbkdf2_iterations);
        Ok(PasswordHashRecord {
            salt,
            hash: *hash,
            iterations: self.config.pbkdf2_iterations,
        })
    }

    /// Recompute under the record's own salt and iteration count.
    /// Records outside the accepted iteration range are refused, not verified.
    pub fn verify(password: &str, record: &PasswordHashRecord) -> WalletResult<bool> {
        StoreConfig {
            pbkdf2_iterations: record.iterations,
        }
        .validate()?;
        let candidate = derive(password, &record.salt, record.iterations);
        Ok(candidate[..].ct_eq(&record.hash[..]).into())
    }

    /// Check against either scheme, upgrading legacy hashes on success
    pub fn check(&self, password: &str, stored: &StoredPassword) -> WalletResult<PasswordCheck> {
        match stored {
            StoredPassword::Pbkdf2(record) => Ok(if Self::verify(password, record)? {
                PasswordCheck::Accepted
            } else {
                PasswordCheck::Rejected
            }),
            StoredPassword::LegacySha256 { digest } => {
                let expected: [u8; HASH_LEN] = hex::decode(digest)
                    .ok()
                    .and_then(|d| d.try_into().ok())
                    .ok_or_else(|| StorageError::Corrupt("legacy password digest".into()))?;

                if bool::from(sha256(password.as_bytes())[..].ct_eq(&expected[..])) {
                    warn!("legacy password hash accepted; migrating to PBKDF2");
                    Ok(PasswordCheck::Migrated(self.hash(password)?))
                } else {
                    Ok(PasswordCheck::Rejected)
                }
            }
        }
    }
}

fn derive(password: &str, salt: &[u8; SALT_LEN], iterations: u32) -> Zeroizing<[u8; HASH_LEN]> {
    let mut out = Zeroizing::new([0u8; HASH_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out[..]);
    out
}
