// wallet-core/src/storage/vault.rs
//
// Seed Vault - labelled, password-encrypted mnemonics on top of a backend
//
// store_seed:    label → SeedCipher(salt of label) → encrypt(phrase) → VaultRecord
// retrieve_seed: VaultRecord → SeedCipher(persisted salt) → decrypt → WalletMnemonic

use crate::config::StoreConfig;
use crate::crypto::WalletMnemonic;
use crate::error::{StorageError, WalletResult};
use crate::storage::backend::{VaultBackend, VaultRecord};
use crate::storage::cipher::{EncryptedBlob, SeedCipher};
use crate::storage::password::{PasswordCheck, PasswordVerifier, StoredPassword};
use crate::storage::SALT_LEN;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

const MNEMONIC_SECRET: &str = "mnemonic";
const MAX_LABEL_LEN: usize = 64;

pub struct SeedVault<B: VaultBackend> {
    backend: B,
    config: StoreConfig,
    verifier: PasswordVerifier,
}

impl<B: VaultBackend> SeedVault<B> {
    pub fn new(backend: B, config: StoreConfig) -> WalletResult<Self> {
        let verifier = PasswordVerifier::new(config)?;
        Ok(Self {
            backend,
            config,
            verifier,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // =========================================================================
    // SEEDS
    // =========================================================================

    /// Encrypt `mnemonic` under `password` and persist it under `label`.
    ///
    /// Overwrites an existing seed for the label, keeping the label's salt.
    pub fn store_seed(&self, label: &str, mnemonic: &str, password: &str) -> WalletResult<()> {
        validate_label(label)?;
        let mnemonic = WalletMnemonic::from_phrase(mnemonic)?;

        let existing = self.backend.load(label)?;
        let mut cipher = match &existing {
            Some(record) => SeedCipher::with_salt(decode_salt(&record.salt)?, self.config)?,
            None => SeedCipher::new(self.config)?,
        };
        cipher.initialize(password)?;
        let blob = cipher.encrypt(mnemonic.phrase().as_bytes())?;
        let salt = cipher
            .salt()
            .ok_or_else(|| StorageError::Backend("cipher has no salt after initialize".into()))?;
        cipher.clear();

        let mut record = existing.unwrap_or_else(|| VaultRecord {
            salt: String::new(),
            iterations: 0,
            secrets: BTreeMap::new(),
        });
        record.salt = STANDARD.encode(salt);
        record.iterations = cipher.iterations();
        record
            .secrets
            .insert(MNEMONIC_SECRET.to_string(), blob.to_base64());

        self.backend.save(label, &record)?;
        info!(label, words = mnemonic.word_count(), "seed stored");
        Ok(())
    }

    /// Decrypt the mnemonic stored under `label`
    pub fn retrieve_seed(&self, label: &str, password: &str) -> WalletResult<WalletMnemonic> {
        validate_label(label)?;
        let record = self
            .backend
            .load(label)?
            .ok_or_else(|| StorageError::RecordNotFound(label.to_string()))?;

        let encoded = record
            .secrets
            .get(MNEMONIC_SECRET)
            .ok_or_else(|| StorageError::Corrupt(format!("no mnemonic under '{}'", label)))?;
        let blob = EncryptedBlob::from_base64(encoded)?;

        let config = StoreConfig {
            pbkdf2_iterations: record.iterations,
        };
        let mut cipher = SeedCipher::with_salt(decode_salt(&record.salt)?, config)?;
        cipher.initialize(password)?;
        let plaintext = cipher.decrypt(&blob);
        cipher.clear();
        let plaintext = plaintext.map_err(|e| {
            if e.is_authentication_failure() {
                warn!(label, "seed retrieval rejected");
            }
            e
        })?;

        let phrase = std::str::from_utf8(&plaintext)
            .map_err(|_| StorageError::Corrupt("decrypted seed is not UTF-8".into()))?;
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        debug!(label, "seed retrieved");
        Ok(mnemonic)
    }

    /// Remove the record stored under `label`
    pub fn delete_seed(&self, label: &str) -> WalletResult<()> {
        validate_label(label)?;
        if !self.backend.delete(label)? {
            return Err(StorageError::RecordNotFound(label.to_string()).into());
        }
        info!(label, "seed deleted");
        Ok(())
    }

    // =========================================================================
    // LOGIN PASSWORD
    // =========================================================================

    /// Replace the login password hash
    pub fn set_password(&self, password: &str) -> WalletResult<()> {
        let record = self.verifier.hash(password)?;
        self.backend.save_password(&StoredPassword::Pbkdf2(record))?;
        debug!("login password updated");
        Ok(())
    }

    /// Check the login password. A matching legacy hash is upgraded in place.
    pub fn verify_password(&self, password: &str) -> WalletResult<bool> {
        let Some(stored) = self.backend.load_password()? else {
            return Ok(false);
        };

        match self.verifier.check(password, &stored)? {
            PasswordCheck::Accepted => Ok(true),
            PasswordCheck::Migrated(record) => {
                self.backend.save_password(&StoredPassword::Pbkdf2(record))?;
                info!("legacy login password migrated");
                Ok(true)
            }
            PasswordCheck::Rejected => {
                warn!("login password rejected");
                Ok(false)
            }
        }
    }
}

/// Labels double as file names, so keep them to `[A-Za-z0-9_-]{1,64}`
fn validate_label(label: &str) -> WalletResult<()> {
    let ok = !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidLabel(label.to_string()).into())
    }
}

fn decode_salt(encoded: &str) -> WalletResult<[u8; SALT_LEN]> {
    STANDARD
        .decode(encoded)
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| StorageError::Corrupt("vault salt".into()).into())
}
