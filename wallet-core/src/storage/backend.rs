// wallet-core/src/storage/backend.rs
//
// Vault Backends - where encrypted records live
//
// Backend chỉ lưu/đọc record đã mã hoá; nó không bao giờ thấy plaintext
// hay password.

use crate::error::{StorageError, WalletResult};
use crate::storage::password::StoredPassword;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// =============================================================================
// PERSISTED RECORD
// =============================================================================

/// Everything persisted under one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    /// base64, 16 bytes, created once per label
    pub salt: String,
    pub iterations: u32,
    /// secret name → base64(iv || ciphertext || tag)
    pub secrets: BTreeMap<String, String>,
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Storage seam under [`SeedVault`](crate::storage::SeedVault)
///
/// # Design Principles
/// - **Opaque**: records are already encrypted when they arrive here
/// - **Sync**: no network, so no async
/// - **Shared**: `&self` everywhere; implementations handle their own locking
pub trait VaultBackend: Send + Sync {
    fn load(&self, label: &str) -> WalletResult<Option<VaultRecord>>;

    fn save(&self, label: &str, record: &VaultRecord) -> WalletResult<()>;

    /// Returns `false` if nothing was stored under `label`
    fn delete(&self, label: &str) -> WalletResult<bool>;

    fn load_password(&self) -> WalletResult<Option<StoredPassword>>;

    fn save_password(&self, password: &StoredPassword) -> WalletResult<()>;
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Process-local backend, mostly for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    records: RwLock<HashMap<String, VaultRecord>>,
    password: RwLock<Option<StoredPassword>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VaultBackend for InMemoryBackend {
    fn load(&self, label: &str) -> WalletResult<Option<VaultRecord>> {
        Ok(self.records.read().get(label).cloned())
    }

    fn save(&self, label: &str, record: &VaultRecord) -> WalletResult<()> {
        self.records.write().insert(label.to_string(), record.clone());
        Ok(())
    }

    fn delete(&self, label: &str) -> WalletResult<bool> {
        Ok(self.records.write().remove(label).is_some())
    }

    fn load_password(&self) -> WalletResult<Option<StoredPassword>> {
        Ok(self.password.read().clone())
    }

    fn save_password(&self, password: &StoredPassword) -> WalletResult<()> {
        *self.password.write() = Some(password.clone());
        Ok(())
    }
}

// =============================================================================
// JSON FILES
// =============================================================================

const RECORD_SUFFIX: &str = ".vault.json";
const PASSWORD_FILE: &str = "password.json";

/// One pretty-printed JSON file per label inside `root`
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a vault directory
    pub fn new(root: impl Into<PathBuf>) -> WalletResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "file vault opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, label: &str) -> PathBuf {
        self.root.join(format!("{}{}", label, RECORD_SUFFIX))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> WalletResult<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)).into())
    }

    /// Write to a sibling temp file, then rename over the target
    fn write_json<T: Serialize>(path: &Path, value: &T) -> WalletResult<()> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::Backend(format!("serialize: {}", e)))?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl VaultBackend for FileBackend {
    fn load(&self, label: &str) -> WalletResult<Option<VaultRecord>> {
        Self::read_json(&self.record_path(label))
    }

    fn save(&self, label: &str, record: &VaultRecord) -> WalletResult<()> {
        Self::write_json(&self.record_path(label), record)
    }

    fn delete(&self, label: &str) -> WalletResult<bool> {
        let path = self.record_path(label);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    fn load_password(&self) -> WalletResult<Option<StoredPassword>> {
        Self::read_json(&self.root.join(PASSWORD_FILE))
    }

    fn save_password(&self, password: &StoredPassword) -> WalletResult<()> {
        Self::write_json(&self.root.join(PASSWORD_FILE), password)
    }
}
