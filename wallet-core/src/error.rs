use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("IO Error: {0}")]
    Io(String),
}

impl WalletError {
    /// True for import failures the user can fix by retyping the phrase.
    pub fn is_invalid_mnemonic(&self) -> bool {
        matches!(self, WalletError::Mnemonic(_))
    }

    /// True when decryption failed because of a wrong password or tampered data.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WalletError::Storage(StorageError::AuthenticationFailed)
        )
    }
}

impl From<std::io::Error> for WalletError {
    fn from(e: std::io::Error) -> Self {
        WalletError::Io(e.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{word}' at position {position} not found in the BIP39 wordlist.")]
    UnknownWord { word: String, position: usize },

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("Invalid entropy length: {0} bytes. Expected 16, 20, 24, 28 or 32.")]
    InvalidEntropyLength(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Derived child key at index {0} is invalid")]
    DerivationDegenerate(u32),

    #[error("Invalid seed length: expected 64 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Encoding failed: {0}")]
    Encoding(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Seed store is not initialized; call initialize() first")]
    StoreNotInitialized,

    #[error("Authentication failed: wrong password or corrupted data")]
    AuthenticationFailed,

    #[error("PBKDF2 iteration count {0} is below the minimum of 100000")]
    WeakKdfParameters(u32),

    #[error("PBKDF2 iteration count {0} exceeds the maximum of 10000000")]
    ExcessiveKdfParameters(u32),

    #[error("No record stored under label '{0}'")]
    RecordNotFound(String),

    #[error("Invalid label '{0}': use ASCII letters, digits, '-' or '_'")]
    InvalidLabel(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}
