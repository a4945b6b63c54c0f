// wallet-core/src/api/api.rs
//
// Public entry points called by the app layer (FFI bridge / CLI host).

use crate::chains::bitcoin::BitcoinAddress;
use crate::chains::spark::SparkAddress;
use crate::config::WalletConfig;
use crate::crypto::{WalletMnemonic, WordCount};
use crate::error::WalletResult;
use crate::network::Network;
use crate::types::WalletRecord;
use crate::wallet;
use tracing::info;

// --- Key Management ---

/// Create a brand new wallet from OS entropy
pub fn generate_wallet(word_count: WordCount, network: Network) -> WalletResult<WalletRecord> {
    let mnemonic = WalletMnemonic::generate(word_count)?;
    let record = wallet::assemble(&mnemonic, None, network)?;
    info!(%network, words = mnemonic.word_count(), "wallet generated");
    Ok(record)
}

/// Restore a wallet from a user-typed mnemonic.
///
/// Failures caused by the phrase itself satisfy
/// [`WalletError::is_invalid_mnemonic`](crate::error::WalletError::is_invalid_mnemonic).
pub fn import_wallet(mnemonic: &str, network: Network) -> WalletResult<WalletRecord> {
    import_wallet_with_passphrase(mnemonic, "", network)
}

/// Restore with a BIP-39 passphrase. The passphrase is used verbatim.
pub fn import_wallet_with_passphrase(
    mnemonic: &str,
    passphrase: &str,
    network: Network,
) -> WalletResult<WalletRecord> {
    let mnemonic = WalletMnemonic::from_phrase(mnemonic)?;
    let record = wallet::assemble(&mnemonic, Some(passphrase), network)?;
    info!(%network, words = mnemonic.word_count(), "wallet imported");
    Ok(record)
}

/// Generate using a deserialized [`WalletConfig`]
pub fn generate_wallet_with_config(config: &WalletConfig) -> WalletResult<WalletRecord> {
    let mnemonic = WalletMnemonic::generate(config.word_count)?;
    let record = wallet::assemble(&mnemonic, config.passphrase.as_deref(), config.network)?;
    info!(network = %config.network, words = mnemonic.word_count(), "wallet generated");
    Ok(record)
}

// --- Validation Helpers ---

pub fn is_valid_mnemonic(mnemonic: &str) -> bool {
    WalletMnemonic::is_valid(mnemonic)
}

/// Any of the five address formats this wallet produces, for `network`
pub fn is_valid_address(address: &str, network: Network) -> bool {
    BitcoinAddress::is_valid(address, network) || SparkAddress::is_valid(address, network)
}
