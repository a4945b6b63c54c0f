// wallet-core/src/lib.rs

//! Bitcoin / Spark wallet core
//!
//! Mnemonic → seed → BIP-32 key tree → legacy, nested segwit, native segwit,
//! taproot and Spark addresses, plus password-encrypted seed storage.
//!
//! ```no_run
//! use wallet_core::{api, Network, WordCount};
//!
//! let wallet = api::generate_wallet(WordCount::Twelve, Network::Mainnet)?;
//! println!("{}", wallet.addresses.taproot.address);
//! # Ok::<(), wallet_core::WalletError>(())
//! ```

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod network;
pub mod storage;
pub mod types;

mod wallet;

pub use api::{
    generate_wallet, generate_wallet_with_config, import_wallet, import_wallet_with_passphrase,
    is_valid_address, is_valid_mnemonic,
};
pub use config::{StoreConfig, WalletConfig};
pub use crypto::{AddressKind, WordCount};
pub use error::{WalletError, WalletResult};
pub use network::Network;
pub use types::WalletRecord;
