// wallet-core/src/chains/bitcoin/mod.rs

//! Bitcoin Chain Support
//!
//! # Key Features
//! - **Addresses**: P2PKH, P2SH-P2WPKH, P2WPKH and P2TR via [`BitcoinAddress`].
//! - **Taproot**: BIP-86 key-path output key tweak via [`tweak_public_key`].
//! - **WIF**: private key import/export via [`to_wif`] / [`from_wif`].

pub mod address;
pub mod taproot;
pub mod wif;

// Re-exports for cleaner API access
pub use address::BitcoinAddress;
pub use taproot::{tweak_public_key, TaprootOutputKey};
pub use wif::{from_wif, to_wif, DecodedWif};
