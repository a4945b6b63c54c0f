// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! This module implements the key material pipeline of the wallet:
//!
//! - **Mnemonic Codec**: BIP-39 phrases (12/15/18/21/24 words) via [`WalletMnemonic`].
//! - **Seed Expansion**: PBKDF2-HMAC-SHA512, 2048 rounds via [`SeedExpander`].
//! - **Key Derivation**: BIP-32 secp256k1 key tree via [`KeyDeriver`] / [`ExtendedKey`].
//! - **Derivation Paths**: the address-kind → path table via [`DerivationPaths`].
//! - **Hashes**: SHA-256, HASH160 and BIP-340 tagged hashes shared by every encoder.
//! - **Base58Check**: checksummed base58 for addresses, WIF and extended keys.

pub mod base58;
pub mod hash;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;

// Re-exports for cleaner API access
pub use key_deriver::{DerivedKey, ExtendedKey, KeyDeriver};
pub use mnemonic::{WalletMnemonic, WordCount};
pub use paths::{AddressKind, DerivationPaths};
pub use seed::SeedExpander;
