// wallet-core/src/network/models.rs
//
// Network Models - Bitcoin mainnet/testnet constants
//
// Mọi hằng số phụ thuộc network (version bytes, HRP, coin type) nằm ở đây.
// Encoders và key tree chỉ đọc từ `Network`, không hardcode ở chỗ khác.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WalletError;

// =============================================================================
// NETWORK SELECTOR
// =============================================================================

/// Network selector passed in by the API layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// SLIP-44 coin type used at the second path level
    #[inline]
    pub const fn coin_type(self) -> u32 {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 1,
        }
    }

    /// Base58 version byte for P2PKH addresses
    #[inline]
    pub const fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Base58 version byte for P2SH addresses
    #[inline]
    pub const fn p2sh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x05,
            Network::Testnet => 0xc4,
        }
    }

    /// WIF version byte
    #[inline]
    pub const fn wif_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }

    /// Bech32 human-readable part for witness addresses
    #[inline]
    pub const fn bech32_hrp(self) -> &'static str {
        match self {
            Network::Mainnet => "bc",
            Network::Testnet => "tb",
        }
    }

    /// Bech32m human-readable part for Spark addresses
    #[inline]
    pub const fn spark_hrp(self) -> &'static str {
        match self {
            Network::Mainnet => "sp",
            Network::Testnet => "spt",
        }
    }

    /// BIP-32 version bytes for serialized extended private keys (xprv / tprv)
    #[inline]
    pub const fn xprv_version(self) -> [u8; 4] {
        match self {
            Network::Mainnet => [0x04, 0x88, 0xAD, 0xE4],
            Network::Testnet => [0x04, 0x35, 0x83, 0x94],
        }
    }

    /// BIP-32 version bytes for serialized extended public keys (xpub / tpub)
    #[inline]
    pub const fn xpub_version(self) -> [u8; 4] {
        match self {
            Network::Mainnet => [0x04, 0x88, 0xB2, 0x1E],
            Network::Testnet => [0x04, 0x35, 0x87, 0xCF],
        }
    }

    /// Reverse lookup from a WIF version byte
    pub fn from_wif_version(version: u8) -> Option<Self> {
        match version {
            0x80 => Some(Network::Mainnet),
            0xef => Some(Network::Testnet),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_testnet(self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(WalletError::Validation(format!(
                "Unknown network '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
