// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - Bitcoin script type → BIP-44/49/84/86 path
//
// Một bảng hằng duy nhất cho mọi encoder. Network chỉ đổi coin_type,
// không bao giờ đổi cấu trúc path.

use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    /// Shared by every Bitcoin test network
    pub const TESTNET: u32 = 1;
}

// =============================================================================
// ADDRESS KINDS
// =============================================================================

/// On-chain script types this wallet derives one address for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    /// P2PKH (1...)
    Legacy,
    /// P2SH-P2WPKH (3...)
    Nested,
    /// P2WPKH (bc1q...)
    Segwit,
    /// P2TR (bc1p...)
    Taproot,
}

impl AddressKind {
    pub const ALL: [AddressKind; 4] = [
        AddressKind::Legacy,
        AddressKind::Nested,
        AddressKind::Segwit,
        AddressKind::Taproot,
    ];

    /// BIP-43 purpose field
    #[inline]
    pub const fn purpose(self) -> u32 {
        match self {
            AddressKind::Legacy => 44,
            AddressKind::Nested => 49,
            AddressKind::Segwit => 84,
            AddressKind::Taproot => 86,
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressKind::Legacy => "legacy",
            AddressKind::Nested => "nested",
            AddressKind::Segwit => "segwit",
            AddressKind::Taproot => "taproot",
        };
        f.write_str(name)
    }
}

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// Fixed derivation paths, first receive address of account 0
///
/// # Conventions
/// - BIP-44: `m/44'/coin'/account'/change/index` (Legacy)
/// - BIP-49: `m/49'/coin'/account'/change/index` (Nested SegWit)
/// - BIP-84: `m/84'/coin'/account'/change/index` (Native SegWit)
/// - BIP-86: `m/86'/coin'/account'/change/index` (Taproot)
pub struct DerivationPaths;

impl DerivationPaths {
    // =========================================================================
    // BITCOIN MAINNET (coin_type = 0)
    // =========================================================================
    /// BIP-44: Legacy (1...)
    pub const BTC_LEGACY_0: &'static str = "m/44'/0'/0'/0/0";

    /// BIP-49: Nested SegWit (3...)
    pub const BTC_NESTED_SEGWIT_0: &'static str = "m/49'/0'/0'/0/0";

    /// BIP-84: Native SegWit (bc1q...)
    pub const BTC_NATIVE_SEGWIT_0: &'static str = "m/84'/0'/0'/0/0";

    /// BIP-86: Taproot (bc1p...)
    pub const BTC_TAPROOT_0: &'static str = "m/86'/0'/0'/0/0";

    // =========================================================================
    // BITCOIN TESTNET (coin_type = 1)
    // =========================================================================
    pub const TBTC_LEGACY_0: &'static str = "m/44'/1'/0'/0/0";
    pub const TBTC_NESTED_SEGWIT_0: &'static str = "m/49'/1'/0'/0/0";
    pub const TBTC_NATIVE_SEGWIT_0: &'static str = "m/84'/1'/0'/0/0";
    pub const TBTC_TAPROOT_0: &'static str = "m/86'/1'/0'/0/0";

    /// Account-level path whose extended keys are exported with the wallet
    pub const BTC_ACCOUNT_XKEY: &'static str = "m/84'/0'/0'";
    pub const TBTC_ACCOUNT_XKEY: &'static str = "m/84'/1'/0'";

    /// The single lookup every encoder goes through
    pub const fn for_kind(kind: AddressKind, network: Network) -> &'static str {
        match (network, kind) {
            (Network::Mainnet, AddressKind::Legacy) => Self::BTC_LEGACY_0,
            (Network::Mainnet, AddressKind::Nested) => Self::BTC_NESTED_SEGWIT_0,
            (Network::Mainnet, AddressKind::Segwit) => Self::BTC_NATIVE_SEGWIT_0,
            (Network::Mainnet, AddressKind::Taproot) => Self::BTC_TAPROOT_0,
            (Network::Testnet, AddressKind::Legacy) => Self::TBTC_LEGACY_0,
            (Network::Testnet, AddressKind::Nested) => Self::TBTC_NESTED_SEGWIT_0,
            (Network::Testnet, AddressKind::Segwit) => Self::TBTC_NATIVE_SEGWIT_0,
            (Network::Testnet, AddressKind::Taproot) => Self::TBTC_TAPROOT_0,
        }
    }

    pub const fn account(network: Network) -> &'static str {
        match network {
            Network::Mainnet => Self::BTC_ACCOUNT_XKEY,
            Network::Testnet => Self::TBTC_ACCOUNT_XKEY,
        }
    }

    // =========================================================================
    // CUSTOM PATH BUILDER
    // =========================================================================
    /// Tạo BIP-44 style path
    ///
    /// # Arguments
    /// * `purpose` - 44 (BIP-44), 49 (BIP-49), 84 (BIP-84), 86 (BIP-86)
    /// * `coin_type` - SLIP-44 coin type (dùng constants từ `coin_type::*`)
    /// * `account` - Account index (thường 0)
    /// * `change` - 0 = external (nhận tiền), 1 = internal (thối tiền)
    /// * `index` - Address index
    #[inline]
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            purpose, coin_type, account, change, index
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcoin_paths() {
        assert_eq!(DerivationPaths::BTC_NATIVE_SEGWIT_0, "m/84'/0'/0'/0/0");
        assert_eq!(DerivationPaths::BTC_TAPROOT_0, "m/86'/0'/0'/0/0");
        assert_eq!(DerivationPaths::BTC_LEGACY_0, "m/44'/0'/0'/0/0");
        assert_eq!(DerivationPaths::BTC_NESTED_SEGWIT_0, "m/49'/0'/0'/0/0");
    }

    #[test]
    fn test_table_matches_builder() {
        for network in [Network::Mainnet, Network::Testnet] {
            for kind in AddressKind::ALL {
                assert_eq!(
                    DerivationPaths::for_kind(kind, network),
                    DerivationPaths::bip44(kind.purpose(), network.coin_type(), 0, 0, 0)
                );
            }
        }
    }

    #[test]
    fn test_network_only_changes_coin_type() {
        for kind in AddressKind::ALL {
            let main = DerivationPaths::for_kind(kind, Network::Mainnet);
            let test = DerivationPaths::for_kind(kind, Network::Testnet);
            assert_eq!(main.replacen("/0'/0'", "/1'/0'", 1), test);
        }
    }

    #[test]
    fn test_account_paths() {
        assert_eq!(DerivationPaths::account(Network::Mainnet), "m/84'/0'/0'");
        assert_eq!(DerivationPaths::account(Network::Testnet), "m/84'/1'/0'");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AddressKind::Nested.to_string(), "nested");
        assert_eq!(AddressKind::Taproot.purpose(), 86);
    }
}
