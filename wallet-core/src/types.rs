// wallet-core/src/types.rs
//
// Wallet Record - output of generate / import, handed to the UI layer as JSON.
//
// Mọi field chứa secret (mnemonic, private key, xprv) được zeroize khi drop
// và bị ẩn trong Debug.

use crate::crypto::AddressKind;
use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

// =============================================================================
// PER-ADDRESS RECORDS
// =============================================================================

/// Public part of one derived address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    pub address: String,
    pub derivation_path: String,
    /// Compressed SEC1 public key, hex
    pub public_key: String,
}

/// Private key of one derived address in both export formats
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyRecord {
    pub wif: String,
    pub hex: String,
}

impl fmt::Debug for PrivateKeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeyRecord([REDACTED])")
    }
}

/// The four on-chain addresses plus the Spark address bound to taproot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddresses {
    pub legacy: AddressRecord,
    pub nested: AddressRecord,
    pub segwit: AddressRecord,
    pub taproot: AddressRecord,
    pub spark: String,
}

impl WalletAddresses {
    pub fn get(&self, kind: AddressKind) -> &AddressRecord {
        match kind {
            AddressKind::Legacy => &self.legacy,
            AddressKind::Nested => &self.nested,
            AddressKind::Segwit => &self.segwit,
            AddressKind::Taproot => &self.taproot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct WalletPrivateKeys {
    pub legacy: PrivateKeyRecord,
    pub nested: PrivateKeyRecord,
    pub segwit: PrivateKeyRecord,
    pub taproot: PrivateKeyRecord,
}

impl WalletPrivateKeys {
    pub fn get(&self, kind: AddressKind) -> &PrivateKeyRecord {
        match kind {
            AddressKind::Legacy => &self.legacy,
            AddressKind::Nested => &self.nested,
            AddressKind::Segwit => &self.segwit,
            AddressKind::Taproot => &self.taproot,
        }
    }
}

// =============================================================================
// WALLET RECORD
// =============================================================================

/// Everything derived from one mnemonic on one network.
///
/// The BIP-39 seed itself is not part of the record; re-expand the
/// mnemonic if it is needed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub mnemonic: String,
    #[zeroize(skip)]
    pub network: Network,
    #[zeroize(skip)]
    pub addresses: WalletAddresses,
    pub private_keys: WalletPrivateKeys,
    /// Account-level (`m/84'/c'/0'`) xpub / tpub
    #[zeroize(skip)]
    pub extended_public_key: String,
    /// Account-level (`m/84'/c'/0'`) xprv / tprv
    pub extended_private_key: String,
}

impl WalletRecord {
    /// Serialize for the UI bridge
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị secrets
impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("mnemonic", &"[REDACTED]")
            .field("network", &self.network)
            .field("addresses", &self.addresses)
            .field("private_keys", &self.private_keys)
            .field("extended_public_key", &self.extended_public_key)
            .field("extended_private_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(a: &str) -> AddressRecord {
        AddressRecord {
            address: a.into(),
            derivation_path: "m/0".into(),
            public_key: "02".into(),
        }
    }

    fn private_key() -> PrivateKeyRecord {
        PrivateKeyRecord {
            wif: "secret-wif".into(),
            hex: "secret-hex".into(),
        }
    }

    fn record() -> WalletRecord {
        WalletRecord {
            mnemonic: "secret words".into(),
            network: Network::Mainnet,
            addresses: WalletAddresses {
                legacy: address("1a"),
                nested: address("3a"),
                segwit: address("bc1q"),
                taproot: address("bc1p"),
                spark: "sp1p".into(),
            },
            private_keys: WalletPrivateKeys {
                legacy: private_key(),
                nested: private_key(),
                segwit: private_key(),
                taproot: private_key(),
            },
            extended_public_key: "xpub".into(),
            extended_private_key: "xprv-secret".into(),
        }
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", record());
        assert!(!debug.contains("secret"));
        assert!(debug.contains("bc1q"));
    }

    #[test]
    fn test_json_field_names() {
        let json: serde_json::Value = serde_json::from_str(&record().to_json().unwrap()).unwrap();
        assert_eq!(json["network"], "mainnet");
        assert_eq!(json["addresses"]["spark"], "sp1p");
        assert_eq!(json["addresses"]["segwit"]["derivationPath"], "m/0");
        assert_eq!(json["privateKeys"]["taproot"]["wif"], "secret-wif");
        assert_eq!(json["extendedPublicKey"], "xpub");
    }

    #[test]
    fn test_lookup_by_kind() {
        let r = record();
        assert_eq!(r.addresses.get(AddressKind::Nested).address, "3a");
        assert_eq!(r.private_keys.get(AddressKind::Legacy).hex, "secret-hex");
    }
}
