// wallet-core/src/wallet.rs
//
// Wallet Assembly - mnemonic → seed → master → 4 branches → WalletRecord
//
// Kiến trúc:
//   WalletMnemonic ─► SeedExpander (PBKDF2-SHA512) ─► master ExtendedKey
//                                                     │
//                 ┌──────────────┬──────────────┬─────┴────────┐
//                 ▼              ▼              ▼              ▼
//              legacy         nested         segwit         taproot ─► spark
//
// Bốn branch độc lập nên được derive song song (feature `parallel`).

use crate::chains::bitcoin::{to_wif, tweak_public_key, BitcoinAddress};
use crate::chains::spark::SparkAddress;
use crate::crypto::{AddressKind, DerivationPaths, ExtendedKey, KeyDeriver, WalletMnemonic};
use crate::error::{CryptoError, WalletResult};
use crate::network::Network;
use crate::types::{AddressRecord, PrivateKeyRecord, WalletAddresses, WalletPrivateKeys, WalletRecord};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One fully encoded address branch
struct Branch {
    address: AddressRecord,
    private_key: PrivateKeyRecord,
    /// Set only for the taproot branch; feeds the Spark address
    spark: Option<String>,
}

/// Build the full record for an already validated mnemonic
pub(crate) fn assemble(
    mnemonic: &WalletMnemonic,
    passphrase: Option<&str>,
    network: Network,
) -> WalletResult<WalletRecord> {
    let seed = mnemonic.to_seed(passphrase);
    let master = KeyDeriver::master_from_seed(&seed[..])?;

    let branches = derive_branches(&master, network)?;
    let [legacy, nested, segwit, taproot]: [Branch; 4] = branches
        .try_into()
        .map_err(|_| CryptoError::DerivationFailed("expected four address branches".into()))?;

    let spark = taproot
        .spark
        .ok_or_else(|| CryptoError::DerivationFailed("taproot branch produced no Spark address".into()))?;

    let account = KeyDeriver::derive_path(&master, DerivationPaths::account(network))?;
    let extended_private_key = account.key.to_extended_private(network)?;
    let extended_public_key = account.key.to_extended_public(network);

    Ok(WalletRecord {
        mnemonic: mnemonic.phrase().to_string(),
        network,
        addresses: WalletAddresses {
            legacy: legacy.address,
            nested: nested.address,
            segwit: segwit.address,
            taproot: taproot.address,
            spark,
        },
        private_keys: WalletPrivateKeys {
            legacy: legacy.private_key,
            nested: nested.private_key,
            segwit: segwit.private_key,
            taproot: taproot.private_key,
        },
        extended_public_key,
        extended_private_key: extended_private_key.to_string(),
    })
}

#[cfg(feature = "parallel")]
fn derive_branches(master: &ExtendedKey, network: Network) -> WalletResult<Vec<Branch>> {
    AddressKind::ALL[..]
        .par_iter()
        .map(|kind| derive_branch(master, *kind, network))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn derive_branches(master: &ExtendedKey, network: Network) -> WalletResult<Vec<Branch>> {
    AddressKind::ALL
        .iter()
        .map(|kind| derive_branch(master, *kind, network))
        .collect()
}

fn derive_branch(master: &ExtendedKey, kind: AddressKind, network: Network) -> WalletResult<Branch> {
    let derived = KeyDeriver::derive_for_kind(master, kind, network)?;
    let public_key = *derived.key.public_key();

    let (address, spark) = match kind {
        AddressKind::Taproot => {
            let output_key = tweak_public_key(&public_key)?;
            (
                BitcoinAddress::p2tr_from_output_key(&output_key, network)?,
                Some(SparkAddress::from_output_key(&output_key, network)?),
            )
        }
        _ => (BitcoinAddress::encode(kind, &public_key, network)?, None),
    };
    debug!(%kind, %address, "address branch encoded");

    let secret = derived.private_key()?;
    let wif = to_wif(&secret, network, true)?;

    Ok(Branch {
        address: AddressRecord {
            address,
            derivation_path: derived.path.clone(),
            public_key: hex::encode(public_key),
        },
        private_key: PrivateKeyRecord {
            wif: wif.to_string(),
            hex: hex::encode(&secret[..]),
        },
        spark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn record(network: Network) -> WalletRecord {
        let mnemonic = WalletMnemonic::from_phrase(ABANDON).unwrap();
        assemble(&mnemonic, None, network).unwrap()
    }

    #[test]
    fn test_branch_paths_follow_table() {
        for network in [Network::Mainnet, Network::Testnet] {
            let r = record(network);
            for kind in AddressKind::ALL {
                assert_eq!(
                    r.addresses.get(kind).derivation_path,
                    DerivationPaths::for_kind(kind, network)
                );
            }
        }
    }

    #[test]
    fn test_spark_is_bound_to_taproot_output() {
        let r = record(Network::Mainnet);
        let (_, _, program) = bech32::segwit::decode(&r.addresses.taproot.address).unwrap();
        let output_key = crate::chains::bitcoin::TaprootOutputKey::from_bytes(
            program.try_into().unwrap(),
        );
        assert_eq!(
            r.addresses.spark,
            SparkAddress::from_output_key(&output_key, Network::Mainnet).unwrap()
        );
    }

    #[test]
    fn test_private_key_formats_agree() {
        let r = record(Network::Testnet);
        for kind in AddressKind::ALL {
            let keys = r.private_keys.get(kind);
            let decoded = crate::chains::bitcoin::from_wif(&keys.wif).unwrap();
            assert_eq!(hex::encode(&decoded.private_key[..]), keys.hex);
            assert_eq!(decoded.network, Network::Testnet);
            assert!(decoded.compressed);
        }
    }

    #[test]
    fn test_account_xpub_matches_xprv() {
        let r = record(Network::Mainnet);
        let (xprv, network) = ExtendedKey::from_extended(&r.extended_private_key).unwrap();
        assert_eq!(network, Network::Mainnet);
        assert_eq!(xprv.depth(), 3);
        assert_eq!(xprv.neuter().to_extended_public(network), r.extended_public_key);
        assert!(r.extended_public_key.starts_with("xpub"));
    }

    #[test]
    fn test_passphrase_changes_everything() {
        let mnemonic = WalletMnemonic::from_phrase(ABANDON).unwrap();
        let plain = assemble(&mnemonic, None, Network::Mainnet).unwrap();
        let salted = assemble(&mnemonic, Some("TREZOR"), Network::Mainnet).unwrap();
        for kind in AddressKind::ALL {
            assert_ne!(plain.addresses.get(kind).address, salted.addresses.get(kind).address);
        }
        assert_ne!(plain.addresses.spark, salted.addresses.spark);
    }
}
