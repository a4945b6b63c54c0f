// wallet-core/src/chains/spark/address.rs
//
// Spark address = bech32m(hrp "sp"/"spt", witness v1, TaggedHash("SparkAddress", Q))
// where Q is the 32-byte BIP-86 taproot output key.

use crate::chains::bitcoin::address::encode_witness;
use crate::chains::bitcoin::taproot::{tweak_public_key, TaprootOutputKey};
use crate::crypto::hash::tagged_hash;
use crate::error::WalletResult;
use crate::network::Network;
use bech32::segwit;

const SPARK_TAG: &str = "SparkAddress";

pub struct SparkAddress;

impl SparkAddress {
    /// Spark address for an already-tweaked taproot output key
    pub fn from_output_key(output_key: &TaprootOutputKey, network: Network) -> WalletResult<String> {
        let program = tagged_hash(SPARK_TAG, output_key.as_bytes());
        encode_witness(network.spark_hrp(), segwit::VERSION_1, &program)
    }

    /// Spark address from the untweaked taproot internal key
    pub fn from_internal_key(internal_key: &[u8; 33], network: Network) -> WalletResult<String> {
        let output_key = tweak_public_key(internal_key)?;
        Self::from_output_key(&output_key, network)
    }

    /// Well-formed Spark address for `network`
    pub fn is_valid(address: &str, network: Network) -> bool {
        match segwit::decode(address) {
            Ok((hrp, version, program)) => {
                hrp.to_lowercase() == network.spark_hrp()
                    && version == segwit::VERSION_1
                    && program.len() == 32
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::bitcoin::BitcoinAddress;

    // BIP-86 output key of m/86'/0'/0'/0/0 for "abandon ... about"
    const OUTPUT_X: &str = "a60869f0dbcf1dc659c9cecbaf8050135ea9e8cdc487053f1dc6880949dc684c";

    fn output_key() -> TaprootOutputKey {
        TaprootOutputKey::from_bytes(hex::decode(OUTPUT_X).unwrap().try_into().unwrap())
    }

    #[test]
    fn test_mainnet_prefix() {
        let addr = SparkAddress::from_output_key(&output_key(), Network::Mainnet).unwrap();
        assert!(addr.starts_with("sp1p"), "{}", addr);
        assert!(SparkAddress::is_valid(&addr, Network::Mainnet));
        assert!(!SparkAddress::is_valid(&addr, Network::Testnet));
    }

    #[test]
    fn test_known_addresses() {
        assert_eq!(
            SparkAddress::from_output_key(&output_key(), Network::Mainnet).unwrap(),
            "sp1p5xkzj08nw5m6ercmgkgz0r09t69nxmf28qmq6a28t6qn4qd74rpqjdg30s"
        );
        assert_eq!(
            SparkAddress::from_output_key(&output_key(), Network::Testnet).unwrap(),
            "spt1p5xkzj08nw5m6ercmgkgz0r09t69nxmf28qmq6a28t6qn4qd74rpqy57rtq"
        );
        assert_eq!(
            hex::encode(tagged_hash(SPARK_TAG, output_key().as_bytes())),
            "a1ac293cf37537ac8f1b4590278de55e8b336d2a38360d75475e813a81bea8c2"
        );
    }

    #[test]
    fn test_testnet_prefix() {
        let addr = SparkAddress::from_output_key(&output_key(), Network::Testnet).unwrap();
        assert!(addr.starts_with("spt1p"), "{}", addr);
    }

    #[test]
    fn test_program_is_tagged_hash_of_output_key() {
        let addr = SparkAddress::from_output_key(&output_key(), Network::Mainnet).unwrap();
        let (hrp, version, program) = segwit::decode(&addr).unwrap();
        assert_eq!(hrp.to_lowercase(), "sp");
        assert_eq!(version, segwit::VERSION_1);
        assert_eq!(program, tagged_hash(SPARK_TAG, output_key().as_bytes()).to_vec());
    }

    #[test]
    fn test_internal_and_output_entry_points_agree() {
        let mut internal = [0u8; 33];
        internal[0] = 0x02;
        internal[1..].copy_from_slice(
            &hex::decode("cc8a4bc64d897bddc5fbc2f670f7a8ba0b386779106cf1223c6fc5d7cd6fc115")
                .unwrap(),
        );
        let a = SparkAddress::from_internal_key(&internal, Network::Mainnet).unwrap();
        let b = SparkAddress::from_output_key(&output_key(), Network::Mainnet).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_not_a_bitcoin_address() {
        let addr = SparkAddress::from_output_key(&output_key(), Network::Mainnet).unwrap();
        assert!(!BitcoinAddress::is_valid(&addr, Network::Mainnet));
    }
}
