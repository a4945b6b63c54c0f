// wallet-core/src/chains/bitcoin/wif.rs
//
// Wallet Import Format
// version (0x80 / 0xef) || key (32B) || [0x01 if compressed] || sha256d[..4] → Base58

use crate::crypto::base58::{base58check, base58check_decode};
use crate::error::{CryptoError, WalletResult};
use crate::network::Network;
use k256::SecretKey;
use zeroize::Zeroizing;

const COMPRESSED_FLAG: u8 = 0x01;

/// Decoded WIF payload
#[derive(Debug)]
pub struct DecodedWif {
    pub private_key: Zeroizing<[u8; 32]>,
    pub network: Network,
    pub compressed: bool,
}

/// Encode a 32-byte private key
pub fn to_wif(
    private_key: &[u8; 32],
    network: Network,
    compressed: bool,
) -> WalletResult<Zeroizing<String>> {
    check_range(private_key)?;

    let mut payload = Zeroizing::new(Vec::with_capacity(33));
    payload.extend_from_slice(private_key);
    if compressed {
        payload.push(COMPRESSED_FLAG);
    }
    Ok(Zeroizing::new(base58check(network.wif_version(), &payload)))
}

/// Decode a WIF string back into its exact 32 key bytes
pub fn from_wif(wif: &str) -> WalletResult<DecodedWif> {
    let data = base58check_decode(wif)?;

    let compressed = match data.len() {
        33 => false,
        34 if data[33] == COMPRESSED_FLAG => true,
        34 => {
            return Err(
                CryptoError::InvalidKeyFormat("WIF compression flag must be 0x01".into()).into(),
            )
        }
        n => {
            return Err(CryptoError::InvalidKeyFormat(format!("WIF payload length {}", n)).into())
        }
    };

    let network = Network::from_wif_version(data[0]).ok_or_else(|| {
        CryptoError::InvalidKeyFormat(format!("unknown WIF version 0x{:02x}", data[0]))
    })?;

    let mut private_key = Zeroizing::new([0u8; 32]);
    private_key.copy_from_slice(&data[1..33]);
    check_range(&private_key)?;

    Ok(DecodedWif {
        private_key,
        network,
        compressed,
    })
}

/// Zero and scalars >= n are not keys
fn check_range(private_key: &[u8; 32]) -> WalletResult<()> {
    SecretKey::from_slice(private_key).map_err(|e| {
        CryptoError::InvalidKeyFormat(format!("Invalid secp256k1 private key: {}", e))
    })?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
