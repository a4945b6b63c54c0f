// wallet-core/src/crypto/base58.rs
//
// Base58Check - the single checksum implementation behind legacy addresses,
// WIF and extended keys.

use crate::crypto::hash::sha256d;
use crate::error::{CryptoError, WalletResult};
use zeroize::Zeroizing;

const CHECKSUM_LEN: usize = 4;

/// version || payload || sha256d[..4], base58
pub(crate) fn base58check(version: u8, payload: &[u8]) -> String {
    let mut data = Zeroizing::new(Vec::with_capacity(1 + payload.len()));
    data.push(version);
    data.extend_from_slice(payload);
    base58check_encode(&data)
}

/// data || sha256d(data)[..4], base58
pub(crate) fn base58check_encode(data: &[u8]) -> String {
    let mut buf = Zeroizing::new(Vec::with_capacity(data.len() + CHECKSUM_LEN));
    buf.extend_from_slice(data);
    buf.extend_from_slice(&sha256d(data)[..CHECKSUM_LEN]);
    bs58::encode(&buf[..]).into_string()
}

/// Inverse of [`base58check_encode`]; returns the data with the checksum verified and stripped
pub(crate) fn base58check_decode(encoded: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
    let mut data = Zeroizing::new(
        bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| CryptoError::InvalidKeyFormat(format!("base58: {}", e)))?,
    );
    if data.len() <= CHECKSUM_LEN {
        return Err(CryptoError::InvalidKeyFormat("base58check payload too short".into()).into());
    }
    let split = data.len() - CHECKSUM_LEN;
    let checksum = sha256d(&data[..split]);
    if checksum[..CHECKSUM_LEN] != data[split..] {
        return Err(CryptoError::InvalidKeyFormat("base58check checksum mismatch".into()).into());
    }
    data.truncate(split);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_strips_checksum() {
        let encoded = base58check(0x05, &[0xab; 20]);
        let decoded = base58check_decode(&encoded).unwrap();
        assert_eq!(decoded[0], 0x05);
        assert_eq!(&decoded[1..], &[0xab; 20][..]);
    }

    #[test]
    fn test_leading_zero_version_keeps_leading_one() {
        assert!(base58check(0x00, &[0u8; 20]).starts_with("11"));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut encoded = base58check(0x80, &[7u8; 32]);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '2' { '3' } else { '2' });
        assert!(matches!(
            base58check_decode(&encoded),
            Err(crate::error::WalletError::Crypto(CryptoError::InvalidKeyFormat(_)))
        ));
        assert!(base58check_decode("").is_err());
        assert!(base58check_decode("0OIl").is_err());
    }
}
