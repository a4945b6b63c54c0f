// wallet-core/src/crypto/hash.rs
//
// Hash primitives shared by the key tree and every address encoder.
// One implementation per primitive; nothing else in the crate hashes by hand.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256(SHA-256(data)), used for base58check and WIF checksums
#[inline]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160(SHA-256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// BIP-340 tagged hash: SHA-256(SHA-256(tag) || SHA-256(tag) || msg)
pub fn tagged_hash(tag: &str, msg: &[u8]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag.as_bytes());
    Sha256::new()
        .chain_update(tag_hash)
        .chain_update(tag_hash)
        .chain_update(msg)
        .finalize()
        .into()
}
