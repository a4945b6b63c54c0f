// wallet-core/src/chains/bitcoin/address.rs
//
// Bitcoin Address Module - P2PKH, P2SH-P2WPKH, P2WPKH, P2TR
// Base58Check (BIP-13), Bech32 (BIP-173), Bech32m (BIP-350)

use crate::chains::bitcoin::taproot::{tweak_public_key, TaprootOutputKey};
use crate::crypto::base58::{base58check, base58check_decode};
use crate::crypto::hash::hash160;
use crate::crypto::paths::AddressKind;
use crate::error::{CryptoError, WalletResult};
use crate::network::Network;
use bech32::{segwit, Fe32, Hrp};

/// Bitcoin Address Generator
///
/// # Flow
/// - Legacy:  pubkey (33B) → HASH160 → version byte → Base58Check
/// - Nested:  pubkey → HASH160 → redeem `0014{hash}` → HASH160 → P2SH Base58Check
/// - Segwit:  pubkey → HASH160 → witness v0 → Bech32
/// - Taproot: pubkey → BIP-86 tweak → witness v1 → Bech32m
///
/// Every function here is pure: same key bytes, same address text.
pub struct BitcoinAddress;

impl BitcoinAddress {
    // =========================================================================
    // ENCODERS
    // =========================================================================

    /// Encode `public_key` for the requested script type
    pub fn encode(kind: AddressKind, public_key: &[u8; 33], network: Network) -> WalletResult<String> {
        match kind {
            AddressKind::Legacy => Ok(Self::p2pkh(public_key, network)),
            AddressKind::Nested => Ok(Self::p2sh_p2wpkh(public_key, network)),
            AddressKind::Segwit => Self::p2wpkh(public_key, network),
            AddressKind::Taproot => Self::p2tr(public_key, network),
        }
    }

    /// Legacy P2PKH (`1...` / `m...`, `n...`)
    pub fn p2pkh(public_key: &[u8; 33], network: Network) -> String {
        base58check(network.p2pkh_version(), &hash160(public_key))
    }

    /// Nested SegWit P2SH-P2WPKH (`3...` / `2...`)
    pub fn p2sh_p2wpkh(public_key: &[u8; 33], network: Network) -> String {
        let mut redeem_script = [0u8; 22];
        redeem_script[0] = 0x00; // OP_0
        redeem_script[1] = 0x14; // push 20 bytes
        redeem_script[2..].copy_from_slice(&hash160(public_key));
        base58check(network.p2sh_version(), &hash160(&redeem_script))
    }

    /// Native SegWit P2WPKH (`bc1q...` / `tb1q...`)
    pub fn p2wpkh(public_key: &[u8; 33], network: Network) -> WalletResult<String> {
        encode_witness(network.bech32_hrp(), segwit::VERSION_0, &hash160(public_key))
    }

    /// Taproot P2TR (`bc1p...` / `tb1p...`) from the untweaked internal key
    pub fn p2tr(internal_key: &[u8; 33], network: Network) -> WalletResult<String> {
        let output_key = tweak_public_key(internal_key)?;
        Self::p2tr_from_output_key(&output_key, network)
    }

    /// Taproot P2TR from an already-tweaked output key
    pub fn p2tr_from_output_key(
        output_key: &TaprootOutputKey,
        network: Network,
    ) -> WalletResult<String> {
        encode_witness(network.bech32_hrp(), segwit::VERSION_1, output_key.as_bytes())
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Check that `address` is a well-formed address of any supported type on `network`
    pub fn is_valid(address: &str, network: Network) -> bool {
        Self::kind_of(address, network).is_some()
    }

    /// Detect which script type an address string encodes
    pub fn kind_of(address: &str, network: Network) -> Option<AddressKind> {
        if let Ok((hrp, version, program)) = segwit::decode(address) {
            if hrp.to_lowercase() != network.bech32_hrp() {
                return None;
            }
            return match (version.to_u8(), program.len()) {
                (0, 20) => Some(AddressKind::Segwit),
                (1, 32) => Some(AddressKind::Taproot),
                _ => None,
            };
        }

        let payload = base58check_decode(address).ok()?;
        if payload.len() != 21 {
            return None;
        }
        match payload[0] {
            v if v == network.p2pkh_version() => Some(AddressKind::Legacy),
            v if v == network.p2sh_version() => Some(AddressKind::Nested),
            _ => None,
        }
    }
}

// =============================================================================
// SHARED ENCODING PRIMITIVES
// =============================================================================

/// Segwit-style encoding. The `bech32` crate picks bech32 for v0 and
/// bech32m for v1+, so callers can never pair a version with the wrong constant.
pub(crate) fn encode_witness(hrp: &str, version: Fe32, program: &[u8]) -> WalletResult<String> {
    let hrp = Hrp::parse(hrp)
        .map_err(|e| CryptoError::Encoding(format!("invalid hrp '{}': {}", hrp, e)))?;
    segwit::encode(hrp, version, program)
        .map_err(|e| CryptoError::Encoding(format!("segwit encode failed: {}", e)).into())
}

// =============================================================================
// TESTS
// =============================================================================
