// wallet-core/src/chains/bitcoin/taproot.rs
//
// BIP-341 / BIP-86 output key tweak (key-path only, no script tree)
//
//   P  = internal key lifted to even y
//   t  = TaggedHash("TapTweak", x(P))
//   Q  = P + t·G
//   output key = x(Q)

use crate::crypto::hash::tagged_hash;
use crate::error::{CryptoError, WalletResult};
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, ProjectivePoint, PublicKey, Scalar};

const TAP_TWEAK_TAG: &str = "TapTweak";

/// Tweaked x-only taproot output key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaprootOutputKey([u8; 32]);

impl TaprootOutputKey {
    #[inline]
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Wrap an already-tweaked output key (e.g. decoded from an address)
    #[inline]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Tweak a compressed (33-byte) internal public key into its BIP-86 output key
pub fn tweak_public_key(internal_key: &[u8; 33]) -> WalletResult<TaprootOutputKey> {
    let public = PublicKey::from_sec1_bytes(internal_key)
        .map_err(|e| CryptoError::InvalidKeyFormat(format!("taproot internal key: {}", e)))?;

    // Even-y normalization
    let point = public.to_projective();
    let even = if bool::from(public.as_affine().y_is_odd()) {
        -point
    } else {
        point
    };
    let internal_x: [u8; 32] = even.to_affine().x().into();

    let tweak_bytes = tagged_hash(TAP_TWEAK_TAG, &internal_x);
    let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::from(tweak_bytes)).into();
    let tweak = tweak
        .ok_or_else(|| CryptoError::DerivationFailed("taproot tweak exceeds curve order".into()))?;

    let output = even + ProjectivePoint::GENERATOR * tweak;
    if output == ProjectivePoint::IDENTITY {
        return Err(CryptoError::DerivationFailed("taproot output is the point at infinity".into()).into());
    }

    Ok(TaprootOutputKey(output.to_affine().x().into()))
}

// =============================================================================
// TESTS
// =============================================================================
