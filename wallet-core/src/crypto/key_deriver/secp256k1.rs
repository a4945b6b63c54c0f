// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - BIP-32
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
//
// Dùng `bip32::XPrv` / `XPub` cho CKDpriv / CKDpub và serialize xprv/xpub.
// Crate bip32 trả lỗi `Error::Crypto` khi IL >= n hoặc child key = 0;
// ở đây ta retry index kế tiếp thay vì bỏ cuộc.

use crate::error::{CryptoError, WalletError, WalletResult};
use crate::network::Network;
use bip32::{ChildNumber, DerivationPath, Prefix, XPrv, XPub};
use std::str::FromStr;
use tracing::warn;
use zeroize::Zeroizing;

/// Private or public half of the tree
enum KeyMaterial {
    Private(XPrv),
    Public(XPub),
}

/// BIP-32 Extended Key
///
/// Private half is optional: a neutered key can still derive non-hardened
/// children (CKDpub). The signing key inside `XPrv` zeroizes itself on drop.
/// Not `Clone`; every derivation produces a fresh, exclusively-owned key.
pub struct ExtendedKey {
    material: KeyMaterial,
    /// Compressed SEC1, cached so callers can borrow it
    public_key: [u8; 33],
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key / chain code
impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("public_key", &hex::encode(self.public_key))
            .field("depth", &self.depth())
            .field("child_number", &self.child_number())
            .field("has_private", &self.is_private())
            .finish_non_exhaustive()
    }
}

impl ExtendedKey {
    // =========================================================================
    // MASTER KEY
    // =========================================================================

    /// Master key from a 64-byte BIP-39 seed
    pub fn master_from_seed(seed: &[u8]) -> WalletResult<Self> {
        if seed.len() != 64 {
            return Err(CryptoError::InvalidSeedLength(seed.len()).into());
        }
        Self::master_from_bytes(seed)
    }

    /// bip32 accepts 16, 32 or 64 byte seeds; the published vectors use 16 bytes
    pub(crate) fn master_from_bytes(seed: &[u8]) -> WalletResult<Self> {
        // IL >= n or IL == 0: seed unusable, there is no index to skip to
        let xprv = XPrv::new(seed).map_err(|e| match e {
            bip32::Error::Crypto => CryptoError::DerivationFailed("master key out of range".into()),
            other => CryptoError::DerivationFailed(format!(
                "Failed to create master key: {}",
                other
            )),
        })?;
        Ok(Self::from_xprv(xprv))
    }

    fn from_xprv(xprv: XPrv) -> Self {
        let public_key = xprv.public_key().to_bytes();
        Self {
            material: KeyMaterial::Private(xprv),
            public_key,
        }
    }

    fn from_xpub(xpub: XPub) -> Self {
        let public_key = xpub.to_bytes();
        Self {
            material: KeyMaterial::Public(xpub),
            public_key,
        }
    }

    // =========================================================================
    // CHILD DERIVATION
    // =========================================================================

    /// Derive one child. A degenerate result skips to the next index.
    pub fn derive_child(&self, child: ChildNumber) -> WalletResult<Self> {
        skip_degenerate(child, |number| self.ckd(number))
    }

    /// Walk every segment of `path` from this key
    pub fn derive_path(&self, path: &DerivationPath) -> WalletResult<Self> {
        let mut iter = path.iter();
        let first = iter
            .next()
            .ok_or_else(|| CryptoError::DerivationFailed("empty derivation path".into()))?;

        let mut current = self.derive_child(first)?;
        for child in iter {
            current = current.derive_child(child)?;
        }
        Ok(current)
    }

    /// Single CKD step, no retry
    fn ckd(&self, number: ChildNumber) -> WalletResult<Self> {
        match &self.material {
            KeyMaterial::Private(xprv) => xprv
                .derive_child(number)
                .map(Self::from_xprv)
                .map_err(|e| child_error(e, number)),
            KeyMaterial::Public(xpub) => {
                if number.is_hardened() {
                    return Err(CryptoError::DerivationFailed(
                        "hardened derivation requires a private key".into(),
                    )
                    .into());
                }
                xpub.derive_child(number)
                    .map(Self::from_xpub)
                    .map_err(|e| child_error(e, number))
            }
        }
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// 32-byte private key, `None` for a neutered key
    pub fn private_key(&self) -> Option<Zeroizing<[u8; 32]>> {
        match &self.material {
            KeyMaterial::Private(xprv) => Some(Zeroizing::new(xprv.to_bytes())),
            KeyMaterial::Public(_) => None,
        }
    }

    /// Compressed SEC1 public key (33 bytes)
    #[inline]
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    /// BIP-340 x-only public key (drops the parity byte)
    pub fn x_only_public_key(&self) -> [u8; 32] {
        let mut x = [0u8; 32];
        x.copy_from_slice(&self.public_key[1..]);
        x
    }

    fn attrs(&self) -> &bip32::ExtendedKeyAttrs {
        match &self.material {
            KeyMaterial::Private(xprv) => xprv.attrs(),
            KeyMaterial::Public(xpub) => xpub.attrs(),
        }
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.attrs().chain_code
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.attrs().depth
    }

    #[inline]
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.attrs().parent_fingerprint
    }

    #[inline]
    pub fn child_number(&self) -> ChildNumber {
        self.attrs().child_number
    }

    /// First 4 bytes of HASH160(public key)
    pub fn fingerprint(&self) -> [u8; 4] {
        match &self.material {
            KeyMaterial::Private(xprv) => xprv.public_key().fingerprint(),
            KeyMaterial::Public(xpub) => xpub.fingerprint(),
        }
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        matches!(self.material, KeyMaterial::Private(_))
    }

    /// Public-only copy of this key
    pub fn neuter(&self) -> Self {
        match &self.material {
            KeyMaterial::Private(xprv) => Self::from_xpub(xprv.public_key()),
            KeyMaterial::Public(xpub) => Self::from_xpub(xpub.clone()),
        }
    }

    // =========================================================================
    // SERIALIZATION (xprv / xpub / tprv / tpub)
    // =========================================================================

    pub fn to_extended_private(&self, network: Network) -> WalletResult<Zeroizing<String>> {
        match &self.material {
            KeyMaterial::Private(xprv) => Ok(xprv.to_string(private_prefix(network))),
            KeyMaterial::Public(_) => Err(CryptoError::InvalidKeyFormat(
                "public-only key has no xprv form".into(),
            )
            .into()),
        }
    }

    pub fn to_extended_public(&self, network: Network) -> String {
        let prefix = public_prefix(network);
        match &self.material {
            KeyMaterial::Private(xprv) => xprv.public_key().to_string(prefix),
            KeyMaterial::Public(xpub) => xpub.to_string(prefix),
        }
    }

    /// Parse an `xprv`/`xpub`/`tprv`/`tpub` string
    pub fn from_extended(encoded: &str) -> WalletResult<(Self, Network)> {
        let extended = bip32::ExtendedKey::from_str(encoded)
            .map_err(|e| CryptoError::InvalidKeyFormat(format!("extended key: {}", e)))?;

        let version = extended.prefix.to_bytes();
        let (network, is_private) = [Network::Mainnet, Network::Testnet]
            .into_iter()
            .find_map(|n| {
                if version == n.xprv_version() {
                    Some((n, true))
                } else if version == n.xpub_version() {
                    Some((n, false))
                } else {
                    None
                }
            })
            .ok_or_else(|| {
                CryptoError::InvalidKeyFormat(format!(
                    "unknown extended key version {}",
                    hex::encode(version)
                ))
            })?;

        let key = if is_private {
            XPrv::try_from(extended).map(Self::from_xprv).map_err(|_| {
                CryptoError::InvalidKeyFormat("private key out of range".into())
            })?
        } else {
            XPub::try_from(extended)
                .map(Self::from_xpub)
                .map_err(|e| CryptoError::InvalidKeyFormat(format!("public key: {}", e)))?
        };

        Ok((key, network))
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Retry `step` on the next index while it reports a degenerate key
fn skip_degenerate<F>(child: ChildNumber, mut step: F) -> WalletResult<ExtendedKey>
where
    F: FnMut(ChildNumber) -> WalletResult<ExtendedKey>,
{
    let hardened = child.is_hardened();
    let mut index = child.index();
    loop {
        let number = ChildNumber::new(index, hardened).map_err(bip32_err)?;
        match step(number) {
            Err(WalletError::Crypto(CryptoError::DerivationDegenerate(raw))) => {
                warn!(index = raw, "degenerate child key, skipping to next index");
                index = index
                    .checked_add(1)
                    .filter(|next| *next < ChildNumber::HARDENED_FLAG)
                    .ok_or_else(|| {
                        CryptoError::DerivationFailed("child index space exhausted".into())
                    })?;
            }
            other => return other,
        }
    }
}

/// `Error::Crypto` from CKD means IL >= n or a zero / infinite child
fn child_error(e: bip32::Error, number: ChildNumber) -> WalletError {
    match e {
        bip32::Error::Crypto => CryptoError::DerivationDegenerate(number.0).into(),
        other => CryptoError::DerivationFailed(format!("Child derivation failed: {}", other)).into(),
    }
}

fn private_prefix(network: Network) -> Prefix {
    match network {
        Network::Mainnet => Prefix::XPRV,
        Network::Testnet => Prefix::TPRV,
    }
}

fn public_prefix(network: Network) -> Prefix {
    match network {
        Network::Mainnet => Prefix::XPUB,
        Network::Testnet => Prefix::TPUB,
    }
}

fn bip32_err(e: bip32::Error) -> WalletError {
    CryptoError::DerivationFailed(e.to_string()).into()
}

// =============================================================================
// TESTS
// =============================================================================
