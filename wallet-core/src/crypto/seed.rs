// wallet-core/src/crypto/seed.rs
//
// Seed Expander - BIP-39 mnemonic → 64-byte seed
// PBKDF2-HMAC-SHA512, 2048 rounds, salt = "mnemonic" || NFKD(passphrase)

use bip39::Mnemonic;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use std::borrow::Cow;
use zeroize::Zeroizing;

/// Fixed by BIP-39, never configurable
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Output length of the seed expander
pub const SEED_LEN: usize = 64;

const SALT_PREFIX: &str = "mnemonic";

/// Stretches a mnemonic phrase into the BIP-32 master seed.
///
/// Pure and deterministic: the same `(mnemonic, passphrase)` pair always
/// yields the same bytes, which is what makes recovery from the phrase work.
/// Phrase and passphrase are both NFKD-normalized first, so a composed and a
/// decomposed spelling of the same passphrase open the same wallet.
pub struct SeedExpander;

impl SeedExpander {
    pub fn expand(mnemonic: &str, passphrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
        let mnemonic = nfkd(mnemonic);
        let passphrase = nfkd(passphrase);
        let salt = Zeroizing::new(format!("{}{}", SALT_PREFIX, passphrase.as_str()));
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        pbkdf2_hmac::<Sha512>(
            mnemonic.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            &mut seed[..],
        );
        seed
    }
}

fn nfkd(text: &str) -> Zeroizing<String> {
    let mut cow = Cow::Borrowed(text);
    Mnemonic::normalize_utf8_cow(&mut cow);
    Zeroizing::new(cow.into_owned())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_trezor_vector() {
        let seed = SeedExpander::expand(ABANDON_ABOUT, "TREZOR");
        assert_eq!(
            hex::encode(&seed[..]),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_empty_passphrase_vector() {
        let seed = SeedExpander::expand(ABANDON_ABOUT, "");
        assert_eq!(
            hex::encode(&seed[..]),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = SeedExpander::expand(ABANDON_ABOUT, "pass");
        let b = SeedExpander::expand(ABANDON_ABOUT, "pass");
        assert_eq!(&a[..], &b[..]);
    }

    #[test]
    fn test_matches_bip39_crate() {
        let m = bip39::Mnemonic::parse(ABANDON_ABOUT).unwrap();
        let ours = SeedExpander::expand(ABANDON_ABOUT, "hunter2");
        assert_eq!(&ours[..], &m.to_seed("hunter2")[..]);
    }

    #[test]
    fn test_non_ascii_passphrase_matches_bip39_crate() {
        let m = bip39::Mnemonic::parse(ABANDON_ABOUT).unwrap();
        let composed = SeedExpander::expand(ABANDON_ABOUT, "caf\u{e9}");
        let decomposed = SeedExpander::expand(ABANDON_ABOUT, "cafe\u{301}");
        assert_eq!(&composed[..], &decomposed[..]);
        assert_eq!(&composed[..], &m.to_seed("caf\u{e9}")[..]);
        assert_eq!(&composed[..], &m.to_seed("cafe\u{301}")[..]);
    }

    #[test]
    fn test_compatibility_forms_fold() {
        // NFKD folds the "ﬁ" ligature and full-width digits
        let a = SeedExpander::expand(ABANDON_ABOUT, "\u{fb01}le\u{ff11}");
        let b = SeedExpander::expand(ABANDON_ABOUT, "file1");
        assert_eq!(&a[..], &b[..]);
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let a = SeedExpander::expand(ABANDON_ABOUT, "");
        let b = SeedExpander::expand(ABANDON_ABOUT, " ");
        assert_ne!(&a[..], &b[..]);
    }
}
