// wallet-core\src\crypto\mnemonic.rs
//
// Mnemonic Module - BIP-39 Entropy & Mnemonic Codec
// Chuẩn: BIP-39 (Mnemonic), SHA-256 checksum, English wordlist (2048 words)

use crate::crypto::seed::{SeedExpander, SEED_LEN};
use crate::error::{CryptoError, MnemonicError, WalletError, WalletResult};
use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Số lượng words hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Lấy số bytes entropy cần thiết
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }

    /// Inverse of [`entropy_bytes`](Self::entropy_bytes)
    pub const fn from_entropy_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(WordCount::Twelve),
            20 => Some(WordCount::Fifteen),
            24 => Some(WordCount::Eighteen),
            28 => Some(WordCount::TwentyOne),
            32 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }
}

impl TryFrom<usize> for WordCount {
    type Error = MnemonicError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            12 => Ok(WordCount::Twelve),
            15 => Ok(WordCount::Fifteen),
            18 => Ok(WordCount::Eighteen),
            21 => Ok(WordCount::TwentyOne),
            24 => Ok(WordCount::TwentyFour),
            other => Err(MnemonicError::InvalidWordCount(other)),
        }
    }
}

impl From<WordCount> for usize {
    fn from(count: WordCount) -> Self {
        count as usize
    }
}

/// Wallet Mnemonic - BIP-39 phrase with validated checksum
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Entropy chỉ lấy từ `OsRng`; nếu OS RNG lỗi thì trả lỗi, không fallback
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Tạo mnemonic mới từ OS entropy
    ///
    /// # Errors
    /// `CryptoError::RandomSourceUnavailable` nếu OS RNG không dùng được.
    /// Đây là lỗi fatal: không bao giờ thay bằng nguồn random yếu hơn.
    pub fn generate(word_count: WordCount) -> WalletResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes), wiped on drop
        let mut entropy = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(&mut entropy[..entropy_size])
            .map_err(|e| CryptoError::RandomSourceUnavailable(e.to_string()))?;

        Self::from_entropy(&entropy[..entropy_size])
    }

    /// Encode raw entropy as a mnemonic (16, 20, 24, 28 or 32 bytes)
    pub fn from_entropy(entropy: &[u8]) -> WalletResult<Self> {
        if WordCount::from_entropy_len(entropy.len()).is_none() {
            return Err(MnemonicError::InvalidEntropyLength(entropy.len()).into());
        }

        let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(|e| map_bip39_error(e, &[]))?;

        Ok(Self {
            word_count: mnemonic.word_count(),
            phrase: mnemonic.to_string(),
        })
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12, 15, 18, 21, 24)
    /// - Kiểm tra từng word có trong BIP-39 wordlist
    /// - Kiểm tra checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        // Normalize whitespace + lowercase
        let normalized: Vec<String> = phrase
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        let count = normalized.len();

        WordCount::try_from(count)?;

        for (i, word) in normalized.iter().enumerate() {
            if !Self::is_valid_word(word) {
                return Err(MnemonicError::UnknownWord {
                    word: word.clone(),
                    position: i + 1,
                }
                .into());
            }
        }

        let normalized_phrase = normalized.join(" ");
        let words: Vec<&str> = normalized.iter().map(String::as_str).collect();
        Mnemonic::parse_in_normalized(Language::English, &normalized_phrase)
            .map_err(|e| map_bip39_error(e, &words))?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    /// Lấy strength (bit) của mnemonic
    pub fn strength_bits(&self) -> usize {
        self.word_count * 11 * 32 / 33
    }

    // =========================================================================
    // ENTROPY & SEED
    // =========================================================================

    /// Recover the entropy embedded in the phrase
    pub fn to_entropy(&self) -> WalletResult<Zeroizing<Vec<u8>>> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &self.phrase)
            .map_err(|e| map_bip39_error(e, &self.words()))?;
        Ok(Zeroizing::new(mnemonic.to_entropy()))
    }

    /// Tạo seed từ mnemonic (PBKDF2-HMAC-SHA512)
    ///
    /// # Security Note
    /// Passphrase khác với password. Nếu mất passphrase, không thể khôi phục ví
    /// ngay cả khi có mnemonic phrase.
    pub fn to_seed(&self, passphrase: Option<&str>) -> Zeroizing<[u8; SEED_LEN]> {
        SeedExpander::expand(&self.phrase, passphrase.unwrap_or(""))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Full validation (word count, wordlist, checksum), returning the entropy
    pub fn validate(phrase: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
        Self::from_phrase(phrase)?.to_entropy()
    }

    #[inline]
    pub fn is_valid(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// Kiểm tra một từ có trong BIP-39 English wordlist không
    pub fn is_valid_word(word: &str) -> bool {
        Language::English.word_list().binary_search(&word).is_ok()
    }
}

fn map_bip39_error(err: bip39::Error, words: &[&str]) -> WalletError {
    match err {
        bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n).into(),
        bip39::Error::UnknownWord(i) => MnemonicError::UnknownWord {
            word: words.get(i).map(|w| w.to_string()).unwrap_or_default(),
            position: i + 1,
        }
        .into(),
        bip39::Error::BadEntropyBitCount(bits) => {
            MnemonicError::InvalidEntropyLength(bits / 8).into()
        }
        bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed.into(),
        #[allow(unreachable_patterns)]
        other => WalletError::Validation(other.to_string()),
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test mnemonic (from BIP-39 test vectors)
    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_generate_12_words() {
        let mnemonic = WalletMnemonic::generate(WordCount::Twelve).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert!(WalletMnemonic::is_valid(mnemonic.phrase()));
    }

    #[test]
    fn test_generate_24_words() {
        let mnemonic = WalletMnemonic::generate(WordCount::TwentyFour).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert!(WalletMnemonic::is_valid(mnemonic.phrase()));
    }

    #[test]
    fn test_generate_all_word_counts() {
        for wc in [
            WordCount::Twelve,
            WordCount::Fifteen,
            WordCount::Eighteen,
            WordCount::TwentyOne,
            WordCount::TwentyFour,
        ] {
            let m = WalletMnemonic::generate(wc).unwrap();
            assert_eq!(m.word_count(), wc as usize);
            assert_eq!(m.to_entropy().unwrap().len(), wc.entropy_bytes());
        }
    }

    #[test]
    fn test_bip39_vectors() {
        let cases = [
            ("00000000000000000000000000000000", TEST_MNEMONIC_12),
            (
                "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
            ),
            (
                "80808080808080808080808080808080",
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
            ),
            (
                "ffffffffffffffffffffffffffffffff",
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            ),
        ];
        for (entropy_hex, phrase) in cases {
            let entropy = hex::decode(entropy_hex).unwrap();
            let m = WalletMnemonic::from_entropy(&entropy).unwrap();
            assert_eq!(m.phrase(), phrase);
            assert_eq!(&*WalletMnemonic::validate(phrase).unwrap(), &entropy);
        }
    }

    #[test]
    fn test_entropy_round_trip() {
        let m = WalletMnemonic::generate(WordCount::TwentyFour).unwrap();
        let entropy = m.to_entropy().unwrap();
        let again = WalletMnemonic::from_entropy(&entropy).unwrap();
        assert_eq!(again.phrase(), m.phrase());
    }

    #[test]
    fn test_from_entropy_bad_length() {
        let result = WalletMnemonic::from_entropy(&[0u8; 15]);
        assert_eq!(
            result.unwrap_err(),
            WalletError::Mnemonic(MnemonicError::InvalidEntropyLength(15))
        );
    }

    #[test]
    fn test_from_phrase_24_words() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace_and_case() {
        let messy_phrase =
            "  Abandon  abandon   abandon abandon abandon abandon abandon abandon abandon abandon abandon ABOUT  ";
        let mnemonic = WalletMnemonic::from_phrase(messy_phrase).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_from_phrase_invalid_word_count() {
        let result = WalletMnemonic::from_phrase("abandon abandon abandon");
        assert!(matches!(
            result,
            Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(3)))
        ));
    }

    #[test]
    fn test_from_phrase_unknown_word() {
        let invalid = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon invalid";
        let result = WalletMnemonic::from_phrase(invalid);
        assert_eq!(
            result.unwrap_err(),
            WalletError::Mnemonic(MnemonicError::UnknownWord {
                word: "invalid".to_string(),
                position: 12,
            })
        );
    }

    #[test]
    fn test_checksum_bit_flips_rejected() {
        // Last word of a 12-word phrase: 7 entropy bits + 4 checksum bits
        let list = Language::English.word_list();
        let about = list.iter().position(|w| *w == "about").unwrap();
        for bit in 0..4 {
            let flipped = list[about ^ (1 << bit)];
            let phrase = format!(
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon {}",
                flipped
            );
            let result = WalletMnemonic::validate(&phrase);
            assert_eq!(
                result.unwrap_err(),
                WalletError::Mnemonic(MnemonicError::ChecksumFailed),
                "bit {} flip must fail",
                bit
            );
        }
    }

    #[test]
    fn test_to_seed() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed = mnemonic.to_seed(None);
        assert_eq!(seed.len(), 64);
    }

    #[test]
    fn test_to_seed_with_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed_no_pass = mnemonic.to_seed(None);
        let seed_with_pass = mnemonic.to_seed(Some("TREZOR"));

        // Seeds phải khác nhau
        assert_ne!(&*seed_no_pass, &*seed_with_pass);
    }

    #[test]
    fn test_is_valid() {
        assert!(WalletMnemonic::is_valid(TEST_MNEMONIC_12));
        assert!(WalletMnemonic::is_valid(TEST_MNEMONIC_24));
        assert!(!WalletMnemonic::is_valid("invalid mnemonic phrase"));
        assert!(!WalletMnemonic::is_valid("abandon")); // Too few words
    }

    #[test]
    fn test_is_valid_word() {
        assert!(WalletMnemonic::is_valid_word("abandon"));
        assert!(WalletMnemonic::is_valid_word("zoo"));
        assert!(!WalletMnemonic::is_valid_word("invalidword"));
        assert!(WalletMnemonic::is_valid_word("hello"));
        assert!(!WalletMnemonic::is_valid_word("bitcoin")); // Not in BIP-39 wordlist
        assert!(!WalletMnemonic::is_valid_word("helloo"));
    }

    #[test]
    fn test_strength_bits() {
        let m12 = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let m24 = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();

        assert_eq!(m12.strength_bits(), 128);
        assert_eq!(m24.strength_bits(), 256);
    }

    #[test]
    fn test_word_count_serde() {
        let json = serde_json::to_string(&WordCount::TwentyFour).unwrap();
        assert_eq!(json, "24");
        let wc: WordCount = serde_json::from_str("12").unwrap();
        assert_eq!(wc, WordCount::Twelve);
        assert!(serde_json::from_str::<WordCount>("13").is_err());
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let debug_output = format!("{:?}", mnemonic);

        // Đảm bảo phrase KHÔNG xuất hiện trong debug output
        assert!(!debug_output.contains("abandon"));
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("word_count: 12"));
    }

    #[test]
    fn test_unique_generation() {
        let m1 = WalletMnemonic::generate(WordCount::Twelve).unwrap();
        let m2 = WalletMnemonic::generate(WordCount::Twelve).unwrap();
        assert_ne!(m1.phrase(), m2.phrase());
    }
}
