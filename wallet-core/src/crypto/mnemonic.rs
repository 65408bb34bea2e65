// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 Entropy <-> Mnemonic Codec
// Entropy || SHA-256(entropy)[..ENT/32 bits], split into 11-bit word indices

use crate::crypto::hash::sha256;
use crate::crypto::seed::{seed_from, Seed};
use crate::crypto::wordlist::Wordlist;
use crate::error::{MnemonicError, WalletError, WalletResult};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const BITS_PER_WORD: usize = 11;

/// Supported mnemonic lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    pub const ALL: [WordCount; 5] = [
        WordCount::Twelve,
        WordCount::Fifteen,
        WordCount::Eighteen,
        WordCount::TwentyOne,
        WordCount::TwentyFour,
    ];

    #[inline]
    pub const fn words(self) -> usize {
        self as usize
    }

    /// ENT = words * 11 * 32 / 33, exact for every variant
    #[inline]
    pub const fn entropy_bits(self) -> usize {
        self.words() * BITS_PER_WORD * 32 / 33
    }

    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    /// CS = ENT / 32
    #[inline]
    pub const fn checksum_bits(self) -> usize {
        self.entropy_bits() / 32
    }

    /// Map an entropy size in bits to its word count.
    pub fn from_entropy_bits(bits: usize) -> WalletResult<Self> {
        Self::ALL
            .into_iter()
            .find(|count| count.entropy_bits() == bits)
            .ok_or(WalletError::Mnemonic(MnemonicError::InvalidEntropyLength(
                bits,
            )))
    }
}

impl TryFrom<usize> for WordCount {
    type Error = WalletError;

    fn try_from(words: usize) -> WalletResult<Self> {
        Self::ALL
            .into_iter()
            .find(|count| count.words() == words)
            .ok_or(WalletError::Mnemonic(MnemonicError::InvalidMnemonicLength(
                words,
            )))
    }
}

/// Wallet Mnemonic - a checksum-valid BIP-39 phrase
///
/// Only constructed through the codec, so a `WalletMnemonic` always
/// round-trips to its entropy under the wordlist it was built with.
///
/// # Security
/// - **ZeroizeOnDrop**: phrase is overwritten when dropped
/// - **CSPRNG**: fresh entropy comes from `OsRng`
/// - **No Debug Leak**: Debug never prints the phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

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

    /// Generate a mnemonic from `entropy_bits` bits of OS randomness.
    ///
    /// # Errors
    /// `InvalidEntropyLength` unless `entropy_bits` is 128, 160, 192, 224 or 256.
    pub fn create(entropy_bits: usize, wordlist: &Wordlist) -> WalletResult<Self> {
        let word_count = WordCount::from_entropy_bits(entropy_bits)?;
        Ok(Self::generate(word_count, wordlist))
    }

    /// Generate a mnemonic with the given number of words.
    pub fn generate(word_count: WordCount, wordlist: &Wordlist) -> Self {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(&mut entropy[..entropy_size]);

        Self::encode(&entropy[..entropy_size], word_count, wordlist)
    }

    /// entropy -> mnemonic
    ///
    /// # Errors
    /// `InvalidEntropyLength` unless the entropy is 16, 20, 24, 28 or 32 bytes.
    pub fn from_entropy(entropy: &[u8], wordlist: &Wordlist) -> WalletResult<Self> {
        let word_count = WordCount::from_entropy_bits(entropy.len() * 8)?;
        Ok(Self::encode(entropy, word_count, wordlist))
    }

    /// Import a phrase: decode it to entropy (validating length, words and
    /// checksum) and re-encode it, which also normalizes whitespace.
    pub fn from_phrase(phrase: &str, wordlist: &Wordlist) -> WalletResult<Self> {
        let entropy = Self::phrase_to_entropy(phrase, wordlist)?;
        Self::from_entropy(&entropy, wordlist)
    }

    /// mnemonic -> entropy
    ///
    /// # Validation
    /// - word count (12, 15, 18, 21, 24) -> `InvalidMnemonicLength`
    /// - every word is in `wordlist` -> `UnknownWord(position)`
    /// - trailing checksum bits -> `ChecksumMismatch`
    pub fn phrase_to_entropy(phrase: &str, wordlist: &Wordlist) -> WalletResult<Zeroizing<Vec<u8>>> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let word_count = WordCount::try_from(words.len())?;

        let mut indices = Zeroizing::new(Vec::with_capacity(words.len()));
        for (position, word) in words.iter().enumerate() {
            let index = wordlist
                .index_of(word)
                .ok_or(WalletError::Mnemonic(MnemonicError::UnknownWord(position)))?;
            indices.push(index);
        }

        // Pack 11-bit indices into a big-endian bit string
        let total_bits = words.len() * BITS_PER_WORD;
        let mut bits = Zeroizing::new(vec![0u8; total_bits.div_ceil(8)]);
        for (i, &index) in indices.iter().enumerate() {
            for b in 0..BITS_PER_WORD {
                if (index >> (BITS_PER_WORD - 1 - b)) & 1 == 1 {
                    let bit = i * BITS_PER_WORD + b;
                    bits[bit / 8] |= 0x80 >> (bit % 8);
                }
            }
        }

        let entropy_len = word_count.entropy_bytes();
        let shift = 8 - word_count.checksum_bits();
        let entropy = Zeroizing::new(bits[..entropy_len].to_vec());

        let provided = bits[entropy_len] >> shift;
        let expected = sha256(&entropy)[0] >> shift;
        if provided != expected {
            return Err(WalletError::Mnemonic(MnemonicError::ChecksumMismatch));
        }

        Ok(entropy)
    }

    fn encode(entropy: &[u8], word_count: WordCount, wordlist: &Wordlist) -> Self {
        // Checksum bits are the top CS bits of the appended byte
        let mut bits = Zeroizing::new(Vec::with_capacity(entropy.len() + 1));
        bits.extend_from_slice(entropy);
        bits.push(sha256(entropy)[0]);

        let phrase = (0..word_count.words())
            .map(|i| wordlist.word(read_index(&bits, i * BITS_PER_WORD)))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            phrase,
            word_count: word_count.words(),
        }
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Space-joined phrase
    ///
    /// # Warning
    /// Be careful when displaying or logging this value!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split(' ').collect()
    }

    /// Entropy strength in bits
    pub fn strength_bits(&self) -> usize {
        WordCount::try_from(self.word_count)
            .map(WordCount::entropy_bits)
            .unwrap_or(0)
    }

    /// Recover the entropy this phrase encodes.
    pub fn to_entropy(&self, wordlist: &Wordlist) -> WalletResult<Zeroizing<Vec<u8>>> {
        Self::phrase_to_entropy(&self.phrase, wordlist)
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// PBKDF2-HMAC-SHA512 seed (64 bytes) for this phrase.
    ///
    /// # Security Note
    /// The passphrase is not a password: a different passphrase yields a
    /// different, equally valid wallet.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        seed_from(&self.phrase, passphrase)
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Full validation: word count, wordlist membership, checksum
    #[inline]
    pub fn validate(phrase: &str, wordlist: &Wordlist) -> bool {
        Self::phrase_to_entropy(phrase, wordlist).is_ok()
    }

    #[inline]
    pub fn is_valid_word(word: &str, wordlist: &Wordlist) -> bool {
        wordlist.contains(word)
    }
}

/// Read the 11-bit big-endian group starting at bit `offset`.
fn read_index(bytes: &[u8], offset: usize) -> usize {
    (offset..offset + BITS_PER_WORD).fold(0, |acc, bit| {
        let set = (bytes[bit / 8] >> (7 - bit % 8)) & 1;
        (acc << 1) | set as usize
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================
