// wallet-core/src/crypto/wordlist.rs
//
// Wordlist Provider - 2048-word vocabulary for BIP-39
//
// Index (11 bits) <-> word, both directions. The English list ships with the
// crate and is parsed once per process, then shared read-only via `Arc`.

use crate::error::{MnemonicError, WalletError, WalletResult};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Number of entries every BIP-39 wordlist must have (2^11)
pub const WORDLIST_SIZE: usize = 2048;

const ENGLISH_TEXT: &str = include_str!("../../wordlist/english.txt");

static ENGLISH: LazyLock<Arc<Wordlist>> = LazyLock::new(|| {
    Arc::new(Wordlist::from_text(ENGLISH_TEXT).expect("bundled English wordlist is valid"))
});

/// Immutable ordered vocabulary of exactly [`WORDLIST_SIZE`] unique words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Wordlist {
    /// Build a wordlist from an ordered sequence of words.
    ///
    /// # Errors
    /// `InvalidWordlist` if the count is not 2048, a word is empty or
    /// contains whitespace, or a word repeats.
    pub fn new<I, S>(words: I) -> WalletResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();

        if words.len() != WORDLIST_SIZE {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordlist(
                format!("expected {} words, got {}", WORDLIST_SIZE, words.len()),
            )));
        }

        let mut positions = HashMap::with_capacity(WORDLIST_SIZE);
        for (index, word) in words.iter().enumerate() {
            // phrases are split on whitespace when decoded
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(WalletError::Mnemonic(MnemonicError::InvalidWordlist(
                    format!("empty or whitespace-containing word at index {}", index),
                )));
            }
            if positions.insert(word.clone(), index).is_some() {
                return Err(WalletError::Mnemonic(MnemonicError::InvalidWordlist(
                    format!("duplicate word at index {}", index),
                )));
            }
        }

        Ok(Self { words, positions })
    }

    /// Parse a newline-separated list (the format of the reference BIP-39 files).
    /// Surrounding whitespace and blank lines are ignored.
    pub fn from_text(text: &str) -> WalletResult<Self> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    /// The standard English BIP-39 list, shared across the process.
    pub fn english() -> Arc<Wordlist> {
        Arc::clone(&ENGLISH)
    }

    /// Word at `index`, or `None` when `index >= 2048`.
    #[inline]
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Word for an 11-bit index.
    ///
    /// # Panics
    /// If `index >= 2048`; every `Wordlist` holds exactly 2048 entries, so
    /// any 11-bit value is in range.
    #[inline]
    pub fn word(&self, index: usize) -> &str {
        &self.words[index]
    }

    /// Position of `word`, or `None` if it is not part of the list.
    #[inline]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.positions.get(word).copied()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.words.iter().map(String::as_str)
    }
}
