use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid entropy length: {0} bits. Expected 128, 160, 192, 224 or 256 bits.")]
    InvalidEntropyLength(usize),

    #[error("Invalid mnemonic length: {0} words. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidMnemonicLength(usize),

    /// Carries the zero-based position of the offending word, never the word itself.
    #[error("Word at position {0} not found in the wordlist.")]
    UnknownWord(usize),

    #[error("Checksum validation failed.")]
    ChecksumMismatch,

    #[error("Invalid wordlist: {0}")]
    InvalidWordlist(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid derivation path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid seed length: {0} bytes. Expected 16 to 64 bytes.")]
    InvalidSeedLength(usize),

    #[error("Master key derivation produced an invalid key.")]
    InvalidMasterKey,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key format: {0}")]
    InvalidPublicKeyFormat(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("No valid child key left in the index range.")]
    ChildIndexExhausted,
}

impl CryptoError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        CryptoError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
