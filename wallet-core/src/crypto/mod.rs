// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! The derivation pipeline, bottom-up:
//!
//! - **Wordlist**: the 2048-word BIP-39 vocabulary via [`Wordlist`].
//! - **Mnemonic**: entropy ⇄ phrase with checksum (12-24 words) via [`WalletMnemonic`].
//! - **Seed**: PBKDF2-HMAC-SHA512 stretching of a phrase via [`seed_from`].
//! - **Derivation Paths**: BIP-32 path parsing and BIP-44 builders via [`DerivationPath`] / [`DerivationPaths`].
//! - **Key Derivation**: BIP-32 secp256k1 derivation via [`Secp256k1Deriver`].

pub mod hash;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;
pub mod wordlist;

// Re-exports for cleaner API access
pub use key_deriver::{ExtendedPrivateKey, Secp256k1Deriver};
pub use mnemonic::{WalletMnemonic, WordCount};
pub use paths::{ChildNumber, DerivationPath, DerivationPaths};
pub use seed::{seed_from, Seed};
pub use wordlist::Wordlist;
