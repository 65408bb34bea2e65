// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine
//
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │                    ▼                            │
// │  master = HMAC-SHA512("Bitcoin seed", seed)     │
// │                    │                            │
// │                    ▼                            │
// │  secp256k1 (BIP-32)  m/44'/60'/account'/0/i     │
// │                    │                            │
// │                    ▼                            │
// │  32-byte private key → EVM address              │
// └─────────────────────────────────────────────────┘

pub mod secp256k1;

// Re-exports
pub use secp256k1::{ExtendedPrivateKey, Secp256k1Deriver};
