// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! Ethereum and EVM-compatible chains (BSC, Polygon, Avalanche, Base, etc.)
//! share one address scheme: Keccak-256 of the uncompressed secp256k1 public
//! key, rendered with the EIP-55 mixed-case checksum via [`EvmAddress`].

pub mod address;

// Re-exports for cleaner API access
pub use address::EvmAddress;
