// wallet-core/src/chains/mod.rs

//! Chain-specific key/address conversion.

pub mod evm;

pub use evm::EvmAddress;
