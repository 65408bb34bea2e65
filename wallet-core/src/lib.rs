// wallet-core/src/lib.rs

//! BIP-39 / BIP-32 / BIP-44 HD wallet core for Ethereum-style accounts.
//!
//! ```no_run
//! use eth_wallet_core::HdWallet;
//!
//! let mut hd = HdWallet::new();
//! let wallet = hd.generate(12, "")?;
//! println!("{}", wallet.address());
//! # Ok::<(), eth_wallet_core::WalletError>(())
//! ```

pub mod chains;
pub mod crypto;
pub mod error;
pub mod wallet;

pub use chains::EvmAddress;
pub use crypto::{DerivationPath, DerivationPaths, WalletMnemonic, WordCount, Wordlist};
pub use error::{CryptoError, MnemonicError, WalletError, WalletResult};
pub use wallet::{HdWallet, Wallet, WalletConfig, DEFAULT_PATH};
