// wallet-core/src/wallet.rs
//
// HD Wallet Facade
//
// mnemonic ──► seed ──► BIP-32 key @ path ──► public key ──► EIP-55 address
//
// The facade owns at most one `Wallet` at a time; every successful
// generate/import replaces it wholesale, a failed call leaves it untouched.

use crate::chains::evm::EvmAddress;
use crate::crypto::key_deriver::Secp256k1Deriver;
use crate::crypto::mnemonic::{WalletMnemonic, WordCount};
use crate::crypto::paths::DerivationPath;
use crate::crypto::wordlist::Wordlist;
use crate::error::WalletResult;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Path used when a call passes `""`
pub const DEFAULT_PATH: &str = "44'/60'/0'/0/0";

// =============================================================================
// CONFIG
// =============================================================================
/// Facade configuration.
///
/// ```json
/// { "default_path": "m/44'/60'/0'/0/0", "passphrase": "" }
/// ```
/// Missing fields fall back to their defaults; the wordlist is never
/// deserialized and defaults to the shared English list.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub default_path: String,
    /// BIP-39 passphrase ("25th word"); empty means none
    pub passphrase: String,
    #[serde(skip, default = "Wordlist::english")]
    pub wordlist: Arc<Wordlist>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_PATH.to_string(),
            passphrase: String::new(),
            wordlist: Wordlist::english(),
        }
    }
}

impl WalletConfig {
    pub fn with_default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = path.into();
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    pub fn with_wordlist(mut self, wordlist: Arc<Wordlist>) -> Self {
        self.wordlist = wordlist;
        self
    }
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("default_path", &self.default_path)
            .field("passphrase", &"[REDACTED]")
            .field("wordlist_len", &self.wordlist.len())
            .finish()
    }
}

// =============================================================================
// WALLET
// =============================================================================
/// Result of one derivation: mnemonic, key pair and address.
///
/// - `private_key` / `public_key`: lowercase hex, no `0x`
/// - `address`: `0x` + EIP-55 checksummed hex
///
/// Secrets are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Wallet {
    mnemonic: String,
    private_key: String,
    public_key: String,
    address: String,
    #[zeroize(skip)]
    path: DerivationPath,
}

impl Wallet {
    fn derive(
        mnemonic: &WalletMnemonic,
        passphrase: &str,
        path: DerivationPath,
    ) -> WalletResult<Self> {
        let seed = mnemonic.to_seed(passphrase);
        let key = Secp256k1Deriver::derive(seed.as_bytes(), &path)?;
        let public_key = EvmAddress::public_key_from(key.private_key())?;
        let address = EvmAddress::address_from(&public_key)?;

        Ok(Self {
            mnemonic: mnemonic.phrase().to_string(),
            private_key: hex::encode(key.private_key()),
            public_key: hex::encode(public_key),
            address,
            path,
        })
    }

    #[inline]
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    #[inline]
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    #[inline]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Path the key was derived at
    #[inline]
    pub fn path(&self) -> &DerivationPath {
        &self.path
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("mnemonic", &"[REDACTED]")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .field("path", &self.path.to_string())
            .finish()
    }
}

// =============================================================================
// FACADE
// =============================================================================
/// Entry point: generate a new wallet or import an existing mnemonic.
///
/// Instances share nothing mutable; run one per thread for concurrent use.
#[derive(Debug, Default)]
pub struct HdWallet {
    config: WalletConfig,
    current: Option<Wallet>,
}

impl HdWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WalletConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn with_wordlist(wordlist: Arc<Wordlist>) -> Self {
        Self::with_config(WalletConfig::default().with_wordlist(wordlist))
    }

    /// Swap the wordlist used by later calls; the current wallet is kept.
    pub fn set_wordlist(&mut self, wordlist: Arc<Wordlist>) {
        self.config.wordlist = wordlist;
    }

    #[inline]
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Generate a fresh mnemonic of `length` words and derive at `path`
    /// (`""` selects the configured default path).
    ///
    /// # Errors
    /// `InvalidMnemonicLength` unless `length` is 12, 15, 18, 21 or 24;
    /// `InvalidPath` on a malformed path.
    pub fn generate(&mut self, length: usize, path: &str) -> WalletResult<&Wallet> {
        let word_count = WordCount::try_from(length)?;
        let path = self.resolve_path(path)?;

        let mnemonic = WalletMnemonic::create(word_count.entropy_bits(), &self.config.wordlist)?;
        let wallet = Wallet::derive(&mnemonic, &self.config.passphrase, path)?;

        debug!(
            words = word_count.words(),
            path = %wallet.path,
            address = %wallet.address,
            "generated wallet"
        );
        Ok(&*self.current.insert(wallet))
    }

    /// Import an existing mnemonic and derive at `path`
    /// (`""` selects the configured default path).
    ///
    /// Whitespace between words is normalized; the stored mnemonic is the
    /// re-encoded phrase.
    ///
    /// # Errors
    /// Codec errors (`InvalidMnemonicLength`, `UnknownWord`, `ChecksumMismatch`)
    /// and `InvalidPath`.
    pub fn from_mnemonic(&mut self, phrase: &str, path: &str) -> WalletResult<&Wallet> {
        let mnemonic = WalletMnemonic::from_phrase(phrase, &self.config.wordlist)?;
        let path = self.resolve_path(path)?;
        let wallet = Wallet::derive(&mnemonic, &self.config.passphrase, path)?;

        debug!(
            words = mnemonic.word_count(),
            path = %wallet.path,
            address = %wallet.address,
            "imported wallet"
        );
        Ok(&*self.current.insert(wallet))
    }

    /// Current wallet, if any call has succeeded yet
    #[inline]
    pub fn wallet(&self) -> Option<&Wallet> {
        self.current.as_ref()
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.current.as_ref().map(Wallet::mnemonic)
    }

    pub fn private_key(&self) -> Option<&str> {
        self.current.as_ref().map(Wallet::private_key)
    }

    pub fn public_key(&self) -> Option<&str> {
        self.current.as_ref().map(Wallet::public_key)
    }

    pub fn address(&self) -> Option<&str> {
        self.current.as_ref().map(Wallet::address)
    }

    fn resolve_path(&self, path: &str) -> WalletResult<DerivationPath> {
        if path.trim().is_empty() {
            DerivationPath::parse(&self.config.default_path)
        } else {
            DerivationPath::parse(path)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;
    use crate::error::{CryptoError, MnemonicError, WalletError};

    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_PRIVATE_KEY: &str =
        "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";
    const TEST_PUBLIC_KEY: &str = "0437b0bb7a8288d38ed49a524b5dc98cff3eb5ca824c9f9dc0dfdb3d9cd600f299a6179912b7451c09896c4098eca7ce6b2e58330672795e847c4d6af44e024230";
    const TEST_ADDRESS: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";
    const TEST_ADDRESS_1: &str = "0x6Fac4D18c912343BF86fa7049364Dd4E424Ab9C0";

    #[test]
    fn test_known_vector() {
        let mut hd = HdWallet::new();
        let wallet = hd.from_mnemonic(TEST_MNEMONIC_12, DEFAULT_PATH).unwrap();

        assert_eq!(wallet.mnemonic(), TEST_MNEMONIC_12);
        assert_eq!(wallet.private_key(), TEST_PRIVATE_KEY);
        assert_eq!(wallet.public_key(), TEST_PUBLIC_KEY);
        assert_eq!(wallet.address(), TEST_ADDRESS);
        assert_eq!(wallet.path(), &DerivationPath::default_evm());

        assert_eq!(hd.address(), Some(TEST_ADDRESS));
        assert_eq!(hd.private_key(), Some(TEST_PRIVATE_KEY));
        assert_eq!(hd.public_key(), Some(TEST_PUBLIC_KEY));
        assert_eq!(hd.mnemonic(), Some(TEST_MNEMONIC_12));
    }

    #[test]
    fn test_empty_path_is_default() {
        let mut hd = HdWallet::new();
        let by_default = hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap().clone();
        let explicit = hd.from_mnemonic(TEST_MNEMONIC_12, "m/44'/60'/0'/0/0").unwrap();

        assert_eq!(by_default.private_key(), explicit.private_key());
        assert_eq!(by_default.address(), explicit.address());
        assert_eq!(by_default.address(), TEST_ADDRESS);
    }

    #[test]
    fn test_other_index_differs() {
        let mut hd = HdWallet::new();
        let address = hd
            .from_mnemonic(TEST_MNEMONIC_12, "44'/60'/0'/0/1")
            .unwrap()
            .address()
            .to_string();

        assert_ne!(address, TEST_ADDRESS);
        assert_eq!(address, TEST_ADDRESS_1);
        assert_eq!(
            hd.from_mnemonic(TEST_MNEMONIC_12, &DerivationPaths::evm(1))
                .unwrap()
                .address(),
            TEST_ADDRESS_1
        );
    }

    #[test]
    fn test_second_account() {
        let mut hd = HdWallet::new();
        let wallet = hd
            .from_mnemonic(TEST_MNEMONIC_12, &DerivationPaths::evm_account(1, 0))
            .unwrap();
        assert_eq!(wallet.address(), "0x78839F6054d7ed13918bAe0473BA31b1Ca9D7265");
    }

    #[test]
    fn test_generate_all_lengths() {
        let mut hd = HdWallet::new();
        for word_count in WordCount::ALL {
            let wallet = hd.generate(word_count.words(), "").unwrap().clone();
            let words: Vec<&str> = wallet.mnemonic().split(' ').collect();

            assert_eq!(words.len(), word_count.words());
            assert!(words.iter().all(|w| hd.config().wordlist.contains(w)));
            assert_eq!(wallet.private_key().len(), 64);
            assert_eq!(wallet.public_key().len(), 130);
            assert!(wallet.public_key().starts_with("04"));
            assert!(EvmAddress::is_valid(wallet.address()));

            // importing the generated phrase reproduces the wallet
            let imported = hd.from_mnemonic(wallet.mnemonic(), "").unwrap();
            assert_eq!(imported.private_key(), wallet.private_key());
            assert_eq!(imported.address(), wallet.address());
        }
    }

    #[test]
    fn test_generate_invalid_lengths() {
        let mut hd = HdWallet::new();
        for length in [0usize, 11, 13, 25] {
            assert_eq!(
                hd.generate(length, "").unwrap_err(),
                WalletError::Mnemonic(MnemonicError::InvalidMnemonicLength(length))
            );
        }
        assert!(hd.wallet().is_none());
    }

    #[test]
    fn test_failure_keeps_prior_wallet() {
        let mut hd = HdWallet::new();
        hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap();

        let bad_checksum = "abandon ".repeat(11) + "abandon";
        assert_eq!(
            hd.from_mnemonic(&bad_checksum, "").unwrap_err(),
            WalletError::Mnemonic(MnemonicError::ChecksumMismatch)
        );
        assert!(matches!(
            hd.from_mnemonic(TEST_MNEMONIC_12, "m/44'/x"),
            Err(WalletError::Crypto(CryptoError::InvalidPath { .. }))
        ));
        assert!(hd.generate(13, "").is_err());

        assert_eq!(hd.address(), Some(TEST_ADDRESS));
        assert_eq!(hd.mnemonic(), Some(TEST_MNEMONIC_12));
    }

    #[test]
    fn test_unknown_word_reports_position() {
        let mut hd = HdWallet::new();
        let phrase = TEST_MNEMONIC_12.replacen("abandon", "bitcoinx", 1);
        assert_eq!(
            hd.from_mnemonic(&phrase, "").unwrap_err(),
            WalletError::Mnemonic(MnemonicError::UnknownWord(0))
        );
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let mut hd = HdWallet::new();
        let messy = format!("  {}  ", TEST_MNEMONIC_12.replace(' ', " \t\n "));
        let wallet = hd.from_mnemonic(&messy, "").unwrap();
        assert_eq!(wallet.mnemonic(), TEST_MNEMONIC_12);
        assert_eq!(wallet.address(), TEST_ADDRESS);
    }

    #[test]
    fn test_determinism() {
        let mut a = HdWallet::new();
        let mut b = HdWallet::new();
        let wa = a.from_mnemonic(TEST_MNEMONIC_12, "44'/60'/0'/0/7").unwrap();
        let wb = b.from_mnemonic(TEST_MNEMONIC_12, "44'/60'/0'/0/7").unwrap();

        assert_eq!(wa.private_key(), wb.private_key());
        assert_eq!(wa.public_key(), wb.public_key());
        assert_eq!(wa.address(), wb.address());
    }

    #[test]
    fn test_single_word_mutation_mostly_fails_checksum() {
        let wordlist = Wordlist::english();
        let words: Vec<&str> = TEST_MNEMONIC_12.split(' ').collect();
        let mut hd = HdWallet::new();

        let mut total = 0usize;
        let mut checksum_failures = 0usize;
        for position in 0..words.len() {
            for index in 1..=20 {
                let replacement = wordlist.word_at(index).unwrap();
                if replacement == words[position] {
                    continue;
                }
                let mut mutated = words.clone();
                mutated[position] = replacement;

                total += 1;
                if matches!(
                    hd.from_mnemonic(&mutated.join(" "), ""),
                    Err(WalletError::Mnemonic(MnemonicError::ChecksumMismatch))
                ) {
                    checksum_failures += 1;
                }
            }
        }

        assert_eq!(total, 239);
        assert!(
            checksum_failures * 100 >= total * 80,
            "only {}/{} mutations failed the checksum",
            checksum_failures,
            total
        );
    }

    #[test]
    fn test_passphrase_from_config() {
        let mut hd = HdWallet::with_config(WalletConfig::default().with_passphrase("TREZOR"));
        let wallet = hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap();

        assert_eq!(
            wallet.private_key(),
            "62f1d86b246c81bdd8f6c166d56896a4a5e1eddbcaebe06480e5c0bc74c28224"
        );
        assert_eq!(wallet.address(), "0x9c32F71D4DB8Fb9e1A58B0a80dF79935e7256FA6");
    }

    #[test]
    fn test_config_default_path() {
        let config = WalletConfig::default().with_default_path(DerivationPaths::evm(1));
        let mut hd = HdWallet::with_config(config);
        assert_eq!(hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap().address(), TEST_ADDRESS_1);
    }

    #[test]
    fn test_config_from_json() {
        let config: WalletConfig =
            serde_json::from_str(r#"{ "default_path": "m/44'/60'/0'/0/1" }"#).unwrap();
        assert_eq!(config.passphrase, "");
        assert!(Arc::ptr_eq(&config.wordlist, &Wordlist::english()));

        let mut hd = HdWallet::with_config(config);
        assert_eq!(hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap().address(), TEST_ADDRESS_1);

        let empty: WalletConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.default_path, DEFAULT_PATH);
    }

    #[test]
    fn test_custom_wordlist() {
        let english = Wordlist::english();
        let reversed = Arc::new(Wordlist::new(english.iter().rev()).unwrap());

        // all-zero entropy under the reversed list
        let phrase = format!("{}zebra", "zoo ".repeat(11));
        let mut hd = HdWallet::with_wordlist(Arc::clone(&reversed));
        let wallet = hd.from_mnemonic(&phrase, "").unwrap();
        assert_eq!(wallet.mnemonic(), phrase);

        let generated = hd.generate(12, "").unwrap().mnemonic().to_string();
        assert!(WalletMnemonic::validate(&generated, &reversed));

        hd.set_wordlist(english);
        assert_eq!(hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap().address(), TEST_ADDRESS);
    }

    #[test]
    fn test_separate_instances_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let mut hd = HdWallet::new();
                    hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap().address().to_string()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), TEST_ADDRESS);
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut hd = HdWallet::with_config(WalletConfig::default().with_passphrase("hunter2"));
        hd.from_mnemonic(TEST_MNEMONIC_12, "").unwrap();

        let debug = format!("{:?}", hd);
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains(TEST_PRIVATE_KEY));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("m/44'/60'/0'/0/0"));
    }
}
