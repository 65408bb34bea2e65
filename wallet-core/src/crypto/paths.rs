// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - BIP-32 path parsing + BIP-44 path builders
// Text form: [m/]44'/60'/0'/0/0   (' or h/H marks a hardened step)

use crate::error::{CryptoError, WalletError, WalletResult};
use std::fmt;
use std::str::FromStr;

/// Offset added to the index of a hardened child (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const ETHEREUM: u32 = 60; // EVM chains share coin_type 60
}

// =============================================================================
// CHILD NUMBER
// =============================================================================
/// One derivation step: a 31-bit index plus the hardened flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildNumber {
    index: u32,
    hardened: bool,
}

impl ChildNumber {
    /// # Errors
    /// `InvalidPath` if `index >= 2^31` (the hardened bit is expressed by the flag).
    pub fn new(index: u32, hardened: bool) -> WalletResult<Self> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::Crypto(CryptoError::invalid_path(
                &index.to_string(),
                format!("index {} is out of range (must be < 2^31)", index),
            )));
        }
        Ok(Self { index, hardened })
    }

    /// Inverse of [`to_u32`](Self::to_u32): the top bit selects hardened.
    pub fn from_u32(value: u32) -> Self {
        Self {
            index: value & !HARDENED_OFFSET,
            hardened: value & HARDENED_OFFSET != 0,
        }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Effective index: `index | 0x80000000` when hardened
    #[inline]
    pub fn to_u32(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }

    fn parse_segment(path: &str, segment: &str) -> WalletResult<Self> {
        if segment.is_empty() {
            return Err(WalletError::Crypto(CryptoError::invalid_path(
                path,
                "empty segment",
            )));
        }

        let (digits, hardened) = match segment.strip_suffix(|c: char| matches!(c, '\'' | 'h' | 'H')) {
            Some(digits) => (digits, true),
            None => (segment, false),
        };

        // u32::from_str would accept a leading '+'
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WalletError::Crypto(CryptoError::invalid_path(
                path,
                format!("segment '{}' is not a number", segment),
            )));
        }

        let index: u32 = digits
            .parse()
            .ok()
            .filter(|index| *index < HARDENED_OFFSET)
            .ok_or_else(|| {
                WalletError::Crypto(CryptoError::invalid_path(
                    path,
                    format!("index '{}' is out of range (must be < 2^31)", digits),
                ))
            })?;

        Ok(Self { index, hardened })
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================
/// Ordered list of child steps below the master key.
///
/// `"m"` alone is the empty path (the master key itself). A leading `m/` or
/// `M/` is optional, so `"44'/60'/0'/0/0"` and `"m/44'/60'/0'/0/0"` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// # Errors
    /// `InvalidPath` on an empty string, an empty segment, a non-numeric
    /// segment or an index `>= 2^31`.
    pub fn parse(path: &str) -> WalletResult<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(WalletError::Crypto(CryptoError::invalid_path(
                path,
                "empty path",
            )));
        }

        let body = match trimmed {
            "m" | "M" => return Ok(Self::default()),
            _ => trimmed
                .strip_prefix("m/")
                .or_else(|| trimmed.strip_prefix("M/"))
                .unwrap_or(trimmed),
        };

        body.split('/')
            .map(|segment| ChildNumber::parse_segment(path, segment))
            .collect::<WalletResult<Vec<_>>>()
            .map(Self)
    }

    /// `m/44'/60'/0'/0/0`
    pub fn default_evm() -> Self {
        Self(vec![
            ChildNumber { index: 44, hardened: true },
            ChildNumber { index: coin_type::ETHEREUM, hardened: true },
            ChildNumber { index: 0, hardened: true },
            ChildNumber { index: 0, hardened: false },
            ChildNumber { index: 0, hardened: false },
        ])
    }

    /// Copy of this path extended by one step.
    pub fn child(&self, child: ChildNumber) -> Self {
        let mut steps = self.0.clone();
        steps.push(child);
        Self(steps)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChildNumber> {
        self.0.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> WalletResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// PRE-BUILT PATHS
// =============================================================================
/// BIP-44 path strings for EVM chains
///
/// # Conventions
/// - BIP-44: `m/purpose'/coin'/account'/change/index`
/// - Ethereum, BSC, Polygon, Arbitrum, Optimism, Base... all use coin_type 60
pub struct DerivationPaths;

impl DerivationPaths {
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";

    /// EVM path with custom address index
    #[inline]
    pub fn evm(index: u32) -> String {
        format!("m/44'/60'/0'/0/{}", index)
    }

    /// EVM path with custom account & index (multi-account)
    #[inline]
    pub fn evm_account(account: u32, index: u32) -> String {
        format!("m/44'/60'/{}'/0/{}", account, index)
    }

    /// Custom BIP-44 style path
    ///
    /// # Arguments
    /// * `purpose` - 44 (BIP-44)
    /// * `coin_type` - SLIP-44 coin type (see `coin_type::*`)
    /// * `account` - Account index (usually 0)
    /// * `change` - 0 = external (receiving), 1 = internal (change)
    /// * `index` - Address index
    #[inline]
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            purpose, coin_type, account, change, index
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid_path(result: WalletResult<DerivationPath>) -> bool {
        matches!(
            result,
            Err(WalletError::Crypto(CryptoError::InvalidPath { .. }))
        )
    }

    #[test]
    fn test_parse_default_path() {
        let path = DerivationPath::parse("44'/60'/0'/0/0").unwrap();
        assert_eq!(path, DerivationPath::default_evm());
        assert_eq!(path.len(), 5);

        let steps: Vec<u32> = path.iter().map(ChildNumber::to_u32).collect();
        assert_eq!(
            steps,
            vec![0x8000_002c, 0x8000_003c, 0x8000_0000, 0, 0]
        );
    }

    #[test]
    fn test_prefix_and_markers_are_equivalent() {
        let expected = DerivationPath::default_evm();
        for text in [
            "m/44'/60'/0'/0/0",
            "M/44'/60'/0'/0/0",
            "m/44h/60H/0'/0/0",
            "  44'/60'/0'/0/0  ",
            DerivationPaths::EVM_0,
        ] {
            assert_eq!(DerivationPath::parse(text).unwrap(), expected, "{}", text);
        }
    }

    #[test]
    fn test_master_only() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn test_display_round_trip() {
        let path = DerivationPath::parse("44h/60'/1'/0/7").unwrap();
        assert_eq!(path.to_string(), "m/44'/60'/1'/0/7");
        assert_eq!(DerivationPath::parse(&path.to_string()).unwrap(), path);
    }

    #[test]
    fn test_malformed_paths_rejected() {
        for text in [
            "",
            "   ",
            "m/",
            "44'//0",
            "44'/60'/0'/0/",
            "/44'",
            "44'/abc",
            "44'/-1",
            "44'/+1",
            "44''",
            "'",
            "x/44'",
            "m/44'/2147483648",
            "m/2147483648'",
            "m/99999999999",
        ] {
            assert!(
                is_invalid_path(DerivationPath::parse(text)),
                "expected '{}' to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_largest_index_accepted() {
        let path = DerivationPath::parse("m/2147483647'/2147483647").unwrap();
        let steps: Vec<u32> = path.iter().map(ChildNumber::to_u32).collect();
        assert_eq!(steps, vec![u32::MAX, 0x7fff_ffff]);
    }

    #[test]
    fn test_child_number() {
        assert!(ChildNumber::new(HARDENED_OFFSET, false).is_err());
        let child = ChildNumber::new(5, true).unwrap();
        assert_eq!(child.to_u32(), 0x8000_0005);
        assert_eq!(ChildNumber::from_u32(0x8000_0005), child);
        assert_eq!(child.to_string(), "5'");
        assert_eq!(ChildNumber::from_u32(7).to_string(), "7");
    }

    #[test]
    fn test_child_extends_path() {
        let base = DerivationPath::parse("m/44'/60'/0'/0").unwrap();
        let leaf = base.child(ChildNumber::new(0, false).unwrap());
        assert_eq!(leaf, DerivationPath::default_evm());
        assert_eq!(base.len(), 4);
    }

    #[test]
    fn test_evm_paths() {
        assert_eq!(DerivationPaths::evm(0), DerivationPaths::EVM_0);
        assert_eq!(DerivationPaths::evm(5), "m/44'/60'/0'/0/5");
        assert_eq!(DerivationPaths::evm_account(1, 3), "m/44'/60'/1'/0/3");
        assert_eq!(
            DerivationPaths::bip44(44, coin_type::ETHEREUM, 0, 0, 0),
            DerivationPaths::EVM_0
        );
    }
}
