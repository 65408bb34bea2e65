// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module - Key/Address Conversion
// secp256k1 public keys, Keccak-256, EIP-55 checksum

use crate::crypto::hash::keccak256;
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;

/// Uncompressed SEC1 public key length (0x04 || X || Y)
pub const PUBLIC_KEY_LEN: usize = 65;
pub const ADDRESS_LEN: usize = 20;

const UNCOMPRESSED_TAG: u8 = 0x04;

/// EVM Address Generator
///
/// # Flow:  Private Key (32B) → Public Key (65B) → Keccak256 → Address (20B)
///
/// # Security
/// - No Storage: this module never keeps the private key around
/// - `SecretKey` zeroizes itself on drop
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Private Key → Public Key → Address
    // =========================================================================

    /// Uncompressed public key (`0x04 || X || Y`) for a 32-byte private key.
    ///
    /// # Errors
    /// `InvalidPrivateKey` if the key is not 32 bytes, is zero, or is `>= n`.
    pub fn public_key_from(private_key: &[u8]) -> WalletResult<[u8; PUBLIC_KEY_LEN]> {
        if private_key.len() != 32 {
            return Err(WalletError::Crypto(CryptoError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                private_key.len()
            ))));
        }

        let secret = SecretKey::from_slice(private_key).map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidPrivateKey(
                "scalar is zero or not below the curve order".to_string(),
            ))
        })?;

        let mut out = [0u8; PUBLIC_KEY_LEN];
        out.copy_from_slice(secret.public_key().to_encoded_point(false).as_bytes());
        Ok(out)
    }

    /// Raw 20-byte address of an uncompressed public key.
    ///
    /// # Algorithm (Ethereum Yellow Paper)
    /// 1. Drop the 0x04 prefix → 64 bytes
    /// 2. Keccak-256 → 32 bytes
    /// 3. Last 20 bytes
    pub fn address_bytes_from(public_key: &[u8]) -> WalletResult<[u8; ADDRESS_LEN]> {
        if public_key.len() != PUBLIC_KEY_LEN {
            return Err(WalletError::Crypto(CryptoError::InvalidPublicKeyFormat(
                format!("expected {} bytes, got {}", PUBLIC_KEY_LEN, public_key.len()),
            )));
        }
        if public_key[0] != UNCOMPRESSED_TAG {
            return Err(WalletError::Crypto(CryptoError::InvalidPublicKeyFormat(
                format!("expected 0x04 prefix, got 0x{:02x}", public_key[0]),
            )));
        }

        let hash = keccak256(&public_key[1..]);
        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&hash[12..]);
        Ok(address)
    }

    /// EIP-55 checksummed address of an uncompressed public key.
    #[inline]
    pub fn address_from(public_key: &[u8]) -> WalletResult<String> {
        Ok(Self::checksum_encode(&Self::address_bytes_from(public_key)?))
    }

    /// Render 20 address bytes as `0x` + EIP-55 mixed-case hex.
    ///
    /// A hex letter is uppercased when the matching nibble of
    /// Keccak-256(lowercase hex) is `>= 8`.
    pub fn checksum_encode(address: &[u8; ADDRESS_LEN]) -> String {
        let lower = hex::encode(address);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    // =========================================================================
    // CONVENIENCE: Private Key → Address
    // =========================================================================

    /// Derive 20 bytes address straight from a private key.
    pub fn derive_bytes(private_key: &[u8]) -> WalletResult<[u8; ADDRESS_LEN]> {
        Self::address_bytes_from(&Self::public_key_from(private_key)?)
    }

    /// Derive EIP-55 checksummed address string from a private key.
    ///
    /// # Returns
    /// `"0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"` (mixed-case checksum)
    #[inline]
    pub fn derive(private_key: &[u8]) -> WalletResult<String> {
        Ok(Self::checksum_encode(&Self::derive_bytes(private_key)?))
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Parse `0x` + 40 hex chars (any case, checksum not checked)
    pub fn parse(address: &str) -> WalletResult<[u8; ADDRESS_LEN]> {
        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .ok_or_else(|| {
                WalletError::Crypto(CryptoError::InvalidAddress("missing 0x prefix".to_string()))
            })?;

        if digits.len() != ADDRESS_LEN * 2 {
            return Err(WalletError::Crypto(CryptoError::InvalidAddress(format!(
                "expected 40 hex characters, got {}",
                digits.len()
            ))));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidAddress(e.to_string()))
        })?;
        Ok(bytes)
    }

    /// `0x` prefix + 40 hex chars; a mixed-case string must also carry a
    /// correct EIP-55 checksum. All-lowercase and all-uppercase are accepted.
    pub fn is_valid(address: &str) -> bool {
        let Ok(bytes) = Self::parse(address) else {
            return false;
        };

        let digits = &address[2..];
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        if has_upper && has_lower {
            return Self::checksum_encode(&bytes)[2..] == *digits;
        }
        true
    }

    /// Normalize to EIP-55 checksum format
    ///
    /// `"0xabcd..."` → `"0xAbCd..."` (mixed-case per checksum)
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        Ok(Self::checksum_encode(&Self::parse(address)?))
    }

    /// Compare 2 addresses by their bytes (case-insensitive).
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (Self::parse(addr1), Self::parse(addr2)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
