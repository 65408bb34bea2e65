// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - BIP-32 / BIP-44
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
//   master:   I = HMAC-SHA512("Bitcoin seed", seed)
//   hardened: I = HMAC-SHA512(chain_code, 0x00 || k_par || ser32(i))
//   normal:   I = HMAC-SHA512(chain_code, serP(K_par) || ser32(i))
//   child:    k_i = (IL + k_par) mod n,  c_i = IR
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::crypto::hash::{hash160, hmac_sha512};
use crate::crypto::paths::{ChildNumber, DerivationPath, HARDENED_OFFSET};
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar, SecretKey};
use std::ops::Range;
use tracing::{trace, warn};
use zeroize::Zeroizing;

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Accepted seed sizes in bytes (128 to 512 bits)
pub const MIN_SEED_LEN: usize = 16;
pub const MAX_SEED_LEN: usize = 64;

// =============================================================================
// EXTENDED PRIVATE KEY
// =============================================================================
/// BIP-32 extended private key: key + chain code + position metadata.
///
/// Key material lives in `Zeroizing` buffers and is wiped on drop.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    private_key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

impl std::fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("private_key", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .finish()
    }
}

impl ExtendedPrivateKey {
    /// Master key from a BIP-39 seed.
    ///
    /// # Errors
    /// - `InvalidSeedLength` unless `16 <= seed.len() <= 64`
    /// - `InvalidMasterKey` if IL is zero or `>= n` (not retried)
    pub fn master(seed: &[u8]) -> WalletResult<Self> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(WalletError::Crypto(CryptoError::InvalidSeedLength(
                seed.len(),
            )));
        }

        let i = hmac_sha512(MASTER_HMAC_KEY, &[seed]);
        let (il, ir) = i.split_at(32);

        match parse_scalar(il) {
            Some(scalar) if !bool::from(scalar.is_zero()) => {}
            _ => return Err(WalletError::Crypto(CryptoError::InvalidMasterKey)),
        }

        Ok(Self {
            private_key: to_array(il),
            chain_code: to_array(ir),
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    /// Derive one child step.
    ///
    /// When `IL >= n` or the resulting key is zero the next index is tried
    /// (BIP-32 "proceed with the next value for i"); a hardened child stays
    /// hardened. The index actually used is recorded in `child_number`.
    ///
    /// # Errors
    /// `ChildIndexExhausted` when the index space runs out before a valid key.
    pub fn derive_child(&self, child: ChildNumber) -> WalletResult<Self> {
        let hardened = child.is_hardened();
        let parent_public = self.public_key()?;

        self.derive_child_with(child, &parent_public, |index| {
            let index_be = index.to_be_bytes();
            if hardened {
                hmac_sha512(&self.chain_code[..], &[&[0u8], &self.private_key[..], &index_be])
            } else {
                hmac_sha512(&self.chain_code[..], &[&parent_public, &index_be])
            }
        })
    }

    /// Retry loop of [`derive_child`](Self::derive_child); `hmac_at` yields
    /// `I = IL || IR` for an effective index.
    fn derive_child_with<F>(
        &self,
        child: ChildNumber,
        parent_public: &[u8; 33],
        mut hmac_at: F,
    ) -> WalletResult<Self>
    where
        F: FnMut(u32) -> Zeroizing<[u8; 64]>,
    {
        let depth = self.depth.checked_add(1).ok_or_else(|| {
            WalletError::Crypto(CryptoError::invalid_path(
                &child.to_string(),
                "depth exceeds 255",
            ))
        })?;

        let hardened = child.is_hardened();
        let parent_fingerprint = fingerprint_of(parent_public);

        let mut index = child.to_u32();
        loop {
            let i = hmac_at(index);
            let (il, ir) = i.split_at(32);

            if let Some(private_key) = tweak_add(il, &self.private_key) {
                trace!(depth, index, hardened, "derived child key");
                return Ok(Self {
                    private_key,
                    chain_code: to_array(ir),
                    depth,
                    parent_fingerprint,
                    child_number: index,
                });
            }

            warn!(depth, index, "invalid child key, advancing to the next index");
            index = next_index(index, hardened)
                .ok_or(WalletError::Crypto(CryptoError::ChildIndexExhausted))?;
        }
    }

    /// Fold [`derive_child`](Self::derive_child) over every step of `path`.
    pub fn derive_path(&self, path: &DerivationPath) -> WalletResult<Self> {
        path.iter()
            .try_fold(self.clone(), |key, child| key.derive_child(*child))
    }

    /// 33-byte SEC1 compressed public key
    pub fn public_key(&self) -> WalletResult<[u8; 33]> {
        let secret = SecretKey::from_slice(&self.private_key[..]).map_err(|_| {
            CryptoError::InvalidPrivateKey("not a valid secp256k1 scalar".to_string())
        })?;

        let mut out = [0u8; 33];
        out.copy_from_slice(secret.public_key().to_encoded_point(true).as_bytes());
        Ok(out)
    }

    /// First 4 bytes of Hash160 of the compressed public key
    pub fn fingerprint(&self) -> WalletResult<[u8; 4]> {
        Ok(fingerprint_of(&self.public_key()?))
    }

    #[inline]
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Effective index (hardened bit included) this key was derived at
    #[inline]
    pub fn child_number(&self) -> u32 {
        self.child_number
    }
}

// =============================================================================
// DERIVER
// =============================================================================
/// secp256k1 Key Deriver - BIP-32 Standard
///
/// # Security
/// - Private keys and chain codes wrap in `Zeroizing<[u8; 32]>`
/// - Intermediate HMAC outputs are zeroized as well
///
/// # Performance
/// - Iterative derivation (no recursion)
/// - Batch derivation: derive to the base path once, then fan out
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Master key from `seed`, then every step of `path` in order.
    pub fn derive(seed: &[u8], path: &DerivationPath) -> WalletResult<ExtendedPrivateKey> {
        ExtendedPrivateKey::master(seed)?.derive_path(path)
    }

    /// Same as [`derive`](Self::derive) but takes the textual path
    /// (e.g. `"m/44'/60'/0'/0/0"`).
    pub fn derive_path(seed: &[u8], path: &str) -> WalletResult<ExtendedPrivateKey> {
        let path = DerivationPath::parse(path)?;
        Self::derive(seed, &path)
    }

    /// Batch derive: derive to `base_path` once, then each normal child index.
    ///
    /// # Arguments
    /// * `seed` - 16..=64 bytes
    /// * `base_path` - Path up to the last level (e.g. "m/44'/60'/0'/0")
    /// * `indices` - Range of address indices (e.g. 0..10)
    pub fn derive_batch(
        seed: &[u8],
        base_path: &str,
        indices: Range<u32>,
    ) -> WalletResult<Vec<ExtendedPrivateKey>> {
        let base = Self::derive_path(seed, base_path)?;

        let mut keys = Vec::with_capacity(indices.len());
        for index in indices {
            keys.push(base.derive_child(ChildNumber::new(index, false)?)?);
        }
        Ok(keys)
    }

    /// Validate path format
    #[inline]
    pub fn is_valid_path(path: &str) -> bool {
        DerivationPath::parse(path).is_ok()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn to_array(bytes: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut out = Zeroizing::new([0u8; 32]);
    out.copy_from_slice(bytes);
    out
}

/// Scalar from 32 big-endian bytes; `None` when the value is `>= n`.
fn parse_scalar(bytes: &[u8]) -> Option<Scalar> {
    let repr: [u8; 32] = bytes.try_into().ok()?;
    Option::from(Scalar::from_repr(FieldBytes::from(repr)))
}

/// `(tweak + parent) mod n`, or `None` if `tweak >= n` or the sum is zero.
fn tweak_add(tweak: &[u8], parent: &[u8; 32]) -> Option<Zeroizing<[u8; 32]>> {
    let sum = parse_scalar(tweak)? + parse_scalar(parent)?;
    if bool::from(sum.is_zero()) {
        return None;
    }
    Some(to_array(&sum.to_repr()))
}

fn next_index(index: u32, hardened: bool) -> Option<u32> {
    let next = index.checked_add(1)?;
    if !hardened && next >= HARDENED_OFFSET {
        return None;
    }
    Some(next)
}

fn fingerprint_of(public_key: &[u8; 33]) -> [u8; 4] {
    let id = hash160(public_key);
    [id[0], id[1], id[2], id[3]]
}

// =============================================================================
// TESTS
// =============================================================================
