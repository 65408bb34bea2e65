// wallet-core/src/crypto/hash.rs
//
// Hash Primitives - SHA-256, HMAC-SHA512, Keccak-256, Hash160
//
// Thin wrappers so the rest of the crate deals in fixed-size arrays only.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

/// SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Keccak-256 (pre-standard SHA-3 padding, as used by Ethereum).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// RIPEMD-160(SHA-256(data)), used for BIP32 key fingerprints.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

/// HMAC-SHA512 over the concatenation of `parts`.
///
/// The output usually holds key material (IL || IR), so it is returned
/// wrapped in [`Zeroizing`].
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Zeroizing<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts any key length");
    for part in parts {
        mac.update(part);
    }

    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}
