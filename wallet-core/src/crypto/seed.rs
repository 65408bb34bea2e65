// wallet-core/src/crypto/seed.rs
//
// Seed Generator - BIP-39 mnemonic -> 64-byte seed
// PBKDF2-HMAC-SHA512, 2048 rounds, salt = "mnemonic" || passphrase (both NFKD)

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const SEED_LEN: usize = 64;

const PBKDF2_ROUNDS: u32 = 2048;
const SALT_PREFIX: &str = "mnemonic";

/// 64-byte BIP-39 seed, zeroized on drop
#[derive(Clone)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

/// Stretch a mnemonic phrase (and optional passphrase, `""` for none) into a seed.
///
/// The phrase is used as given apart from NFKD normalization; callers that
/// want checksum validation go through [`WalletMnemonic`](super::WalletMnemonic).
pub fn seed_from(phrase: &str, passphrase: &str) -> Seed {
    let password: Zeroizing<String> = Zeroizing::new(phrase.nfkd().collect());
    let salt: Zeroizing<String> =
        Zeroizing::new(SALT_PREFIX.chars().chain(passphrase.nfkd()).collect());

    let mut out = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut out[..]);
    Seed(out)
}
