//! Credential storage primitives.
//!
//! Hashing is a pure function of the raw secret and a [`HashCost`]; there is
//! no shared hashing context. Raw secrets live in [`Zeroizing`] buffers and
//! are redacted from `Debug` output.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Minimum accepted credential length, in characters.
pub const CREDENTIAL_MIN_CHARS: usize = 8;
/// Maximum accepted credential length, in characters.
pub const CREDENTIAL_MAX_CHARS: usize = 64;
/// Maximum accepted credential size in UTF-8 bytes. bcrypt only reads the
/// first 72 bytes of its input.
pub const CREDENTIAL_MAX_BYTES: usize = 72;

/// Failures raised while validating or hashing credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Fewer characters than [`CREDENTIAL_MIN_CHARS`].
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// More characters than [`CREDENTIAL_MAX_CHARS`].
    #[error("password must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Encodes to more than [`CREDENTIAL_MAX_BYTES`] bytes of UTF-8.
    #[error("password must encode to at most {max_bytes} bytes")]
    TooManyBytes {
        /// Maximum accepted encoded size.
        max_bytes: usize,
    },
    /// Work factor outside bcrypt's supported range.
    #[error("hash cost must be between {min} and {max}, got {actual}")]
    InvalidCost {
        /// Lowest supported cost.
        min: u32,
        /// Highest supported cost.
        max: u32,
        /// Rejected cost.
        actual: u32,
    },
    /// The hashing backend failed.
    #[error("credential hashing failed: {message}")]
    Hashing {
        /// Backend error text.
        message: String,
    },
}

/// Raw secret supplied at registration.
///
/// ## Invariants
/// - Length is between [`CREDENTIAL_MIN_CHARS`] and [`CREDENTIAL_MAX_CHARS`]
///   characters inclusive.
/// - The UTF-8 encoding fits in [`CREDENTIAL_MAX_BYTES`], so no part of the
///   secret is ignored by the hash.
/// - Whitespace is preserved as supplied.
#[derive(Clone, PartialEq, Eq)]
pub struct RawCredential(Zeroizing<String>);

impl RawCredential {
    /// Validate a raw secret.
    ///
    /// # Errors
    /// Returns [`CredentialError::TooShort`], [`CredentialError::TooLong`] or
    /// [`CredentialError::TooManyBytes`] when the secret is out of bounds.
    pub fn new(raw: impl Into<String>) -> Result<Self, CredentialError> {
        let raw = Zeroizing::new(raw.into());
        let length = raw.chars().count();
        if length < CREDENTIAL_MIN_CHARS {
            return Err(CredentialError::TooShort {
                min: CREDENTIAL_MIN_CHARS,
            });
        }
        if length > CREDENTIAL_MAX_CHARS {
            return Err(CredentialError::TooLong {
                max: CREDENTIAL_MAX_CHARS,
            });
        }
        if raw.len() > CREDENTIAL_MAX_BYTES {
            return Err(CredentialError::TooManyBytes {
                max_bytes: CREDENTIAL_MAX_BYTES,
            });
        }
        Ok(Self(raw))
    }

    fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for RawCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawCredential(<redacted>)")
    }
}

/// Salted one-way hash as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap a hash previously produced by [`hash_credential`].
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Encoded hash, including algorithm, cost and salt.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CredentialHash> for String {
    fn from(value: CredentialHash) -> Self {
        value.0
    }
}

/// bcrypt work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost(u32);

impl HashCost {
    /// Lowest cost bcrypt accepts.
    pub const MIN: u32 = 4;
    /// Highest cost bcrypt accepts.
    pub const MAX: u32 = 31;

    /// Validate a work factor.
    ///
    /// # Errors
    /// Returns [`CredentialError::InvalidCost`] outside `MIN..=MAX`.
    pub fn new(cost: u32) -> Result<Self, CredentialError> {
        if !(Self::MIN..=Self::MAX).contains(&cost) {
            return Err(CredentialError::InvalidCost {
                min: Self::MIN,
                max: Self::MAX,
                actual: cost,
            });
        }
        Ok(Self(cost))
    }

    /// Raw work factor.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self(bcrypt::DEFAULT_COST)
    }
}

/// Hash `raw` with a fresh random salt.
///
/// # Examples
/// ```
/// use registry::domain::{hash_credential, verify_credential, HashCost, RawCredential};
///
/// let raw = RawCredential::new("password123").unwrap();
/// let cost = HashCost::new(HashCost::MIN).unwrap();
/// let hash = hash_credential(&raw, cost).unwrap();
/// assert_ne!(hash.as_str(), "password123");
/// assert!(verify_credential(&raw, &hash));
/// ```
pub fn hash_credential(
    raw: &RawCredential,
    cost: HashCost,
) -> Result<CredentialHash, CredentialError> {
    bcrypt::non_truncating_hash(raw.expose(), cost.get())
        .map(CredentialHash)
        .map_err(|err| CredentialError::Hashing {
            message: err.to_string(),
        })
}

/// Check `raw` against a stored hash. Malformed hashes never verify.
pub fn verify_credential(raw: &RawCredential, hash: &CredentialHash) -> bool {
    bcrypt::non_truncating_verify(raw.expose(), hash.as_str()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cheap_cost() -> HashCost {
        HashCost::new(HashCost::MIN).expect("minimum cost is valid")
    }

    #[fixture]
    fn raw() -> RawCredential {
        RawCredential::new("password123").expect("valid credential")
    }

    #[rstest]
    #[case("short", CredentialError::TooShort { min: 8 })]
    #[case("1234567", CredentialError::TooShort { min: 8 })]
    #[case(&"x".repeat(65), CredentialError::TooLong { max: 64 })]
    fn out_of_range_lengths_are_rejected(#[case] input: &str, #[case] expected: CredentialError) {
        assert_eq!(RawCredential::new(input), Err(expected));
    }

    #[rstest]
    #[case("12345678")]
    #[case(&"y".repeat(64))]
    fn boundary_lengths_are_accepted(#[case] input: &str) {
        assert!(RawCredential::new(input).is_ok());
    }

    #[rstest]
    #[case(3)]
    #[case(32)]
    fn cost_outside_bcrypt_range_is_rejected(#[case] cost: u32) {
        assert!(matches!(
            HashCost::new(cost),
            Err(CredentialError::InvalidCost { actual, .. }) if actual == cost
        ));
    }

    #[rstest]
    fn default_cost_matches_bcrypt() {
        assert_eq!(HashCost::default().get(), 12);
    }

    #[rstest]
    fn hash_never_equals_raw_and_verifies(raw: RawCredential, cheap_cost: HashCost) {
        let hash = hash_credential(&raw, cheap_cost).expect("hashing succeeds");
        assert_ne!(hash.as_str(), "password123");
        assert!(verify_credential(&raw, &hash));
    }

    #[rstest]
    fn same_secret_hashes_differently(raw: RawCredential, cheap_cost: HashCost) {
        let first = hash_credential(&raw, cheap_cost).expect("hashing succeeds");
        let second = hash_credential(&raw, cheap_cost).expect("hashing succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    fn wrong_secret_does_not_verify(raw: RawCredential, cheap_cost: HashCost) {
        let hash = hash_credential(&raw, cheap_cost).expect("hashing succeeds");
        let other = RawCredential::new("password124").expect("valid credential");
        assert!(!verify_credential(&other, &hash));
    }

    #[rstest]
    fn malformed_hash_does_not_verify(raw: RawCredential) {
        assert!(!verify_credential(&raw, &CredentialHash::from_stored("not-bcrypt")));
    }

    #[rstest]
    fn multibyte_secret_over_bcrypt_limit_is_rejected() {
        let secret = format!("{}{}", "é".repeat(36), "A".repeat(28));
        assert_eq!(secret.chars().count(), 64);

        assert_eq!(
            RawCredential::new(secret),
            Err(CredentialError::TooManyBytes { max_bytes: 72 })
        );
    }

    #[rstest]
    fn secrets_differing_only_in_the_last_byte_do_not_collide(cheap_cost: HashCost) {
        let base = "é".repeat(32);
        let first = RawCredential::new(format!("{base}AAAAAAA")).expect("fits in 72 bytes");
        let second = RawCredential::new(format!("{base}AAAAAAB")).expect("fits in 72 bytes");

        let hash = hash_credential(&first, cheap_cost).expect("hashing succeeds");

        assert!(verify_credential(&first, &hash));
        assert!(!verify_credential(&second, &hash));
    }

    #[rstest]
    fn debug_output_redacts_secret(raw: RawCredential) {
        assert!(!format!("{raw:?}").contains("password123"));
    }
}
