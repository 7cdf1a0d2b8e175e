//! Account holder data model.

use std::fmt;

use super::credential::CredentialHash;
use super::item::Item;

/// Detail reported when an account lookup misses.
pub const ACCOUNT_NOT_FOUND: &str = "User not found";

/// Validation errors returned by account constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Identifier was not a positive integer.
    InvalidId,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidId => write!(f, "account id must be a positive integer"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Store-assigned account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap a raw identifier, rejecting values the store never assigns.
    pub fn new(raw: i64) -> Result<Self, AccountValidationError> {
        if raw < 1 {
            return Err(AccountValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Wrap an identifier read back from the store.
    pub(crate) const fn from_store(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address used as the account's external identifier.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - The trimmed value is non-empty.
///
/// # Examples
/// ```
/// use registry::domain::EmailAddress;
///
/// let email = EmailAddress::new("  a@x.com ").unwrap();
/// assert_eq!(email.as_ref(), "a@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and validate an email.
    ///
    /// # Errors
    /// Returns [`AccountValidationError::EmptyEmail`] when nothing is left after
    /// trimming.
    pub fn new(email: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Values required to persist a freshly registered account.
///
/// New accounts are always active; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    email: EmailAddress,
    credential_hash: CredentialHash,
}

impl NewAccount {
    /// Pair a validated email with an already hashed credential.
    pub fn new(email: EmailAddress, credential_hash: CredentialHash) -> Self {
        Self {
            email,
            credential_hash,
        }
    }

    /// Email to register.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Hash to store.
    pub fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }
}

/// Registered account together with the items it owns.
///
/// ## Invariants
/// - `items` all carry `owner_id == id` and are ordered by item id.
/// - `credential_hash` never holds the raw secret.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    email: EmailAddress,
    credential_hash: CredentialHash,
    is_active: bool,
    items: Vec<Item>,
}

impl Account {
    /// Assemble an account read back from the store.
    pub fn new(
        id: AccountId,
        email: EmailAddress,
        credential_hash: CredentialHash,
        is_active: bool,
        items: Vec<Item>,
    ) -> Self {
        Self {
            id,
            email,
            credential_hash,
            is_active,
            items,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Unique login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Salted credential hash.
    pub fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }

    /// Whether the account is active. Always `true` for new accounts.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Owned items, ordered by id.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Replace the owned items, keeping them in id order.
    #[must_use]
    pub fn with_items(mut self, mut items: Vec<Item>) -> Self {
        items.sort_by_key(Item::id);
        self.items = items;
        self
    }
}
