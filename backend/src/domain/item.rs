//! Owned item data model.
//!
//! Items are immutable once created. The owner comes from the creation path
//! and `created_at` from the service clock, so [`ItemDraft`] only carries the
//! client-supplied fields.

use std::fmt;

use chrono::{DateTime, Utc};

use super::account::AccountId;

/// Detail reported when an item lookup misses.
pub const ITEM_NOT_FOUND: &str = "Item not found";

/// Validation errors returned by [`ItemDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Title was blank.
    EmptyTitle,
    /// Category was blank.
    EmptyCategory,
    /// Price was NaN or infinite.
    NonFinitePrice,
    /// Price was below zero.
    NegativePrice,
    /// Identifier was not a positive integer.
    InvalidId,
}

impl ItemValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyCategory => "category",
            Self::NonFinitePrice | Self::NegativePrice => "price",
            Self::InvalidId => "id",
        }
    }
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::NonFinitePrice => write!(f, "price must be a finite number"),
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::InvalidId => write!(f, "item id must be a positive integer"),
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(i64);

impl ItemId {
    /// Wrap a raw identifier, rejecting values below 1.
    pub fn new(raw: i64) -> Result<Self, ItemValidationError> {
        if raw < 1 {
            return Err(ItemValidationError::InvalidId);
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

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-supplied item fields after validation.
///
/// ## Invariants
/// - `title` and `category` are non-blank.
/// - `price` is finite and not negative.
///
/// # Examples
/// ```
/// use registry::domain::ItemDraft;
///
/// let draft = ItemDraft::try_new("Clean Code", "Martin", None, 29.99).unwrap();
/// assert_eq!(draft.title(), "Clean Code");
/// assert!(ItemDraft::try_new("Clean Code", "Martin", None, -1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    title: String,
    category: String,
    description: Option<String>,
    price: f64,
}

impl ItemDraft {
    /// Validate client-supplied item fields.
    ///
    /// # Errors
    /// Returns an [`ItemValidationError`] naming the first invalid field: blank
    /// title or category, or a price that is negative or not finite.
    pub fn try_new(
        title: impl Into<String>,
        category: impl Into<String>,
        description: Option<String>,
        price: f64,
    ) -> Result<Self, ItemValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ItemValidationError::EmptyTitle);
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ItemValidationError::EmptyCategory);
        }
        if !price.is_finite() {
            return Err(ItemValidationError::NonFinitePrice);
        }
        if price < 0.0 {
            return Err(ItemValidationError::NegativePrice);
        }

        Ok(Self {
            title,
            category,
            description,
            price,
        })
    }

    /// Item title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Category, historically the author name.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Non-negative finite price.
    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Row to insert: a validated draft plus server-assigned provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    owner_id: AccountId,
    draft: ItemDraft,
    created_at: DateTime<Utc>,
}

impl NewItem {
    /// Attach the path owner and creation time to a draft.
    pub fn new(owner_id: AccountId, draft: ItemDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            draft,
            created_at,
        }
    }

    /// Owning account.
    pub fn owner_id(&self) -> AccountId {
        self.owner_id
    }

    /// Validated client fields.
    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    /// Creation time from the service clock.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materialise the stored item once the store assigns an id.
    pub fn into_item(self, id: ItemId) -> Item {
        let ItemDraft {
            title,
            category,
            description,
            price,
        } = self.draft;
        Item {
            id,
            owner_id: self.owner_id,
            title,
            category,
            description,
            price,
            created_at: self.created_at,
        }
    }
}

/// Persisted item owned by exactly one account.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    owner_id: AccountId,
    title: String,
    category: String,
    description: Option<String>,
    price: f64,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Rebuild an item from stored columns.
    pub(crate) fn from_parts(
        id: ItemId,
        owner_id: AccountId,
        title: String,
        category: String,
        description: Option<String>,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            category,
            description,
            price,
            created_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Owning account.
    pub fn owner_id(&self) -> AccountId {
        self.owner_id
    }

    /// Title as stored.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Category as stored.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Description, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Price as stored.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("", "Martin", 1.0, ItemValidationError::EmptyTitle)]
    #[case("  ", "Martin", 1.0, ItemValidationError::EmptyTitle)]
    #[case("Clean Code", " ", 1.0, ItemValidationError::EmptyCategory)]
    #[case("Clean Code", "Martin", -0.01, ItemValidationError::NegativePrice)]
    #[case("Clean Code", "Martin", f64::NAN, ItemValidationError::NonFinitePrice)]
    #[case("Clean Code", "Martin", f64::INFINITY, ItemValidationError::NonFinitePrice)]
    fn invalid_drafts_are_rejected(
        #[case] title: &str,
        #[case] category: &str,
        #[case] price: f64,
        #[case] expected: ItemValidationError,
    ) {
        let err = ItemDraft::try_new(title, category, None, price).expect_err("draft is invalid");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(ItemValidationError::EmptyTitle, "title")]
    #[case(ItemValidationError::NegativePrice, "price")]
    #[case(ItemValidationError::EmptyCategory, "category")]
    fn errors_name_their_field(#[case] error: ItemValidationError, #[case] field: &str) {
        assert_eq!(error.field(), field);
    }

    #[rstest]
    fn zero_price_is_accepted() {
        let draft = ItemDraft::try_new("Free", "Anon", None, 0.0).expect("zero is allowed");
        assert_eq!(draft.price(), 0.0);
    }

    #[rstest]
    fn into_item_carries_owner_and_timestamp() {
        let owner = AccountId::new(7).expect("positive id");
        let created_at = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp");
        let draft = ItemDraft::try_new("Clean Code", "Martin", Some("classic".into()), 29.99)
            .expect("valid draft");

        let item = NewItem::new(owner, draft, created_at).into_item(ItemId::from_store(3));

        assert_eq!(item.id().get(), 3);
        assert_eq!(item.owner_id(), owner);
        assert_eq!(item.description(), Some("classic"));
        assert_eq!(item.created_at(), created_at);
    }
}
