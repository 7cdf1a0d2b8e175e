//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors own the rules; these helpers turn their rejections into
//! [`Error`] payloads that name the offending request field.

use serde_json::json;

use crate::domain::{
    ACCOUNT_NOT_FOUND, AccountId, AccountValidationError, CredentialError, Error, ITEM_NOT_FOUND,
    ItemId, ItemValidationError,
};

/// Machine-readable reason attached to field validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    EmptyField,
    TooShort,
    TooLong,
    OutOfRange,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::validation(message).with_context(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn map_account_validation_error(err: AccountValidationError) -> Error {
    match err {
        AccountValidationError::EmptyEmail => field_error(
            FieldName::new("email"),
            ValidationCode::EmptyField,
            err.to_string(),
        ),
        AccountValidationError::InvalidId => Error::not_found(ACCOUNT_NOT_FOUND),
    }
}

pub(crate) fn map_credential_validation_error(err: CredentialError) -> Error {
    let field = FieldName::new("password");
    match err {
        CredentialError::TooShort { .. } => field_error(field, ValidationCode::TooShort, err.to_string()),
        CredentialError::TooLong { .. } | CredentialError::TooManyBytes { .. } => {
            field_error(field, ValidationCode::TooLong, err.to_string())
        }
        other => Error::internal(other.to_string()),
    }
}

pub(crate) fn map_item_validation_error(err: ItemValidationError) -> Error {
    let field = FieldName::new(err.field());
    match err {
        ItemValidationError::EmptyTitle | ItemValidationError::EmptyCategory => {
            field_error(field, ValidationCode::EmptyField, err.to_string())
        }
        ItemValidationError::NonFinitePrice | ItemValidationError::NegativePrice => {
            field_error(field, ValidationCode::OutOfRange, err.to_string())
        }
        ItemValidationError::InvalidId => Error::not_found(ITEM_NOT_FOUND),
    }
}

/// Resolve an account path segment. Ids below 1 can never exist.
pub(crate) fn account_path_id(raw: i64) -> Result<AccountId, Error> {
    AccountId::new(raw).map_err(map_account_validation_error)
}

/// Resolve an item path segment. Ids below 1 can never exist.
pub(crate) fn item_path_id(raw: i64) -> Result<ItemId, Error> {
    ItemId::new(raw).map_err(map_item_validation_error)
}
