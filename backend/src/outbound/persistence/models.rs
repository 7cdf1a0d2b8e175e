//! Internal Diesel row structs.
//!
//! These types are implementation details of the persistence layer and never
//! leave it; repositories convert them to domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Account, AccountId, CredentialHash, EmailAddress, Item, ItemId, NewAccount, NewItem,
};

use super::schema::{accounts, items};

/// Row read from the `accounts` table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i64,
    pub email: String,
    pub credential_hash: String,
    pub is_active: bool,
}

/// Insertable account. `id` and `is_active` use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub email: &'a str,
    pub credential_hash: &'a str,
}

impl<'a> From<&'a NewAccount> for NewAccountRow<'a> {
    fn from(account: &'a NewAccount) -> Self {
        Self {
            email: account.email().as_ref(),
            credential_hash: account.credential_hash().as_str(),
        }
    }
}

/// Row read from the `items` table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = items)]
#[diesel(belongs_to(AccountRow, foreign_key = owner_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Insertable item built field by field from a validated [`NewItem`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub owner_id: i64,
    pub title: &'a str,
    pub category: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewItem> for NewItemRow<'a> {
    fn from(item: &'a NewItem) -> Self {
        let draft = item.draft();
        Self {
            owner_id: item.owner_id().get(),
            title: draft.title(),
            category: draft.category(),
            description: draft.description(),
            price: draft.price(),
            created_at: item.created_at(),
        }
    }
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item::from_parts(
            ItemId::from_store(row.id),
            AccountId::from_store(row.owner_id),
            row.title,
            row.category,
            row.description,
            row.price,
            row.created_at,
        )
    }
}

/// Build a domain account from its row and already-loaded item rows.
///
/// Rows that violate domain invariants surface as `Err` with a description;
/// the store constraints make this unreachable in practice.
pub(crate) fn account_from_rows(row: AccountRow, item_rows: Vec<ItemRow>) -> Result<Account, String> {
    let email = EmailAddress::new(&row.email)
        .map_err(|err| format!("account {} has invalid email: {err}", row.id))?;
    let items = item_rows.into_iter().map(Item::from).collect();
    Ok(Account::new(
        AccountId::from_store(row.id),
        email,
        CredentialHash::from_stored(row.credential_hash),
        row.is_active,
        Vec::new(),
    )
    .with_items(items))
}
