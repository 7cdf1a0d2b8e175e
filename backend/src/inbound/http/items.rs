//! Item API handlers.
//!
//! ```text
//! POST /users/1/items {"title":"Clean Code","category":"Martin","price":29.99}
//! GET /items
//! GET /items/1
//! DELETE /items/1
//! ```

use actix_web::{delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Item, ItemDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    account_path_id, item_path_id, map_item_validation_error,
};

/// Item creation body for `POST /users/{id}/items`.
///
/// The owner always comes from the path; unknown fields such as `ownerId`
/// are ignored. `author` is accepted as an alias for `category`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemBody {
    /// Non-blank title.
    #[schema(example = "Clean Code")]
    pub title: String,
    /// Non-blank category.
    #[serde(alias = "author")]
    #[schema(example = "Martin")]
    pub category: String,
    /// Optional free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Finite, non-negative price.
    #[schema(example = 29.99)]
    pub price: f64,
}

impl TryFrom<CreateItemBody> for ItemDraft {
    type Error = Error;

    fn try_from(body: CreateItemBody) -> Result<Self, Self::Error> {
        let CreateItemBody {
            title,
            category,
            description,
            price,
        } = body;
        ItemDraft::try_new(title, category, description, price).map_err(map_item_validation_error)
    }
}

/// Item representation returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Owning account.
    #[schema(example = 1)]
    pub owner_id: i64,
    /// Item title.
    pub title: String,
    /// Item category.
    pub category: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Price.
    pub price: f64,
    /// Creation time, RFC 3339.
    pub created_at: DateTime<Utc>,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().get(),
            owner_id: item.owner_id().get(),
            title: item.title().to_owned(),
            category: item.category().to_owned(),
            description: item.description().map(str::to_owned),
            price: item.price(),
            created_at: item.created_at(),
        }
    }
}

/// Create an item owned by the account in the path.
#[utoipa::path(
    post,
    path = "/users/{id}/items",
    params(("id" = i64, Path, description = "Owning account id")),
    request_body = CreateItemBody,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 404, description = "Owner not found", body = ErrorSchema),
        (status = 422, description = "Invalid item", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/users/{id}/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CreateItemBody>,
) -> ApiResult<web::Json<ItemResponse>> {
    let owner_id = account_path_id(path.into_inner())?;
    let draft = ItemDraft::try_from(payload.into_inner())?;
    let item = state.items.create(owner_id, draft).await?;
    Ok(web::Json(ItemResponse::from(&item)))
}

/// List every item across all accounts.
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Items", body = [ItemResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/items")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let items = state.items_query.list().await?;
    Ok(web::Json(items.iter().map(ItemResponse::from).collect()))
}

/// Fetch one item.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ItemResponse>> {
    let id = item_path_id(path.into_inner())?;
    let item = state.items_query.get(id).await?;
    Ok(web::Json(ItemResponse::from(&item)))
}

/// Delete an item and echo a confirmation.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Item not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/items/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = item_path_id(path.into_inner())?;
    state.items.delete(id).await?;
    Ok(web::Json(MessageResponse::new("Item deleted successfully")))
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
