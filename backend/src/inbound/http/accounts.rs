//! Account API handlers.
//!
//! ```text
//! POST /users {"email":"a@x.com","password":"password123"}
//! GET /users
//! GET /users/1
//! DELETE /users/1
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegisterAccountRequest;
use crate::domain::{Account, EmailAddress, Error, RawCredential};
use crate::inbound::http::ApiResult;
use crate::inbound::http::items::ItemResponse;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    account_path_id, map_account_validation_error, map_credential_validation_error,
};

/// Registration body for `POST /users`.
///
/// Inbound only. Neither `Debug` nor `Serialize` is derived, so the password
/// cannot be logged or written back out:
///
/// ```compile_fail
/// use registry::inbound::http::accounts::RegisterAccountBody;
///
/// let body = RegisterAccountBody {
///     email: "a@x.com".into(),
///     password: "password123".into(),
/// };
/// let _ = serde_json::to_string(&body);
/// ```
#[derive(Deserialize, ToSchema)]
pub struct RegisterAccountBody {
    /// Login email.
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Raw secret, 8 to 64 characters and at most 72 bytes.
    #[schema(example = "password123", min_length = 8, max_length = 64)]
    pub password: String,
}

impl TryFrom<RegisterAccountBody> for RegisterAccountRequest {
    type Error = Error;

    fn try_from(body: RegisterAccountBody) -> Result<Self, Self::Error> {
        let RegisterAccountBody { email, password } = body;
        let email = EmailAddress::new(email).map_err(map_account_validation_error)?;
        let credential = RawCredential::new(password).map_err(map_credential_validation_error)?;
        Ok(Self { email, credential })
    }
}

/// Account representation returned to clients. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Login email.
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Always `true` for new accounts.
    pub is_active: bool,
    /// Owned items in id order.
    pub items: Vec<ItemResponse>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().get(),
            email: account.email().to_string(),
            is_active: account.is_active(),
            items: account.items().iter().map(ItemResponse::from).collect(),
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterAccountBody,
    responses(
        (status = 200, description = "Account registered", body = AccountResponse),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 422, description = "Invalid registration", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerAccount"
)]
#[post("/users")]
pub async fn register_account(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterAccountBody>,
) -> ApiResult<web::Json<AccountResponse>> {
    let request = RegisterAccountRequest::try_from(payload.into_inner())?;
    let account = state.accounts.register(request).await?;
    Ok(web::Json(AccountResponse::from(&account)))
}

/// List accounts with their items.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registry::inbound::http::accounts::list_accounts;
///
/// let app = App::new().service(list_accounts);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Accounts", body = [AccountResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listAccounts"
)]
#[get("/users")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AccountResponse>>> {
    let accounts = state.accounts_query.list().await?;
    Ok(web::Json(accounts.iter().map(AccountResponse::from).collect()))
}

/// Fetch one account with its items.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = AccountResponse),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getAccount"
)]
#[get("/users/{id}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<AccountResponse>> {
    let id = account_path_id(path.into_inner())?;
    let account = state.accounts_query.get(id).await?;
    Ok(web::Json(AccountResponse::from(&account)))
}

/// Delete an account together with every item it owns.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteAccount"
)]
#[delete("/users/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = account_path_id(path.into_inner())?;
    state.accounts.delete(id).await?;
    Ok(web::Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
