//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler under [`crate::inbound::http`]
//! together with the request and response bodies and the error envelope
//! ([`ErrorSchema`], [`ErrorCodeSchema`]).
//!
//! The generated document backs Swagger UI in debug builds and is exported
//! via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::accounts::{AccountResponse, RegisterAccountBody};
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::items::{CreateItemBody, ItemResponse};
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account and item registry API",
        description = "Register accounts and manage the items they own."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::check_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::accounts::register_account,
        crate::inbound::http::accounts::list_accounts,
        crate::inbound::http::accounts::get_account,
        crate::inbound::http::accounts::delete_account,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::delete_item,
    ),
    components(schemas(
        RegisterAccountBody,
        AccountResponse,
        CreateItemBody,
        ItemResponse,
        MessageResponse,
        HealthResponse,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "users", description = "Account registration and lookup"),
        (name = "items", description = "Items owned by accounts"),
        (name = "health", description = "Service banner, store health, and probes")
    )
)]
pub struct ApiDoc;
