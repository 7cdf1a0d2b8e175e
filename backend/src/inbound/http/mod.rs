//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod accounts;
pub mod error;
pub mod health;
pub mod items;
pub mod responses;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;

/// Register every REST handler plus the extractor error handlers.
///
/// Expects [`state::HttpState`] and [`health::HealthState`] to be supplied as
/// `web::Data` by the caller.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registry::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(health::root)
        .service(health::check_health)
        .service(health::ready)
        .service(health::live)
        .service(accounts::register_account)
        .service(accounts::list_accounts)
        .service(accounts::get_account)
        .service(accounts::delete_account)
        .service(items::create_item)
        .service(items::list_items)
        .service(items::get_item)
        .service(items::delete_item);
}
