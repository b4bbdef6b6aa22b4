// Route exports
pub mod calc;

use actix_web::web;

/// Register the routes that are always available, store or no store
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    calc::configure(cfg);
}

/// Register the routes that require a ready history store
pub fn configure_history_routes(cfg: &mut web::ServiceConfig) {
    calc::configure_history(cfg);
}
