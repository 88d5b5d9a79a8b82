use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::features::merchants::dtos::MAX_UPLOAD_SIZE;
use crate::features::merchants::handlers;
use crate::features::merchants::services::MerchantService;

/// Create routes for the merchants feature
pub fn routes(service: Arc<MerchantService>) -> Router {
    Router::new()
        .route(
            "/api/merchants",
            get(handlers::list_merchants).post(handlers::create_merchant),
        )
        // catalog route must come before {id}
        .route("/api/merchants/statuses", get(handlers::list_statuses))
        .route(
            "/api/merchants/{id}",
            get(handlers::get_merchant)
                .put(handlers::update_merchant)
                .delete(handlers::delete_merchant),
        )
        // Allow body size up to MAX_UPLOAD_SIZE + buffer for multipart overhead
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024))
        .with_state(service)
}
