use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::organizations::handlers;
use crate::features::organizations::services::OrganizationService;

/// Create routes for the organizations feature
pub fn routes(service: Arc<OrganizationService>) -> Router {
    Router::new()
        .route("/api/organizations", get(handlers::list_organizations))
        .route("/api/organizations/{id}", get(handlers::get_organization))
        .with_state(service)
}
