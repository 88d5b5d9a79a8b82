#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use crate::shared::constants::{ROLE_COORDINATOR, ROLE_INSPECTOR};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
#[allow(dead_code)]
pub fn create_inspector_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: uuid::Uuid::new_v4(),
        email: Some("inspector@sirecovip.test".to_string()),
        roles: vec![ROLE_INSPECTOR.to_string()],
    }
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_coordinator_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: uuid::Uuid::new_v4(),
        email: Some("coordinator@sirecovip.test".to_string()),
        roles: vec![ROLE_COORDINATOR.to_string()],
    }
}

#[cfg(test)]
#[allow(dead_code)]
async fn inject_inspector_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_inspector_user());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_inspector_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_inspector_middleware))
}
