pub mod auth;
pub mod dashboard;
pub mod merchants;
pub mod organizations;
pub mod users;
