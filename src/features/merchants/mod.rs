//! Merchant registration and lifecycle feature.
//!
//! Inspectors register street merchants with an optional stall evidence
//! photo; the photo is uploaded to the evidence bucket before the row is
//! written and its public URL is persisted on the merchant.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/merchants` | Register a merchant (JSON or multipart) |
//! | GET | `/api/merchants` | List the 20 most recent merchants |
//! | GET | `/api/merchants/statuses` | Shared status catalog (label + color) |
//! | GET | `/api/merchants/{id}` | Get a merchant by id |
//! | PUT | `/api/merchants/{id}` | Update a merchant |
//! | DELETE | `/api/merchants/{id}` | Delete a merchant |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::MerchantService;
