/// Maximum number of merchants returned by the listing endpoint
pub const MERCHANT_LIST_LIMIT: i64 = 20;

/// Object key prefix for stall evidence photos
pub const EVIDENCE_KEY_PREFIX: &str = "puestos";

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Inspector role - registers and monitors merchants in an assigned zone
pub const ROLE_INSPECTOR: &str = "inspector";

/// Coordinator role - views aggregate metrics across all inspectors
pub const ROLE_COORDINATOR: &str = "coordinator";
