mod merchant_handler;

pub use merchant_handler::*;
