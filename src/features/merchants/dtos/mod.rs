mod merchant_dto;

pub use merchant_dto::*;
