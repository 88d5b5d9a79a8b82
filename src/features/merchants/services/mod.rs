mod merchant_service;

pub use merchant_service::MerchantService;
