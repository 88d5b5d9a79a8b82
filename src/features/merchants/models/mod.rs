mod merchant;

pub use merchant::{Merchant, MerchantStatus, MerchantWithOrganization, StandType};
