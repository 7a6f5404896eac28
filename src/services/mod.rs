pub mod price_store;
pub mod price_change_calculator;
pub mod price_update_job;
pub mod basket_service;
pub mod feature_service;

pub use price_store::*;
pub use price_change_calculator::*;
pub use price_update_job::*;
pub use basket_service::*;
pub use feature_service::*;
