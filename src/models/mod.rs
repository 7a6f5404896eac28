pub mod basket;
pub mod price_point;
pub mod feature_request;

pub use basket::*;
pub use price_point::*;
pub use feature_request::*;
