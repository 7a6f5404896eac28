pub mod math;
pub mod sort;

pub use math::*;
pub use sort::*;
