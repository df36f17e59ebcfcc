pub mod precision;
pub mod stats;

pub use precision::*;
pub use stats::*;
