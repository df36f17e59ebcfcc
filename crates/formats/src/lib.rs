pub mod error;
pub mod execution;
pub mod properties;
pub mod visualization;

pub use error::*;
pub use execution::*;
pub use properties::*;
pub use visualization::*;
