pub mod error;
pub mod float;

pub use error::{KMeansError, Result};
pub use float::KMeansFloat;
