pub mod error;
pub mod normalizer;
pub mod reputation;
pub mod series;
pub mod stats;
pub mod types;

pub use error::*;
pub use normalizer::*;
pub use reputation::*;
pub use series::*;
pub use types::*;
