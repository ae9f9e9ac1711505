pub mod cdf;
pub mod complexity;
pub mod config;
pub mod context;
pub mod error;
pub mod helpers;
pub mod macros;
pub mod models;
pub mod search;

pub use complexity::{complexity, Estimator};
pub use config::{ModelConfig, SearchConfig};
pub use error::{Error, Result};
