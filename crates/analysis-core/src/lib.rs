pub mod config;
pub mod error;
pub mod series;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
