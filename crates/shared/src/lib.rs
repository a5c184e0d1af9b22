pub mod config;
pub mod error;
pub mod result;
pub mod series;

pub use error::{McError, Result};
