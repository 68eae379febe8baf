//! Runtime for coincidence processing.

pub mod config;
pub mod executor;

pub use config::{ConfigError, RuntimeConfig};
pub use executor::{Runtime, RuntimeError, TofJob};
