//! Builders
//!
//! Fluent builder for the module configuration.

pub mod config;

pub use config::{module_config, ModuleConfigBuilder};
