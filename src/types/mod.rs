//! OAuth2 Types
//!
//! Configuration, parameter and token type definitions.

pub mod config;
pub mod params;
pub mod token;

pub use config::*;
pub use params::*;
pub use token::*;
