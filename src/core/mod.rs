//! OAuth2 Core Components
//!
//! Credential encoding, parameter assembly, request encoding and HTTP transport.

pub mod credentials;
pub mod grant_params;
pub mod request_options;
pub mod transport;

pub use credentials::*;
pub use grant_params::*;
pub use request_options::*;
pub use transport::*;
