//! HTTP inbound adapter exposing the REST endpoints.

pub mod applications;
pub mod error;
pub mod health;
pub mod opportunities;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
mod validation;

pub use error::ApiResult;
