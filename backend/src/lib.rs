//! Alumni connect backend: opportunities, applications, and review decisions.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use doc::ApiDoc;
pub use middleware::Trace;
