//! Test doubles shared by unit, HTTP, and behaviour tests.
//!
//! Compiled only with the `test-support` feature.

mod clock;
mod in_memory;

pub use clock::MutableClock;
pub use in_memory::{InMemoryStore, StoreFault};
