//! Operators: reviewers identified by an opaque API key.

pub mod actions;
pub mod models;

pub use actions::*;
pub use models::*;
