//! Moderation decisions on feed entries and the pipeline that records them.

pub mod actions;
pub mod models;

pub use actions::*;
pub use models::*;
