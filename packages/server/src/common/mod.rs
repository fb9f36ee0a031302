// Common types and utilities shared across the application

pub mod errors;
pub mod utils;

pub use errors::*;
