pub mod get_location;

pub use get_location::*;
