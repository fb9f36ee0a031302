pub mod geocoding;
pub mod hashing;

pub use geocoding::*;
pub use hashing::*;
