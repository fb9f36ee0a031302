pub mod candidate;
pub mod coordinates;

pub use candidate::*;
pub use coordinates::*;
