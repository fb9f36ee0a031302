pub mod authenticate;
pub mod provision;

pub use authenticate::*;
pub use provision::*;
