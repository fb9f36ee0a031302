// HTTP routes
pub mod admin;
pub mod health;
pub mod locations;
pub mod resolve;

pub use admin::*;
pub use health::*;
pub use locations::*;
pub use resolve::*;
