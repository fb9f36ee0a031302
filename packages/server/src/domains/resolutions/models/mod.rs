pub mod resolve_body;
pub mod resolved_location;

pub use resolve_body::*;
pub use resolved_location::*;
