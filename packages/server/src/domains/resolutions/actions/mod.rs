pub mod maintenance;
pub mod queries;
pub mod record;
pub mod resolve;
pub mod update_entry;

pub use maintenance::*;
pub use queries::*;
pub use record::*;
pub use resolve::*;
pub use update_entry::*;
