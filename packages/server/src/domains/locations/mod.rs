//! Feed locations: retrieval, reconciliation, filtering and selection.

pub mod actions;
pub mod filters;
pub mod models;
pub mod reconcile;
pub mod selector;

pub use actions::*;
pub use filters::*;
pub use models::*;
pub use reconcile::*;
pub use selector::*;
