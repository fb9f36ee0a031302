//! Kernel module - server infrastructure and dependencies.

pub mod cache;
pub mod deps;
pub mod feed_client;
pub mod store;
pub mod test_dependencies;
pub mod traits;
pub mod url_resolver;

pub use cache::TtlCache;
pub use deps::ServerDeps;
pub use feed_client::{FeedClient, DEFAULT_SNAPSHOT_TTL, SNAPSHOT_CACHE_KEY};
pub use store::PostgresStore;
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use url_resolver::HttpUrlResolver;
