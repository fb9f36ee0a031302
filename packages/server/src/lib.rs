// Disaster Relief Location Review - Core
//
// Backend for volunteers reviewing crowd-sourced location reports. Reports are
// pulled from a third-party feed, reconciled against already-resolved entries,
// and handed out one at a time; operators submit verified corrections back.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
