//! Observability: the HTTP and process metric sets, and logging setup.

pub mod logging;
pub mod metrics;
pub mod process;
