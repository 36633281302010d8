//! reqmeter gateway library entry.
//!
//! Wires config, logging, the metric registry, the request metrics
//! interceptor and the operational endpoints into an axum router. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod middleware;
pub mod obs;
pub mod ops;
pub mod router;
