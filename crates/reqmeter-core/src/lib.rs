//! reqmeter core: the in-process metric registry and the shared error type.
//!
//! This crate owns counters, gauges and histograms keyed by label sets and
//! renders them in the Prometheus text exposition format. It carries no HTTP
//! or runtime dependencies so the registry can be driven from any server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Bad label arity or values surface as `ReqMeterError` so a metrics bug
//! never takes down the process that records them.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Error surface shared with the gateway.
pub use error::{ErrorKind, ReqMeterError, Result};
pub use metrics::{
    Counter, Gauge, Histogram, HistogramSnapshot, LabelSet, MetricDefinition, MetricKind,
    Registry, TEXT_CONTENT_TYPE,
};
