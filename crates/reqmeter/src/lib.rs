//! Top-level facade crate for reqmeter.
//!
//! Re-exports the metric registry and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use reqmeter_core::*;
}

pub mod gateway {
    pub use reqmeter_gateway::*;
}
