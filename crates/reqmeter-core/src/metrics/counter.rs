use std::sync::Arc;

use crate::error::{ReqMeterError, Result};

use super::atomic::AtomicF64;
use super::family::Family;

/// Handle to a registered counter. Cheap to clone.
#[derive(Clone)]
pub struct Counter {
    pub(crate) family: Arc<Family<AtomicF64>>,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self, labels: &[&str]) -> Result<()> {
        self.increment(labels, 1.0)
    }

    /// Add `delta` to the series for `labels`. `delta` must be finite and >= 0.
    pub fn increment(&self, labels: &[&str], delta: f64) -> Result<()> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(ReqMeterError::InvalidDelta {
                metric: self.family.def.name().to_string(),
                delta,
            });
        }
        self.family.with_cell(labels, AtomicF64::default, |cell| {
            cell.fetch_add(delta);
        })
    }

    /// Current value of one series; `None` if it was never touched.
    pub fn get(&self, labels: &[&str]) -> Result<Option<f64>> {
        self.family.read(labels, AtomicF64::load)
    }

    /// Sum across every series.
    pub fn total(&self) -> f64 {
        self.family.cells.iter().map(|r| r.value().load()).sum()
    }

    pub fn name(&self) -> &str {
        self.family.def.name()
    }
}
