use std::sync::Arc;

use crate::error::{ReqMeterError, Result};

use super::atomic::AtomicF64;
use super::family::Family;

/// Handle to a registered gauge. Cheap to clone.
///
/// Concurrent `set` calls are last-writer-wins.
#[derive(Clone)]
pub struct Gauge {
    pub(crate) family: Arc<Family<AtomicF64>>,
}

impl Gauge {
    /// Replace the value of the series for `labels`.
    pub fn set(&self, labels: &[&str], value: f64) -> Result<()> {
        self.check(value)?;
        self.family.with_cell(labels, AtomicF64::default, |cell| cell.store(value))
    }

    /// Add a signed delta to the series for `labels`.
    pub fn add(&self, labels: &[&str], delta: f64) -> Result<()> {
        self.check(delta)?;
        self.family.with_cell(labels, AtomicF64::default, |cell| {
            cell.fetch_add(delta);
        })
    }

    pub fn inc(&self, labels: &[&str]) -> Result<()> {
        self.add(labels, 1.0)
    }

    pub fn dec(&self, labels: &[&str]) -> Result<()> {
        self.add(labels, -1.0)
    }

    /// Current value of one series; `None` if it was never touched.
    pub fn get(&self, labels: &[&str]) -> Result<Option<f64>> {
        self.family.read(labels, AtomicF64::load)
    }

    pub fn name(&self) -> &str {
        self.family.def.name()
    }

    fn check(&self, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(ReqMeterError::InvalidValue {
                metric: self.family.def.name().to_string(),
                value,
            });
        }
        Ok(())
    }
}
