use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{ReqMeterError, Result};

use super::atomic::AtomicF64;
use super::family::Family;

/// Per-series histogram state. `buckets[i]` is cumulative: it counts every
/// observation `<= bounds[i]`.
///
/// Writers update sum, then count, then buckets from the largest bound down.
/// Readers load buckets from the smallest bound up, then count, then sum.
/// With acquire/release on every step a reader never sees a bucket exceed the
/// next one, nor the last bucket exceed count.
pub(crate) struct HistogramCell {
    buckets: Box<[AtomicU64]>,
    count: AtomicU64,
    sum: AtomicF64,
}

impl HistogramCell {
    fn new(len: usize) -> Self {
        Self {
            buckets: (0..len).map(|_| AtomicU64::new(0)).collect(),
            count: AtomicU64::new(0),
            sum: AtomicF64::default(),
        }
    }

    fn observe(&self, bounds: &[f64], value: f64) {
        self.sum.fetch_add(value);
        self.count.fetch_add(1, Ordering::AcqRel);
        for (bucket, bound) in self.buckets.iter().zip(bounds).rev() {
            if value > *bound {
                break;
            }
            bucket.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn snapshot(&self, bounds: &[f64]) -> HistogramSnapshot {
        let buckets = bounds
            .iter()
            .zip(self.buckets.iter())
            .map(|(b, c)| (*b, c.load(Ordering::Acquire)))
            .collect();
        let count = self.count.load(Ordering::Acquire);
        let sum = self.sum.load();
        HistogramSnapshot { buckets, count, sum }
    }
}

/// Point-in-time read of one histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound, cumulative count)` in bound order, without `+Inf`.
    pub buckets: Vec<(f64, u64)>,
    pub count: u64,
    pub sum: f64,
}

/// Handle to a registered histogram. Cheap to clone.
#[derive(Clone)]
pub struct Histogram {
    pub(crate) family: Arc<Family<HistogramCell>>,
    pub(crate) bounds: Arc<[f64]>,
}

impl Histogram {
    /// Record one observation for `labels`.
    pub fn observe(&self, labels: &[&str], value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(ReqMeterError::InvalidValue {
                metric: self.family.def.name().to_string(),
                value,
            });
        }
        let bounds = &self.bounds;
        self.family.with_cell(
            labels,
            || HistogramCell::new(bounds.len()),
            |cell| cell.observe(bounds, value),
        )
    }

    /// Read one series; `None` if it was never observed.
    pub fn snapshot(&self, labels: &[&str]) -> Result<Option<HistogramSnapshot>> {
        let bounds = &self.bounds;
        self.family.read(labels, |cell| cell.snapshot(bounds))
    }

    pub(crate) fn collect(&self) -> Vec<(super::LabelSet, HistogramSnapshot)> {
        let bounds = &self.bounds;
        self.family.collect(|cell| cell.snapshot(bounds))
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub fn name(&self) -> &str {
        self.family.def.name()
    }
}
