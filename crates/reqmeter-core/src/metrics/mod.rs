//! In-process metric registry.
//!
//! Counters, gauges and histograms are registered up front on a `&mut Registry`
//! and then shared (typically as `Arc<Registry>`) with the request path.
//! Every series is a lock-free cell in a sharded map keyed by its `LabelSet`,
//! so recording never waits on rendering for longer than a shard read.

mod atomic;
mod counter;
mod definition;
mod family;
mod gauge;
mod histogram;
mod labels;
mod render;

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{ReqMeterError, Result};

pub use counter::Counter;
pub use definition::{MetricDefinition, MetricKind};
pub use gauge::Gauge;
pub use histogram::{Histogram, HistogramSnapshot};
pub use labels::LabelSet;

use definition::validate_buckets;
use family::Family;

/// Content type of `Registry::snapshot` output.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

enum Registered {
    Counter(Counter),
    Gauge(Gauge),
    Histogram(Histogram),
}

impl Registered {
    fn def(&self) -> &MetricDefinition {
        match self {
            Registered::Counter(c) => &c.family.def,
            Registered::Gauge(g) => &g.family.def,
            Registered::Histogram(h) => &h.family.def,
        }
    }
}

/// Series-name suffixes a histogram emits next to its base name.
const HISTOGRAM_SUFFIXES: [&str; 3] = ["_bucket", "_sum", "_count"];

/// Owns every registered metric, in registration order.
#[derive(Default)]
pub struct Registry {
    metrics: Vec<Registered>,
    /// Every series name the exposition emits, including histogram suffixes.
    names: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_counter(&mut self, name: &str, help: &str, label_names: &[&str]) -> Result<Counter> {
        self.ensure_unique(&[name.to_string()])?;
        let def = MetricDefinition::new(name, MetricKind::Counter, help, label_names)?;
        let counter = Counter {
            family: Arc::new(Family::new(def)),
        };
        self.push(vec![name.to_string()], Registered::Counter(counter.clone()));
        Ok(counter)
    }

    pub fn register_gauge(&mut self, name: &str, help: &str, label_names: &[&str]) -> Result<Gauge> {
        self.ensure_unique(&[name.to_string()])?;
        let def = MetricDefinition::new(name, MetricKind::Gauge, help, label_names)?;
        let gauge = Gauge {
            family: Arc::new(Family::new(def)),
        };
        self.push(vec![name.to_string()], Registered::Gauge(gauge.clone()));
        Ok(gauge)
    }

    pub fn register_histogram(
        &mut self,
        name: &str,
        help: &str,
        label_names: &[&str],
        buckets: &[f64],
    ) -> Result<Histogram> {
        let series: Vec<String> = std::iter::once(name.to_string())
            .chain(HISTOGRAM_SUFFIXES.iter().map(|s| format!("{name}{s}")))
            .collect();
        self.ensure_unique(&series)?;
        let def = MetricDefinition::new(name, MetricKind::Histogram, help, label_names)?;
        validate_buckets(name, buckets)?;
        let histogram = Histogram {
            family: Arc::new(Family::new(def)),
            bounds: Arc::from(buckets),
        };
        self.push(series, Registered::Histogram(histogram.clone()));
        Ok(histogram)
    }

    /// Render every metric in registration order, series sorted by label values.
    pub fn snapshot(&self) -> Result<String> {
        let mut out = String::new();
        for metric in &self.metrics {
            render_metric(&mut out, metric).map_err(|e| {
                ReqMeterError::SnapshotFailure(format!("{}: {e}", metric.def().name()))
            })?;
        }
        Ok(out)
    }

    /// Sum of every series of a counter; `None` if no counter has that name.
    pub fn total_of(&self, counter_name: &str) -> Option<f64> {
        self.metrics.iter().find_map(|m| match m {
            Registered::Counter(c) if c.name() == counter_name => Some(c.total()),
            _ => None,
        })
    }

    /// Registered definitions, in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.metrics.iter().map(Registered::def)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Fails if any of `series` is already emitted by a registered metric.
    fn ensure_unique(&self, series: &[String]) -> Result<()> {
        match series.iter().find(|s| self.names.contains(*s)) {
            Some(taken) => Err(ReqMeterError::DuplicateMetricName(taken.clone())),
            None => Ok(()),
        }
    }

    fn push(&mut self, series: Vec<String>, metric: Registered) {
        self.names.extend(series);
        self.metrics.push(metric);
    }
}

fn render_metric(out: &mut String, metric: &Registered) -> std::fmt::Result {
    let def = metric.def();
    render::header(out, def)?;
    match metric {
        Registered::Counter(Counter { family }) | Registered::Gauge(Gauge { family }) => {
            for (labels, value) in family.collect(|cell| cell.load()) {
                render::scalar(out, def, &labels, value)?;
            }
        }
        Registered::Histogram(h) => {
            for (labels, snap) in h.collect() {
                render::histogram(out, def, &labels, &snap)?;
            }
        }
    }
    Ok(())
}
