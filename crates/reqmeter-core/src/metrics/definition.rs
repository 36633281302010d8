use std::collections::HashSet;

use crate::error::{ReqMeterError, Result};

/// Instrument type of a registered metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    /// Name used on the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Immutable description of a metric, fixed at registration.
#[derive(Debug, Clone)]
pub struct MetricDefinition {
    name: String,
    kind: MetricKind,
    help: String,
    label_names: Box<[String]>,
}

impl MetricDefinition {
    pub(crate) fn new(name: &str, kind: MetricKind, help: &str, label_names: &[&str]) -> Result<Self> {
        if !valid_metric_name(name) {
            return Err(ReqMeterError::InvalidDefinition(format!(
                "invalid metric name: {name:?}"
            )));
        }

        let mut seen = HashSet::new();
        for label in label_names {
            if !valid_label_name(label) {
                return Err(ReqMeterError::InvalidDefinition(format!(
                    "{name}: invalid label name {label:?}"
                )));
            }
            if kind == MetricKind::Histogram && *label == "le" {
                return Err(ReqMeterError::InvalidDefinition(format!(
                    "{name}: label \"le\" is reserved for histogram buckets"
                )));
            }
            if !seen.insert(*label) {
                return Err(ReqMeterError::InvalidDefinition(format!(
                    "{name}: duplicate label name {label:?}"
                )));
            }
        }

        Ok(Self {
            name: name.to_string(),
            kind,
            help: help.to_string(),
            label_names: label_names.iter().map(|l| (*l).to_string()).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    pub(crate) fn check_arity(&self, values: &[&str]) -> Result<()> {
        if values.len() != self.label_names.len() {
            return Err(ReqMeterError::LabelArityMismatch {
                metric: self.name.clone(),
                expected: self.label_names.len(),
                got: values.len(),
            });
        }
        Ok(())
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, and not the reserved `__` prefix.
fn valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    !name.starts_with("__") && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Histogram boundaries must be non-empty, finite and strictly increasing.
pub(crate) fn validate_buckets(name: &str, buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(ReqMeterError::InvalidDefinition(format!(
            "{name}: histogram needs at least one bucket"
        )));
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(ReqMeterError::InvalidDefinition(format!(
            "{name}: bucket boundaries must be finite (+Inf is implicit)"
        )));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ReqMeterError::InvalidDefinition(format!(
            "{name}: bucket boundaries must be strictly increasing"
        )));
    }
    Ok(())
}
