//! Prometheus text exposition (version 0.0.4) writers.

use std::fmt::{self, Write};

use super::definition::MetricDefinition;
use super::histogram::HistogramSnapshot;
use super::labels::LabelSet;

/// Escape a label value: backslash, double quote and newline.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape HELP text: backslash and newline.
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Float formatting as Prometheus expects it (`+Inf`, `-Inf`, `NaN`).
pub(crate) fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

/// `k1="v1",k2="v2"` without braces.
fn label_pairs(def: &MetricDefinition, labels: &LabelSet) -> String {
    def.label_names()
        .iter()
        .zip(labels.values())
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn header(out: &mut String, def: &MetricDefinition) -> fmt::Result {
    writeln!(out, "# HELP {} {}", def.name(), escape_help(def.help()))?;
    writeln!(out, "# TYPE {} {}", def.name(), def.kind().as_str())
}

/// One `name{labels} value` line for a counter or gauge series.
pub(crate) fn scalar(
    out: &mut String,
    def: &MetricDefinition,
    labels: &LabelSet,
    value: f64,
) -> fmt::Result {
    if labels.is_empty() {
        writeln!(out, "{} {}", def.name(), fmt_value(value))
    } else {
        writeln!(
            out,
            "{}{{{}}} {}",
            def.name(),
            label_pairs(def, labels),
            fmt_value(value)
        )
    }
}

/// `_bucket` lines (plus `+Inf`), `_sum` and `_count` for one histogram series.
pub(crate) fn histogram(
    out: &mut String,
    def: &MetricDefinition,
    labels: &LabelSet,
    snap: &HistogramSnapshot,
) -> fmt::Result {
    let name = def.name();
    let pairs = label_pairs(def, labels);
    let prefix = if pairs.is_empty() {
        String::new()
    } else {
        format!("{pairs},")
    };

    for (le, count) in &snap.buckets {
        writeln!(out, "{name}_bucket{{{prefix}le=\"{}\"}} {count}", fmt_value(*le))?;
    }
    writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {}", snap.count)?;

    if pairs.is_empty() {
        writeln!(out, "{name}_sum {}", fmt_value(snap.sum))?;
        writeln!(out, "{name}_count {}", snap.count)
    } else {
        writeln!(out, "{name}_sum{{{pairs}}} {}", fmt_value(snap.sum))?;
        writeln!(out, "{name}_count{{{pairs}}} {}", snap.count)
    }
}
