//! HTTP request metrics registered on the shared [`Registry`].
//!
//! Labels come from a fixed vocabulary: the HTTP method (unknown verbs fold
//! into `OTHER`), the matched route template (or the configured unmatched
//! label) and the status code. Nothing request-supplied beyond that is ever
//! used as a label value.

use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use reqmeter_core::error::Result;
use reqmeter_core::{Counter, Gauge, Histogram, Registry};

use crate::config::MetricsSection;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const REQUESTS_IN_FLIGHT: &str = "http_requests_in_flight";

/// Status label for requests dropped before the handler finished.
pub const STATUS_ABORTED: &str = "aborted";

/// Label values for one request; arity is fixed by construction.
#[derive(Debug, Clone, Copy)]
pub struct HttpLabels<'a> {
    pub method: &'a str,
    pub route: &'a str,
    pub status_code: &'a str,
}

impl HttpLabels<'_> {
    pub const NAMES: [&'static str; 3] = ["method", "route", "status_code"];

    fn values(&self) -> [&str; 3] {
        [self.method, self.route, self.status_code]
    }
}

/// Map a method onto the bounded label vocabulary.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::HEAD => "HEAD",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::CONNECT => "CONNECT",
        Method::OPTIONS => "OPTIONS",
        Method::TRACE => "TRACE",
        Method::PATCH => "PATCH",
        _ => "OTHER",
    }
}

/// Handles to the request metrics. Cheap to clone.
#[derive(Clone)]
pub struct HttpMetrics {
    requests: Counter,
    duration: Histogram,
    in_flight: Gauge,
    unmatched_route: Arc<str>,
}

impl HttpMetrics {
    /// Register the request metrics. Fails on a name clash.
    pub fn register(registry: &mut Registry, cfg: &MetricsSection) -> Result<Self> {
        let requests = registry.register_counter(
            REQUESTS_TOTAL,
            "Total number of HTTP requests",
            &HttpLabels::NAMES,
        )?;
        let duration = registry.register_histogram(
            REQUEST_DURATION_SECONDS,
            "Duration of HTTP requests in seconds",
            &HttpLabels::NAMES,
            &cfg.duration_buckets,
        )?;
        let in_flight = registry.register_gauge(
            REQUESTS_IN_FLIGHT,
            "Number of HTTP requests currently being served",
            &[],
        )?;
        in_flight.set(&[], 0.0)?;

        Ok(Self {
            requests,
            duration,
            in_flight,
            unmatched_route: Arc::from(cfg.unmatched_route_label.as_str()),
        })
    }

    /// Route label used when no route template matched.
    pub fn unmatched_route(&self) -> &str {
        &self.unmatched_route
    }

    pub fn request_started(&self) -> Result<()> {
        self.in_flight.inc(&[])
    }

    /// Record one finished request: duration observation, counter, in-flight.
    ///
    /// All three are attempted even if one fails; the first error is returned.
    pub fn request_finished(&self, labels: &HttpLabels<'_>, elapsed: Duration) -> Result<()> {
        let values = labels.values();
        let observed = self.duration.observe(&values, elapsed.as_secs_f64());
        let counted = self.requests.inc(&values);
        let left = self.in_flight.dec(&[]);
        observed.and(counted).and(left)
    }

    pub fn requests(&self) -> &Counter {
        &self.requests
    }

    pub fn duration(&self) -> &Histogram {
        &self.duration
    }

    pub fn in_flight(&self) -> &Gauge {
        &self.in_flight
    }
}
