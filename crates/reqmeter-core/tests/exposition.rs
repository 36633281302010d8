//! Text exposition output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqmeter_core::Registry;

#[test]
fn empty_registry_renders_nothing() {
    assert_eq!(Registry::new().snapshot().unwrap(), "");
}

#[test]
fn unobserved_metric_renders_header_only() {
    let mut reg = Registry::new();
    reg.register_counter("idle_total", "Never touched", &["a"]).unwrap();
    assert_eq!(
        reg.snapshot().unwrap(),
        "# HELP idle_total Never touched\n# TYPE idle_total counter\n"
    );
}

#[test]
fn registration_order_and_sorted_series() {
    let mut reg = Registry::new();
    let z = reg.register_counter("z_total", "Zeds", &["route"]).unwrap();
    let g = reg.register_gauge("a_gauge", "Unlabeled gauge", &[]).unwrap();

    z.inc(&["/b"]).unwrap();
    z.increment(&["/a"], 2.0).unwrap();
    g.set(&[], 1.25).unwrap();

    let expected = "\
# HELP z_total Zeds
# TYPE z_total counter
z_total{route=\"/a\"} 2
z_total{route=\"/b\"} 1
# HELP a_gauge Unlabeled gauge
# TYPE a_gauge gauge
a_gauge 1.25
";
    assert_eq!(reg.snapshot().unwrap(), expected);
}

#[test]
fn histogram_lines() {
    let mut reg = Registry::new();
    let h = reg
        .register_histogram(
            "http_request_duration_seconds",
            "Duration of HTTP requests in seconds",
            &["method", "route"],
            &[0.005, 0.1, 1.0],
        )
        .unwrap();
    h.observe(&["GET", "/a"], 0.05).unwrap();
    h.observe(&["GET", "/a"], 2.0).unwrap();

    let expected = "\
# HELP http_request_duration_seconds Duration of HTTP requests in seconds
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_bucket{method=\"GET\",route=\"/a\",le=\"0.005\"} 0
http_request_duration_seconds_bucket{method=\"GET\",route=\"/a\",le=\"0.1\"} 1
http_request_duration_seconds_bucket{method=\"GET\",route=\"/a\",le=\"1\"} 1
http_request_duration_seconds_bucket{method=\"GET\",route=\"/a\",le=\"+Inf\"} 2
http_request_duration_seconds_sum{method=\"GET\",route=\"/a\"} 2.05
http_request_duration_seconds_count{method=\"GET\",route=\"/a\"} 2
";
    assert_eq!(reg.snapshot().unwrap(), expected);
}

#[test]
fn unlabeled_histogram_lines() {
    let mut reg = Registry::new();
    let h = reg.register_histogram("size", "Sizes", &[], &[10.0]).unwrap();
    h.observe(&[], 4.0).unwrap();

    let expected = "\
# HELP size Sizes
# TYPE size histogram
size_bucket{le=\"10\"} 1
size_bucket{le=\"+Inf\"} 1
size_sum 4
size_count 1
";
    assert_eq!(reg.snapshot().unwrap(), expected);
}

#[test]
fn escaping_and_special_values() {
    let mut reg = Registry::new();
    let g = reg
        .register_gauge("odd", "line one\nback\\slash", &["v"])
        .unwrap();
    g.set(&["say \"hi\"\\\n"], f64::INFINITY).unwrap();
    g.set(&["neg"], f64::NEG_INFINITY).unwrap();

    let text = reg.snapshot().unwrap();
    assert!(text.contains("# HELP odd line one\\nback\\\\slash\n"));
    assert!(text.contains("odd{v=\"say \\\"hi\\\"\\\\\\n\"} +Inf\n"));
    assert!(text.contains("odd{v=\"neg\"} -Inf\n"));
}
