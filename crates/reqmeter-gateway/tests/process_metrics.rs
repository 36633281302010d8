//! Process gauges: `/proc/self` parsing and refresh on scrape.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use reqmeter_core::Registry;
use reqmeter_gateway::app_state::AppState;
use reqmeter_gateway::config::GatewayConfig;
use reqmeter_gateway::obs::process::{
    parse_max_open_files, parse_status, ProcessMetrics, ProcessSample,
};
use reqmeter_gateway::router;

const STATUS: &str = "Name:\treqmeter\nState:\tS (sleeping)\nVmSize:\t  123456 kB\nVmRSS:\t    2048 kB\nThreads:\t7\n";

const LIMITS: &str = "\
Limit                     Soft Limit           Hard Limit           Units
Max cpu time              unlimited            unlimited            seconds
Max open files            1024                 524288               files
";

async fn scrape(cfg: GatewayConfig) -> String {
    let state = AppState::new(cfg).unwrap();
    let app = router::build_router(state);
    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap()
}

fn sample_value(text: &str, name: &str) -> Option<f64> {
    let prefix = format!("{name} ");
    text.lines()
        .find(|l| l.starts_with(&prefix))
        .and_then(|l| l[prefix.len()..].trim().parse().ok())
}

#[test]
fn parses_status_in_bytes() {
    let s = parse_status(STATUS);
    assert_eq!(s.resident_memory_bytes, Some(2048.0 * 1024.0));
    assert_eq!(s.virtual_memory_bytes, Some(123456.0 * 1024.0));
    assert_eq!(s.threads, Some(7.0));
    assert_eq!(s.open_fds, None);
}

#[test]
fn parses_soft_fd_limit() {
    assert_eq!(parse_max_open_files(LIMITS), Some(1024.0));
    let unlimited = LIMITS.replace("1024                ", "unlimited           ");
    assert_eq!(parse_max_open_files(&unlimited), None);
    assert_eq!(parse_max_open_files("garbage"), None);
}

#[test]
fn apply_sets_only_known_values() {
    let mut registry = Registry::new();
    let process = ProcessMetrics::register(&mut registry).unwrap();
    process.apply(&ProcessSample {
        open_fds: Some(12.0),
        threads: Some(3.0),
        ..ProcessSample::default()
    });

    let text = registry.snapshot().unwrap();
    assert_eq!(sample_value(&text, "process_open_fds"), Some(12.0));
    assert_eq!(sample_value(&text, "process_threads"), Some(3.0));
    assert_eq!(sample_value(&text, "process_max_fds"), None);
    assert!(text.contains("# TYPE process_max_fds gauge\n"));
    assert!(sample_value(&text, "process_start_time_seconds").unwrap() > 0.0);
}

#[tokio::test]
async fn scrape_exports_process_series() {
    let text = scrape(GatewayConfig::default()).await;
    for name in [
        "process_start_time_seconds",
        "process_resident_memory_bytes",
        "process_virtual_memory_bytes",
        "process_open_fds",
        "process_max_fds",
        "process_threads",
    ] {
        assert!(text.contains(&format!("# TYPE {name} gauge\n")), "missing {name}");
    }

    if cfg!(target_os = "linux") {
        assert!(sample_value(&text, "process_resident_memory_bytes").unwrap() > 0.0);
        assert!(sample_value(&text, "process_virtual_memory_bytes").unwrap() > 0.0);
        assert!(sample_value(&text, "process_open_fds").unwrap() >= 1.0);
        assert!(sample_value(&text, "process_threads").unwrap() >= 1.0);
    }
}

#[tokio::test]
async fn process_series_can_be_disabled() {
    let mut cfg = GatewayConfig::default();
    cfg.metrics.process_metrics = false;
    let text = scrape(cfg).await;
    assert!(!text.contains("process_"));
    assert!(text.contains("http_requests_total"));
}
