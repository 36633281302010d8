#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqmeter_gateway::config::{self, GatewayConfig, LogFormat};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  port: 8080
metrics:
  pth: "/stats" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.metrics.path, "/metrics");
    assert_eq!(cfg.metrics.unmatched_route_label, "unmatched");
    assert!(cfg.metrics.enabled);
    assert!(cfg.metrics.process_metrics);
    assert_eq!(cfg.logging.format, LogFormat::Pretty);
    assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  host: "127.0.0.1"
  port: 9100
metrics:
  path: "/stats"
  duration_buckets: [0.1, 0.5, 2]
  unmatched_route_label: "other"
  process_metrics: false
logging:
  format: json
  filter: "debug"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.listen_addr(), "127.0.0.1:9100");
    assert_eq!(cfg.metrics.path, "/stats");
    assert_eq!(cfg.metrics.duration_buckets, vec![0.1, 0.5, 2.0]);
    assert_eq!(cfg.logging.format, LogFormat::Json);
    assert!(!cfg.metrics.process_metrics);
}

#[test]
fn rejects_bad_values() {
    let cases = [
        "version: 2\n",
        "version: 1\nmetrics: { path: \"metrics\" }\n",
        "version: 1\nmetrics: { path: \"/test\" }\n",
        "version: 1\nmetrics: { path: \"/*anything\" }\n",
        "version: 1\nmetrics: { path: \"/*rest/x\" }\n",
        "version: 1\nmetrics: { path: \"/:\" }\n",
        "version: 1\nmetrics: { path: \"/ops/:name\" }\n",
        "version: 1\nmetrics: { path: \"/ops//metrics\" }\n",
        "version: 1\nmetrics: { path: \"/metrics/\" }\n",
        "version: 1\nmetrics: { duration_buckets: [] }\n",
        "version: 1\nmetrics: { duration_buckets: [1, 0.5] }\n",
        "version: 1\nmetrics: { unmatched_route_label: \" \" }\n",
        "version: 1\nserver: { port: 0 }\n",
        "version: 1\nlogging: { format: xml }\n",
    ];
    for c in cases {
        let err = config::load_from_str(c).expect_err(c);
        assert_eq!(err.kind().as_str(), "CONFIG", "case={c}");
    }
}

#[test]
fn port_override() {
    let mut cfg = GatewayConfig::default();

    assert!(!config::apply_port_override(&mut cfg, None));
    assert!(!config::apply_port_override(&mut cfg, Some("")));
    assert!(!config::apply_port_override(&mut cfg, Some("not-a-port")));
    assert!(!config::apply_port_override(&mut cfg, Some("70000")));
    assert!(!config::apply_port_override(&mut cfg, Some("0")));
    assert_eq!(cfg.server.port, 3000);

    assert!(config::apply_port_override(&mut cfg, Some(" 8081 ")));
    assert_eq!(cfg.server.port, 8081);
}

#[test]
fn missing_file_is_an_error() {
    let err = config::load_from_file("/nonexistent/reqmeter.yaml").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn nested_literal_metrics_path_builds_router() {
    let cfg = config::load_from_str("version: 1\nmetrics: { path: \"/ops/metrics\" }\n")
        .expect("must parse");
    let state = reqmeter_gateway::app_state::AppState::new(cfg).expect("state");
    let _router = reqmeter_gateway::router::build_router(state);
}
