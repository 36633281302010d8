use serde::Deserialize;
use reqmeter_core::error::{Result, ReqMeterError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ReqMeterError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }

    /// `host:port` the server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ReqMeterError::Config("server.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ReqMeterError::Config("server.port must not be 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Register request metrics and install the interceptor.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_metrics_path")]
    pub path: String,

    /// Upper bounds (seconds) of the request duration histogram.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,

    /// Route label for requests that matched no route.
    #[serde(default = "default_unmatched_route_label")]
    pub unmatched_route_label: String,

    #[serde(default = "default_true")]
    pub process_metrics: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_metrics_path(),
            duration_buckets: default_duration_buckets(),
            unmatched_route_label: default_unmatched_route_label(),
            process_metrics: true,
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(ReqMeterError::Config(
                "metrics.path must start with '/' and name a route".into(),
            ));
        }
        if self.path.ends_with('/') {
            return Err(ReqMeterError::Config("metrics.path must not end with '/'".into()));
        }
        // a literal route only: no empty segments, no `:param` or `*catch_all`
        for segment in self.path[1..].split('/') {
            if segment.is_empty() || segment.starts_with(':') || segment.starts_with('*') {
                return Err(ReqMeterError::Config(format!(
                    "metrics.path must be a literal route, got segment {segment:?}"
                )));
            }
        }
        if self.path == crate::router::HEALTH_PATH {
            return Err(ReqMeterError::Config(format!(
                "metrics.path must not shadow {}",
                crate::router::HEALTH_PATH
            )));
        }
        if self.duration_buckets.is_empty() {
            return Err(ReqMeterError::Config("metrics.duration_buckets must not be empty".into()));
        }
        if self.duration_buckets.iter().any(|b| !b.is_finite()) {
            return Err(ReqMeterError::Config("metrics.duration_buckets must be finite".into()));
        }
        if self.duration_buckets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ReqMeterError::Config(
                "metrics.duration_buckets must be strictly increasing".into(),
            ));
        }
        if self.unmatched_route_label.trim().is_empty() {
            return Err(ReqMeterError::Config(
                "metrics.unmatched_route_label must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    #[serde(default)]
    pub format: LogFormat,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_duration_buckets() -> Vec<f64> {
    vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
}
fn default_unmatched_route_label() -> String {
    "unmatched".into()
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "info".into()
}
