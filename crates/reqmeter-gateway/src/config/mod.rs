//! Gateway config loader (strict parsing + env overrides).

pub mod schema;

use std::fs;

use reqmeter_core::error::{Result, ReqMeterError};

pub use schema::{GatewayConfig, LogFormat, LoggingSection, MetricsSection, ServerSection};

/// Env var naming an optional YAML config file.
pub const CONFIG_ENV: &str = "REQMETER_CONFIG";
/// Env var overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Load config from `REQMETER_CONFIG`, or defaults when unset.
///
/// `PORT` is applied separately (see [`apply_port_override`]) once logging is up,
/// so a rejected value can be reported.
pub fn load() -> Result<GatewayConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => load_from_file(&path),
        _ => Ok(GatewayConfig::default()),
    }
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ReqMeterError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| ReqMeterError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply a `PORT` value. Missing, non-numeric or zero values keep the current port.
///
/// Returns whether the port changed.
pub fn apply_port_override(cfg: &mut GatewayConfig, port: Option<&str>) -> bool {
    let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) else {
        return false;
    };
    match raw.parse::<u16>() {
        Ok(p) if p != 0 => {
            cfg.server.port = p;
            true
        }
        _ => {
            tracing::warn!(value = %raw, port = cfg.server.port, "ignoring invalid PORT");
            false
        }
    }
}
