//! reqmeter gateway
//!
//! - `GET /test`    : liveness
//! - `GET /metrics` : Prometheus exposition of request metrics
//! - `PORT` selects the listen port (default 3000)

use std::process::ExitCode;

use reqmeter_core::error::{Result, ReqMeterError};
use reqmeter_gateway::{app_state, config, obs, router};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // logging may not be up yet when config loading fails
            tracing::error!(error.kind = e.kind().as_str(), error = %e, "reqmeter-gateway failed");
            eprintln!("reqmeter-gateway: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let mut cfg = config::load()?;
    let _log_guard = obs::logging::init(&cfg.logging)?;
    config::apply_port_override(&mut cfg, std::env::var(config::PORT_ENV).ok().as_deref());

    let listen = cfg.listen_addr();
    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| ReqMeterError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "reqmeter-gateway starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ReqMeterError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
