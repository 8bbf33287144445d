mod error;
mod http_server;
#[cfg(test)]
mod test_helpers;
mod toggle;

pub use crate::error::ToggleError;
pub use crate::toggle::*;
use crate::http_server::http_server;
use crate::http_server::AppState;
use anyhow::Context;
use axum_server::Handle;
use fwcontrol_config::cli::CommonArgs;
use fwcontrol_config::log_init;
use fwcontrol_config::FwControlConfig;
use fwcontrol_config::HttpConfig;
use std::net::IpAddr;
use std::net::TcpListener;
use std::time::Duration;
use system_services::service_manager;
use tracing::info;
use tracing::warn;

const PROGRAM_NAME: &str = "fwcontrol";
const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, clap::Parser)]
#[clap(
    name = clap::crate_name!(),
    version = clap::crate_version!(),
    about = clap::crate_description!()
)]
pub struct FwControlOpt {
    #[command(flatten)]
    pub common: CommonArgs,

    /// IP address the HTTP server listens on
    ///
    /// Overrides `http.bind_address` of the config file
    #[clap(long = "http-bind")]
    pub http_bind: Option<IpAddr>,

    /// Port the HTTP server listens on
    ///
    /// Overrides `http.port` of the config file
    #[clap(long = "http-port")]
    pub http_port: Option<u16>,
}

impl FwControlOpt {
    fn http_config(&self, mut config: HttpConfig) -> HttpConfig {
        if let Some(ip_address) = self.http_bind {
            config = config.with_ip_address(ip_address);
        }
        if let Some(port) = self.http_port {
            config = config.with_port(port);
        }
        config
    }
}

pub async fn run(opt: FwControlOpt) -> anyhow::Result<()> {
    let config_dir = &opt.common.config_dir;
    if let Err(err) = log_init(PROGRAM_NAME, &opt.common.log_args, config_dir) {
        eprintln!("Can't enable logging due to error: {err}");
        return Err(err.into());
    }

    let config = FwControlConfig::try_new(config_dir)?;
    let http_config = opt.http_config(config.http.clone());

    let manager = service_manager(&config, config_dir);
    if let Err(err) = manager.check_operational().await {
        warn!("{err}");
    }

    let toggle = ServiceToggle::new(manager);
    let state = AppState::new(toggle, &http_config.default_service);

    let address = http_config.socket_addr();
    info!("Launching on {address} with HTTP");
    let listener =
        TcpListener::bind(address).with_context(|| format!("binding to {address}"))?;
    listener.set_nonblocking(true)?;

    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    http_server(listener, state, handle)
        .await
        .context("HTTP server failed")?;
    info!("{PROGRAM_NAME} stopped");
    Ok(())
}

async fn shutdown_on_signal(handle: Handle) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = terminate_signal() => {},
    }
    info!("Shutting down");
    handle.graceful_shutdown(Some(GRACEFUL_SHUTDOWN_TIMEOUT));
}

#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::signal;
    use tokio::signal::unix::SignalKind;

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            warn!("Failed to listen for SIGTERM: {err}");
            std::future::pending::<()>().await
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await
}
