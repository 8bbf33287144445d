//! Common interface to the system-provided _service management facility_ to start, stop
//! or query the status of system services.
//!
//! The facility is driven through the command lines of the `[init]` table of
//! `fwcontrol.toml`, systemd being used by default.

mod error;
mod managers;
mod services;

pub use self::error::*;
pub use self::managers::*;
pub use self::services::*;
use camino::Utf8Path;
use fwcontrol_config::FwControlConfig;
use std::fmt::Debug;
use std::sync::Arc;

/// Abstraction over the system-provided facility that manages starting, stopping as well as other
/// service-related management functions of system services.
#[async_trait::async_trait]
pub trait SystemServiceManager: Debug + Send + Sync {
    /// Returns the name of the system service manager facility (e.g. "systemd" or "openrc").
    fn name(&self) -> &str;

    /// Checks whether the system service manager facility is available and operational.
    async fn check_operational(&self) -> Result<(), SystemServiceError>;

    /// Stops the specified system service. Requires elevated privileges.
    async fn stop_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError>;

    /// Starts the specified system service. Requires elevated privileges.
    async fn start_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError>;

    /// Queries status of the specified system service. "Running" here means the same as "active".
    ///
    /// Any unsuccessful exit of the query reads as "not running".
    async fn is_service_running(&self, service: SystemService<'_>)
        -> Result<bool, SystemServiceError>;
}

pub fn service_manager(
    config: &FwControlConfig,
    config_root: &Utf8Path,
) -> Arc<dyn SystemServiceManager> {
    Arc::new(GeneralServiceManager::new(config, config_root))
}
