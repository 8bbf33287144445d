//! Starting and stopping a service on request, and reporting its resulting status.
//!
//! The current status is queried first, so a start request on a running service
//! (or a stop request on a stopped one) issues no command at all.
//! Whatever happens, the caller gets a [`ServiceActionResult`].

use crate::error::ToggleError;
use serde::Serialize;
use std::sync::Arc;
use system_services::SystemService;
use system_services::SystemServiceManager;
use tracing::error;
use tracing::info;
use tracing::warn;

/// An action a user can request on a service
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceAction {
    Start,
    Stop,
}

/// Best known status of a service after a request has been processed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Inactive,
}

impl ServiceStatus {
    fn from_active(active: bool) -> Self {
        if active {
            ServiceStatus::Running
        } else {
            ServiceStatus::Inactive
        }
    }

    /// Font Awesome icon displayed next to the message
    pub fn icon(self) -> &'static str {
        match self {
            ServiceStatus::Running => "fa-check-circle",
            ServiceStatus::Inactive => "fa-times-circle",
        }
    }

    /// CSS class coloring the icon
    pub fn icon_color(self) -> &'static str {
        match self {
            ServiceStatus::Running => "icon-green",
            ServiceStatus::Inactive => "icon-red",
        }
    }
}

/// What happened while processing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome {
    AlreadyRunning,
    Started,
    StartFailed,
    AlreadyStopped,
    Stopped,
    StopFailed,
    /// The requested action is neither `start` nor `stop`; nothing has been done.
    Unsupported {
        action: String,
        status: ServiceStatus,
    },
    /// The service manager could not be used at all.
    Failed {
        reason: String,
    },
}

impl ServiceOutcome {
    pub fn status(&self) -> ServiceStatus {
        match self {
            ServiceOutcome::AlreadyRunning
            | ServiceOutcome::Started
            | ServiceOutcome::StopFailed => ServiceStatus::Running,
            ServiceOutcome::AlreadyStopped
            | ServiceOutcome::Stopped
            | ServiceOutcome::StartFailed
            | ServiceOutcome::Failed { .. } => ServiceStatus::Inactive,
            ServiceOutcome::Unsupported { status, .. } => *status,
        }
    }

    fn message(&self, service: SystemService<'_>) -> String {
        match self {
            ServiceOutcome::AlreadyRunning => format!("{service} 服务已经启动"),
            ServiceOutcome::Started => format!("{service} 服务启动成功"),
            ServiceOutcome::StartFailed => format!("启动 {service} 服务失败"),
            ServiceOutcome::AlreadyStopped => format!("{service} 服务已经停止"),
            ServiceOutcome::Stopped => format!("{service} 服务已关闭"),
            ServiceOutcome::StopFailed => format!("停止 {service} 服务失败"),
            ServiceOutcome::Unsupported {
                action,
                status: ServiceStatus::Running,
            } => format!("不支持的操作 {action:?}, {service} 服务正在运行"),
            ServiceOutcome::Unsupported {
                action,
                status: ServiceStatus::Inactive,
            } => format!("不支持的操作 {action:?}, {service} 服务未运行"),
            ServiceOutcome::Failed { reason } => format!("操作失败: {reason}"),
        }
    }
}

/// The payload returned to the web page.
///
/// The icon and its color are derived from the status when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceActionResult {
    pub message: String,
    pub status: ServiceStatus,
}

impl ServiceActionResult {
    pub fn new(service: SystemService<'_>, outcome: &ServiceOutcome) -> Self {
        ServiceActionResult {
            message: outcome.message(service),
            status: outcome.status(),
        }
    }

    pub fn icon(&self) -> &'static str {
        self.status.icon()
    }

    pub fn icon_color(&self) -> &'static str {
        self.status.icon_color()
    }
}

#[derive(Serialize)]
struct ServiceActionPayload<'a> {
    message: &'a str,
    status: ServiceStatus,
    icon: &'static str,
    icon_color: &'static str,
}

impl Serialize for ServiceActionResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ServiceActionPayload {
            message: &self.message,
            status: self.status,
            icon: self.icon(),
            icon_color: self.icon_color(),
        }
        .serialize(serializer)
    }
}

/// Starts or stops services through the host service manager
#[derive(Debug, Clone)]
pub struct ServiceToggle {
    manager: Arc<dyn SystemServiceManager>,
}

impl ServiceToggle {
    pub fn new(manager: Arc<dyn SystemServiceManager>) -> Self {
        ServiceToggle { manager }
    }

    /// Handles a raw request, as received from the web page.
    ///
    /// An action other than `start` or `stop` is not applied:
    /// the current status of the service is reported instead.
    pub async fn handle_request(&self, service_name: &str, action: &str) -> ServiceActionResult {
        let service = SystemService::new(service_name);
        match action.parse::<ServiceAction>() {
            Ok(action) => self.execute(service, action).await,
            Err(_) => {
                warn!("Unsupported action {action:?} requested on {service}");
                let outcome = self.try_report_status(service, action).await;
                self.conclude(service, action, outcome)
            }
        }
    }

    /// Applies the action if the service is not already in the requested state.
    pub async fn execute(
        &self,
        service: SystemService<'_>,
        action: ServiceAction,
    ) -> ServiceActionResult {
        let outcome = self.try_execute(service, action).await;
        self.conclude(service, action.into(), outcome)
    }

    async fn try_execute(
        &self,
        service: SystemService<'_>,
        action: ServiceAction,
    ) -> Result<ServiceOutcome, ToggleError> {
        let active = self.probe(service).await?;

        let outcome = match (action, active) {
            (ServiceAction::Start, true) => ServiceOutcome::AlreadyRunning,
            (ServiceAction::Stop, false) => ServiceOutcome::AlreadyStopped,
            (ServiceAction::Start, false) => {
                let result = self.manager.start_service(service).await;
                if self.applied(service, action, result)? {
                    ServiceOutcome::Started
                } else {
                    ServiceOutcome::StartFailed
                }
            }
            (ServiceAction::Stop, true) => {
                let result = self.manager.stop_service(service).await;
                if self.applied(service, action, result)? {
                    ServiceOutcome::Stopped
                } else {
                    ServiceOutcome::StopFailed
                }
            }
        };

        Ok(outcome)
    }

    async fn try_report_status(
        &self,
        service: SystemService<'_>,
        action: &str,
    ) -> Result<ServiceOutcome, ToggleError> {
        let active = self.probe(service).await?;
        Ok(ServiceOutcome::Unsupported {
            action: action.to_string(),
            status: ServiceStatus::from_active(active),
        })
    }

    async fn probe(&self, service: SystemService<'_>) -> Result<bool, ToggleError> {
        self.manager
            .is_service_running(service)
            .await
            .map_err(|source| ToggleError::Probe {
                service: service.to_string(),
                source,
            })
    }

    /// Tells if a start or stop command succeeded.
    ///
    /// A command that ran and failed is a normal outcome,
    /// only a command that could not run is an error.
    fn applied(
        &self,
        service: SystemService<'_>,
        action: ServiceAction,
        result: Result<(), system_services::SystemServiceError>,
    ) -> Result<bool, ToggleError> {
        match result {
            Ok(()) => Ok(true),
            Err(err) if err.is_unsuccessful_exit() => {
                warn!("Failed to {action} {service}: {err}");
                Ok(false)
            }
            Err(source) => Err(ToggleError::Mutation {
                service: service.to_string(),
                action: action.into(),
                source,
            }),
        }
    }

    fn conclude(
        &self,
        service: SystemService<'_>,
        action: &str,
        outcome: Result<ServiceOutcome, ToggleError>,
    ) -> ServiceActionResult {
        let outcome = outcome.unwrap_or_else(|err| {
            error!("{err}");
            ServiceOutcome::Failed {
                reason: err.to_string(),
            }
        });

        let result = ServiceActionResult::new(service, &outcome);
        info!(
            "Request {action:?} on {service} ended with {outcome:?}, status: {:?}",
            result.status
        );
        result
    }
}
