use crate::SystemService;
use crate::SystemServiceError;
use crate::SystemServiceManager;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use fwcontrol_config::FwControlConfig;
use fwcontrol_config::InitConfig;
use fwcontrol_config::SudoCommandBuilder;
use fwcontrol_config::CONFIG_FILE;
use std::fmt;
use std::process::ExitStatus;
use std::process::Stdio;
use tracing::debug;

/// Service manager driven by the command lines of the `[init]` configuration.
///
/// Status queries run with the privileges of the current process,
/// while start and stop commands go through [`SudoCommandBuilder`].
#[derive(Debug)]
pub struct GeneralServiceManager {
    init_config: InitConfig,
    sudo: SudoCommandBuilder,
    config_path: Utf8PathBuf,
}

impl GeneralServiceManager {
    pub fn new(config: &FwControlConfig, config_root: &Utf8Path) -> Self {
        Self {
            init_config: config.init.clone(),
            sudo: SudoCommandBuilder::new(&config.sudo),
            config_path: config_root.join(CONFIG_FILE),
        }
    }

    pub fn with_init_config(init_config: InitConfig, sudo: SudoCommandBuilder) -> Self {
        Self {
            init_config,
            sudo,
            config_path: Utf8PathBuf::from(CONFIG_FILE),
        }
    }
}

#[async_trait::async_trait]
impl SystemServiceManager for GeneralServiceManager {
    fn name(&self) -> &str {
        &self.init_config.name
    }

    async fn check_operational(&self) -> Result<(), SystemServiceError> {
        let exec_command = ServiceCommand::CheckManager.try_exec_command(self)?;

        match exec_command.to_command().status().await {
            Ok(status) if status.success() => Ok(()),
            _ => Err(SystemServiceError::ServiceManagerUnavailable {
                cmd: exec_command.to_string(),
                name: self.name().to_string(),
            }),
        }
    }

    async fn stop_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        let exec_command = ServiceCommand::Stop(service).try_exec_command(self)?;
        self.run_privileged_command(exec_command)
            .await?
            .must_succeed()
    }

    async fn start_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        let exec_command = ServiceCommand::Start(service).try_exec_command(self)?;
        self.run_privileged_command(exec_command)
            .await?
            .must_succeed()
    }

    async fn is_service_running(
        &self,
        service: SystemService<'_>,
    ) -> Result<bool, SystemServiceError> {
        let exec_command = ServiceCommand::IsActive(service).try_exec_command(self)?;
        debug!("Querying status of {service} with: {exec_command}");
        let status = exec_command.to_command().status().await.map_err(|err| {
            SystemServiceError::ServiceCommandNotFound {
                service_command: exec_command.to_string(),
                reason: err.to_string(),
            }
        })?;

        let exit_status = ServiceCommandExitStatus {
            status,
            service_command: exec_command.to_string(),
        };
        exit_status.is_active()
    }
}

impl GeneralServiceManager {
    async fn run_privileged_command(
        &self,
        exec_command: ExecCommand,
    ) -> Result<ServiceCommandExitStatus, SystemServiceError> {
        debug!("Running privileged service command: {exec_command}");
        let output = exec_command
            .to_privileged_command(&self.sudo)
            .output()
            .await
            .map_err(|err| SystemServiceError::ServiceCommandNotFound {
                service_command: exec_command.to_string(),
                reason: err.to_string(),
            })?;

        if !output.status.success() {
            debug!(
                "Service command <{exec_command}> exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(ServiceCommandExitStatus {
            status: output.status,
            service_command: exec_command.to_string(),
        })
    }
}

#[derive(Debug, PartialEq)]
struct ExecCommand {
    exec: String,
    args: Vec<String>,
}

impl ExecCommand {
    fn try_new(
        config: Vec<String>,
        cmd: ServiceCommand,
        config_path: &Utf8Path,
    ) -> Result<Self, SystemServiceError> {
        match config.split_first() {
            Some((exec, args)) => Ok(Self {
                exec: exec.to_string(),
                args: args.to_vec(),
            }),
            None => Err(SystemServiceError::SystemConfigInvalidSyntax {
                reason: "Requires 1 or more arguments.".to_string(),
                cmd: cmd.to_string(),
                path: config_path.to_string(),
            }),
        }
    }

    fn try_new_with_placeholder<'a>(
        config: &[String],
        service_cmd: ServiceCommand<'a>,
        config_path: &Utf8Path,
        service: SystemService<'a>,
    ) -> Result<Self, SystemServiceError> {
        let replaced = replace_with_service_name(config, service_cmd, config_path, service)?;
        Self::try_new(replaced, service_cmd, config_path)
    }

    fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.exec);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    fn to_privileged_command(&self, sudo: &SudoCommandBuilder) -> tokio::process::Command {
        let mut cmd = sudo.command(&self.exec);
        cmd.args(&self.args).stdin(Stdio::null());
        cmd
    }
}

impl fmt::Display for ExecCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.exec)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn replace_with_service_name<'a>(
    input_args: &[String],
    service_cmd: ServiceCommand<'a>,
    config_path: &Utf8Path,
    service: SystemService<'a>,
) -> Result<Vec<String>, SystemServiceError> {
    if !input_args.iter().any(|s| s == "{}") {
        return Err(SystemServiceError::SystemConfigInvalidSyntax {
            reason: "A placeholder '{}' is missing.".to_string(),
            cmd: service_cmd.to_string(),
            path: config_path.to_string(),
        });
    }

    Ok(input_args
        .iter()
        .map(|item| {
            if item == "{}" {
                service.to_string()
            } else {
                item.clone()
            }
        })
        .collect())
}

#[derive(Debug, Copy, Clone)]
enum ServiceCommand<'a> {
    CheckManager,
    Stop(SystemService<'a>),
    Start(SystemService<'a>),
    IsActive(SystemService<'a>),
}

impl ServiceCommand<'_> {
    fn try_exec_command(
        self,
        service_manager: &GeneralServiceManager,
    ) -> Result<ExecCommand, SystemServiceError> {
        let config_path = &service_manager.config_path;
        let init_config = &service_manager.init_config;

        match self {
            Self::CheckManager => {
                ExecCommand::try_new(init_config.is_available.clone(), self, config_path)
            }
            Self::Stop(service) => {
                ExecCommand::try_new_with_placeholder(&init_config.stop, self, config_path, service)
            }
            Self::Start(service) => ExecCommand::try_new_with_placeholder(
                &init_config.start,
                self,
                config_path,
                service,
            ),
            Self::IsActive(service) => ExecCommand::try_new_with_placeholder(
                &init_config.is_active,
                self,
                config_path,
                service,
            ),
        }
    }
}

impl fmt::Display for ServiceCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CheckManager => write!(f, "is_available"),
            Self::Stop(_service) => write!(f, "stop"),
            Self::Start(_service) => write!(f, "start"),
            Self::IsActive(_service) => write!(f, "is_active"),
        }
    }
}

#[derive(Debug)]
struct ServiceCommandExitStatus {
    status: ExitStatus,
    service_command: String,
}

impl ServiceCommandExitStatus {
    fn must_succeed(self) -> Result<(), SystemServiceError> {
        if self.status.success() {
            Ok(())
        } else {
            match self.status.code() {
                Some(code) => Err(SystemServiceError::ServiceCommandFailedWithCode {
                    service_command: self.service_command,
                    code,
                }),
                None => Err(SystemServiceError::ServiceCommandFailedBySignal {
                    service_command: self.service_command,
                }),
            }
        }
    }

    /// Any exit code other than 0 is a clean "inactive";
    /// a query killed by a signal tells nothing about the service.
    fn is_active(self) -> Result<bool, SystemServiceError> {
        match self.status.code() {
            Some(code) => Ok(code == 0),
            None => Err(SystemServiceError::ServiceCommandFailedBySignal {
                service_command: self.service_command,
            }),
        }
    }
}
