#[derive(thiserror::Error, Debug)]
pub enum SystemServiceError {
    #[error("Service command <{service_command:?}> failed with code: {code:?}.")]
    ServiceCommandFailedWithCode { service_command: String, code: i32 },

    #[error("Service command <{service_command:?}> terminated by a signal.")]
    ServiceCommandFailedBySignal { service_command: String },

    #[error("Service command <{service_command:?}> could not be executed: {reason}")]
    ServiceCommandNotFound {
        service_command: String,
        reason: String,
    },

    #[error("Failed to execute '{cmd}' to check the service manager availability.\n\
     Service manager '{name}' is not available on the system or elevated permissions have not been granted.")]
    ServiceManagerUnavailable { cmd: String, name: String },

    #[error(
        "Syntax error in the config file for '{cmd}': {reason}\n\
    Check '{path}' file."
    )]
    SystemConfigInvalidSyntax {
        reason: String,
        cmd: String,
        path: String,
    },
}

impl SystemServiceError {
    /// True when the service command ran but didn't succeed,
    /// as opposed to a command that could not run at all.
    pub fn is_unsuccessful_exit(&self) -> bool {
        matches!(
            self,
            Self::ServiceCommandFailedWithCode { .. } | Self::ServiceCommandFailedBySignal { .. }
        )
    }
}
