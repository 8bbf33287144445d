use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::process::Command;
use tracing::warn;

use crate::SudoConfig;

const SUDO: &str = "sudo";

/// An object used to spawn privileged processes according to the user's sudo preference.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SudoCommandBuilder {
    enabled: bool,
    sudo_program: Arc<str>,
}

impl SudoCommandBuilder {
    /// Configures the object to prepend `sudo` if `sudo.enable` is set.
    pub fn new(config: &SudoConfig) -> Self {
        Self::enabled(config.enable)
    }

    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            sudo_program: Arc::from(SUDO),
        }
    }

    /// Instead of `sudo`, configures object to prepend other program name.
    ///
    /// Mainly used by tests that don't wish to actually execute the command as
    /// `sudo` would, so they replace it with e.g. `env`.
    pub fn with_program(program: impl Into<Arc<str>>) -> Self {
        Self {
            enabled: true,
            sudo_program: program.into(),
        }
    }

    /// Creates a command, optionally prepended by `sudo` or other prefix.
    ///
    /// If sudo is enabled and present in $PATH, the returned [`Command`] runs
    /// `program` through sudo. Otherwise it starts `program` directly.
    pub fn command<S: AsRef<OsStr>>(&self, program: S) -> Command {
        let program = program.as_ref();
        if !self.enabled {
            return Command::new(program);
        }

        match which::which(self.sudo_program.as_ref()) {
            Ok(sudo) => self.prefixed(sudo, program),
            Err(_) => {
                warn!(
                    "`sudo.enable` set to `true`, but {} not found in $PATH, invoking '{}' directly",
                    self.sudo_program,
                    program.to_string_lossy()
                );
                Command::new(program)
            }
        }
    }

    /// `sudo` itself runs non-interactively: a password prompt fails the command.
    fn prefixed(&self, prefix: PathBuf, program: &OsStr) -> Command {
        let mut c = Command::new(prefix);
        if self.sudo_program.as_ref() == SUDO {
            c.arg("-n");
        }
        c.arg(program);
        c
    }
}
