use super::ConfigError;
use super::FwControlConfig;
use crate::cli::LogConfigArgs;
use camino::Utf8Path;
use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_MAX_LEVEL: tracing::Level = tracing::Level::INFO;

/// Configures and enables logging taking into account flags, env variables and file config.
///
/// 1. Log config is taken from the `[log]` table of the configuration file first
/// 2. If `RUST_LOG` variable is set, it overrides file-based configuration
/// 3. If `--debug` or `--log-level` flags are set, they override previous steps
pub fn log_init(
    sname: &str,
    flags: &LogConfigArgs,
    config_dir: &Utf8Path,
) -> Result<(), ConfigError> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal() && yansi::Condition::no_color())
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339());

    if let Some(log_level) = log_level_from_flags(flags) {
        subscriber.with_max_level(log_level).finish().try_init().ok();
        return Ok(());
    }

    if std::env::var("RUST_LOG").is_ok() {
        subscriber
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_file(true)
            .with_line_number(true)
            .finish()
            .try_init()
            .ok();
        return Ok(());
    }

    let log_level = get_log_level_from_config_file(sname, config_dir)?.unwrap_or(DEFAULT_MAX_LEVEL);
    subscriber.with_max_level(log_level).finish().try_init().ok();
    Ok(())
}

fn log_level_from_flags(flags: &LogConfigArgs) -> Option<tracing::Level> {
    flags
        .log_level
        .or(flags.debug.then_some(tracing::Level::DEBUG))
}

/// Return the log level for a given program, if it's defined in the config file. Otherwise return `None`.
pub fn get_log_level_from_config_file(
    sname: &str,
    config_dir: &Utf8Path,
) -> Result<Option<tracing::Level>, ConfigError> {
    let loglevel = FwControlConfig::try_new(config_dir)?.log;
    match loglevel.get(sname) {
        Some(ll) => {
            let ll = tracing::Level::from_str(&ll.to_uppercase())
                .map_err(|_| ConfigError::InvalidLogLevel {
                    name: ll.to_string(),
                })?;
            Ok(Some(ll))
        }
        None => Ok(None),
    }
}
