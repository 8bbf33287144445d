use std::collections::HashMap;
use std::io::ErrorKind;

use serde::Deserialize;

mod http;
mod log_level;
mod services;

pub use self::http::*;
pub use self::log_level::*;
pub use self::services::*;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fs;

pub const CONFIG_FILE: &str = "fwcontrol.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Toml syntax error in the config file '{path}': {reason}")]
    InvalidSyntax { path: Utf8PathBuf, reason: String },

    #[error("Failed to read the config file '{path}': {source}")]
    ReadFile {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid log level: {name:?}, supported levels are trace, debug, info, warn and error")]
    InvalidLogLevel { name: String },
}

#[derive(Deserialize, Debug, Default, Eq, PartialEq)]
pub struct FwControlConfig {
    #[serde(default)]
    pub init: InitConfig,
    #[serde(default)]
    pub sudo: SudoConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: HashMap<String, String>,
}

impl FwControlConfig {
    /// Reads `fwcontrol.toml` from `config_root`, falling back to the defaults
    /// when the file doesn't exist.
    pub fn try_new(config_root: &Utf8Path) -> Result<Self, ConfigError> {
        let config_path = config_root.join(CONFIG_FILE);

        match fs::read_to_string(&config_path) {
            Ok(contents) => {
                toml::from_str(contents.as_str()).map_err(|e| ConfigError::InvalidSyntax {
                    path: config_path,
                    reason: e.to_string(),
                })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::ReadFile {
                path: config_path,
                source,
            }),
        }
    }
}

#[derive(Deserialize, Debug, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SudoConfig {
    /// Prefix the start and stop commands with `sudo`
    #[serde(default = "SudoConfig::default_enable")]
    pub enable: bool,
}

impl SudoConfig {
    fn default_enable() -> bool {
        true
    }
}

impl Default for SudoConfig {
    fn default() -> Self {
        Self {
            enable: Self::default_enable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::net::IpAddr;
    use std::net::Ipv4Addr;
    use tempfile::TempDir;

    #[test]
    fn deserialize_full_config() {
        let config: FwControlConfig = toml::from_str(
            r#"
            [init]
            name = "systemd"
            is_available = ["/bin/systemctl", "--version"]
            is_active = ["/bin/systemctl", "is-active", "--quiet", "{}"]
            start = ["/bin/systemctl", "start", "{}"]
            stop = ["/bin/systemctl", "stop", "{}"]

            [sudo]
            enable = false

            [http]
            bind_address = "127.0.0.1"
            port = 8080
            default_service = "nginx"

            [log]
            fwcontrol = "debug"
        "#,
        )
        .unwrap();

        assert_eq!(config.init.name, "systemd");
        assert_eq!(
            config.init.is_active,
            vec!["/bin/systemctl", "is-active", "--quiet", "{}"]
        );
        assert_eq!(config.init.start, vec!["/bin/systemctl", "start", "{}"]);
        assert_eq!(config.init.stop, vec!["/bin/systemctl", "stop", "{}"]);
        assert!(!config.sudo.enable);
        assert_eq!(
            config.http.bind_address,
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.default_service, "nginx");
        assert_eq!(config.log.get("fwcontrol").unwrap(), "debug");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: FwControlConfig = toml::from_str("").unwrap();
        assert_eq!(config, FwControlConfig::default());
        assert!(config.sudo.enable);
        assert_eq!(config.http.port, 7503);
        assert_eq!(config.http.default_service, "filewatcher");
    }

    #[test]
    fn missing_config_file_uses_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_root = Utf8Path::from_path(temp_dir.path()).unwrap();

        let config = FwControlConfig::try_new(config_root)?;

        assert_eq!(config, FwControlConfig::default());
        Ok(())
    }

    #[test]
    fn read_config_file() -> anyhow::Result<()> {
        let toml_conf = r#"
            [http]
            port = 9000
        "#;
        let expected_config: FwControlConfig = toml::from_str(toml_conf)?;

        let (_dir, config_root) = create_temp_config(toml_conf)?;
        let config = FwControlConfig::try_new(&config_root)?;

        assert_eq!(config, expected_config);
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.default_service, "filewatcher");
        Ok(())
    }

    #[test]
    fn invalid_config_file_is_rejected() -> anyhow::Result<()> {
        let (_dir, config_root) = create_temp_config("[http\nport = 9000")?;

        let err = FwControlConfig::try_new(&config_root).unwrap_err();

        assert_matches!(err, ConfigError::InvalidSyntax { .. });
        Ok(())
    }

    #[test]
    fn unknown_sudo_field_is_rejected() -> anyhow::Result<()> {
        let (_dir, config_root) = create_temp_config("[sudo]\nenabled = true")?;

        let err = FwControlConfig::try_new(&config_root).unwrap_err();

        assert_matches!(err, ConfigError::InvalidSyntax { .. });
        Ok(())
    }

    // Need to return TempDir, otherwise the dir will be deleted when this function ends.
    fn create_temp_config(content: &str) -> std::io::Result<(TempDir, Utf8PathBuf)> {
        let temp_dir = TempDir::new()?;
        let config_root = Utf8Path::from_path(temp_dir.path()).unwrap().to_owned();
        std::fs::write(config_root.join(CONFIG_FILE), content.as_bytes())?;
        Ok((temp_dir, config_root))
    }
}
