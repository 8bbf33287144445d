pub mod cli;
mod sudo;
mod system_toml;

pub use self::sudo::SudoCommandBuilder;
pub use self::system_toml::*;

pub const DEFAULT_CONFIG_DIR: &str = "/etc/fwcontrol";
