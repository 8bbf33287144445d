use serde::Deserialize;

/// Command lines used to drive the host service manager.
///
/// In every command line but `is_available`, the `{}` placeholder is replaced
/// by the name of the targeted service.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InitConfig {
    pub name: String,
    pub is_available: Vec<String>,
    pub is_active: Vec<String>,
    pub start: Vec<String>,
    pub stop: Vec<String>,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            name: "systemd".to_string(),
            is_available: vec!["systemctl".into(), "--version".into()],
            is_active: vec![
                "systemctl".into(),
                "is-active".into(),
                "--quiet".into(),
                "{}".into(),
            ],
            start: vec!["systemctl".into(), "start".into(), "{}".into()],
            stop: vec!["systemctl".into(), "stop".into(), "{}".into()],
        }
    }
}
