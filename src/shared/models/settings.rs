use std::{env, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const SETTINGS_PATH_VAR: &str = "TASKDESK_SETTINGS";
const API_BASE_URL_VAR: &str = "TASKDESK_API_BASE_URL";
const PORT_VAR: &str = "TASKDESK_PORT";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("cannot parse settings file {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("{var} is not a valid port: {value}")]
    Port { var: &'static str, value: String },
}

/// Dashboard configuration: `settings.json` (or `$TASKDESK_SETTINGS`),
/// then environment overrides. A missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    /// Path prefixes that require a session credential.
    pub protected_prefixes: Vec<String>,
    /// Where the gate sends requests without a credential.
    pub landing_path: String,
    /// redb file for a persisted session; `None` keeps it in memory.
    pub vault_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:7777".to_string(),
            tcp_socket_binding: "0.0.0.0".to_string(),
            tcp_socket_port: 3000,
            protected_prefixes: vec!["/example".to_string()],
            landing_path: "/".to_string(),
            vault_path: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Settings, SettingsError> {
        let path = env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| SETTINGS_FILENAME.to_string());
        let settings = Self::from_file(&path)?;
        settings.with_overrides(|var| env::var(var).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|source| SettingsError::Parse { path: display, source }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(source) => Err(SettingsError::Read { path: display, source }),
        }
    }

    /// Apply `TASKDESK_API_BASE_URL` and `TASKDESK_PORT` through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Settings, SettingsError> {
        if let Some(url) = lookup(API_BASE_URL_VAR) {
            self.api_base_url = url;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.tcp_socket_port = port
                .parse()
                .map_err(|_| SettingsError::Port { var: PORT_VAR, value: port })?;
        }
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}
