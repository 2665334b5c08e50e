//! Toolkit configuration
//!
//! Configuration is read from `sct.yaml` in the working directory, falling
//! back to the user config directory, with environment variables taking
//! precedence over both. The service key is normally supplied through
//! `SCT_SERVICE_KEY` so it never has to live in a file.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the config file, both project-local and in the user config dir
pub const CONFIG_FILE: &str = "sct.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("backend {0} is not configured; set it in {CONFIG_FILE} or via {1}")]
    MissingBackend(&'static str, &'static str),

    #[error("could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("{path} does not parse: {reason}")]
    Invalid { path: String, reason: String },

    #[error("failed to launch editor '{editor}': {reason}")]
    Editor { editor: String, reason: String },
}

/// Connection settings for the hosted backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the project, e.g. `https://example.supabase.co`
    #[serde(default)]
    pub url: Option<String>,

    /// Service key forwarded as `apikey` / bearer token
    #[serde(default)]
    pub service_key: Option<String>,
}

/// Storage bucket names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_photo_bucket")]
    pub photo_bucket: String,

    #[serde(default = "default_logo_bucket")]
    pub logo_bucket: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            photo_bucket: default_photo_bucket(),
            logo_bucket: default_logo_bucket(),
        }
    }
}

fn default_photo_bucket() -> String {
    "photos".to_string()
}

fn default_logo_bucket() -> String {
    "client_logos".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    /// Editor command for `edit` round-trips; `$EDITOR` wins when unset
    #[serde(default)]
    pub editor: Option<String>,
}

/// A fully resolved backend connection
#[derive(Debug, Clone)]
pub struct Backend {
    pub url: String,
    pub service_key: String,
}

impl Config {
    /// Load configuration, never failing: a missing or unreadable file just
    /// yields defaults, and parse problems are logged and skipped so a bad
    /// user config cannot brick every command.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::user_config_path() {
            if let Some(loaded) = Self::read_file(&path) {
                config = loaded;
            }
        }

        let local = PathBuf::from(CONFIG_FILE);
        if let Some(loaded) = Self::read_file(&local) {
            config = loaded;
        }

        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Parse a single config file, or error loudly (used by `sct init`
    /// verification and tests)
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yml::from_str(&content).map_err(|e| ConfigError::Invalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn read_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::from_file(path) {
            Ok(config) => Some(config),
            Err(error) => {
                tracing::warn!(%error, "ignoring unparseable config file");
                None
            }
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sct")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Overlay environment variables; injected lookup keeps this testable.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get("SCT_BACKEND_URL") {
            self.backend.url = Some(url);
        }
        if let Some(key) = get("SCT_SERVICE_KEY") {
            self.backend.service_key = Some(key);
        }
        if let Some(editor) = get("SCT_EDITOR") {
            self.editor = Some(editor);
        }
    }

    /// Resolve the backend connection or explain what is missing
    pub fn require_backend(&self) -> Result<Backend, ConfigError> {
        let url = self
            .backend
            .url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingBackend("url", "SCT_BACKEND_URL"))?;
        let service_key = self
            .backend
            .service_key
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingBackend("service key", "SCT_SERVICE_KEY"))?;

        Ok(Backend {
            url: url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    /// The editor command to use for `edit` round-trips
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Open a file in the configured editor and wait for it to exit
    pub fn run_editor(&self, path: &Path) -> Result<(), ConfigError> {
        let editor = self.editor();
        let status = Command::new(&editor)
            .arg(path)
            .status()
            .map_err(|e| ConfigError::Editor {
                editor: editor.clone(),
                reason: e.to_string(),
            })?;
        if !status.success() {
            return Err(ConfigError::Editor {
                editor,
                reason: format!("exited with {status}"),
            });
        }
        Ok(())
    }

    /// Starter config written by `sct init`
    pub fn starter_yaml() -> String {
        concat!(
            "# Studio Content Toolkit configuration\n",
            "#\n",
            "# The service key can be kept out of this file entirely by\n",
            "# exporting SCT_SERVICE_KEY instead.\n",
            "\n",
            "backend:\n",
            "  url: \"https://YOUR-PROJECT.supabase.co\"\n",
            "  # service_key: \"...\"\n",
            "\n",
            "storage:\n",
            "  photo_bucket: photos\n",
            "  logo_bucket: client_logos\n",
            "\n",
            "# editor: nano\n",
        )
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::default();
        config.backend.url = Some("https://file.example".to_string());

        config.apply_env(|name| match name {
            "SCT_BACKEND_URL" => Some("https://env.example".to_string()),
            "SCT_SERVICE_KEY" => Some("sk-env".to_string()),
            _ => None,
        });

        assert_eq!(config.backend.url.as_deref(), Some("https://env.example"));
        assert_eq!(config.backend.service_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_require_backend_missing_url() {
        let config = Config::default();
        let err = config.require_backend().unwrap_err();
        assert!(err.to_string().contains("SCT_BACKEND_URL"));
    }

    #[test]
    fn test_require_backend_trims_trailing_slash() {
        let mut config = Config::default();
        config.backend.url = Some("https://x.example/".to_string());
        config.backend.service_key = Some("sk".to_string());

        let backend = config.require_backend().unwrap();
        assert_eq!(backend.url, "https://x.example");
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let mut config = Config::default();
        config.backend.url = Some("   ".to_string());
        config.backend.service_key = Some("sk".to_string());
        assert!(config.require_backend().is_err());
    }

    #[test]
    fn test_starter_yaml_parses() {
        let parsed: Config = serde_yml::from_str(&Config::starter_yaml()).unwrap();
        assert_eq!(parsed.storage.photo_bucket, "photos");
        assert_eq!(parsed.storage.logo_bucket, "client_logos");
    }
}
