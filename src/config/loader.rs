//! Global settings loading
//!
//! Precedence, lowest to highest: built-in defaults, the YAML settings file,
//! `FM_ACTIONS_*` environment variables, command-line flags.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_URL;
use crate::error::FmError;

pub const ENV_PREFIX: &str = "FM_ACTIONS_";
pub const SETTINGS_FILE_NAME: &str = ".fm-actions.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub token: Option<String>,
    pub org_id: Option<String>,
    pub application_name: Option<String>,
    pub use_org_as_app: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            org_id: None,
            application_name: None,
            use_org_as_app: false,
        }
    }
}

impl Settings {
    pub fn token(&self) -> Result<&str, FmError> {
        required(&self.token, "token")
    }

    pub fn org_id(&self) -> Result<&str, FmError> {
        required(&self.org_id, "org-id")
    }

    pub fn application_name(&self) -> Result<&str, FmError> {
        required(&self.application_name, "application-name")
    }
}

fn required<'a>(value: &'a Option<String>, flag: &str) -> Result<&'a str, FmError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| FmError::validation(format!("{flag} is required")))
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_org_as_app: Option<bool>,
}

pub fn load_settings(
    config_path: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings> {
    if let Some(path) = config_path {
        if !path.is_file() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }
        return settings_figment(Some(path), overrides)
            .extract()
            .with_context(|| format!("Invalid settings file: {}", path.display()));
    }

    let discovered = discover_settings_file();
    match settings_figment(discovered.as_deref(), overrides).extract() {
        Ok(settings) => Ok(settings),
        Err(e) => {
            let Some(file) = discovered else {
                return Err(e).context("Invalid settings");
            };
            // Auto-discovered: warn and carry on without it.
            tracing::warn!("Ignoring settings file {}: {}", file.display(), e);
            settings_figment(None, overrides).extract().context("Invalid settings")
        }
    }
}

fn settings_figment(file: Option<&Path>, overrides: &SettingsOverrides) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(file) = file {
        figment = figment.merge(Yaml::file(file));
    }
    figment.merge(Env::prefixed(ENV_PREFIX)).merge(Serialized::defaults(overrides))
}

fn discover_settings_file() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    let path = PathBuf::from(home).join(SETTINGS_FILE_NAME);
    path.is_file().then_some(path)
}
