use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::view::SortOrder;

/// Relative location of the project config file.
pub const PROJECT_CONFIG_PATH: &str = ".pulse/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Where the dataset entry lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the entry, relative to the project root.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    /// Entry key; the file is `<dir>/<key>.json`.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

impl StorageConfig {
    /// Absolute directory of the entry for a project rooted at `root`.
    #[must_use]
    pub fn resolve_dir(&self, root: &Path) -> PathBuf {
        if self.dir.is_absolute() {
            self.dir.clone()
        } else {
            root.join(&self.dir)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Events this many days out (or already past) count as "soon".
    #[serde(default = "default_soon_threshold_days")]
    pub soon_threshold_days: i64,
    #[serde(default)]
    pub default_sort: SortOrder,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            soon_threshold_days: default_soon_threshold_days(),
            default_sort: SortOrder::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Upper bound applied to every order quantity edit.
    #[serde(default = "default_max_order_quantity")]
    pub max_order_quantity: u32,
    /// Prefix of generated contact numbers.
    #[serde(default = "default_contact_prefix")]
    pub contact_prefix: String,
    /// First generated suffix when no existing number has one.
    #[serde(default = "default_contact_seed")]
    pub contact_seed: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_order_quantity: default_max_order_quantity(),
            contact_prefix: default_contact_prefix(),
            contact_seed: default_contact_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_PATH);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("pulse/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format);

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

/// Canonical output mode name for a user-supplied value, if recognized.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        // canonical values
        "pretty" => Some("pretty"),
        "text" => Some("text"),
        "json" => Some("json"),
        // legacy compatibility
        "human" => Some("pretty"),
        "table" => Some("text"),
        _ => None,
    }
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<String>,
    env_format: Option<String>,
) -> String {
    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".pulse")
}

fn default_storage_key() -> String {
    crate::store::STORAGE_KEY.to_string()
}

const fn default_soon_threshold_days() -> i64 {
    7
}

const fn default_max_order_quantity() -> u32 {
    9_999
}

fn default_contact_prefix() -> String {
    "202-555-".to_string()
}

const fn default_contact_seed() -> u32 {
    101
}
