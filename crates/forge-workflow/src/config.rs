//! Configuration resolution for the workflow.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Revision installed when the project does not pin one.
pub const DEFAULT_FORGE_VERSION: &str = "ecdafc5";

/// `forge test --verbosity` level when the project does not set one.
pub const DEFAULT_VERBOSITY: u32 = 3;

/// Project config file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "forge.config.json";

/// Resolved settings for one workflow invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Source-control revision or tag to install.
    pub version: String,
    /// Passed through to `forge test --verbosity`.
    pub verbosity: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_FORGE_VERSION.to_string(),
            verbosity: DEFAULT_VERBOSITY,
        }
    }
}

/// The `forge` section as written by the user; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeUserConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub verbosity: Option<u32>,
}

/// Project configuration file contents. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub forge: ForgeUserConfig,
}

impl UserConfig {
    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given (it must exist), otherwise
    /// `<project_dir>/forge.config.json` if present, otherwise defaults.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let default_path = project_dir.join(CONFIG_FILE_NAME);
        if default_path.exists() {
            Self::load_from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Replace fields with command-line values where those are present.
    pub fn with_overrides(mut self, version: Option<String>, verbosity: Option<u32>) -> Self {
        if version.is_some() {
            self.forge.version = version;
        }
        if verbosity.is_some() {
            self.forge.verbosity = verbosity;
        }
        self
    }
}

/// Apply defaults to a user configuration. Blank versions count as absent.
pub fn resolve(user: &UserConfig) -> ToolConfig {
    let version = user
        .forge
        .version
        .as_deref()
        .map(str::trim)
        .filter(|version| !version.is_empty())
        .unwrap_or(DEFAULT_FORGE_VERSION)
        .to_string();

    ToolConfig {
        version,
        verbosity: user.forge.verbosity.unwrap_or(DEFAULT_VERBOSITY),
    }
}
