// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Consumer project configuration.
//!
//! Configuration is stored as `rds-ui.json` at the project root. Its presence
//! marks a project as initialized.
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "alias": "@",
//!   "srcDir": "src",
//!   "componentsDir": "src/components/ui",
//!   "componentsAlias": "",
//!   "libDir": "src/lib",
//!   "stylesDir": "src/styles"
//! }
//! ```

use crate::error::{RdsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the persisted configuration file.
pub const CONFIG_FILE: &str = "rds-ui.json";

/// Settings read by every `add` and written by `init`.
///
/// All directories are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsConfig {
    /// Import alias for the source directory, e.g. `@`.
    #[serde(default = "default_alias")]
    pub alias: String,
    /// Source directory (default: "src").
    #[serde(default = "default_src_dir")]
    pub src_dir: String,
    /// Where components are written (default: "src/components/ui").
    #[serde(default = "default_components_dir")]
    pub components_dir: String,
    /// Dedicated components alias such as `@ui`. Empty when unused.
    #[serde(default)]
    pub components_alias: String,
    /// Where shared lib files live (default: "src/lib").
    #[serde(default = "default_lib_dir")]
    pub lib_dir: String,
    /// Where style files live (default: "src/styles").
    #[serde(default = "default_styles_dir")]
    pub styles_dir: String,
}

fn default_alias() -> String {
    "@".to_string()
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_components_dir() -> String {
    "src/components/ui".to_string()
}

fn default_lib_dir() -> String {
    "src/lib".to_string()
}

fn default_styles_dir() -> String {
    "src/styles".to_string()
}

impl Default for RdsConfig {
    fn default() -> Self {
        Self {
            alias: default_alias(),
            src_dir: default_src_dir(),
            components_dir: default_components_dir(),
            components_alias: String::new(),
            lib_dir: default_lib_dir(),
            styles_dir: default_styles_dir(),
        }
    }
}

impl RdsConfig {
    /// Returns the path of `rds-ui.json` inside `root`.
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Returns `true` if `root` contains `rds-ui.json`.
    pub fn exists(root: &Path) -> bool {
        Self::path(root).exists()
    }

    /// Loads and validates `rds-ui.json` from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`RdsError::NotInitialized`] if the file is absent, and
    /// [`RdsError::InvalidConfig`] if it cannot be parsed or is invalid.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            return Err(RdsError::NotInitialized);
        }

        let content = fs::read_to_string(&path)?;
        let config: RdsConfig = serde_json::from_str(&content)
            .map_err(|e| RdsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates and writes the configuration to `root/rds-ui.json`.
    pub fn save(&self, root: &Path) -> Result<()> {
        self.validate()?;
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(Self::path(root), content)?;
        Ok(())
    }

    /// Checks the alias is non-empty and every directory is relative.
    pub fn validate(&self) -> Result<()> {
        if self.alias.trim().is_empty() {
            return Err(RdsError::InvalidConfig("alias must not be empty".to_string()));
        }

        let dirs = [
            ("srcDir", &self.src_dir),
            ("componentsDir", &self.components_dir),
            ("libDir", &self.lib_dir),
            ("stylesDir", &self.styles_dir),
        ];
        for (field, dir) in dirs {
            if dir.trim().is_empty() {
                return Err(RdsError::InvalidConfig(format!("{} must not be empty", field)));
            }
            if Path::new(dir).is_absolute() || dir.starts_with('/') {
                return Err(RdsError::InvalidConfig(format!(
                    "{} must be relative to the project root, got {}",
                    field, dir
                )));
            }
        }
        Ok(())
    }

    /// The dedicated components alias, if one is configured.
    pub fn components_alias(&self) -> Option<&str> {
        let alias = self.components_alias.trim();
        (!alias.is_empty()).then_some(alias)
    }

    /// Strips the `srcDir/` prefix from `dir`, leaving it unchanged otherwise.
    pub fn relative_to_src<'a>(&self, dir: &'a str) -> &'a str {
        let prefix = format!("{}/", self.src_dir.trim_end_matches('/'));
        dir.strip_prefix(prefix.as_str()).unwrap_or(dir)
    }

    /// `libDir` relative to `srcDir`, e.g. `lib`.
    pub fn lib_path(&self) -> &str {
        self.relative_to_src(&self.lib_dir)
    }

    /// `componentsDir` relative to `srcDir`, e.g. `components/ui`.
    pub fn components_path(&self) -> &str {
        self.relative_to_src(&self.components_dir)
    }

    /// `stylesDir` relative to `srcDir`, e.g. `styles`.
    pub fn styles_path(&self) -> &str {
        self.relative_to_src(&self.styles_dir)
    }
}
