// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use super::{Registry, RegistryIndex, INDEX_FILE};
use crate::error::{RdsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-based registry, used for repo-local development.
#[derive(Debug, Clone)]
pub struct LocalRegistry {
    root: PathBuf,
}

impl LocalRegistry {
    /// Creates a registry rooted at `root` (the directory holding `index.json`).
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Registry for LocalRegistry {
    async fn fetch_index(&self) -> Result<RegistryIndex> {
        let index_path = self.root.join(INDEX_FILE);
        let content = fs::read_to_string(&index_path).map_err(|e| {
            RdsError::RegistryUnavailable(format!("cannot read {}: {}", index_path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            RdsError::RegistryUnavailable(format!("invalid {}: {}", index_path.display(), e))
        })
    }

    async fn fetch_file(&self, path: &str) -> Result<String> {
        let full_path = self.root.join(path);
        tracing::debug!("Reading registry file {}", full_path.display());
        fs::read_to_string(&full_path).map_err(|e| RdsError::FetchFailed {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}
