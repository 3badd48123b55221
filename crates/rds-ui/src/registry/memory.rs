// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use super::{ComponentEntry, LibEntry, Registry, RegistryIndex};
use crate::error::{RdsError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Memory-based registry that serves an index and files from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    index: RegistryIndex,
    files: HashMap<String, String>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MemoryRegistry {
    /// Create a registry serving `index` with no files
    pub fn new(index: RegistryIndex) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Add a component to the index
    pub fn with_component(mut self, key: &str, entry: ComponentEntry) -> Self {
        self.index.components.insert(key.to_string(), entry);
        self
    }

    /// Add a shared lib entry to the index
    pub fn with_lib(mut self, key: &str, entry: LibEntry) -> Self {
        self.index.lib.insert(key.to_string(), entry);
        self
    }

    /// Set the shared style files
    pub fn with_styles(mut self, entry: LibEntry) -> Self {
        self.index.styles = entry;
        self
    }

    /// Add a file's content
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Paths served by `fetch_file` so far, in request order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl Registry for MemoryRegistry {
    async fn fetch_index(&self) -> Result<RegistryIndex> {
        Ok(self.index.clone())
    }

    async fn fetch_file(&self, path: &str) -> Result<String> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(path.to_string());
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RdsError::FetchFailed {
                path: path.to_string(),
                message: "not found in memory registry".to_string(),
            })
    }
}
