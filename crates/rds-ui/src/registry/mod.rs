// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Registry index model and registry sources.
//!
//! This module provides the [`Registry`] trait and implementations for
//! loading the registry index and the source files it points to.
//!
//! # Registry Implementations
//!
//! - [`LocalRegistry`]: Reads a registry checkout from the filesystem
//! - [`RemoteRegistry`]: Fetches the registry over HTTPS
//! - [`MemoryRegistry`]: Serves an in-memory registry (testing/embedding)
//!
//! [`RegistrySource`] picks between the local and remote implementations once
//! at startup, so call sites never branch on where the registry lives.

mod local;
mod memory;
mod remote;

pub use self::local::LocalRegistry;
pub use self::memory::MemoryRegistry;
pub use self::remote::RemoteRegistry;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Raw file root of the published registry.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/banavasi/adms-ui-registry/main/registry";

/// Name of the index manifest inside a registry root.
pub const INDEX_FILE: &str = "index.json";

/// Prefix marking a registry dependency as a shared lib entry.
pub const LIB_PREFIX: &str = "lib/";

/// Top-level registry manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryIndex {
    /// Registry name.
    #[serde(default)]
    pub name: String,
    /// Base URL the registry was published under.
    #[serde(default)]
    pub base_url: String,
    /// Shared lib entries, installed by `init`.
    #[serde(default)]
    pub lib: BTreeMap<String, LibEntry>,
    /// Shared style files, installed by `init`.
    #[serde(default)]
    pub styles: StylesEntry,
    /// Installable components keyed by registry key.
    #[serde(default)]
    pub components: BTreeMap<String, ComponentEntry>,
}

/// A shared lib entry: files plus the npm packages they need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibEntry {
    /// Registry-relative file paths.
    #[serde(default)]
    pub files: Vec<String>,
    /// npm package names.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Style files share the lib entry shape.
pub type StylesEntry = LibEntry;

/// An installable component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEntry {
    /// Display name, also the folder the files are written to.
    pub name: String,
    /// Registry-relative file paths in write order.
    #[serde(default)]
    pub files: Vec<String>,
    /// npm package names (unpinned).
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Other registry keys; `lib/<name>` for shared lib entries.
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
}

impl RegistryIndex {
    /// Every component key, in index order.
    pub fn component_keys(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }
}

/// Returns `true` for keys that name a shared lib entry (`lib/utils`).
pub fn is_lib_key(key: &str) -> bool {
    key.starts_with(LIB_PREFIX)
}

/// Read contract shared by every registry location.
pub trait Registry {
    /// Loads the registry index.
    async fn fetch_index(&self) -> Result<RegistryIndex>;

    /// Loads the content of a registry-relative file.
    async fn fetch_file(&self, path: &str) -> Result<String>;
}

/// The registry selected for this invocation.
#[derive(Debug, Clone)]
pub enum RegistrySource {
    /// A registry directory on disk.
    Local(LocalRegistry),
    /// A registry served over HTTP(S).
    Remote(RemoteRegistry),
}

impl RegistrySource {
    /// Selects the registry for `location`.
    ///
    /// An existing directory wins; an `http(s)://` location is fetched
    /// remotely; any other location is treated as a local path. Without a
    /// location the published registry is used.
    pub fn detect(location: Option<&str>) -> Self {
        match location {
            Some(location) if Path::new(location).is_dir() => {
                tracing::debug!("Using local registry at {}", location);
                RegistrySource::Local(LocalRegistry::new(location))
            }
            Some(location)
                if location.starts_with("http://") || location.starts_with("https://") =>
            {
                tracing::debug!("Using remote registry at {}", location);
                RegistrySource::Remote(RemoteRegistry::new(location))
            }
            Some(location) => RegistrySource::Local(LocalRegistry::new(location)),
            None => RegistrySource::Remote(RemoteRegistry::new(DEFAULT_REGISTRY_URL)),
        }
    }

    /// Human-readable location, for messages.
    pub fn location(&self) -> String {
        match self {
            RegistrySource::Local(local) => local.root().display().to_string(),
            RegistrySource::Remote(remote) => remote.base_url().to_string(),
        }
    }
}

impl Registry for RegistrySource {
    async fn fetch_index(&self) -> Result<RegistryIndex> {
        match self {
            RegistrySource::Local(local) => local.fetch_index().await,
            RegistrySource::Remote(remote) => remote.fetch_index().await,
        }
    }

    async fn fetch_file(&self, path: &str) -> Result<String> {
        match self {
            RegistrySource::Local(local) => local.fetch_file(path).await,
            RegistrySource::Remote(remote) => remote.fetch_file(path).await,
        }
    }
}
