// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]
// Registry, prompt and runner capabilities are consumed through generics, never `dyn`.
#![allow(async_fn_in_trait)]

//! # RDS UI
//!
//! Registry resolution and file materialization for the ADMS RDS UI
//! component registry.
//!
//! A consumer project is initialized once (`rds-ui.json`, path aliases,
//! shared lib and style files). Afterwards, registry components are added by
//! resolving their dependency closure, rewriting their internal imports to the
//! consumer's aliases, writing them under the configured components directory
//! and installing their npm packages with the project's package manager.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rds_ui::{resolve, ImportTransformer, RdsConfig, Registry, RegistrySource};
//!
//! let registry = RegistrySource::detect(None);
//! let index = registry.fetch_index().await?;
//! let resolution = resolve(&index, &["button".to_string()])?;
//!
//! let config = RdsConfig::load(&project_root)?;
//! let transformer = ImportTransformer::new(&config);
//! let source = registry.fetch_file("button/Button.vue").await?;
//! let rewritten = transformer.transform(&source);
//! ```

/// Persisted consumer configuration (`rds-ui.json`).
pub mod config;
/// Error types.
pub mod error;
/// Writing registry files into the consumer project.
pub mod materialize;
/// Package manager detection and dependency installation.
pub mod package_manager;
/// Consumer build configuration (vite, tsconfig) alias merging.
pub mod project;
/// Interactive prompting capability.
pub mod prompt;
/// Registry index model and sources (local, remote, memory).
pub mod registry;
/// Dependency closure resolution.
pub mod resolver;
/// Import path rewriting.
pub mod transform;

pub use config::{RdsConfig, CONFIG_FILE};
pub use error::{RdsError, Result};
pub use materialize::{ConflictPolicy, FileOutcome, MaterializedFile, Materializer};
pub use package_manager::{CommandRunner, InstallOutcome, Installer, PackageManager, SystemRunner};
pub use prompt::{Choice, Prompter, ScriptedPrompter, TerminalPrompter};
pub use registry::{
    ComponentEntry, LibEntry, LocalRegistry, MemoryRegistry, Registry, RegistryIndex,
    RegistrySource, RemoteRegistry, StylesEntry,
};
pub use resolver::{resolve, Origin, Resolution, ResolvedComponent};
pub use transform::{rewrite_alias, ImportTransformer};
