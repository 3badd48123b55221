// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for registry resolution and materialization.
//!
//! This module defines [`RdsError`], the error enum returned by every
//! fallible operation in the crate.
//!
//! # Error Categories
//!
//! - **Configuration errors**: no `package.json`, no or invalid `rds-ui.json`
//! - **Registry errors**: index or file could not be fetched or parsed
//! - **Resolution errors**: unknown component, unknown dependency, cycle
//! - **I/O errors**: reading or writing consumer files
//!
//! Everything listed here aborts the current command. Conditions that only
//! degrade the result (a missing lib file, a failed `npm install`) are not
//! errors; they are reported through return values instead.

use thiserror::Error;

/// The main error type for RDS UI operations.
#[derive(Error, Debug)]
pub enum RdsError {
    /// The project root has no `package.json`.
    #[error("No package.json found in {0}. Run this in a project root.")]
    MissingProjectManifest(String),

    /// The project has not been initialized.
    #[error("rds-ui.json not found. Run `adms-rds-ui init` first.")]
    NotInitialized,

    /// `rds-ui.json` exists but violates an invariant.
    #[error("Invalid rds-ui.json: {0}")]
    InvalidConfig(String),

    /// The registry index could not be loaded.
    #[error("Failed to fetch registry: {0}")]
    RegistryUnavailable(String),

    /// A registry file could not be loaded.
    #[error("Failed to fetch {path}: {message}")]
    FetchFailed {
        /// Registry-relative path of the file.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// A requested component does not exist in the registry.
    #[error("Unknown component: {key}\nAvailable: {}", available.join(", "))]
    UnknownComponent {
        /// The requested key.
        key: String,
        /// Every component key the registry offers.
        available: Vec<String>,
    },

    /// A component declares a registry dependency that does not exist.
    #[error("Unknown registry dependency `{key}` required by `{required_by}`")]
    UnknownDependency {
        /// The missing dependency key.
        key: String,
        /// The component declaring it.
        required_by: String,
    },

    /// Component registry dependencies form a cycle.
    #[error("Circular registry dependency: {}", cycle.join(" -> "))]
    DependencyCycle {
        /// Keys along the cycle, first key repeated at the end.
        cycle: Vec<String>,
    },

    /// A consumer build configuration file could not be updated.
    #[error("Cannot update {file}: {message}")]
    ProjectConfig {
        /// The file being updated.
        file: String,
        /// Description of the failure.
        message: String,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Convenience type alias for Results with [`RdsError`].
pub type Result<T> = std::result::Result<T, RdsError>;
