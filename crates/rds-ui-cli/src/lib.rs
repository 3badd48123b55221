// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! ADMS RDS UI CLI library.
//!
//! This crate provides the command-line interface that adds ADMS RDS UI
//! components to a Vue project.
//!
//! # Usage
//!
//! This crate is primarily used through the `adms-rds-ui` binary:
//!
//! ```bash
//! adms-rds-ui init             # Configure the project, install shared files
//! adms-rds-ui add button       # Add a component and its dependencies
//! adms-rds-ui add -y -o label  # Re-add, replacing local copies
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `rds-ui.json` at the project root, written by
//! `init`.

/// CLI commands (init, add).
pub mod commands;
/// The capabilities a command runs against.
pub mod session;

pub use session::Session;
