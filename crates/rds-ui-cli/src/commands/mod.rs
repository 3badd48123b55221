// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `init`: Configure a project and install shared lib and style files
//! - `add`: Add registry components to a configured project
//!
//! Each command has a `run` entry point used by the binary and an `execute`
//! function generic over the [`Session`](crate::Session) capabilities.

/// Component installation command.
pub mod add;
/// Project initialization command.
pub mod init;

use indicatif::{ProgressBar, ProgressStyle};
use rds_ui::{Registry, RegistryIndex};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Fetches the registry index behind a spinner.
pub(crate) async fn fetch_registry<R: Registry>(registry: &R) -> rds_ui::Result<RegistryIndex> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching registry...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = registry.fetch_index().await;
    pb.finish_and_clear();

    if let Ok(index) = &result {
        tracing::info!(
            "Registry {} with {} components",
            index.name,
            index.components.len()
        );
    }
    result
}

/// Writes `content` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> rds_ui::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// The file name of a registry-relative path.
pub(crate) fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
