// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Writing registry files into a consumer project.
//!
//! Each file of a component lands in
//! `{componentsDir}/{component name}/{file name}`. When the destination
//! already exists, the [`ConflictPolicy`] decides:
//!
//! | destination | `overwrite` | `yes` | result                 |
//! |-------------|-------------|-------|------------------------|
//! | missing     | any         | any   | written                |
//! | exists      | true        | any   | written (replaced)     |
//! | exists      | false       | true  | skipped                |
//! | exists      | false       | false | ask; yes writes, no skips |
//!
//! A file is only fetched from the registry once it is going to be written.
//! Within one [`Materializer`], each destination is handled once; later
//! entries mapping to the same path are dropped.

use crate::config::RdsConfig;
use crate::error::{RdsError, Result};
use crate::prompt::Prompter;
use crate::registry::{ComponentEntry, Registry, LIB_PREFIX};
use crate::transform::ImportTransformer;
use console::style;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// How existing destination files are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictPolicy {
    /// Never prompt; existing files are skipped unless `overwrite` is set.
    pub yes: bool,
    /// Replace existing files without prompting.
    pub overwrite: bool,
}

impl ConflictPolicy {
    /// Creates a policy from the `--yes` and `--overwrite` flags.
    pub fn new(yes: bool, overwrite: bool) -> Self {
        Self { yes, overwrite }
    }

    /// The same policy with prompting disabled.
    pub fn assume_yes(self) -> Self {
        Self { yes: true, ..self }
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content written (new file or replaced).
    Written,
    /// Existing file left untouched.
    Skipped,
}

/// A file handled by the materializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedFile {
    /// Absolute destination path.
    pub path: PathBuf,
    /// Destination relative to the project root, `/`-separated.
    pub relative_path: String,
    /// What happened to it.
    pub outcome: FileOutcome,
}

/// Resolves a conflict for one destination file.
pub fn decide<P: Prompter>(
    exists: bool,
    file_name: &str,
    policy: ConflictPolicy,
    prompter: &mut P,
) -> Result<FileOutcome> {
    if !exists || policy.overwrite {
        return Ok(FileOutcome::Written);
    }
    if policy.yes {
        return Ok(FileOutcome::Skipped);
    }

    let overwrite = prompter.confirm(&format!("{} already exists. Overwrite?", file_name), false)?;
    Ok(if overwrite {
        FileOutcome::Written
    } else {
        FileOutcome::Skipped
    })
}

/// Writes components of a registry into a project.
pub struct Materializer<'a, R> {
    registry: &'a R,
    root: &'a Path,
    config: &'a RdsConfig,
    transformer: ImportTransformer,
    handled: HashSet<PathBuf>,
}

impl<'a, R: Registry> Materializer<'a, R> {
    /// Creates a materializer writing into the project at `root`.
    pub fn new(registry: &'a R, root: &'a Path, config: &'a RdsConfig) -> Self {
        Self {
            registry,
            root,
            config,
            transformer: ImportTransformer::new(config),
            handled: HashSet::new(),
        }
    }

    /// Destination of `file` for `entry`: absolute path and display path.
    pub fn destination(&self, entry: &ComponentEntry, file: &str) -> Result<(PathBuf, String)> {
        let file_name = Path::new(file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RdsError::FetchFailed {
                path: file.to_string(),
                message: "registry path does not name a file".to_string(),
            })?;

        let components_dir = self.config.components_dir.trim_end_matches('/');
        let path = self
            .root
            .join(components_dir)
            .join(&entry.name)
            .join(&file_name);
        let relative_path = format!("{}/{}/{}", components_dir, entry.name, file_name);
        Ok((path, relative_path))
    }

    /// Materializes every file of `entry`, in declared order.
    ///
    /// Destinations already handled by this materializer are left out of
    /// the result.
    pub async fn materialize<P: Prompter>(
        &mut self,
        entry: &ComponentEntry,
        policy: ConflictPolicy,
        prompter: &mut P,
    ) -> Result<Vec<MaterializedFile>> {
        let mut results = Vec::with_capacity(entry.files.len());

        for file in &entry.files {
            let (path, relative_path) = self.destination(entry, file)?;
            if !self.handled.insert(path.clone()) {
                tracing::debug!("{} already handled, dropping {}", relative_path, file);
                continue;
            }
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let outcome = decide(path.exists(), &file_name, policy, prompter)?;
            match outcome {
                FileOutcome::Skipped => {
                    if policy.yes {
                        println!("  {}", style(format!("Skipped {} (use --overwrite)", relative_path)).dim());
                    } else {
                        println!("  {}", style(format!("Skipped {}", relative_path)).dim());
                    }
                }
                FileOutcome::Written => {
                    let content = self.registry.fetch_file(file).await?;
                    let content = self.transformer.transform(&content);

                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&path, content)?;
                    tracing::debug!("Wrote {}", path.display());
                    println!("{} Created {}", style("✓").green(), relative_path);
                }
            }

            results.push(MaterializedFile {
                path,
                relative_path,
                outcome,
            });
        }

        Ok(results)
    }
}

/// Where the file of a `lib/<name>` entry is expected: `{libDir}/<name>.ts`.
pub fn lib_file_path(root: &Path, config: &RdsConfig, key: &str) -> PathBuf {
    let name = key.strip_prefix(LIB_PREFIX).unwrap_or(key);
    root.join(&config.lib_dir).join(format!("{}.ts", name))
}

/// The `lib/` keys whose files are absent from the project.
pub fn missing_libs(root: &Path, config: &RdsConfig, lib_keys: &[String]) -> Vec<String> {
    lib_keys
        .iter()
        .filter(|key| !lib_file_path(root, config, key).exists())
        .cloned()
        .collect()
}
