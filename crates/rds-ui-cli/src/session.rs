// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use rds_ui::{RegistrySource, SystemRunner, TerminalPrompter};
use std::path::PathBuf;

/// Everything a command touches outside its own logic: the project root,
/// where registry files come from, who answers questions, and how external
/// commands run.
pub struct Session<R, P, C> {
    /// Consumer project root.
    pub root: PathBuf,
    /// Registry to read from.
    pub registry: R,
    /// Answers interactive questions.
    pub prompter: P,
    /// Runs the package manager.
    pub runner: C,
}

impl<R, P, C> Session<R, P, C> {
    /// Creates a session from its parts.
    pub fn new(root: impl Into<PathBuf>, registry: R, prompter: P, runner: C) -> Self {
        Self {
            root: root.into(),
            registry,
            prompter,
            runner,
        }
    }
}

impl Session<RegistrySource, TerminalPrompter, SystemRunner> {
    /// The session for a real invocation: current directory, detected
    /// registry, terminal prompts, child processes.
    pub fn from_env(registry: Option<&str>) -> anyhow::Result<Self> {
        let root = std::env::current_dir()?;
        let registry = RegistrySource::detect(registry);
        tracing::debug!("Project root {}, registry {}", root.display(), registry.location());
        Ok(Self::new(root, registry, TerminalPrompter::new(), SystemRunner))
    }
}
