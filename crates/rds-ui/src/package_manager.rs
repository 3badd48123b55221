// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Package manager detection and npm dependency installation.
//!
//! Installation is best-effort: by the time it runs the component files are
//! already on disk, so a failing install is reported together with the
//! command to run by hand instead of failing the command.

use console::style;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Package managers a consumer project may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// pnpm
    Pnpm,
    /// Yarn
    Yarn,
    /// Bun
    Bun,
    /// npm
    Npm,
}

/// Lockfiles checked in priority order; the first one present wins.
const LOCKFILES: [(&str, PackageManager); 4] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Returns the executable name for this package manager.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
            PackageManager::Npm => "npm",
        }
    }

    /// Detects the package manager of the project at `dir` from its lockfile,
    /// defaulting to npm.
    pub fn detect(dir: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| dir.join(lockfile).exists())
            .map(|(_, manager)| *manager)
            .unwrap_or(PackageManager::Npm)
    }

    /// Arguments of the "add dependency" invocation, without the executable.
    pub fn install_args(&self, deps: &[String], dev: bool) -> Vec<String> {
        let mut args = vec![match self {
            PackageManager::Npm => "install".to_string(),
            _ => "add".to_string(),
        }];

        if dev {
            args.push(match self {
                PackageManager::Npm => "--save-dev".to_string(),
                _ => "-D".to_string(),
            });
        }

        args.extend(deps.iter().cloned());
        args
    }

    /// The full install command line, as shown to users.
    pub fn install_command(&self, deps: &[String], dev: bool) -> String {
        let mut parts = vec![self.as_str().to_string()];
        parts.extend(self.install_args(deps, dev));
        parts.join(" ")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            "npm" => Ok(PackageManager::Npm),
            _ => Err(format!("Unknown package manager: {}", s)),
        }
    }
}

/// Runs external commands.
pub trait CommandRunner {
    /// Runs `program` with `args` in `cwd`; `Ok(true)` on a zero exit status.
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> std::io::Result<bool>;
}

impl<T: CommandRunner> CommandRunner for &T {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> std::io::Result<bool> {
        (**self).run(program, args, cwd).await
    }
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> std::io::Result<bool> {
        // Package managers ship as .cmd shims on Windows
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(program);
            cmd
        } else {
            Command::new(program)
        };

        let status = cmd
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        Ok(status.success())
    }
}

/// Result of an install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing to install.
    Skipped,
    /// The package manager exited successfully.
    Installed {
        /// The command that ran.
        command: String,
    },
    /// The package manager failed or could not be started.
    Failed {
        /// The command to run manually.
        command: String,
    },
}

/// Installs npm packages with a project's package manager.
#[derive(Debug, Clone)]
pub struct Installer<C> {
    manager: PackageManager,
    runner: C,
}

impl<C: CommandRunner> Installer<C> {
    /// Creates an installer for `manager`, running commands through `runner`.
    pub fn new(manager: PackageManager, runner: C) -> Self {
        Self { manager, runner }
    }

    /// The package manager in use.
    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    /// Installs `deps` in the project at `cwd`. Never fails; see [`InstallOutcome`].
    pub async fn install(&self, cwd: &Path, deps: &[String], dev: bool) -> InstallOutcome {
        if deps.is_empty() {
            return InstallOutcome::Skipped;
        }

        let command = self.manager.install_command(deps, dev);
        let args = self.manager.install_args(deps, dev);

        println!(
            "{}",
            style(format!("Installing dependencies with {}...", self.manager)).dim()
        );
        println!("{}", style(format!("$ {}", command)).dim());
        println!();

        match self.runner.run(self.manager.as_str(), &args, cwd).await {
            Ok(true) => InstallOutcome::Installed { command },
            Ok(false) => {
                tracing::warn!("{} exited with a non-zero status", self.manager);
                report_failure(&command);
                InstallOutcome::Failed { command }
            }
            Err(e) => {
                tracing::warn!("Failed to start {}: {}", self.manager, e);
                report_failure(&command);
                InstallOutcome::Failed { command }
            }
        }
    }
}

fn report_failure(command: &str) {
    println!();
    println!("{} {}", style("✗").red(), style("Failed to install dependencies").red());
    println!("{}", style(format!("Run manually: {}", command)).dim());
}
