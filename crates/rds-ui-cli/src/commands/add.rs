// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Add command: materializes registry components into the project.
//!
//! The request is resolved completely before anything is written, so an
//! unknown component, an unknown dependency or a dependency cycle leaves the
//! project untouched. Requested components are written first with the
//! caller's conflict policy; their component dependencies follow without
//! prompting. npm packages of every written component are installed in a
//! single package manager invocation.

use super::fetch_registry;
use crate::Session;
use console::style;
use rds_ui::materialize::missing_libs;
use rds_ui::{
    resolve, Choice, CommandRunner, ConflictPolicy, InstallOutcome, Installer, MaterializedFile,
    Materializer, PackageManager, Prompter, RdsConfig, Registry, Resolution,
};

/// Flags of the add command.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Skip prompts; existing files are kept unless `overwrite` is set.
    pub yes: bool,
    /// Replace existing files.
    pub overwrite: bool,
}

/// What an add run did.
#[derive(Debug, Clone)]
pub struct AddReport {
    /// The expanded request (empty if nothing was selected).
    pub resolution: Resolution,
    /// Every file handled, in write order.
    pub files: Vec<MaterializedFile>,
    /// `lib/` entries absent from the project.
    pub missing_libs: Vec<String>,
    /// npm installation result.
    pub install: InstallOutcome,
}

impl Default for AddReport {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            files: Vec::new(),
            missing_libs: Vec::new(),
            install: InstallOutcome::Skipped,
        }
    }
}

/// Runs the add command in the current directory.
pub async fn run(
    components: Vec<String>,
    options: AddOptions,
    registry: Option<&str>,
) -> anyhow::Result<()> {
    let mut session = Session::from_env(registry)?;
    execute(&mut session, components, options).await?;
    Ok(())
}

/// Adds `components` (or an interactive selection) to the session's project.
pub async fn execute<R, P, C>(
    session: &mut Session<R, P, C>,
    components: Vec<String>,
    options: AddOptions,
) -> rds_ui::Result<AddReport>
where
    R: Registry,
    P: Prompter,
    C: CommandRunner,
{
    let config = RdsConfig::load(&session.root)?;
    let index = fetch_registry(&session.registry).await?;

    let components = if components.is_empty() {
        let choices: Vec<Choice> = index
            .components
            .iter()
            .map(|(key, entry)| Choice::new(&entry.name, key))
            .collect();
        session
            .prompter
            .multi_select("Which components would you like to add?", &choices)?
    } else {
        components
    };

    if components.is_empty() {
        println!("{}", style("No components selected.").dim());
        return Ok(AddReport::default());
    }

    let resolution = resolve(&index, &components)?;
    let mut report = AddReport::default();

    if resolution.is_lib_only() {
        report.missing_libs = warn_missing_libs(session, &config, &resolution.lib_deps);
        println!(
            "{}",
            style("Lib dependencies are installed via `adms-rds-ui init`.").dim()
        );
        report.resolution = resolution;
        return Ok(report);
    }

    let policy = ConflictPolicy::new(options.yes, options.overwrite);
    let mut materializer = Materializer::new(&session.registry, &session.root, &config);

    for component in resolution.requested() {
        println!();
        println!("{}", style(format!("Adding {}...", component.entry.name)).cyan());
        println!();
        let files = materializer
            .materialize(&component.entry, policy, &mut session.prompter)
            .await?;
        report.files.extend(files);
    }

    report.missing_libs = missing_libs(&session.root, &config, &resolution.lib_deps);
    for lib in &report.missing_libs {
        println!();
        println!(
            "{}",
            style(format!("⚠ Missing {}. Run `adms-rds-ui init` to install it.", lib)).yellow()
        );
    }

    if resolution.dependencies().next().is_some() {
        println!();
        println!(
            "{}",
            style("⚠ Installing required component dependencies...").yellow()
        );
        for component in resolution.dependencies() {
            println!();
            println!("{}", style(format!("Adding {}...", component.entry.name)).cyan());
            println!();
            let files = materializer
                .materialize(&component.entry, policy.assume_yes(), &mut session.prompter)
                .await?;
            report.files.extend(files);
        }
    }

    if !resolution.npm_deps.is_empty() {
        println!();
        println!("{}", style("Installing dependencies...").cyan());
        println!();
        let installer = Installer::new(PackageManager::detect(&session.root), &session.runner);
        report.install = installer
            .install(&session.root, &resolution.npm_deps, false)
            .await;
    }

    println!();
    println!("{}", style("✓ Done!").green());
    println!();
    println!("Usage:");
    for component in resolution.requested() {
        println!(
            "  import {{ {} }} from \"{}\";",
            component.entry.name,
            usage_path(&config, &component.entry.name)
        );
    }
    println!();

    report.resolution = resolution;
    Ok(report)
}

fn warn_missing_libs<R, P, C>(
    session: &Session<R, P, C>,
    config: &RdsConfig,
    lib_keys: &[String],
) -> Vec<String> {
    let missing = missing_libs(&session.root, config, lib_keys);
    for lib in &missing {
        println!(
            "{}",
            style(format!("⚠ Missing {}. Run `adms-rds-ui init` to install it.", lib)).yellow()
        );
    }
    missing
}

/// Import path of a materialized component, e.g. `@/components/ui/Button`.
pub fn usage_path(config: &RdsConfig, name: &str) -> String {
    match config.components_alias() {
        Some(alias) => format!("{}/{}", alias, name),
        None => format!("{}/{}/{}", config.alias, config.components_path(), name),
    }
}
