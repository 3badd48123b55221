// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Init command: configures a Vue project for registry components.

use super::{fetch_registry, file_name, write_file};
use crate::Session;
use console::style;
use rds_ui::project::{self, TsConfigUpdate, ViteUpdate};
use rds_ui::{
    rewrite_alias, CommandRunner, InstallOutcome, Installer, PackageManager, Prompter, RdsConfig,
    Registry, CONFIG_FILE,
};
use std::path::PathBuf;

/// npm package every project needs, on top of the lib and styles packages.
pub const BASE_DEPENDENCY: &str = "reka-ui";

/// Fallback styles entry point shown in the next steps.
const DEFAULT_STYLES_ENTRY: &str = "styles.scss";

/// Flags of the init command.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Use the default configuration without prompting.
    pub yes: bool,
}

/// What a completed init did.
#[derive(Debug, Clone)]
pub struct InitReport {
    /// The saved configuration.
    pub config: RdsConfig,
    /// Detected package manager.
    pub package_manager: PackageManager,
    /// What happened to `vite.config.ts`.
    pub vite: ViteUpdate,
    /// What happened to `tsconfig.json`.
    pub tsconfig: TsConfigUpdate,
    /// Lib and style files written.
    pub files: Vec<PathBuf>,
    /// npm packages requested, deduplicated.
    pub dependencies: Vec<String>,
    /// npm installation result.
    pub install: InstallOutcome,
}

/// Result of an init run.
#[derive(Debug, Clone)]
pub enum InitOutcome {
    /// The project was configured.
    Initialized(Box<InitReport>),
    /// The user declined to overwrite an existing `rds-ui.json`.
    Cancelled,
}

/// Runs the init command in the current directory.
pub async fn run(options: InitOptions, registry: Option<&str>) -> anyhow::Result<()> {
    let mut session = Session::from_env(registry)?;
    execute(&mut session, options).await?;
    Ok(())
}

/// Initializes the project at the session root.
pub async fn execute<R, P, C>(
    session: &mut Session<R, P, C>,
    options: InitOptions,
) -> rds_ui::Result<InitOutcome>
where
    R: Registry,
    P: Prompter,
    C: CommandRunner,
{
    println!();
    println!("{}", style("🚀 Initializing ADMS RDS UI...").cyan());
    println!();

    project::ensure_project_root(&session.root)?;

    let package_manager = PackageManager::detect(&session.root);
    println!("{}", style(format!("Detected package manager: {}", package_manager)).dim());
    println!();

    if RdsConfig::exists(&session.root) && !options.yes {
        let overwrite = session
            .prompter
            .confirm(&format!("{} already exists. Overwrite?", CONFIG_FILE), false)?;
        if !overwrite {
            println!("{}", style("Cancelled.").dim());
            return Ok(InitOutcome::Cancelled);
        }
    }

    let config = if options.yes {
        RdsConfig::default()
    } else {
        ask_config(&mut session.prompter)?
    };
    config.validate()?;
    tracing::debug!("Using configuration {:?}", config);

    project::create_directories(&session.root, &config)?;
    println!("{} Created directories", style("✓").green());

    let vite = project::update_vite_config(&session.root, &config)?;
    match vite {
        ViteUpdate::Created => {
            println!("{} Created {}", style("✓").green(), project::VITE_CONFIG)
        }
        ViteUpdate::AlreadyConfigured => println!(
            "{}",
            style(format!("  {} already has alias configured", project::VITE_CONFIG)).dim()
        ),
        ViteUpdate::Updated => println!(
            "{} Updated {} with alias",
            style("✓").green(),
            project::VITE_CONFIG
        ),
        ViteUpdate::Unrecognized => {
            tracing::warn!("No defineConfig call found in {}", project::VITE_CONFIG);
            println!(
                "{}",
                style(format!(
                    "⚠ Could not find where to add the alias in {}. You may need to add it manually.",
                    project::VITE_CONFIG
                ))
                .yellow()
            );
        }
    }

    let tsconfig = project::update_tsconfig(&session.root, &config)?;
    match &tsconfig {
        TsConfigUpdate::Created => {
            println!("{} Created {}", style("✓").green(), project::TSCONFIG)
        }
        TsConfigUpdate::Updated { files } => {
            for file in files {
                println!("{} Updated {} with paths", style("✓").green(), file);
            }
        }
        TsConfigUpdate::NoAppConfig => println!(
            "{}",
            style("⚠ Could not find app tsconfig to update. You may need to add paths manually.")
                .yellow()
        ),
    }

    println!();
    let index = fetch_registry(&session.registry).await?;
    let mut files = Vec::new();
    let mut dependencies: Vec<String> = Vec::new();

    for (key, lib) in &index.lib {
        tracing::debug!("Installing lib entry {}", key);
        for file in &lib.files {
            let content = session.registry.fetch_file(file).await?;
            let content = rewrite_alias(&content, &config.alias);
            let name = file_name(file);
            let path = session.root.join(&config.lib_dir).join(&name);
            write_file(&path, &content)?;
            println!("{} Created {}/{}", style("✓").green(), config.lib_dir, name);
            files.push(path);
        }
        extend_unique(&mut dependencies, &lib.dependencies);
    }

    for file in &index.styles.files {
        let content = session.registry.fetch_file(file).await?;
        let name = file_name(file);
        let path = session.root.join(&config.styles_dir).join(&name);
        write_file(&path, &content)?;
        println!("{} Created {}/{}", style("✓").green(), config.styles_dir, name);
        files.push(path);
    }
    extend_unique(&mut dependencies, &index.styles.dependencies);
    extend_unique(&mut dependencies, &[BASE_DEPENDENCY.to_string()]);

    config.save(&session.root)?;
    println!("{} Created {}", style("✓").green(), CONFIG_FILE);

    println!();
    println!("{}", style("📦 Installing dependencies...").cyan());
    println!();
    let installer = Installer::new(package_manager, &session.runner);
    let install = installer.install(&session.root, &dependencies, false).await;
    if matches!(install, InstallOutcome::Installed { .. }) {
        println!();
        println!("{} Dependencies installed", style("✓").green());
    }

    let styles_entry = index
        .styles
        .files
        .first()
        .map(|f| file_name(f))
        .unwrap_or_else(|| DEFAULT_STYLES_ENTRY.to_string());

    println!();
    println!("{}", style("✅ ADMS RDS UI initialized!").cyan());
    println!();
    println!("Next steps:");
    println!("{}", style("  1. Import styles in your main.ts:").dim());
    println!(
        "     import \"{}/{}/{}\";",
        config.alias,
        config.styles_path(),
        styles_entry
    );
    println!("{}", style("  2. Add a component:").dim());
    println!("     adms-rds-ui add button");
    println!();

    Ok(InitOutcome::Initialized(Box::new(InitReport {
        config,
        package_manager,
        vite,
        tsconfig,
        files,
        dependencies,
        install,
    })))
}

/// Asks for every configuration value, offering the defaults.
fn ask_config<P: Prompter>(prompter: &mut P) -> rds_ui::Result<RdsConfig> {
    let defaults = RdsConfig::default();

    let src_dir = prompter.input("Where is your src directory?", &defaults.src_dir)?;
    let alias = prompter.input("What alias do you use for src imports?", &defaults.alias)?;
    let components_dir =
        prompter.input("Where should components be installed?", &defaults.components_dir)?;
    let components_alias = prompter.input(
        "What alias for components? (leave empty to use main alias)",
        &defaults.components_alias,
    )?;
    let lib_dir = prompter.input("Where should lib/utils.ts go?", &defaults.lib_dir)?;
    let styles_dir = prompter.input("Where should styles/tokens go?", &defaults.styles_dir)?;

    Ok(RdsConfig {
        alias: alias.trim().to_string(),
        src_dir: src_dir.trim().to_string(),
        components_dir: components_dir.trim().to_string(),
        components_alias: components_alias.trim().to_string(),
        lib_dir: lib_dir.trim().to_string(),
        styles_dir: styles_dir.trim().to_string(),
    })
}

fn extend_unique(list: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !list.contains(value) {
            list.push(value.clone());
        }
    }
}
