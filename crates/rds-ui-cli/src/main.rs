// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use console::style;
use rds_ui_cli::commands;
use rds_ui_cli::commands::add::AddOptions;
use rds_ui_cli::commands::init::InitOptions;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adms-rds-ui")]
#[command(author = "ADMS")]
#[command(version)]
#[command(about = "Add ADMS RDS UI components to your Vue project", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Registry location: a local directory or an http(s) base URL
    #[arg(long, global = true, env = "RDS_UI_REGISTRY")]
    registry: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize ADMS RDS UI in your project
    Init {
        /// Skip prompts and use defaults
        #[arg(short, long)]
        yes: bool,
    },
    /// Add components to your project
    Add {
        /// Components to add (prompts when omitted)
        components: Vec<String>,
        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
        /// Overwrite existing files
        #[arg(short, long)]
        overwrite: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = cli.registry.as_deref();
    let result = match cli.command {
        Commands::Init { yes } => commands::init::run(InitOptions { yes }, registry).await,
        Commands::Add {
            components,
            yes,
            overwrite,
        } => commands::add::run(components, AddOptions { yes, overwrite }, registry).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("❌").red(), style(format!("{:#}", e)).red());
            ExitCode::FAILURE
        }
    }
}
