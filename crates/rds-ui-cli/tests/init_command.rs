// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the init command against an in-memory registry.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use rds_ui::project::{TsConfigUpdate, ViteUpdate};
use rds_ui::{
    CommandRunner, InstallOutcome, LibEntry, MemoryRegistry, PackageManager, RdsConfig, RdsError,
    RegistryIndex, ScriptedPrompter,
};
use rds_ui_cli::commands::init::{execute, InitOptions, InitOutcome, InitReport};
use rds_ui_cli::Session;

#[derive(Clone, Default)]
struct RecordingRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    fail: bool,
}

impl RecordingRunner {
    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[String], _cwd: &Path) -> std::io::Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(!self.fail)
    }
}

fn lib_entry(files: &[&str], deps: &[&str]) -> LibEntry {
    LibEntry {
        files: files.iter().map(|s| s.to_string()).collect(),
        dependencies: deps.iter().map(|s| s.to_string()).collect(),
    }
}

fn registry() -> MemoryRegistry {
    MemoryRegistry::new(RegistryIndex::default())
        .with_lib(
            "utils",
            lib_entry(&["lib/utils.ts"], &["clsx", "tailwind-merge"]),
        )
        .with_styles(lib_entry(
            &["styles/styles.scss", "styles/tokens.scss"],
            &["sass", "clsx"],
        ))
        .with_file(
            "lib/utils.ts",
            "import type { ClassValue } from \"clsx\";\nimport { x } from \"@/lib/x\";\n",
        )
        .with_file("styles/styles.scss", "@use \"./tokens\";\n// @/ stays verbatim\n")
        .with_file("styles/tokens.scss", "$primary: #8c1d40;\n")
}

fn session(
    root: &Path,
    answers: &[&str],
) -> Session<MemoryRegistry, ScriptedPrompter, RecordingRunner> {
    Session::new(
        root,
        registry(),
        ScriptedPrompter::new(answers.iter().copied()),
        RecordingRunner::default(),
    )
}

fn initialized(outcome: InitOutcome) -> InitReport {
    match outcome {
        InitOutcome::Initialized(report) => *report,
        InitOutcome::Cancelled => panic!("init was cancelled"),
    }
}

#[tokio::test]
async fn test_init_with_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    fs::write(dir.path().join("yarn.lock"), "").unwrap();

    let mut session = session(dir.path(), &[]);
    let report = initialized(
        execute(&mut session, InitOptions { yes: true })
            .await
            .unwrap(),
    );

    assert_eq!(report.config, RdsConfig::default());
    assert_eq!(RdsConfig::load(dir.path()).unwrap(), RdsConfig::default());
    assert_eq!(report.package_manager, PackageManager::Yarn);
    assert!(session.prompter.asked().is_empty());

    assert!(dir.path().join("src/components/ui").is_dir());
    assert_eq!(report.vite, ViteUpdate::Created);
    assert_eq!(report.tsconfig, TsConfigUpdate::Created);
    let vite = fs::read_to_string(dir.path().join("vite.config.ts")).unwrap();
    assert!(vite.contains("\"@\": path.resolve(__dirname, \"./src\"),"));

    let utils = fs::read_to_string(dir.path().join("src/lib/utils.ts")).unwrap();
    assert!(utils.contains("from \"@/lib/x\""));
    let styles = fs::read_to_string(dir.path().join("src/styles/styles.scss")).unwrap();
    assert!(styles.contains("// @/ stays verbatim"));
    assert!(dir.path().join("src/styles/tokens.scss").exists());
    assert_eq!(report.files.len(), 3);

    assert_eq!(
        report.dependencies,
        vec!["clsx", "tailwind-merge", "sass", "reka-ui"]
    );
    let calls = session.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "yarn");
    assert_eq!(calls[0].1, vec!["add", "clsx", "tailwind-merge", "sass", "reka-ui"]);
    assert!(matches!(report.install, InstallOutcome::Installed { .. }));
}

#[tokio::test]
async fn test_init_requires_package_json() {
    let dir = tempdir().unwrap();

    let mut session = session(dir.path(), &[]);
    let result = execute(&mut session, InitOptions { yes: true }).await;

    assert!(matches!(result, Err(RdsError::MissingProjectManifest(_))));
    assert!(!RdsConfig::exists(dir.path()));
    assert!(!dir.path().join("src").exists());
}

#[tokio::test]
async fn test_init_declining_overwrite_cancels() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    let existing = RdsConfig {
        alias: "~".to_string(),
        ..RdsConfig::default()
    };
    existing.save(dir.path()).unwrap();

    let mut session = session(dir.path(), &["n"]);
    let outcome = execute(&mut session, InitOptions::default()).await.unwrap();

    assert!(matches!(outcome, InitOutcome::Cancelled));
    assert_eq!(
        session.prompter.asked(),
        &["rds-ui.json already exists. Overwrite?"]
    );
    assert_eq!(RdsConfig::load(dir.path()).unwrap(), existing);
    assert!(!dir.path().join("src").exists());
    assert!(session.runner.calls().is_empty());
}

#[tokio::test]
async fn test_init_with_answers() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    let mut session = session(dir.path(), &["src", "~", "src/ui", "@ui", "src/utils", ""]);
    let report = initialized(execute(&mut session, InitOptions::default()).await.unwrap());

    let expected = RdsConfig {
        alias: "~".to_string(),
        src_dir: "src".to_string(),
        components_dir: "src/ui".to_string(),
        components_alias: "@ui".to_string(),
        lib_dir: "src/utils".to_string(),
        styles_dir: "src/styles".to_string(),
    };
    assert_eq!(report.config, expected);
    assert_eq!(RdsConfig::load(dir.path()).unwrap(), expected);
    assert_eq!(session.prompter.asked().len(), 6);

    let utils = fs::read_to_string(dir.path().join("src/utils/utils.ts")).unwrap();
    assert!(utils.contains("from \"~/lib/x\""));

    let tsconfig = fs::read_to_string(dir.path().join("tsconfig.json")).unwrap();
    assert!(tsconfig.contains("\"~/*\""));
    assert!(tsconfig.contains("\"@ui/*\""));
    assert!(dir.path().join("src/ui").is_dir());
}

#[tokio::test]
async fn test_init_updates_existing_project_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    fs::write(
        dir.path().join("vite.config.ts"),
        "import { defineConfig } from \"vite\";\n\nexport default defineConfig({\n  plugins: [],\n});\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("tsconfig.json"),
        "{\n  // app settings\n  \"compilerOptions\": { \"strict\": true, \"paths\": { \"@/*\": [\"./app/*\"] } }\n}\n",
    )
    .unwrap();

    let mut session = session(dir.path(), &[]);
    let report = initialized(
        execute(&mut session, InitOptions { yes: true })
            .await
            .unwrap(),
    );

    assert_eq!(report.vite, ViteUpdate::Updated);
    let vite = fs::read_to_string(dir.path().join("vite.config.ts")).unwrap();
    assert!(vite.starts_with("import path from \"path\";\n"));
    assert!(vite.contains("\"@\": path.resolve(__dirname, \"./src\"),"));

    assert_eq!(
        report.tsconfig,
        TsConfigUpdate::Updated {
            files: vec!["tsconfig.json".to_string()]
        }
    );
    let tsconfig: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tsconfig.json")).unwrap())
            .unwrap();
    assert_eq!(tsconfig["compilerOptions"]["paths"]["@/*"][0], "./app/*");
    assert_eq!(tsconfig["compilerOptions"]["baseUrl"], ".");
    assert_eq!(tsconfig["compilerOptions"]["strict"], true);
}

#[tokio::test]
async fn test_init_failed_install_still_succeeds() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    let mut session = Session::new(
        dir.path(),
        registry(),
        ScriptedPrompter::default(),
        RecordingRunner {
            fail: true,
            ..RecordingRunner::default()
        },
    );
    let report = initialized(
        execute(&mut session, InitOptions { yes: true })
            .await
            .unwrap(),
    );

    assert!(matches!(report.install, InstallOutcome::Failed { .. }));
    assert!(RdsConfig::exists(dir.path()));
}
