// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the add command against an in-memory registry.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use rds_ui::{
    CommandRunner, ComponentEntry, FileOutcome, InstallOutcome, MemoryRegistry, RdsConfig,
    RdsError, RegistryIndex, ScriptedPrompter,
};
use rds_ui_cli::commands::add::{execute, AddOptions};
use rds_ui_cli::Session;

/// Records every command instead of running it.
#[derive(Clone, Default)]
struct RecordingRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
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
        Ok(true)
    }
}

fn component(name: &str, files: &[&str], deps: &[&str], registry_deps: &[&str]) -> ComponentEntry {
    ComponentEntry {
        name: name.to_string(),
        files: files.iter().map(|s| s.to_string()).collect(),
        dependencies: deps.iter().map(|s| s.to_string()).collect(),
        registry_dependencies: registry_deps.iter().map(|s| s.to_string()).collect(),
    }
}

/// Create an initialized project with a default `rds-ui.json`
fn setup_project(dir: &Path) {
    fs::write(dir.join("package.json"), "{}").unwrap();
    RdsConfig::default().save(dir).unwrap();
}

fn button_registry() -> MemoryRegistry {
    MemoryRegistry::new(RegistryIndex::default())
        .with_component(
            "button",
            component("Button", &["button/Button.vue", "button/index.ts"], &[], &["lib/util"]),
        )
        .with_file(
            "button/Button.vue",
            "<script setup lang=\"ts\">\nimport { cn } from \"@/lib/utils\";\n</script>\n",
        )
        .with_file("button/index.ts", "export { default as Button } from \"./Button.vue\";\n")
}

fn session(
    root: &Path,
    registry: MemoryRegistry,
    answers: &[&str],
) -> Session<MemoryRegistry, ScriptedPrompter, RecordingRunner> {
    Session::new(
        root,
        registry,
        ScriptedPrompter::new(answers.iter().copied()),
        RecordingRunner::default(),
    )
}

#[tokio::test]
async fn test_add_writes_files_and_warns_about_missing_lib() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let mut session = session(dir.path(), button_registry(), &[]);
    let report = execute(&mut session, vec!["button".to_string()], AddOptions::default())
        .await
        .unwrap();

    let button_dir = dir.path().join("src/components/ui/Button");
    assert!(button_dir.join("Button.vue").exists());
    assert!(button_dir.join("index.ts").exists());
    assert_eq!(report.files.len(), 2);
    assert!(report.files.iter().all(|f| f.outcome == FileOutcome::Written));

    let vue = fs::read_to_string(button_dir.join("Button.vue")).unwrap();
    assert!(vue.contains("from \"@/lib/utils\""));

    assert_eq!(report.missing_libs, vec!["lib/util"]);
    assert_eq!(report.install, InstallOutcome::Skipped);
    assert!(session.runner.calls().is_empty());
}

#[tokio::test]
async fn test_add_rewrites_imports_for_custom_aliases() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    RdsConfig {
        alias: "~".to_string(),
        components_alias: "@ui".to_string(),
        ..RdsConfig::default()
    }
    .save(dir.path())
    .unwrap();

    let registry = MemoryRegistry::new(RegistryIndex::default())
        .with_component("card", component("Card", &["card/Card.vue"], &[], &[]))
        .with_file(
            "card/Card.vue",
            "import { cn } from \"@/lib/utils\";\nimport { Button } from \"@/components/ui/Button\";\n",
        );

    let mut session = session(dir.path(), registry, &[]);
    execute(&mut session, vec!["card".to_string()], AddOptions::default())
        .await
        .unwrap();

    let card = fs::read_to_string(dir.path().join("src/components/ui/Card/Card.vue")).unwrap();
    assert!(card.contains("from \"~/lib/utils\""));
    assert!(card.contains("from \"@ui/Button\""));
}

#[tokio::test]
async fn test_add_installs_shared_dependencies_once() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();

    let registry = MemoryRegistry::new(RegistryIndex::default())
        .with_component("a", component("A", &["a/A.vue"], &["some-pkg"], &["lib/util"]))
        .with_component("b", component("B", &["b/B.vue"], &["some-pkg"], &["lib/util"]))
        .with_file("a/A.vue", "<template>a</template>")
        .with_file("b/B.vue", "<template>b</template>");

    let mut session = session(dir.path(), registry, &[]);
    let report = execute(
        &mut session,
        vec!["a".to_string(), "b".to_string()],
        AddOptions::default(),
    )
    .await
    .unwrap();

    let calls = session.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "pnpm");
    assert_eq!(calls[0].1, vec!["add", "some-pkg"]);
    assert!(matches!(report.install, InstallOutcome::Installed { .. }));
    assert_eq!(report.missing_libs, vec!["lib/util"]);
}

#[tokio::test]
async fn test_add_unknown_component_writes_nothing() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let mut session = session(dir.path(), button_registry(), &[]);
    let result = execute(
        &mut session,
        vec!["button".to_string(), "does-not-exist".to_string()],
        AddOptions::default(),
    )
    .await;

    match result {
        Err(RdsError::UnknownComponent { key, available }) => {
            assert_eq!(key, "does-not-exist");
            assert_eq!(available, vec!["button"]);
        }
        other => panic!("expected UnknownComponent, got {:?}", other.map(|r| r.files)),
    }
    assert!(!dir.path().join("src/components").exists());
    assert!(session.registry.fetched().is_empty());
}

#[tokio::test]
async fn test_add_rerun_with_yes_skips_existing_files() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let mut first = session(dir.path(), button_registry(), &[]);
    execute(&mut first, vec!["button".to_string()], AddOptions::default())
        .await
        .unwrap();

    let local = dir.path().join("src/components/ui/Button/Button.vue");
    fs::write(&local, "local edits").unwrap();

    let mut second = session(dir.path(), button_registry(), &[]);
    let options = AddOptions {
        yes: true,
        overwrite: false,
    };
    let report = execute(&mut second, vec!["button".to_string()], options)
        .await
        .unwrap();

    assert!(report.files.iter().all(|f| f.outcome == FileOutcome::Skipped));
    assert_eq!(fs::read_to_string(&local).unwrap(), "local edits");
    assert!(second.registry.fetched().is_empty());
    assert!(second.prompter.asked().is_empty());
}

#[tokio::test]
async fn test_add_overwrite_replaces_existing_files() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let local = dir.path().join("src/components/ui/Button/Button.vue");
    fs::create_dir_all(local.parent().unwrap()).unwrap();
    fs::write(&local, "local edits").unwrap();

    let mut session = session(dir.path(), button_registry(), &[]);
    let options = AddOptions {
        yes: true,
        overwrite: true,
    };
    execute(&mut session, vec!["button".to_string()], options)
        .await
        .unwrap();

    assert_ne!(fs::read_to_string(&local).unwrap(), "local edits");
}

#[tokio::test]
async fn test_add_prompts_per_existing_file() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let button_dir = dir.path().join("src/components/ui/Button");
    fs::create_dir_all(&button_dir).unwrap();
    fs::write(button_dir.join("Button.vue"), "local vue").unwrap();
    fs::write(button_dir.join("index.ts"), "local index").unwrap();

    let mut session = session(dir.path(), button_registry(), &["y", "n"]);
    let report = execute(&mut session, vec!["button".to_string()], AddOptions::default())
        .await
        .unwrap();

    assert_eq!(
        session.prompter.asked(),
        &[
            "Button.vue already exists. Overwrite?",
            "index.ts already exists. Overwrite?"
        ]
    );
    assert_eq!(report.files[0].outcome, FileOutcome::Written);
    assert_eq!(report.files[1].outcome, FileOutcome::Skipped);
    assert_eq!(fs::read_to_string(button_dir.join("index.ts")).unwrap(), "local index");
    assert_eq!(session.registry.fetched(), vec!["button/Button.vue"]);
}

#[tokio::test]
async fn test_add_materializes_dependencies_after_requested_without_prompting() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let registry = MemoryRegistry::new(RegistryIndex::default())
        .with_component(
            "radio-group",
            component("RadioGroup", &["radio-group/RadioGroup.vue"], &["reka-ui"], &["label"]),
        )
        .with_component("label", component("Label", &["label/Label.vue"], &["reka-ui"], &[]))
        .with_file("radio-group/RadioGroup.vue", "<template>radio</template>")
        .with_file("label/Label.vue", "<template>label</template>");

    // An existing dependency file is kept without asking
    let label = dir.path().join("src/components/ui/Label/Label.vue");
    fs::create_dir_all(label.parent().unwrap()).unwrap();
    fs::write(&label, "local label").unwrap();

    let mut session = session(dir.path(), registry, &[]);
    let report = execute(
        &mut session,
        vec!["radio-group".to_string()],
        AddOptions::default(),
    )
    .await
    .unwrap();

    let order: Vec<&str> = report
        .files
        .iter()
        .map(|f| f.relative_path.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "src/components/ui/RadioGroup/RadioGroup.vue",
            "src/components/ui/Label/Label.vue"
        ]
    );
    assert_eq!(report.files[1].outcome, FileOutcome::Skipped);
    assert!(session.prompter.asked().is_empty());
    assert_eq!(fs::read_to_string(&label).unwrap(), "local label");

    let calls = session.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, vec!["install", "reka-ui"]);
}

#[tokio::test]
async fn test_add_writes_shared_destination_once() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let registry = MemoryRegistry::new(RegistryIndex::default())
        .with_component("icon", component("Icon", &["icon/index.ts"], &[], &[]))
        .with_component("icon-alt", component("Icon", &["icon-alt/index.ts"], &[], &[]))
        .with_file("icon/index.ts", "export const icon = 1;")
        .with_file("icon-alt/index.ts", "export const icon = 2;");

    let mut session = session(dir.path(), registry, &[]);
    let report = execute(
        &mut session,
        vec!["icon".to_string(), "icon-alt".to_string()],
        AddOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].relative_path, "src/components/ui/Icon/index.ts");
    assert_eq!(report.files[0].outcome, FileOutcome::Written);
    assert!(session.prompter.asked().is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("src/components/ui/Icon/index.ts")).unwrap(),
        "export const icon = 1;"
    );
}

#[tokio::test]
async fn test_add_rejects_dependency_cycle_before_writing() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let registry = MemoryRegistry::new(RegistryIndex::default())
        .with_component("a", component("A", &["a/A.vue"], &[], &["b"]))
        .with_component("b", component("B", &["b/B.vue"], &[], &["a"]))
        .with_file("a/A.vue", "a")
        .with_file("b/B.vue", "b");

    let mut session = session(dir.path(), registry, &[]);
    let result = execute(&mut session, vec!["a".to_string()], AddOptions::default()).await;

    assert!(matches!(result, Err(RdsError::DependencyCycle { .. })));
    assert!(!dir.path().join("src/components").exists());
}

#[tokio::test]
async fn test_add_interactive_selection() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let registry = button_registry()
        .with_component("label", component("Label", &["label/Label.vue"], &[], &[]))
        .with_file("label/Label.vue", "<template>label</template>");

    let mut session = session(dir.path(), registry, &["Label"]);
    let report = execute(&mut session, vec![], AddOptions::default())
        .await
        .unwrap();

    assert_eq!(
        session.prompter.asked(),
        &["Which components would you like to add?"]
    );
    assert_eq!(report.files.len(), 1);
    assert!(dir.path().join("src/components/ui/Label/Label.vue").exists());
    assert!(!dir.path().join("src/components/ui/Button").exists());
}

#[tokio::test]
async fn test_add_nothing_selected_is_success() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let mut session = session(dir.path(), button_registry(), &[""]);
    let report = execute(&mut session, vec![], AddOptions::default())
        .await
        .unwrap();

    assert!(report.files.is_empty());
    assert!(report.resolution.components.is_empty());
    assert!(!dir.path().join("src/components").exists());
}

#[tokio::test]
async fn test_add_lib_only_request_writes_nothing() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let mut session = session(dir.path(), button_registry(), &[]);
    let report = execute(&mut session, vec!["lib/utils".to_string()], AddOptions::default())
        .await
        .unwrap();

    assert!(report.files.is_empty());
    assert_eq!(report.missing_libs, vec!["lib/utils"]);
    assert!(session.registry.fetched().is_empty());
}

#[tokio::test]
async fn test_add_existing_lib_is_not_reported() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    fs::create_dir_all(dir.path().join("src/lib")).unwrap();
    fs::write(dir.path().join("src/lib/util.ts"), "export {}").unwrap();

    let mut session = session(dir.path(), button_registry(), &[]);
    let report = execute(&mut session, vec!["button".to_string()], AddOptions::default())
        .await
        .unwrap();

    assert!(report.missing_libs.is_empty());
}

#[tokio::test]
async fn test_add_requires_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    let mut session = session(dir.path(), button_registry(), &[]);
    let result = execute(&mut session, vec!["button".to_string()], AddOptions::default()).await;

    assert!(matches!(result, Err(RdsError::NotInitialized)));
}
