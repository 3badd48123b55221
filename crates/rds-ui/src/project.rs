// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Consumer build configuration.
//!
//! `init` makes the consumer's bundler (`vite.config.ts`) and type checker
//! (`tsconfig.json`) understand the configured aliases. Missing files are
//! created from defaults; existing files are edited in place, adding only
//! what is missing.

use crate::config::RdsConfig;
use crate::error::{RdsError, Result};
use include_dir::{include_dir, Dir};
use regex::{Captures, Regex};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Bundler config file name.
pub const VITE_CONFIG: &str = "vite.config.ts";
/// Type checker config file name.
pub const TSCONFIG: &str = "tsconfig.json";
/// npm manifest marking a project root.
pub const PACKAGE_JSON: &str = "package.json";

/// What happened to `vite.config.ts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViteUpdate {
    /// Created from the template.
    Created,
    /// Already declares every alias; left untouched.
    AlreadyConfigured,
    /// Alias entries inserted.
    Updated,
    /// No `defineConfig({` to insert into; left untouched.
    Unrecognized,
}

/// What happened to `tsconfig.json` and its referenced configs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsConfigUpdate {
    /// Created with default compiler options.
    Created,
    /// Paths merged into the listed files (root config last).
    Updated {
        /// File names, relative to the project root.
        files: Vec<String>,
    },
    /// Root uses project references, but none of them covers the sources.
    /// The root config was still updated.
    NoAppConfig,
}

/// Fails unless `root` contains a `package.json`.
pub fn ensure_project_root(root: &Path) -> Result<()> {
    if root.join(PACKAGE_JSON).exists() {
        Ok(())
    } else {
        Err(RdsError::MissingProjectManifest(root.display().to_string()))
    }
}

/// Creates the components, lib and styles directories.
pub fn create_directories(root: &Path, config: &RdsConfig) -> Result<()> {
    for dir in [&config.components_dir, &config.lib_dir, &config.styles_dir] {
        fs::create_dir_all(root.join(dir))?;
    }
    Ok(())
}

/// Alias → directory pairs for the bundler, e.g. `("@", "./src")`.
pub fn vite_aliases(config: &RdsConfig) -> Vec<(String, String)> {
    let mut aliases = vec![(config.alias.clone(), format!("./{}", config.src_dir))];
    if let Some(alias) = config.components_alias() {
        aliases.push((alias.to_string(), format!("./{}", config.components_dir)));
    }
    aliases
}

fn alias_lines(aliases: &[(String, String)]) -> String {
    aliases
        .iter()
        .map(|(key, dir)| format!("      \"{}\": path.resolve(__dirname, \"{}\"),", key, dir))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns `true` if `content` already declares `key` as an object key,
/// single- or double-quoted.
pub fn has_alias_key(content: &str, key: &str) -> bool {
    Regex::new(&format!(r#"["']{}["']\s*:"#, regex::escape(key)))
        .is_ok_and(|re| re.is_match(content))
}

/// The entries of [`vite_aliases`] that `content` does not declare yet.
pub fn missing_vite_aliases(content: &str, config: &RdsConfig) -> Vec<(String, String)> {
    vite_aliases(config)
        .into_iter()
        .filter(|(key, _)| !has_alias_key(content, key))
        .collect()
}

/// Renders a fresh `vite.config.ts` for `config`.
pub fn render_vite_config(config: &RdsConfig) -> Result<String> {
    let template = TEMPLATES
        .get_file("vite.config.ts.tmpl")
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| RdsError::ProjectConfig {
            file: VITE_CONFIG.to_string(),
            message: "embedded template missing".to_string(),
        })?;
    Ok(template.replace("{{aliases}}", &alias_lines(&vite_aliases(config))))
}

/// Inserts the missing alias entries into existing `vite.config.ts` source.
///
/// Returns `None` when every alias is already present or there is nowhere
/// to insert them.
pub fn merge_vite_config(content: &str, config: &RdsConfig) -> Option<String> {
    let missing = missing_vite_aliases(content, config);
    if missing.is_empty() {
        return None;
    }

    let lines = alias_lines(&missing);
    let alias_re = Regex::new(r"(alias:\s*\{)").unwrap();
    let resolve_re = Regex::new(r"(resolve:\s*\{)").unwrap();
    let define_re = Regex::new(r"(defineConfig\(\s*)\{").unwrap();

    let merged = if content.contains("resolve:") && alias_re.is_match(content) {
        alias_re
            .replacen(content, 1, |caps: &Captures| format!("{}\n{}", &caps[1], lines))
            .into_owned()
    } else if resolve_re.is_match(content) {
        resolve_re
            .replacen(content, 1, |caps: &Captures| {
                format!("{}\n    alias: {{\n{}\n    }},", &caps[1], lines)
            })
            .into_owned()
    } else if define_re.is_match(content) {
        define_re
            .replacen(content, 1, |caps: &Captures| {
                format!(
                    "{}{{\n  resolve: {{\n    alias: {{\n{}\n    }},\n  }},",
                    &caps[1], lines
                )
            })
            .into_owned()
    } else {
        return None;
    };

    if merged.contains("import path from \"path\"") || merged.contains("import path from 'path'") {
        Some(merged)
    } else {
        Some(format!("import path from \"path\";\n{}", merged))
    }
}

/// Creates or updates `vite.config.ts` in `root`.
pub fn update_vite_config(root: &Path, config: &RdsConfig) -> Result<ViteUpdate> {
    let path = root.join(VITE_CONFIG);

    if !path.exists() {
        fs::write(&path, render_vite_config(config)?)?;
        return Ok(ViteUpdate::Created);
    }

    let content = fs::read_to_string(&path)?;
    if missing_vite_aliases(&content, config).is_empty() {
        return Ok(ViteUpdate::AlreadyConfigured);
    }

    match merge_vite_config(&content, config) {
        Some(merged) => {
            fs::write(&path, merged)?;
            Ok(ViteUpdate::Updated)
        }
        None => Ok(ViteUpdate::Unrecognized),
    }
}

/// `compilerOptions.paths` entries for `config`.
pub fn tsconfig_paths(config: &RdsConfig) -> Map<String, Value> {
    let mut paths = Map::new();
    paths.insert(
        format!("{}/*", config.alias),
        json!([format!("./{}/*", config.src_dir)]),
    );
    if let Some(alias) = config.components_alias() {
        paths.insert(
            format!("{}/*", alias),
            json!([format!("./{}/*", config.components_dir)]),
        );
    }
    paths
}

/// Adds the entries of `new_paths` whose keys `existing` does not have yet.
pub fn merge_paths(existing: Option<&Value>, new_paths: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = existing
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    for (key, value) in new_paths {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Removes `//` and `/* */` comments outside of string literals.
///
/// tsconfig files are JSONC; comments are common in generated projects.
pub fn strip_json_comments(content: &str) -> String {
    let mut output = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            output.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    output.push(escaped);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                output.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        output.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => output.push(c),
        }
    }

    output
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&strip_json_comments(&content)).map_err(|e| RdsError::ProjectConfig {
        file: file_label(path),
        message: e.to_string(),
    })
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn compiler_options<'v>(tsconfig: &'v mut Value, file: &Path) -> Result<&'v mut Map<String, Value>> {
    let root = tsconfig.as_object_mut().ok_or_else(|| RdsError::ProjectConfig {
        file: file_label(file),
        message: "expected a JSON object".to_string(),
    })?;

    let options = root
        .entry("compilerOptions")
        .or_insert_with(|| Value::Object(Map::new()));
    if !options.is_object() {
        *options = Value::Object(Map::new());
    }
    options.as_object_mut().ok_or_else(|| RdsError::ProjectConfig {
        file: file_label(file),
        message: "compilerOptions is not an object".to_string(),
    })
}

/// Merges `paths` into a tsconfig value. `force_base_url` sets `baseUrl` to
/// `.` even if one is present.
fn apply_paths(tsconfig: &mut Value, file: &Path, paths: &Map<String, Value>, force_base_url: bool) -> Result<()> {
    let options = compiler_options(tsconfig, file)?;
    if force_base_url || !options.contains_key("baseUrl") {
        options.insert("baseUrl".to_string(), json!("."));
    }
    let merged = merge_paths(options.get("paths"), paths);
    options.insert("paths".to_string(), Value::Object(merged));
    Ok(())
}

fn uses_project_references(tsconfig: &Value) -> bool {
    let has_references = tsconfig
        .get("references")
        .and_then(Value::as_array)
        .is_some_and(|r| !r.is_empty());
    let empty_files = tsconfig
        .get("files")
        .and_then(Value::as_array)
        .is_some_and(|f| f.is_empty());
    has_references && empty_files
}

fn reference_path(root: &Path, reference: &Value) -> Option<PathBuf> {
    let path = reference.get("path")?.as_str()?;
    let full = root.join(path);
    if path.ends_with(".json") {
        Some(full)
    } else {
        Some(PathBuf::from(format!("{}.json", full.display())))
    }
}

fn includes_sources(tsconfig: &Value, src_dir: &str) -> bool {
    let prefix = format!("{}/", src_dir);
    tsconfig
        .get("include")
        .and_then(Value::as_array)
        .is_some_and(|include| {
            include
                .iter()
                .filter_map(Value::as_str)
                .any(|inc| inc.contains(&prefix) || inc.starts_with(src_dir))
        })
}

/// Creates or updates `tsconfig.json` (and referenced app configs) in `root`.
pub fn update_tsconfig(root: &Path, config: &RdsConfig) -> Result<TsConfigUpdate> {
    let path = root.join(TSCONFIG);
    let paths = tsconfig_paths(config);

    if !path.exists() {
        let tsconfig = json!({
            "compilerOptions": {
                "target": "ES2020",
                "module": "ESNext",
                "moduleResolution": "bundler",
                "strict": true,
                "jsx": "preserve",
                "skipLibCheck": true,
                "baseUrl": ".",
                "paths": paths,
            },
            "include": [format!("{}/**/*", config.src_dir), format!("{}/**/*.vue", config.src_dir)],
            "exclude": ["node_modules", "dist"],
        });
        write_json(&path, &tsconfig)?;
        return Ok(TsConfigUpdate::Created);
    }

    let mut tsconfig = read_json(&path)?;
    let mut updated = Vec::new();

    if uses_project_references(&tsconfig) {
        let references: Vec<Value> = tsconfig
            .get("references")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        for reference in &references {
            let Some(ref_path) = reference_path(root, reference) else {
                continue;
            };
            if !ref_path.exists() {
                tracing::debug!("Skipping missing tsconfig reference {}", ref_path.display());
                continue;
            }

            let mut ref_config = read_json(&ref_path)?;
            if includes_sources(&ref_config, &config.src_dir) {
                apply_paths(&mut ref_config, &ref_path, &paths, true)?;
                write_json(&ref_path, &ref_config)?;
                updated.push(file_label(&ref_path));
            }
        }

        apply_paths(&mut tsconfig, &path, &paths, false)?;
        write_json(&path, &tsconfig)?;

        if updated.is_empty() {
            return Ok(TsConfigUpdate::NoAppConfig);
        }
    } else {
        apply_paths(&mut tsconfig, &path, &paths, false)?;
        write_json(&path, &tsconfig)?;
    }

    updated.push(TSCONFIG.to_string());
    Ok(TsConfigUpdate::Updated { files: updated })
}
