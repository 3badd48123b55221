// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Dependency closure resolution.
//!
//! [`resolve`] expands a set of requested registry keys into every component
//! that has to be materialized, plus the npm packages and registry entries
//! they depend on. It is a pure function of the index; nothing is fetched or
//! written here, so an invalid request fails before the consumer project is
//! touched.
//!
//! Resolution walks an explicit FIFO worklist seeded with the requested keys.
//! Requested components therefore always come first in
//! [`Resolution::components`], followed by their dependencies in discovery
//! order. `lib/` keys are never expanded: shared lib files are installed by
//! `init`, so they are only collected for a presence check.

use crate::error::{RdsError, Result};
use crate::registry::{is_lib_key, ComponentEntry, RegistryIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// Why a component is part of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Named by the user.
    Requested,
    /// Pulled in by another component.
    Dependency {
        /// The component that first declared the dependency.
        required_by: String,
    },
}

/// A component selected for materialization.
#[derive(Debug, Clone)]
pub struct ResolvedComponent {
    /// Registry key.
    pub key: String,
    /// The registry entry.
    pub entry: ComponentEntry,
    /// Why it was selected.
    pub origin: Origin,
}

impl ResolvedComponent {
    /// Returns `true` if the user asked for this component directly.
    pub fn is_requested(&self) -> bool {
        self.origin == Origin::Requested
    }
}

/// The expanded form of an `add` request.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Components to materialize: requested ones first, then dependencies.
    pub components: Vec<ResolvedComponent>,
    /// Union of npm packages across every component, without duplicates.
    pub npm_deps: Vec<String>,
    /// Registry keys depended upon, minus the requested keys.
    pub registry_deps: Vec<String>,
    /// `lib/` keys (requested or depended upon) to check for local presence.
    pub lib_deps: Vec<String>,
}

impl Resolution {
    /// Components the user asked for.
    pub fn requested(&self) -> impl Iterator<Item = &ResolvedComponent> {
        self.components.iter().filter(|c| c.is_requested())
    }

    /// Components pulled in as dependencies.
    pub fn dependencies(&self) -> impl Iterator<Item = &ResolvedComponent> {
        self.components.iter().filter(|c| !c.is_requested())
    }

    /// Returns `true` when only `lib/` entries were requested.
    pub fn is_lib_only(&self) -> bool {
        self.components.is_empty() && !self.lib_deps.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Resolves `requested` against `index`.
///
/// # Errors
///
/// - [`RdsError::UnknownComponent`] if a requested key is not in the index
/// - [`RdsError::UnknownDependency`] if a component depends on a missing one
/// - [`RdsError::DependencyCycle`] if component dependencies form a cycle
pub fn resolve(index: &RegistryIndex, requested: &[String]) -> Result<Resolution> {
    let mut requested_keys: Vec<String> = Vec::new();
    let mut lib_deps: Vec<String> = Vec::new();

    for key in requested.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
        if is_lib_key(key) {
            push_unique(&mut lib_deps, key);
        } else {
            push_unique(&mut requested_keys, key);
        }
    }

    for key in &requested_keys {
        if !index.components.contains_key(key) {
            return Err(RdsError::UnknownComponent {
                key: key.clone(),
                available: index.component_keys(),
            });
        }
    }

    let mut queue: VecDeque<(String, Origin)> = requested_keys
        .iter()
        .map(|key| (key.clone(), Origin::Requested))
        .collect();
    let mut enqueued: HashSet<String> = requested_keys.iter().cloned().collect();

    let mut components = Vec::new();
    let mut npm_deps = Vec::new();
    let mut all_registry_deps = Vec::new();
    let mut edges: HashMap<String, Vec<String>> = HashMap::new();

    while let Some((key, origin)) = queue.pop_front() {
        let entry = match index.components.get(&key) {
            Some(entry) => entry,
            None => continue,
        };

        for dep in &entry.dependencies {
            push_unique(&mut npm_deps, dep);
        }

        let mut component_deps = Vec::new();
        for dep in &entry.registry_dependencies {
            push_unique(&mut all_registry_deps, dep);
            if is_lib_key(dep) {
                continue;
            }

            if !index.components.contains_key(dep) {
                return Err(RdsError::UnknownDependency {
                    key: dep.clone(),
                    required_by: key.clone(),
                });
            }

            component_deps.push(dep.clone());
            if enqueued.insert(dep.clone()) {
                tracing::debug!("{} requires {}", key, dep);
                queue.push_back((
                    dep.clone(),
                    Origin::Dependency {
                        required_by: key.clone(),
                    },
                ));
            }
        }

        edges.insert(key.clone(), component_deps);
        components.push(ResolvedComponent {
            key,
            entry: entry.clone(),
            origin,
        });
    }

    let order: Vec<String> = components.iter().map(|c| c.key.clone()).collect();
    if let Some(cycle) = find_cycle(&order, &edges) {
        return Err(RdsError::DependencyCycle { cycle });
    }

    let registry_deps: Vec<String> = all_registry_deps
        .into_iter()
        .filter(|dep| !requested.iter().any(|r| r.trim() == dep))
        .collect();

    for dep in registry_deps.iter().filter(|d| is_lib_key(d)) {
        push_unique(&mut lib_deps, dep);
    }

    Ok(Resolution {
        components,
        npm_deps,
        registry_deps,
        lib_deps,
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first search for a back edge. Returns the cycle path, first key
/// repeated at the end.
fn find_cycle<'a>(order: &'a [String], edges: &'a HashMap<String, Vec<String>>) -> Option<Vec<String>> {
    fn visit<'a>(
        node: &'a str,
        edges: &'a HashMap<String, Vec<String>>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        match marks.get(node) {
            Some(Mark::Done) => return None,
            Some(Mark::Visiting) => {
                let start = stack.iter().position(|n| *n == node)?;
                let mut cycle: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(node.to_string());
                return Some(cycle);
            }
            None => {}
        }

        marks.insert(node, Mark::Visiting);
        stack.push(node);

        if let Some(deps) = edges.get(node) {
            for dep in deps {
                if let Some(cycle) = visit(dep, edges, marks, stack) {
                    return Some(cycle);
                }
            }
        }

        stack.pop();
        marks.insert(node, Mark::Done);
        None
    }

    let mut marks = HashMap::new();
    let mut stack = Vec::new();
    for key in order {
        if let Some(cycle) = visit(key, edges, &mut marks, &mut stack) {
            return Some(cycle);
        }
    }
    None
}
