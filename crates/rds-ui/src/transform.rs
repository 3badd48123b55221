// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Import path rewriting for registry sources.
//!
//! Registry files import shared code through the registry's own layout,
//! `@/lib/utils` and `@/components/ui`. Before a file is written, those two
//! prefixes are rewritten to the consumer's aliases. Nothing else in the file
//! is touched.

use crate::config::RdsConfig;
use regex::{Captures, Regex};

/// Rewrites registry-internal imports to a consumer's aliases.
#[derive(Debug, Clone)]
pub struct ImportTransformer {
    /// Matches either tracked prefix, ending on a word boundary
    pattern: Regex,
    /// Replacement for `@/lib/utils`
    utils_target: String,
    /// Replacement for `@/components/ui`
    components_target: String,
}

impl ImportTransformer {
    /// Creates a transformer for `config`.
    pub fn new(config: &RdsConfig) -> Self {
        let utils_target = format!("{}/{}/utils", config.alias, config.lib_path());
        let components_target = match config.components_alias() {
            Some(alias) => alias.to_string(),
            None => format!("{}/{}", config.alias, config.components_path()),
        };

        Self {
            pattern: Regex::new(r"@/(lib/utils|components/ui)\b").unwrap(),
            utils_target,
            components_target,
        }
    }

    /// Returns `content` with both tracked import prefixes rewritten.
    pub fn transform(&self, content: &str) -> String {
        self.pattern
            .replace_all(content, |caps: &Captures| match &caps[1] {
                "lib/utils" => self.utils_target.clone(),
                _ => self.components_target.clone(),
            })
            .into_owned()
    }
}

/// Rewrites every `@/` import prefix to `{alias}/`.
///
/// Used for shared lib files, which may import anything under the source
/// root.
pub fn rewrite_alias(content: &str, alias: &str) -> String {
    content.replace("@/", &format!("{}/", alias))
}
