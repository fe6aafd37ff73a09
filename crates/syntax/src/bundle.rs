//! `@import` bundling for property source files.
//!
//! Imports are inlined depth-first at the position of the `@import` rule,
//! each file appending to the sheet's source list and stamping its rules with
//! the matching source index. Import cycles are cut by a canonical-path
//! visited set; an import that cannot be read stays in the tree as its raw
//! at-rule.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use log::debug;
use props_ast::{Rule, Stylesheet};

use crate::parser::{ParserOptions, collect_license_comments, parse_rules};

/// Read and bundle a stylesheet file, inlining its `@import`s.
pub fn bundle(path: &Path, options: &ParserOptions) -> Result<Stylesheet> {
    let css = fs::read_to_string(path)
        .with_context(|| format!("reading stylesheet {}", path.display()))?;
    bundle_source(path, &css, options)
}

/// Bundle a stylesheet whose root file contents were already read.
pub fn bundle_source(path: &Path, css: &str, options: &ParserOptions) -> Result<Stylesheet> {
    let mut sheet = Stylesheet::default();
    let mut visited = HashSet::new();
    visited.insert(canonical(path));
    inline_file(path, css, &mut sheet, &mut visited, options);
    Ok(sheet)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn inline_file(
    path: &Path,
    css: &str,
    sheet: &mut Stylesheet,
    visited: &mut HashSet<PathBuf>,
    options: &ParserOptions,
) {
    let source_index = sheet.sources.len() as u32;
    sheet.sources.push(path.display().to_string());
    sheet
        .license_comments
        .extend(collect_license_comments(css));
    for rule in parse_rules(css, source_index, options) {
        if let Rule::Unknown(at_rule) = &rule {
            if at_rule.name == "import" {
                if let Some(target) = import_target(&at_rule.prelude) {
                    let resolved = path
                        .parent()
                        .map_or_else(|| PathBuf::from(&target), |dir| dir.join(&target));
                    if !visited.insert(canonical(&resolved)) {
                        // Already inlined; drop the cyclic import.
                        continue;
                    }
                    match fs::read_to_string(&resolved) {
                        Ok(imported) => {
                            inline_file(&resolved, &imported, sheet, visited, options);
                            continue;
                        }
                        Err(error) => {
                            debug!(
                                target: "props_syntax",
                                "cannot inline {}: {error}",
                                resolved.display()
                            );
                        }
                    }
                }
            }
        }
        sheet.rules.push(rule);
    }
}

/// Extract the import target from an `@import` prelude. Media-qualified or
/// layered imports are not inlined.
fn import_target(prelude: &str) -> Option<String> {
    let mut parts = prelude.split_whitespace();
    let first = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let inner = first
        .strip_prefix("url(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(first);
    let inner = inner.trim_matches(['"', '\'']);
    if inner.is_empty() {
        return None;
    }
    Some(inner.to_owned())
}
