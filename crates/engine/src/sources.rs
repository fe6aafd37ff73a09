//! Auxiliary property-source files: glob expansion, reading and the
//! content-hash memo that keeps duplicate matches from being ingested twice.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use globset::Glob;
use log::debug;
use props_ast::Stylesheet;
use props_syntax::ParserOptions;
use sha2::{Digest as _, Sha256};

use crate::registry::{Registry, ingest_stylesheet};

/// Resolve glob patterns into an ordered, de-duplicated file list. Patterns
/// without glob metacharacters are plain paths; missing files contribute
/// nothing, they are not errors.
pub(crate) fn resolve_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for pattern in patterns {
        let normalized = pattern.strip_prefix("./").unwrap_or(pattern);
        if !has_glob_meta(normalized) {
            let path = PathBuf::from(normalized);
            if path.is_file() {
                if seen.insert(path.clone()) {
                    out.push(path);
                }
            } else {
                debug!(target: "jit_props", "no file matched {normalized}");
            }
            continue;
        }
        let matcher = Glob::new(normalized)
            .with_context(|| format!("invalid glob pattern {normalized}"))?
            .compile_matcher();
        let mut matches = Vec::new();
        collect_files(&literal_prefix(normalized), &mut matches);
        matches.sort();
        for path in matches {
            if matcher.is_match(&path) && seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }
    Ok(out)
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Longest literal directory prefix of a glob pattern, used as the walk root.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    for component in Path::new(pattern).components() {
        if has_glob_meta(&component.as_os_str().to_string_lossy()) {
            break;
        }
        prefix.push(component.as_os_str());
    }
    if prefix.as_os_str().is_empty() {
        PathBuf::from(".")
    } else if prefix.is_dir() {
        prefix
    } else {
        // The last literal segment is a file-name prefix, not a directory.
        prefix
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_files(&path, out);
        } else {
            out.push(path);
        }
    }
}

/// Read, bundle and ingest every matched source file, skipping files whose
/// path + content hash was already seen. Returns the bundled sheets in match
/// order.
pub(crate) fn load_sources(
    patterns: &[String],
    options: &ParserOptions,
    marker: &str,
    registry: &mut Registry,
) -> Result<Vec<Stylesheet>> {
    let mut sheets = Vec::new();
    let mut seen_hashes: HashSet<[u8; 32]> = HashSet::new();
    for path in resolve_files(patterns)? {
        let data = fs::read(&path)
            .with_context(|| format!("reading property source {}", path.display()))?;
        let mut hasher = Sha256::new();
        hasher.update(path.as_os_str().as_encoded_bytes());
        hasher.update(&data);
        let digest: [u8; 32] = hasher.finalize().into();
        if !seen_hashes.insert(digest) {
            debug!(target: "jit_props", "already ingested {}", path.display());
            continue;
        }
        let css = String::from_utf8_lossy(&data);
        let sheet = props_syntax::bundle_source(&path, &css, options)?;
        ingest_stylesheet(&sheet, marker, registry);
        debug!(
            target: "jit_props",
            "ingested {} ({} rules)",
            path.display(),
            sheet.rules.len()
        );
        sheets.push(sheet);
    }
    Ok(sheets)
}
