//! Transitive expansion of property dependencies.

use std::collections::HashSet;

use crate::registry::Registry;

/// Lazily enumerates the dependency closure of a property name: the name
/// itself first (when registered), then its dependencies depth-first.
///
/// The iterator carries its own visited set, so mutually-referencing
/// definitions terminate regardless of what the caller does with the yielded
/// names. Names absent from the registry yield nothing.
pub struct Expansion<'registry> {
    registry: &'registry Registry,
    stack: Vec<String>,
    visited: HashSet<String>,
}

impl<'registry> Expansion<'registry> {
    pub fn new(registry: &'registry Registry, name: &str) -> Self {
        Self {
            registry,
            stack: vec![name.to_owned()],
            visited: HashSet::new(),
        }
    }
}

impl Iterator for Expansion<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(name) = self.stack.pop() {
            if !self.visited.insert(name.clone()) {
                continue;
            }
            let Some(definition) = self.registry.get(&name) else {
                continue;
            };
            for dependency in definition.dependencies.iter().rev() {
                if !self.visited.contains(dependency) {
                    self.stack.push(dependency.clone());
                }
            }
            return Some(name);
        }
        None
    }
}

/// Eagerly collect the expansion of `name`.
pub fn expand(registry: &Registry, name: &str) -> Vec<String> {
    Expansion::new(registry, name).collect()
}
