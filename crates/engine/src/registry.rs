//! The property registry: name → definition with dependency edges.
//!
//! Definitions come from literal options (parsed first) and auxiliary source
//! files (parsed second, so files override literals for the same name). Each
//! definition records the names its own value references; edges may dangle —
//! the walk just ends at an unregistered name.

use std::collections::HashMap;

use props_ast::{
    CustomMediaRule, Declaration, DeclarationBlock, KeyframesRule, Location, MediaCondition, Rule,
    StyleRule, Stylesheet, ValueComponent, VarFunction, Visitor, walk_rule,
};

use crate::options::{KEYFRAMES_COMPANION_SUFFIX, Options};

/// The body of a property definition — exactly one of the three shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Declaration(Declaration),
    Keyframes(KeyframesRule),
    CustomMedia(CustomMediaRule),
}

/// A registered definition plus the names its value depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDefinition {
    pub value: PropertyValue,
    /// Names referenced inside this definition's value. Entries need not
    /// resolve in the registry.
    pub dependencies: Vec<String>,
}

/// Name → definition map. Later insertions overwrite earlier ones.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<String, PropertyDefinition>,
}

impl Registry {
    pub fn get(&self, name: &str) -> Option<&PropertyDefinition> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, name: String, definition: PropertyDefinition) {
        self.entries.insert(name, definition);
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut PropertyDefinition> {
        self.entries.get_mut(name)
    }
}

/// Collect `var()` reference names from value components, including those
/// nested inside fallbacks.
pub(crate) fn collect_value_vars(components: &[ValueComponent], out: &mut Vec<String>) {
    for component in components {
        if let ValueComponent::Var(var) = component {
            out.push(var.name.clone());
            if let Some(fallback) = &var.fallback {
                collect_value_vars(fallback, out);
            }
        }
    }
}

fn collect_keyframes_vars(rule: &KeyframesRule, out: &mut Vec<String>) {
    for frame in &rule.frames {
        for declaration in frame
            .declarations
            .declarations
            .iter()
            .chain(&frame.declarations.important_declarations)
        {
            collect_value_vars(&declaration.value, out);
        }
    }
}

/// Collect `--`-prefixed feature names from a media condition, recursing
/// through `not` and boolean operations.
pub(crate) fn condition_feature_names(condition: &MediaCondition, out: &mut Vec<String>) {
    match condition {
        MediaCondition::Feature(feature) => {
            if feature.name.starts_with("--") {
                out.push(feature.name.clone());
            }
        }
        MediaCondition::Not(inner) => condition_feature_names(inner, out),
        MediaCondition::Operation { conditions, .. } => {
            for inner in conditions {
                condition_feature_names(inner, out);
            }
        }
    }
}

fn custom_media_dependencies(rule: &CustomMediaRule) -> Vec<String> {
    let mut dependencies = Vec::new();
    for query in &rule.query {
        if let Some(condition) = &query.condition {
            condition_feature_names(condition, &mut dependencies);
        }
    }
    dependencies
}

/// Build registry entries from the literal options and synthesize the
/// auxiliary stylesheet holding their light-mode bodies (custom media first,
/// then the light style rule, then keyframes). Dark-variant literals are
/// registered but kept out of the sheet; the assemble step emits them.
pub(crate) fn build_literals(
    options: &Options,
    marker: &str,
    light_selector: &str,
    registry: &mut Registry,
) -> Stylesheet {
    let mut custom_media = Vec::new();
    let mut light = Vec::new();
    let mut keyframes = Vec::new();

    for (key, literal) in &options.properties {
        if !key.starts_with("--") {
            continue;
        }
        let text = literal.as_text();
        let trimmed = text.trim_start();
        if trimmed.starts_with("@keyframes") || trimmed.starts_with("@custom-media") {
            match props_syntax::parse_rule_fragment(&text) {
                Some(Rule::Keyframes(rule)) => {
                    register_keyframes_literal(key, rule, marker, registry, &mut keyframes);
                    continue;
                }
                Some(Rule::CustomMedia(rule)) => {
                    registry.insert(
                        rule.name.clone(),
                        PropertyDefinition {
                            dependencies: custom_media_dependencies(&rule),
                            value: PropertyValue::CustomMedia(rule.clone()),
                        },
                    );
                    custom_media.push(rule);
                    continue;
                }
                // Malformed rule text degrades to a plain declaration.
                _ => {}
            }
        }

        let base = key.strip_suffix(marker);
        let declaration = Declaration {
            name: base.unwrap_or(key).to_owned(),
            value: props_syntax::parse_value(&text),
        };
        let mut dependencies = Vec::new();
        collect_value_vars(&declaration.value, &mut dependencies);
        registry.insert(
            key.clone(),
            PropertyDefinition {
                value: PropertyValue::Declaration(declaration.clone()),
                dependencies,
            },
        );
        if base.is_none() {
            light.push(declaration);
        }
    }

    let mut rules: Vec<Rule> = custom_media.into_iter().map(Rule::CustomMedia).collect();
    if !light.is_empty() {
        rules.push(Rule::Style(StyleRule {
            selectors: vec![light_selector.to_owned()],
            declarations: DeclarationBlock {
                declarations: light,
                important_declarations: Vec::new(),
            },
            rules: Vec::new(),
            loc: Location::default(),
        }));
    }
    rules.extend(keyframes.into_iter().map(Rule::Keyframes));

    let sources = if rules.is_empty() {
        Vec::new()
    } else {
        vec!["props.css".to_owned()]
    };
    Stylesheet {
        sources,
        license_comments: Vec::new(),
        rules,
    }
}

fn register_keyframes_literal(
    key: &str,
    rule: KeyframesRule,
    marker: &str,
    registry: &mut Registry,
    keyframes_out: &mut Vec<KeyframesRule>,
) {
    let mut inner_dependencies = Vec::new();
    collect_keyframes_vars(&rule, &mut inner_dependencies);
    if key.ends_with(marker) {
        // Dark companion: emitted by the assemble step, never via the sheet.
        registry.insert(
            key.to_owned(),
            PropertyDefinition {
                value: PropertyValue::Keyframes(rule),
                dependencies: inner_dependencies,
            },
        );
        return;
    }
    let animation = rule.name.clone();
    registry.insert(
        animation.clone(),
        PropertyDefinition {
            value: PropertyValue::Keyframes(rule.clone()),
            dependencies: inner_dependencies.clone(),
        },
    );
    let mut dependencies = vec![animation];
    dependencies.extend(inner_dependencies);
    registry.insert(
        key.to_owned(),
        PropertyDefinition {
            value: PropertyValue::Keyframes(rule.clone()),
            dependencies,
        },
    );
    keyframes_out.push(rule);
}

/// Record every definition an auxiliary stylesheet contributes.
///
/// A stack of enter/exit frames attributes `var()` references found deep in a
/// value to the enclosing definition being built, not to the file globally.
pub(crate) fn ingest_stylesheet(sheet: &Stylesheet, marker: &str, registry: &mut Registry) {
    let mut visitor = IngestVisitor {
        registry,
        marker,
        owners: Vec::new(),
        current_declaration: None,
    };
    for rule in &sheet.rules {
        walk_rule(rule, &mut visitor);
    }
}

struct IngestVisitor<'r> {
    registry: &'r mut Registry,
    marker: &'r str,
    /// One frame per entered rule; `Some` when the rule owns a definition.
    owners: Vec<Option<String>>,
    /// Registry key of the custom declaration currently being built.
    current_declaration: Option<String>,
}

impl Visitor for IngestVisitor<'_> {
    fn rule(&mut self, rule: &Rule) {
        let owner = match rule {
            Rule::CustomMedia(custom) => {
                self.registry.insert(
                    custom.name.clone(),
                    PropertyDefinition {
                        dependencies: custom_media_dependencies(custom),
                        value: PropertyValue::CustomMedia(custom.clone()),
                    },
                );
                Some(custom.name.clone())
            }
            Rule::Keyframes(keyframes) => {
                let animation = keyframes.name.clone();
                self.registry.insert(
                    animation.clone(),
                    PropertyDefinition {
                        value: PropertyValue::Keyframes(keyframes.clone()),
                        dependencies: Vec::new(),
                    },
                );
                self.registry.insert(
                    format!("--{animation}{KEYFRAMES_COMPANION_SUFFIX}"),
                    PropertyDefinition {
                        value: PropertyValue::Keyframes(keyframes.clone()),
                        dependencies: vec![animation.clone()],
                    },
                );
                Some(animation)
            }
            _ => None,
        };
        self.owners.push(owner);
    }

    fn rule_exit(&mut self, _rule: &Rule) {
        self.owners.pop();
    }

    fn declaration(&mut self, declaration: &Declaration) {
        if !declaration.is_custom() {
            return;
        }
        let key = declaration.name.clone();
        let stored = match key.strip_suffix(self.marker) {
            Some(base) => Declaration {
                name: base.to_owned(),
                value: declaration.value.clone(),
            },
            None => declaration.clone(),
        };
        self.registry.insert(
            key.clone(),
            PropertyDefinition {
                value: PropertyValue::Declaration(stored),
                dependencies: Vec::new(),
            },
        );
        self.current_declaration = Some(key);
    }

    fn declaration_exit(&mut self, declaration: &Declaration) {
        if declaration.is_custom() {
            self.current_declaration = None;
        }
    }

    fn variable(&mut self, var: &VarFunction) {
        let owner = self
            .current_declaration
            .clone()
            .or_else(|| self.owners.iter().rev().find_map(Clone::clone));
        if let Some(owner) = owner {
            if let Some(definition) = self.registry.get_mut(&owner) {
                definition.dependencies.push(var.name.clone());
            }
        }
    }
}
