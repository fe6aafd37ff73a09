//! The injection engine: usage tracking during traversal, purge and assembly
//! at stylesheet exit.

use std::collections::HashSet;

use anyhow::Result;
use log::{debug, warn};
use props_ast::{
    Declaration, DeclarationBlock, KeyframesRule, Location, MediaCondition, MediaFeature,
    MediaQuery, MediaRule, NodeId, Rule, StyleRule, Stylesheet, VarFunction, Visitor,
    walk_stylesheet,
};
use props_syntax::{ParserOptions, PrintOptions, Targets, parse_stylesheet, to_css};

use crate::graph::Expansion;
use crate::options::{
    DEFAULT_ADAPTIVE_MARKER, KEYFRAMES_COMPANION_SUFFIX, Options, ROOT_SELECTOR,
};
use crate::purge::purge_rules;
use crate::registry::{PropertyValue, Registry, build_literals, condition_feature_names};
use crate::sources::load_sources;

/// Per-traversal accumulation state. Reset on every stylesheet enter,
/// consumed once at stylesheet exit.
#[derive(Debug, Default)]
struct TraversalState {
    /// Names reachable from the sheet under compilation.
    reached: HashSet<String>,
    /// Base names whose dark-variant definition was already collected.
    reached_dark: HashSet<String>,
    /// Dark declarations (renamed to their base property) in reach order.
    dark_declarations: Vec<Declaration>,
    /// Dark keyframes bodies in reach order.
    dark_keyframes: Vec<KeyframesRule>,
    /// Nodes already handled, so repeated hook invocations are idempotent.
    processed: HashSet<NodeId>,
}

impl TraversalState {
    fn reset(&mut self) {
        self.reached.clear();
        self.reached_dark.clear();
        self.dark_declarations.clear();
        self.dark_keyframes.clear();
        self.processed.clear();
    }
}

/// Just-in-time custom property injection.
///
/// Built once from [`Options`] (all file reading happens up front), then
/// driven over any number of stylesheets sequentially — either through
/// [`JitProps::process`] or by handing the engine as a [`Visitor`] to a host
/// traversal. Each traversal starts from a clean slate; nothing carries over
/// between sheets.
pub struct JitProps {
    registry: Registry,
    /// Auxiliary sheets in splice order: the synthesized literal sheet first,
    /// then each bundled file.
    source_sheets: Vec<Stylesheet>,
    dark_selector: String,
    adaptive_marker: String,
    layer: Option<String>,
    targets: Option<Targets>,
    /// False when no sources were configured: every hook is a no-op and the
    /// sheet passes through untouched.
    active: bool,
    state: TraversalState,
}

impl JitProps {
    pub fn new(options: Options) -> Result<Self> {
        let adaptive_marker = options
            .adaptive_prop_selector
            .clone()
            .unwrap_or_else(|| DEFAULT_ADAPTIVE_MARKER.to_owned());
        let light_selector = options
            .custom_selector
            .clone()
            .unwrap_or_else(|| ROOT_SELECTOR.to_owned());
        let dark_selector = options
            .custom_selector_dark
            .clone()
            .unwrap_or_else(|| light_selector.clone());

        let has_literals = options
            .properties
            .iter()
            .any(|(key, _)| key.starts_with("--"));
        let active = has_literals || !options.files.is_empty();
        if !active {
            warn!(target: "jit_props", "no custom property sources configured; stylesheets pass through unchanged");
        }

        let mut registry = Registry::default();
        let mut source_sheets = Vec::new();
        let synthesized = build_literals(&options, &adaptive_marker, &light_selector, &mut registry);
        if !synthesized.rules.is_empty() {
            source_sheets.push(synthesized);
        }
        let parser_options = ParserOptions { custom_media: true };
        source_sheets.extend(load_sources(
            &options.files,
            &parser_options,
            &adaptive_marker,
            &mut registry,
        )?);
        debug!(
            target: "jit_props",
            "registry holds {} definitions across {} source sheets",
            registry.len(),
            source_sheets.len()
        );

        Ok(Self {
            registry,
            source_sheets,
            dark_selector,
            adaptive_marker,
            layer: options.layer,
            targets: options.targets,
            active,
            state: TraversalState::default(),
        })
    }

    /// The definition pool built from the configured sources.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse, transform and reprint one stylesheet.
    pub fn process(&mut self, css: &str, filename: &str) -> String {
        let parser_options = ParserOptions { custom_media: true };
        let mut sheet = parse_stylesheet(css, filename, &parser_options);
        walk_stylesheet(&mut sheet, self);
        let print_options = PrintOptions {
            targets: self.targets,
        };
        to_css(&sheet, &print_options)
    }

    /// Union the expansion of `name` into the reachable set.
    fn mark(&mut self, name: &str) {
        for reached in Expansion::new(&self.registry, name) {
            self.state.reached.insert(reached);
        }
    }

    /// A `var(--x)` reference: expand the name, its keyframes companion, and
    /// collect the dark-variant definition the first time the base is seen.
    fn mark_variable(&mut self, name: &str) {
        self.mark(name);
        self.mark(&format!("{name}{KEYFRAMES_COMPANION_SUFFIX}"));

        let dark_key = format!("{name}{}", self.adaptive_marker);
        let dark = self
            .registry
            .get(&dark_key)
            .map(|definition| (definition.value.clone(), definition.dependencies.clone()));
        if let Some((value, dependencies)) = dark {
            if self.state.reached_dark.insert(name.to_owned()) {
                match value {
                    PropertyValue::Declaration(declaration) => {
                        self.state.dark_declarations.push(declaration);
                    }
                    PropertyValue::Keyframes(keyframes) => {
                        self.state.dark_keyframes.push(keyframes);
                    }
                    PropertyValue::CustomMedia(_) => {}
                }
                for dependency in dependencies {
                    self.mark(&dependency);
                }
            }
        }
    }

    /// The injected dark block: a style rule targeting the dark selector
    /// followed by dark keyframes, wrapped in `prefers-color-scheme: dark`.
    fn dark_media_rule(&self) -> Rule {
        let mut rules = Vec::new();
        if !self.state.dark_declarations.is_empty() {
            rules.push(Rule::Style(StyleRule {
                selectors: vec![self.dark_selector.clone()],
                declarations: DeclarationBlock {
                    declarations: self.state.dark_declarations.clone(),
                    important_declarations: Vec::new(),
                },
                rules: Vec::new(),
                loc: Location::default(),
            }));
        }
        rules.extend(self.state.dark_keyframes.iter().cloned().map(Rule::Keyframes));
        Rule::Media(MediaRule {
            query: vec![MediaQuery {
                media_type: None,
                condition: Some(MediaCondition::Feature(MediaFeature {
                    name: "prefers-color-scheme".to_owned(),
                    value: Some("dark".to_owned()),
                })),
            }],
            rules,
            loc: Location::default(),
        })
    }
}

impl Visitor for JitProps {
    fn stylesheet(&mut self, _sheet: &Stylesheet) {
        if self.active {
            self.state.reset();
        }
    }

    fn media_query(&mut self, query: &MediaQuery) {
        if !self.active || !self.state.processed.insert(NodeId::of(query)) {
            return;
        }
        let mut features = Vec::new();
        if let Some(condition) = &query.condition {
            condition_feature_names(condition, &mut features);
        }
        for name in features {
            self.mark(&name);
        }
    }

    fn variable(&mut self, var: &VarFunction) {
        if !self.active || !self.state.processed.insert(NodeId::of(var)) {
            return;
        }
        self.mark_variable(&var.name);
    }

    fn stylesheet_exit(&mut self, sheet: &Stylesheet) -> Option<Stylesheet> {
        if !self.active {
            return None;
        }
        debug!(
            target: "jit_props",
            "assembling: {} names reachable, {} dark variants",
            self.state.reached.len(),
            self.state.reached_dark.len()
        );

        let mut out = Stylesheet {
            sources: sheet.sources.clone(),
            license_comments: sheet.license_comments.clone(),
            rules: Vec::new(),
        };
        let mut injected = Vec::new();
        let mut source_count = out.sources.len() as u32;
        for source_sheet in &self.source_sheets {
            injected.extend(purge_rules(
                &source_sheet.rules,
                &self.state.reached,
                source_count,
            ));
            out.sources.extend(source_sheet.sources.iter().cloned());
            out.license_comments
                .extend(source_sheet.license_comments.iter().cloned());
            source_count += source_sheet.sources.len() as u32;
        }
        if !self.state.dark_declarations.is_empty() || !self.state.dark_keyframes.is_empty() {
            injected.push(self.dark_media_rule());
        }

        let original = sheet
            .rules
            .iter()
            .filter(|rule| !matches!(rule, Rule::Ignored))
            .cloned();
        match &self.layer {
            Some(layer) => {
                out.rules.push(Rule::LayerBlock(props_ast::LayerBlockRule {
                    name: vec![layer.clone()],
                    rules: injected,
                    loc: Location::default(),
                }));
                out.rules.extend(original);
            }
            None => {
                out.rules = injected;
                out.rules.extend(original);
            }
        }
        Some(out)
    }
}
