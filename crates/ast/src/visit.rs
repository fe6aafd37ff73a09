//! Visitor contract and the traversal driver that invokes it.
//!
//! The driver plays the role of the host engine: it walks a stylesheet once,
//! in a fixed depth-first order, firing the hooks below. Hooks are
//! accumulation points only; the single mutation channel is the replacement
//! sheet returned from [`Visitor::stylesheet_exit`].

use crate::nodes::{
    Declaration, DeclarationBlock, MediaQuery, Rule, Stylesheet, ValueComponent, VarFunction,
};

/// Traversal hooks. Every method defaults to a no-op so implementations only
/// override the events they care about.
pub trait Visitor {
    /// A stylesheet traversal is starting.
    fn stylesheet(&mut self, _sheet: &Stylesheet) {}

    /// The traversal finished. Return `Some` to replace the sheet.
    fn stylesheet_exit(&mut self, _sheet: &Stylesheet) -> Option<Stylesheet> {
        None
    }

    fn rule(&mut self, _rule: &Rule) {}

    fn rule_exit(&mut self, _rule: &Rule) {}

    fn declaration(&mut self, _declaration: &Declaration) {}

    fn declaration_exit(&mut self, _declaration: &Declaration) {}

    /// A media query was encountered, either on an `@media` rule or as the
    /// definition body of an `@custom-media` rule.
    fn media_query(&mut self, _query: &MediaQuery) {}

    /// A `var()` reference was encountered inside a declaration value.
    fn variable(&mut self, _var: &VarFunction) {}
}

/// Pointer identity of an AST node, valid while the tree it came from is
/// alive and unmoved. Used to make repeated hook invocations on the same node
/// idempotent; must not be held across traversals of different trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn of<T>(node: &T) -> Self {
        Self(std::ptr::from_ref(node) as usize)
    }
}

/// Drive a full traversal of `sheet`, applying the replacement returned by
/// [`Visitor::stylesheet_exit`], if any.
pub fn walk_stylesheet<V: Visitor>(sheet: &mut Stylesheet, visitor: &mut V) {
    visitor.stylesheet(sheet);
    for rule in &sheet.rules {
        walk_rule(rule, visitor);
    }
    if let Some(replacement) = visitor.stylesheet_exit(sheet) {
        *sheet = replacement;
    }
}

/// Walk one rule depth-first.
pub fn walk_rule<V: Visitor>(rule: &Rule, visitor: &mut V) {
    visitor.rule(rule);
    match rule {
        Rule::Style(style) => {
            walk_declaration_block(&style.declarations, visitor);
            for nested in &style.rules {
                walk_rule(nested, visitor);
            }
        }
        Rule::Media(media) => {
            for query in &media.query {
                visitor.media_query(query);
            }
            for nested in &media.rules {
                walk_rule(nested, visitor);
            }
        }
        Rule::Supports(supports) => {
            for nested in &supports.rules {
                walk_rule(nested, visitor);
            }
        }
        Rule::Keyframes(keyframes) => {
            for frame in &keyframes.frames {
                walk_declaration_block(&frame.declarations, visitor);
            }
        }
        Rule::CustomMedia(custom) => {
            for query in &custom.query {
                visitor.media_query(query);
            }
        }
        Rule::LayerBlock(layer) => {
            for nested in &layer.rules {
                walk_rule(nested, visitor);
            }
        }
        Rule::Page(page) => {
            walk_declaration_block(&page.declarations, visitor);
            for margin in &page.margin_rules {
                walk_declaration_block(&margin.declarations, visitor);
            }
        }
        Rule::FontFace(font_face) => {
            walk_declaration_block(&font_face.declarations, visitor);
        }
        Rule::LayerStatement(_) | Rule::Unknown(_) | Rule::Ignored => {}
    }
    visitor.rule_exit(rule);
}

/// Walk the normal then the `!important` declarations of a block.
pub fn walk_declaration_block<V: Visitor>(block: &DeclarationBlock, visitor: &mut V) {
    for declaration in &block.declarations {
        walk_declaration(declaration, visitor);
    }
    for declaration in &block.important_declarations {
        walk_declaration(declaration, visitor);
    }
}

/// Fire the declaration enter/exit pair, visiting `var()` references in the
/// value (including those nested inside fallbacks) in between.
pub fn walk_declaration<V: Visitor>(declaration: &Declaration, visitor: &mut V) {
    visitor.declaration(declaration);
    walk_components(&declaration.value, visitor);
    visitor.declaration_exit(declaration);
}

fn walk_components<V: Visitor>(components: &[ValueComponent], visitor: &mut V) {
    for component in components {
        if let ValueComponent::Var(var) = component {
            visitor.variable(var);
            if let Some(fallback) = &var.fallback {
                walk_components(fallback, visitor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Location, MediaCondition, MediaFeature, MediaRule, StyleRule};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Visitor for Recorder {
        fn stylesheet(&mut self, _sheet: &Stylesheet) {
            self.events.push("sheet".to_owned());
        }
        fn rule(&mut self, _rule: &Rule) {
            self.events.push("rule".to_owned());
        }
        fn rule_exit(&mut self, _rule: &Rule) {
            self.events.push("rule-exit".to_owned());
        }
        fn declaration(&mut self, declaration: &Declaration) {
            self.events.push(format!("decl {}", declaration.name));
        }
        fn declaration_exit(&mut self, declaration: &Declaration) {
            self.events.push(format!("decl-exit {}", declaration.name));
        }
        fn media_query(&mut self, _query: &MediaQuery) {
            self.events.push("query".to_owned());
        }
        fn variable(&mut self, var: &VarFunction) {
            self.events.push(format!("var {}", var.name));
        }
    }

    fn var_component(name: &str, fallback: Option<Vec<ValueComponent>>) -> ValueComponent {
        ValueComponent::Var(VarFunction {
            name: name.to_owned(),
            fallback,
        })
    }

    #[test]
    fn fires_hooks_in_document_order() {
        let mut sheet = Stylesheet {
            rules: vec![
                Rule::Style(StyleRule {
                    selectors: vec!["a".to_owned()],
                    declarations: DeclarationBlock {
                        declarations: vec![Declaration {
                            name: "color".to_owned(),
                            value: vec![var_component(
                                "--red",
                                Some(vec![var_component("--pink", None)]),
                            )],
                        }],
                        important_declarations: Vec::new(),
                    },
                    ..StyleRule::default()
                }),
                Rule::Media(MediaRule {
                    query: vec![MediaQuery {
                        media_type: None,
                        condition: Some(MediaCondition::Feature(MediaFeature {
                            name: "--dark".to_owned(),
                            value: None,
                        })),
                    }],
                    rules: Vec::new(),
                    loc: Location::default(),
                }),
            ],
            ..Stylesheet::default()
        };
        let mut recorder = Recorder::default();
        walk_stylesheet(&mut sheet, &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                "sheet",
                "rule",
                "decl color",
                "var --red",
                "var --pink",
                "decl-exit color",
                "rule-exit",
                "rule",
                "query",
                "rule-exit",
            ]
        );
    }

    #[test]
    fn node_identity_is_stable_per_node() {
        let declaration = Declaration {
            name: "--x".to_owned(),
            value: Vec::new(),
        };
        let other = Declaration {
            name: "--x".to_owned(),
            value: Vec::new(),
        };
        assert_eq!(NodeId::of(&declaration), NodeId::of(&declaration));
        assert_ne!(NodeId::of(&declaration), NodeId::of(&other));
    }
}
