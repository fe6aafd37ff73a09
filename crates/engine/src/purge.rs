//! Reachability-driven pruning of auxiliary rule trees.
//!
//! The purge rebuilds a pruned copy instead of deleting from the shared tree,
//! so a cached auxiliary AST stays intact across compilations. Wrappers left
//! empty by pruning are retained here (the printer skips them), keeping the
//! structural shape stable for source maps.

use std::collections::HashSet;

use props_ast::{Declaration, DeclarationBlock, Rule};

/// Filter a rule list down to the reachable set, adding `add_index` to every
/// kept rule's source index so concatenated sheets stay addressable.
pub(crate) fn purge_rules(rules: &[Rule], reached: &HashSet<String>, add_index: u32) -> Vec<Rule> {
    let mut out = Vec::with_capacity(rules.len());
    for rule in rules {
        // Name-keyed rules are checked structurally, before descending.
        match rule {
            Rule::Keyframes(keyframes) if !reached.contains(&keyframes.name) => continue,
            Rule::CustomMedia(custom) if !reached.contains(&custom.name) => continue,
            Rule::Ignored => continue,
            _ => {}
        }
        let mut kept = rule.clone();
        if let Some(loc) = kept.location_mut() {
            loc.source_index += add_index;
        }
        match &mut kept {
            Rule::Style(style) => {
                style.declarations = purge_declaration_block(&style.declarations, reached);
                let nested = purge_rules(&style.rules, reached, add_index);
                style.rules = nested;
            }
            Rule::Media(media) => {
                let nested = purge_rules(&media.rules, reached, add_index);
                media.rules = nested;
            }
            Rule::Supports(supports) => {
                let nested = purge_rules(&supports.rules, reached, add_index);
                supports.rules = nested;
            }
            Rule::LayerBlock(layer) => {
                let nested = purge_rules(&layer.rules, reached, add_index);
                layer.rules = nested;
            }
            Rule::Page(page) => {
                page.declarations = purge_declaration_block(&page.declarations, reached);
                for margin in &mut page.margin_rules {
                    margin.loc.source_index += add_index;
                    margin.declarations = purge_declaration_block(&margin.declarations, reached);
                }
            }
            Rule::FontFace(font_face) => {
                font_face.declarations = purge_declaration_block(&font_face.declarations, reached);
            }
            Rule::Keyframes(_)
            | Rule::CustomMedia(_)
            | Rule::LayerStatement(_)
            | Rule::Unknown(_)
            | Rule::Ignored => {}
        }
        out.push(kept);
    }
    out
}

/// Drop custom-property declarations whose name is not reachable; everything
/// else passes through, `!important` list included.
pub(crate) fn purge_declaration_block(
    block: &DeclarationBlock,
    reached: &HashSet<String>,
) -> DeclarationBlock {
    DeclarationBlock {
        declarations: purge_declarations(&block.declarations, reached),
        important_declarations: purge_declarations(&block.important_declarations, reached),
    }
}

fn purge_declarations(declarations: &[Declaration], reached: &HashSet<String>) -> Vec<Declaration> {
    declarations
        .iter()
        .filter(|declaration| !declaration.is_custom() || reached.contains(&declaration.name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use props_ast::{
        Keyframe, KeyframesRule, Location, MediaQuery, MediaRule, StyleRule, ValueComponent,
    };

    fn custom(name: &str, value: &str) -> Declaration {
        Declaration {
            name: name.to_owned(),
            value: vec![ValueComponent::Raw(value.to_owned())],
        }
    }

    fn reached(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    fn root_rule(declarations: Vec<Declaration>) -> Rule {
        Rule::Style(StyleRule {
            selectors: vec![":root".to_owned()],
            declarations: DeclarationBlock {
                declarations,
                important_declarations: Vec::new(),
            },
            rules: Vec::new(),
            loc: Location::default(),
        })
    }

    #[test]
    fn unreachable_custom_declarations_are_dropped() {
        let rules = vec![root_rule(vec![custom("--red", "#e44"), custom("--blue", "#44e")])];
        let purged = purge_rules(&rules, &reached(&["--red"]), 0);
        match &purged[0] {
            Rule::Style(style) => {
                assert_eq!(style.declarations.declarations.len(), 1);
                assert_eq!(style.declarations.declarations[0].name, "--red");
            }
            other => panic!("expected style rule, got {other:?}"),
        }
    }

    #[test]
    fn non_custom_declarations_are_never_dropped() {
        let rules = vec![root_rule(vec![
            Declaration {
                name: "color".to_owned(),
                value: vec![ValueComponent::Raw("red".to_owned())],
            },
            custom("--gone", "1px"),
        ])];
        let purged = purge_rules(&rules, &reached(&[]), 0);
        match &purged[0] {
            Rule::Style(style) => {
                assert_eq!(style.declarations.declarations.len(), 1);
                assert_eq!(style.declarations.declarations[0].name, "color");
            }
            other => panic!("expected style rule, got {other:?}"),
        }
    }

    #[test]
    fn important_declarations_are_filtered_too() {
        let rules = vec![Rule::Style(StyleRule {
            selectors: vec![":root".to_owned()],
            declarations: DeclarationBlock {
                declarations: Vec::new(),
                important_declarations: vec![custom("--kept", "1"), custom("--gone", "2")],
            },
            rules: Vec::new(),
            loc: Location::default(),
        })];
        let purged = purge_rules(&rules, &reached(&["--kept"]), 0);
        match &purged[0] {
            Rule::Style(style) => {
                assert_eq!(style.declarations.important_declarations.len(), 1);
                assert_eq!(style.declarations.important_declarations[0].name, "--kept");
            }
            other => panic!("expected style rule, got {other:?}"),
        }
    }

    #[test]
    fn keyframes_are_kept_only_when_named_in_the_set() {
        let keyframes = |name: &str| {
            Rule::Keyframes(KeyframesRule {
                name: name.to_owned(),
                frames: vec![Keyframe::default()],
                loc: Location::default(),
            })
        };
        let rules = vec![keyframes("fade-in"), keyframes("spin")];
        let purged = purge_rules(&rules, &reached(&["fade-in"]), 0);
        assert_eq!(purged.len(), 1);
        assert!(matches!(&purged[0], Rule::Keyframes(rule) if rule.name == "fade-in"));
    }

    #[test]
    fn emptied_wrappers_are_retained() {
        let rules = vec![Rule::Media(MediaRule {
            query: vec![MediaQuery::default()],
            rules: vec![root_rule(vec![custom("--gone", "1px")])],
            loc: Location::default(),
        })];
        let purged = purge_rules(&rules, &reached(&[]), 0);
        assert_eq!(purged.len(), 1);
        match &purged[0] {
            Rule::Media(media) => match &media.rules[0] {
                Rule::Style(style) => assert!(style.declarations.is_empty()),
                other => panic!("expected style rule, got {other:?}"),
            },
            other => panic!("expected media rule, got {other:?}"),
        }
    }

    #[test]
    fn source_indices_are_renumbered_recursively() {
        let mut inner = StyleRule {
            selectors: vec!["a".to_owned()],
            declarations: DeclarationBlock::default(),
            rules: Vec::new(),
            loc: Location::default(),
        };
        inner.loc.source_index = 1;
        let rules = vec![Rule::Media(MediaRule {
            query: vec![MediaQuery::default()],
            rules: vec![Rule::Style(inner)],
            loc: Location {
                source_index: 1,
                line: 0,
                column: 0,
            },
        })];
        let purged = purge_rules(&rules, &reached(&[]), 3);
        match &purged[0] {
            Rule::Media(media) => {
                assert_eq!(media.loc.source_index, 4);
                match &media.rules[0] {
                    Rule::Style(style) => assert_eq!(style.loc.source_index, 4),
                    other => panic!("expected style rule, got {other:?}"),
                }
            }
            other => panic!("expected media rule, got {other:?}"),
        }
    }
}
