//! Serialization of `props_ast` trees back to CSS text.
//!
//! Output is pretty-printed with two-space indentation and a blank line
//! between sibling rules. Rules left without any content (typically by the
//! injection engine's purge) are not printed at all.

use props_ast::{
    DeclarationBlock, Keyframe, MediaCondition, MediaOperator, MediaQuery, Rule, Stylesheet,
    ValueComponent,
};

/// Browser version targets, forwarded by callers that downlevel output for
/// specific platforms. The printer carries but does not interpret them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Targets {
    pub chrome: Option<u32>,
    pub firefox: Option<u32>,
    pub safari: Option<u32>,
    pub edge: Option<u32>,
}

/// Options for [`to_css`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PrintOptions {
    pub targets: Option<Targets>,
}

/// Serialize a stylesheet. Empty rules are skipped; an empty sheet prints as
/// an empty string.
pub fn to_css(sheet: &Stylesheet, _options: &PrintOptions) -> String {
    let mut out = String::new();
    for comment in &sheet.license_comments {
        out.push_str(comment);
        out.push('\n');
    }
    if !sheet.license_comments.is_empty() && sheet.rules.iter().any(|rule| !is_empty_rule(rule)) {
        out.push('\n');
    }
    print_rule_list(&sheet.rules, 0, &mut out);
    out
}

/// A rule is empty when purging (or authoring) left nothing printable in it.
fn is_empty_rule(rule: &Rule) -> bool {
    match rule {
        Rule::Style(style) => {
            style.declarations.is_empty() && style.rules.iter().all(is_empty_rule)
        }
        Rule::Media(media) => media.rules.iter().all(is_empty_rule),
        Rule::Supports(supports) => supports.rules.iter().all(is_empty_rule),
        Rule::Keyframes(keyframes) => keyframes.frames.is_empty(),
        Rule::LayerBlock(layer) => layer.rules.iter().all(is_empty_rule),
        Rule::Page(page) => {
            page.declarations.is_empty()
                && page
                    .margin_rules
                    .iter()
                    .all(|margin| margin.declarations.is_empty())
        }
        Rule::FontFace(font_face) => font_face.declarations.is_empty(),
        Rule::CustomMedia(_) | Rule::LayerStatement(_) | Rule::Unknown(_) => false,
        Rule::Ignored => true,
    }
}

fn pad(indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn print_rule_list(rules: &[Rule], indent: usize, out: &mut String) {
    let mut first = true;
    for rule in rules {
        if is_empty_rule(rule) {
            continue;
        }
        if !first {
            out.push('\n');
        }
        print_rule(rule, indent, out);
        first = false;
    }
}

fn print_rule(rule: &Rule, indent: usize, out: &mut String) {
    match rule {
        Rule::Style(style) => {
            pad(indent, out);
            out.push_str(&style.selectors.join(", "));
            out.push_str(" {\n");
            print_declaration_block(&style.declarations, indent + 1, out);
            if !style.rules.iter().all(is_empty_rule) {
                out.push('\n');
                print_rule_list(&style.rules, indent + 1, out);
            }
            pad(indent, out);
            out.push_str("}\n");
        }
        Rule::Media(media) => {
            pad(indent, out);
            out.push_str("@media ");
            out.push_str(&print_query_list(&media.query));
            out.push_str(" {\n");
            print_rule_list(&media.rules, indent + 1, out);
            pad(indent, out);
            out.push_str("}\n");
        }
        Rule::Supports(supports) => {
            pad(indent, out);
            out.push_str("@supports ");
            out.push_str(&supports.condition);
            out.push_str(" {\n");
            print_rule_list(&supports.rules, indent + 1, out);
            pad(indent, out);
            out.push_str("}\n");
        }
        Rule::Keyframes(keyframes) => {
            pad(indent, out);
            out.push_str("@keyframes ");
            out.push_str(&keyframes.name);
            out.push_str(" {\n");
            let mut first = true;
            for frame in &keyframes.frames {
                if !first {
                    out.push('\n');
                }
                print_keyframe(frame, indent + 1, out);
                first = false;
            }
            pad(indent, out);
            out.push_str("}\n");
        }
        Rule::CustomMedia(custom) => {
            pad(indent, out);
            out.push_str("@custom-media ");
            out.push_str(&custom.name);
            out.push(' ');
            out.push_str(&print_query_list(&custom.query));
            out.push_str(";\n");
        }
        Rule::LayerBlock(layer) => {
            pad(indent, out);
            out.push_str("@layer ");
            out.push_str(&layer.name.join("."));
            out.push_str(" {\n");
            print_rule_list(&layer.rules, indent + 1, out);
            pad(indent, out);
            out.push_str("}\n");
        }
        Rule::LayerStatement(layer) => {
            pad(indent, out);
            out.push_str("@layer ");
            out.push_str(&layer.names.join(", "));
            out.push_str(";\n");
        }
        Rule::Page(page) => {
            pad(indent, out);
            out.push_str("@page");
            if !page.selectors.is_empty() {
                out.push(' ');
                out.push_str(&page.selectors.join(", "));
            }
            out.push_str(" {\n");
            print_declaration_block(&page.declarations, indent + 1, out);
            for margin in &page.margin_rules {
                if margin.declarations.is_empty() {
                    continue;
                }
                out.push('\n');
                pad(indent + 1, out);
                out.push('@');
                out.push_str(&margin.name);
                out.push_str(" {\n");
                print_declaration_block(&margin.declarations, indent + 2, out);
                pad(indent + 1, out);
                out.push_str("}\n");
            }
            pad(indent, out);
            out.push_str("}\n");
        }
        Rule::FontFace(font_face) => {
            pad(indent, out);
            out.push_str("@font-face {\n");
            print_declaration_block(&font_face.declarations, indent + 1, out);
            pad(indent, out);
            out.push_str("}\n");
        }
        Rule::Unknown(unknown) => {
            pad(indent, out);
            out.push('@');
            out.push_str(&unknown.name);
            if !unknown.prelude.is_empty() {
                out.push(' ');
                out.push_str(&unknown.prelude);
            }
            match &unknown.block {
                Some(block) => {
                    out.push_str(" {\n");
                    pad(indent + 1, out);
                    out.push_str(block);
                    out.push('\n');
                    pad(indent, out);
                    out.push_str("}\n");
                }
                None => out.push_str(";\n"),
            }
        }
        Rule::Ignored => {}
    }
}

fn print_keyframe(frame: &Keyframe, indent: usize, out: &mut String) {
    pad(indent, out);
    out.push_str(&frame.selectors.join(", "));
    out.push_str(" {\n");
    print_declaration_block(&frame.declarations, indent + 1, out);
    pad(indent, out);
    out.push_str("}\n");
}

fn print_declaration_block(block: &DeclarationBlock, indent: usize, out: &mut String) {
    for declaration in &block.declarations {
        pad(indent, out);
        out.push_str(&declaration.name);
        out.push_str(": ");
        print_components(&declaration.value, out);
        out.push_str(";\n");
    }
    for declaration in &block.important_declarations {
        pad(indent, out);
        out.push_str(&declaration.name);
        out.push_str(": ");
        print_components(&declaration.value, out);
        out.push_str(" !important;\n");
    }
}

fn print_components(components: &[ValueComponent], out: &mut String) {
    for component in components {
        match component {
            ValueComponent::Raw(raw) => out.push_str(raw),
            ValueComponent::Var(var) => {
                out.push_str("var(");
                out.push_str(&var.name);
                if let Some(fallback) = &var.fallback {
                    out.push_str(", ");
                    print_components(fallback, out);
                }
                out.push(')');
            }
        }
    }
}

fn print_query_list(queries: &[MediaQuery]) -> String {
    queries
        .iter()
        .map(print_query)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_query(query: &MediaQuery) -> String {
    let mut parts = Vec::new();
    if let Some(media_type) = &query.media_type {
        if media_type != "all" || query.condition.is_none() {
            parts.push(media_type.clone());
        }
    }
    if let Some(condition) = &query.condition {
        parts.push(print_condition(condition));
    }
    if parts.is_empty() {
        return "all".to_owned();
    }
    parts.join(" and ")
}

fn print_condition(condition: &MediaCondition) -> String {
    match condition {
        MediaCondition::Feature(feature) => match &feature.value {
            Some(value) => format!("({}: {})", feature.name, value),
            None => format!("({})", feature.name),
        },
        MediaCondition::Not(inner) => format!("not {}", print_grouped(inner)),
        MediaCondition::Operation {
            operator,
            conditions,
        } => {
            let joiner = match operator {
                MediaOperator::And => " and ",
                MediaOperator::Or => " or ",
            };
            conditions
                .iter()
                .map(print_grouped)
                .collect::<Vec<_>>()
                .join(joiner)
        }
    }
}

/// Print a condition, parenthesizing compound shapes so they stay
/// unambiguous when nested.
fn print_grouped(condition: &MediaCondition) -> String {
    match condition {
        MediaCondition::Feature(_) => print_condition(condition),
        MediaCondition::Not(_) | MediaCondition::Operation { .. } => {
            format!("({})", print_condition(condition))
        }
    }
}
