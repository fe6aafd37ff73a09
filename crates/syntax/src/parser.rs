//! cssparser-backed stylesheet parsing.
//!
//! Top-level rules are dispatched by hand so unrecognized at-rules degrade to
//! raw passthrough instead of failing the sheet; declaration bodies go
//! through the `cssparser` rule-body machinery. Parse errors never abort: a
//! broken rule becomes `Rule::Ignored` and parsing resumes at the next rule.

use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::ToCss;
use cssparser::Token;
use log::debug;
use props_ast::{
    CustomMediaRule, Declaration, DeclarationBlock, FontFaceRule, Keyframe, KeyframesRule,
    LayerBlockRule, LayerStatementRule, Location, MediaCondition, MediaFeature, MediaOperator,
    MediaQuery, MediaRule, PageMarginRule, PageRule, Rule, StyleRule, Stylesheet, SupportsRule,
    UnknownAtRule, ValueComponent, VarFunction,
};

/// Knobs forwarded by the caller to the parser.
#[derive(Clone, Debug, Default)]
pub struct ParserOptions {
    /// Recognize the `@custom-media` draft; when off the rule is kept as an
    /// uninterpreted at-rule.
    pub custom_media: bool,
}

/// Parse a full stylesheet. Never fails; unparseable rules are dropped.
pub fn parse_stylesheet(css: &str, filename: &str, options: &ParserOptions) -> Stylesheet {
    Stylesheet {
        sources: vec![filename.to_owned()],
        license_comments: collect_license_comments(css),
        rules: parse_rules(css, 0, options),
    }
}

/// Lift a raw rule string (an `@keyframes` or `@custom-media` body supplied
/// as a literal option value) into a structured rule. Returns `None` when the
/// text does not produce one of those two rule kinds.
pub fn parse_rule_fragment(css: &str) -> Option<Rule> {
    let options = ParserOptions { custom_media: true };
    parse_rules(css, 0, &options)
        .into_iter()
        .find(|rule| matches!(rule, Rule::Keyframes(_) | Rule::CustomMedia(_)))
}

/// Parse a declaration value into components, lifting `var()` references.
pub fn parse_value(text: &str) -> Vec<ValueComponent> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut components = parse_components(&mut parser);
    trim_components(&mut components);
    components
}

/// Collect `/*! ... */` comments from the head of a source file.
pub(crate) fn collect_license_comments(css: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut rest = css.trim_start();
    while rest.starts_with("/*!") {
        let Some(end) = rest.find("*/") else { break };
        comments.push(rest[..end + 2].to_owned());
        rest = rest[end + 2..].trim_start();
    }
    comments
}

/// Parse a rule list with `source_index` stamped on every rule location.
pub(crate) fn parse_rules(css: &str, source_index: u32, options: &ParserOptions) -> Vec<Rule> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_rule_list(&mut parser, source_index, options)
}

fn parse_rule_list(parser: &mut Parser, source_index: u32, options: &ParserOptions) -> Vec<Rule> {
    let mut rules = Vec::new();
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }
        match parse_rule(parser, source_index, options) {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            // A failed rule has already been consumed through its terminating
            // semicolon or block, so parsing resumes at the next rule.
            Err(()) => {
                debug!(target: "props_syntax", "dropping unparseable rule");
                rules.push(Rule::Ignored);
            }
        }
    }
    rules
}

fn location(parser: &Parser, source_index: u32) -> Location {
    let source_location = parser.current_source_location();
    Location {
        source_index,
        line: source_location.line,
        column: source_location.column,
    }
}

fn parse_rule<'i>(
    parser: &mut Parser<'i, '_>,
    source_index: u32,
    options: &ParserOptions,
) -> Result<Option<Rule>, ()> {
    let loc = location(parser, source_index);
    let at_rule = parser.try_parse(|p| -> Result<Option<Rule>, ParseError<'i, ()>> {
        if let Ok(Token::AtKeyword(keyword)) = p.next() {
            let name = keyword.to_ascii_lowercase();
            parse_at_rule(&name, p, loc, options)
        } else {
            Err(p.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
        }
    });
    if let Ok(rule) = at_rule {
        return Ok(rule);
    }
    parse_style_rule(parser, loc).map(Some)
}

enum PreludeEnd {
    Block,
    Semicolon,
    Eof,
}

/// Collect the raw prelude text up to the rule's block or terminating
/// semicolon. Nested component blocks inside the prelude are skipped whole,
/// so their contents are captured verbatim.
fn rule_prelude(parser: &mut Parser) -> (String, PreludeEnd) {
    let start = parser.position();
    let mut end = PreludeEnd::Eof;
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                end = PreludeEnd::Block;
                break;
            }
            Ok(Token::Semicolon) => {
                end = PreludeEnd::Semicolon;
                break;
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }
    let raw = parser.slice_from(start);
    let trimmed = raw.trim_end_matches(['{', ';']).trim();
    (trimmed.to_owned(), end)
}

fn parse_at_rule<'i>(
    name: &str,
    parser: &mut Parser<'i, '_>,
    loc: Location,
    options: &ParserOptions,
) -> Result<Option<Rule>, ParseError<'i, ()>> {
    match name {
        "media" => {
            let (prelude, end) = rule_prelude(parser);
            if !matches!(end, PreludeEnd::Block) {
                return Err(parser.new_error(BasicParseErrorKind::AtRuleBodyInvalid));
            }
            let query = parse_media_query_list(&prelude);
            let rules = nested_rule_list(parser, loc.source_index, options)?;
            Ok(Some(Rule::Media(MediaRule { query, rules, loc })))
        }
        "supports" => {
            let (prelude, end) = rule_prelude(parser);
            if !matches!(end, PreludeEnd::Block) {
                return Err(parser.new_error(BasicParseErrorKind::AtRuleBodyInvalid));
            }
            let rules = nested_rule_list(parser, loc.source_index, options)?;
            Ok(Some(Rule::Supports(SupportsRule {
                condition: prelude,
                rules,
                loc,
            })))
        }
        "keyframes" => {
            let (prelude, end) = rule_prelude(parser);
            if !matches!(end, PreludeEnd::Block) {
                return Err(parser.new_error(BasicParseErrorKind::AtRuleBodyInvalid));
            }
            let rule_name = prelude.trim_matches(['"', '\'']).to_owned();
            let frames = parser.parse_nested_block(|block| parse_keyframe_list(block, loc))?;
            Ok(Some(Rule::Keyframes(KeyframesRule {
                name: rule_name,
                frames,
                loc,
            })))
        }
        "custom-media" if options.custom_media => {
            let (prelude, _end) = rule_prelude(parser);
            Ok(parse_custom_media_prelude(&prelude, loc).map(Rule::CustomMedia))
        }
        "layer" => {
            let (prelude, end) = rule_prelude(parser);
            if matches!(end, PreludeEnd::Block) {
                let rules = nested_rule_list(parser, loc.source_index, options)?;
                let name = prelude
                    .split('.')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_owned)
                    .collect();
                Ok(Some(Rule::LayerBlock(LayerBlockRule { name, rules, loc })))
            } else {
                let names = split_commas(&prelude);
                Ok(Some(Rule::LayerStatement(LayerStatementRule { names, loc })))
            }
        }
        "page" => {
            let (prelude, end) = rule_prelude(parser);
            if !matches!(end, PreludeEnd::Block) {
                return Err(parser.new_error(BasicParseErrorKind::AtRuleBodyInvalid));
            }
            let (declarations, margin_rules) = parser
                .parse_nested_block(|block| Ok(parse_body(block, loc.source_index, true)))?;
            Ok(Some(Rule::Page(PageRule {
                selectors: split_commas(&prelude),
                declarations,
                margin_rules,
                loc,
            })))
        }
        "font-face" => {
            let (_prelude, end) = rule_prelude(parser);
            if !matches!(end, PreludeEnd::Block) {
                return Err(parser.new_error(BasicParseErrorKind::AtRuleBodyInvalid));
            }
            let (declarations, _margins) = parser
                .parse_nested_block(|block| Ok(parse_body(block, loc.source_index, false)))?;
            Ok(Some(Rule::FontFace(FontFaceRule { declarations, loc })))
        }
        _ => {
            let (prelude, end) = rule_prelude(parser);
            let block = if matches!(end, PreludeEnd::Block) {
                Some(raw_block_contents(parser)?)
            } else {
                None
            };
            Ok(Some(Rule::Unknown(UnknownAtRule {
                name: name.to_owned(),
                prelude,
                block,
                loc,
            })))
        }
    }
}

fn nested_rule_list<'i>(
    parser: &mut Parser<'i, '_>,
    source_index: u32,
    options: &ParserOptions,
) -> Result<Vec<Rule>, ParseError<'i, ()>> {
    parser.parse_nested_block(|block| Ok(parse_rule_list(block, source_index, options)))
}

/// Capture the raw text of an unrecognized at-rule's block.
fn raw_block_contents<'i>(parser: &mut Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
    let start = parser.position();
    parser.parse_nested_block(|block| {
        while block.next_including_whitespace_and_comments().is_ok() {}
        Ok::<_, ParseError<'i, ()>>(())
    })?;
    let raw = parser.slice_from(start);
    Ok(raw.strip_suffix('}').unwrap_or(raw).trim().to_owned())
}

fn parse_style_rule(parser: &mut Parser, loc: Location) -> Result<Rule, ()> {
    let (prelude, end) = rule_prelude(parser);
    if !matches!(end, PreludeEnd::Block) || prelude.is_empty() {
        return Err(());
    }
    let declarations: Result<_, ParseError<'_, ()>> = parser
        .parse_nested_block(|block| Ok(parse_body(block, loc.source_index, false).0));
    let declarations = declarations.map_err(|_| ())?;
    Ok(Rule::Style(StyleRule {
        selectors: split_commas(&prelude),
        declarations,
        rules: Vec::new(),
        loc,
    }))
}

fn parse_keyframe_list<'i>(
    parser: &mut Parser<'i, '_>,
    loc: Location,
) -> Result<Vec<Keyframe>, ParseError<'i, ()>> {
    let mut frames = Vec::new();
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }
        let (prelude, end) = rule_prelude(parser);
        if !matches!(end, PreludeEnd::Block) {
            break;
        }
        let declarations = parser
            .parse_nested_block(|block| Ok(parse_body(block, loc.source_index, false).0))?;
        frames.push(Keyframe {
            selectors: split_commas(&prelude),
            declarations,
        });
    }
    Ok(frames)
}

fn parse_custom_media_prelude(prelude: &str, loc: Location) -> Option<CustomMediaRule> {
    let mut input = ParserInput::new(prelude);
    let mut parser = Parser::new(&mut input);
    let name = parser.expect_ident().ok()?.to_string();
    if !name.starts_with("--") {
        return None;
    }
    let start = parser.position();
    while parser.next_including_whitespace().is_ok() {}
    let rest = parser.slice_from(start).trim().to_owned();
    Some(CustomMediaRule {
        name,
        query: parse_media_query_list(&rest),
        loc,
    })
}

fn split_commas(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0_i32;
    let mut current = String::new();
    for character in text.chars() {
        match character {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                let part = current.trim();
                if !part.is_empty() {
                    parts.push(part.to_owned());
                }
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(character);
    }
    let part = current.trim();
    if !part.is_empty() {
        parts.push(part.to_owned());
    }
    parts
}

// ---------------------------------------------------------------------------
// Media queries
// ---------------------------------------------------------------------------

/// Parse a comma-separated media query list from raw prelude text.
pub(crate) fn parse_media_query_list(text: &str) -> Vec<MediaQuery> {
    split_commas(text)
        .into_iter()
        .map(|part| parse_media_query(&part))
        .collect()
}

fn parse_media_query(text: &str) -> MediaQuery {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut media_type = None;
    let mut conditions = Vec::new();
    let mut operator = MediaOperator::And;
    let mut pending_not = false;
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Ident(ident) => match ident.to_ascii_lowercase().as_str() {
                "and" => operator = MediaOperator::And,
                "or" => operator = MediaOperator::Or,
                "not" => pending_not = true,
                "only" => {}
                word => {
                    if media_type.is_none() {
                        media_type = Some(word.to_owned());
                    }
                }
            },
            Token::ParenthesisBlock => {
                if let Ok(condition) = parser.parse_nested_block(|inner| parse_condition(inner)) {
                    let condition = if pending_not {
                        MediaCondition::Not(Box::new(condition))
                    } else {
                        condition
                    };
                    pending_not = false;
                    conditions.push(condition);
                }
            }
            _ => {}
        }
    }
    let condition = match conditions.len() {
        0 => None,
        1 => Some(conditions.swap_remove(0)),
        _ => Some(MediaCondition::Operation {
            operator,
            conditions,
        }),
    };
    MediaQuery {
        media_type,
        condition,
    }
}

/// Parse the contents of one parenthesized media condition.
fn parse_condition<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<MediaCondition, ParseError<'i, ()>> {
    parser.skip_whitespace();
    let start = parser.position();

    // `(not (feature))`
    if parser
        .try_parse(|p| p.expect_ident_matching("not"))
        .is_ok()
    {
        parser.skip_whitespace();
        let mut inner = None;
        if let Ok(Token::ParenthesisBlock) = parser.next() {
            inner = parser.parse_nested_block(|p| parse_condition(p)).ok();
        }
        return match inner {
            Some(condition) => Ok(MediaCondition::Not(Box::new(condition))),
            None => Err(parser.new_error(BasicParseErrorKind::EndOfInput)),
        };
    }

    // `((a) and (b))` — a grouped boolean operation
    let grouped = parser.try_parse(|p| -> Result<MediaCondition, ParseError<'i, ()>> {
        if let Ok(Token::ParenthesisBlock) = p.next() {
            p.parse_nested_block(|inner| parse_condition(inner))
        } else {
            Err(p.new_error(BasicParseErrorKind::EndOfInput))
        }
    });
    if let Ok(first) = grouped {
        let mut conditions = vec![first];
        let mut operator = MediaOperator::And;
        loop {
            parser.skip_whitespace();
            if parser.is_exhausted() {
                break;
            }
            if parser.try_parse(|p| p.expect_ident_matching("and")).is_ok() {
                operator = MediaOperator::And;
            } else if parser.try_parse(|p| p.expect_ident_matching("or")).is_ok() {
                operator = MediaOperator::Or;
            }
            parser.skip_whitespace();
            let mut next_condition = None;
            if let Ok(Token::ParenthesisBlock) = parser.next() {
                next_condition = parser.parse_nested_block(|inner| parse_condition(inner)).ok();
            }
            match next_condition {
                Some(condition) => conditions.push(condition),
                None => break,
            }
        }
        if conditions.len() == 1 {
            return Ok(conditions.swap_remove(0));
        }
        return Ok(MediaCondition::Operation {
            operator,
            conditions,
        });
    }

    // `(name)` or `(name: value)`; anything fancier is kept verbatim.
    let name = parser.expect_ident()?.to_string();
    if parser.try_parse(|p| p.expect_colon()).is_ok() {
        parser.skip_whitespace();
        let value_start = parser.position();
        while parser.next_including_whitespace().is_ok() {}
        let value = parser.slice_from(value_start).trim().to_owned();
        return Ok(MediaCondition::Feature(MediaFeature {
            name,
            value: Some(value),
        }));
    }
    if parser.is_exhausted() {
        return Ok(MediaCondition::Feature(MediaFeature { name, value: None }));
    }
    while parser.next_including_whitespace().is_ok() {}
    let raw = parser.slice_from(start).trim().to_owned();
    Ok(MediaCondition::Feature(MediaFeature {
        name: raw,
        value: None,
    }))
}

// ---------------------------------------------------------------------------
// Declaration bodies
// ---------------------------------------------------------------------------

struct ParsedDeclaration {
    declaration: Declaration,
    important: bool,
}

enum BodyItem {
    Declaration(ParsedDeclaration),
    Margin(PageMarginRule),
}

/// Body parser for style, keyframe, font-face and page blocks. Page bodies
/// additionally accept margin-box at-rules.
struct BodyParser {
    source_index: u32,
    in_page: bool,
}

/// Parse `!important` at the end of a value, returning
/// (`value_without_important`, `important_flag`).
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    if let Some(head) = trimmed.strip_suffix("important") {
        let head = head.trim_end();
        if let Some(before_bang) = head.strip_suffix('!') {
            return (before_bang.trim_end().to_owned(), true);
        }
    }
    (trimmed.to_owned(), false)
}

impl<'i> CssDeclarationParser<'i> for BodyParser {
    type Declaration = BodyItem;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let raw = input.slice_from(start);
        let (value_text, important) = split_important_tail(raw);
        let name = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        Ok(BodyItem::Declaration(ParsedDeclaration {
            declaration: Declaration {
                name,
                value: parse_value(&value_text),
            },
            important,
        }))
    }
}

impl<'i> CssAtRuleParser<'i> for BodyParser {
    type Prelude = String;
    type AtRule = BodyItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        if self.in_page && is_page_margin_box(&name) {
            Ok(name.to_ascii_lowercase())
        } else {
            Err(input.new_error(BasicParseErrorKind::AtRuleInvalid(name)))
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        state: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let source_location = state.source_location();
        let (declarations, _margins) = parse_body(input, self.source_index, false);
        Ok(BodyItem::Margin(PageMarginRule {
            name: prelude,
            declarations,
            loc: Location {
                source_index: self.source_index,
                line: source_location.line,
                column: source_location.column,
            },
        }))
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        Err(())
    }
}

impl<'i> CssQualifiedRuleParser<'i> for BodyParser {
    type Prelude = ();
    type QualifiedRule = BodyItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl<'i> CssRuleBodyItemParser<'i, BodyItem, ()> for BodyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

fn is_page_margin_box(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "top-left-corner"
            | "top-left"
            | "top-center"
            | "top-right"
            | "top-right-corner"
            | "bottom-left-corner"
            | "bottom-left"
            | "bottom-center"
            | "bottom-right"
            | "bottom-right-corner"
            | "left-top"
            | "left-middle"
            | "left-bottom"
            | "right-top"
            | "right-middle"
            | "right-bottom"
    )
}

/// Parse the declarations (and, inside `@page`, margin boxes) of a block.
fn parse_body(
    block: &mut Parser,
    source_index: u32,
    in_page: bool,
) -> (DeclarationBlock, Vec<PageMarginRule>) {
    let mut declarations = DeclarationBlock::default();
    let mut margins = Vec::new();
    let mut body = BodyParser {
        source_index,
        in_page,
    };
    for item in CssRuleBodyParser::new(block, &mut body).flatten() {
        match item {
            BodyItem::Declaration(parsed) => {
                if parsed.important {
                    declarations.important_declarations.push(parsed.declaration);
                } else {
                    declarations.declarations.push(parsed.declaration);
                }
            }
            BodyItem::Margin(margin) => margins.push(margin),
        }
    }
    (declarations, margins)
}

// ---------------------------------------------------------------------------
// Declaration values
// ---------------------------------------------------------------------------

fn flush_raw(raw: &mut String, components: &mut Vec<ValueComponent>) {
    if !raw.is_empty() {
        components.push(ValueComponent::Raw(std::mem::take(raw)));
    }
}

fn parse_components(parser: &mut Parser) -> Vec<ValueComponent> {
    let mut components = Vec::new();
    let mut raw = String::new();
    loop {
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Function(ref name) if name.eq_ignore_ascii_case("var") => {
                flush_raw(&mut raw, &mut components);
                if let Ok(var) = parser.parse_nested_block(|inner| parse_var_function(inner)) {
                    components.push(ValueComponent::Var(var));
                }
            }
            Token::Function(_) => {
                raw.push_str(&token.to_css_string());
                flush_raw(&mut raw, &mut components);
                components.extend(nested_components(parser));
                raw.push(')');
            }
            Token::ParenthesisBlock => {
                raw.push('(');
                flush_raw(&mut raw, &mut components);
                components.extend(nested_components(parser));
                raw.push(')');
            }
            Token::SquareBracketBlock => {
                raw.push('[');
                flush_raw(&mut raw, &mut components);
                components.extend(nested_components(parser));
                raw.push(']');
            }
            Token::CurlyBracketBlock => {
                raw.push('{');
                flush_raw(&mut raw, &mut components);
                components.extend(nested_components(parser));
                raw.push('}');
            }
            ref other => raw.push_str(&other.to_css_string()),
        }
    }
    flush_raw(&mut raw, &mut components);
    components
}

fn nested_components(parser: &mut Parser) -> Vec<ValueComponent> {
    let nested: Result<Vec<ValueComponent>, ParseError<'_, ()>> =
        parser.parse_nested_block(|inner| Ok(parse_components(inner)));
    nested.unwrap_or_default()
}

fn parse_var_function<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<VarFunction, ParseError<'i, ()>> {
    parser.skip_whitespace();
    let name = parser.expect_ident()?.to_string();
    let fallback = if parser.try_parse(|p| p.expect_comma()).is_ok() {
        let mut components = parse_components(parser);
        trim_components(&mut components);
        Some(components)
    } else {
        None
    };
    Ok(VarFunction { name, fallback })
}

fn trim_components(components: &mut Vec<ValueComponent>) {
    if let Some(ValueComponent::Raw(first)) = components.first_mut() {
        *first = first.trim_start().to_owned();
    }
    if let Some(ValueComponent::Raw(last)) = components.last_mut() {
        *last = last.trim_end().to_owned();
    }
    components.retain(|component| !matches!(component, ValueComponent::Raw(raw) if raw.is_empty()));
}
