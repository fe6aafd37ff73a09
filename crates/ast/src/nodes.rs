//! Tagged rule, declaration and media-condition variants.
//!
//! These shapes are the minimal contract the injection engine relies on; any
//! parser that can produce them can drive the engine.

/// Position of a rule within the concatenated source list.
///
/// `source_index` addresses an entry of [`Stylesheet::sources`]; line and
/// column refer to that source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub source_index: u32,
    pub line: u32,
    pub column: u32,
}

/// A parsed stylesheet: rule list plus the source files it was built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stylesheet {
    /// File names contributing rules, addressed by `Location::source_index`.
    pub sources: Vec<String>,
    /// `/*! ... */` comments lifted to the top of the output.
    pub license_comments: Vec<String>,
    pub rules: Vec<Rule>,
}

/// A top-level or nested CSS rule.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Style(StyleRule),
    Media(MediaRule),
    Supports(SupportsRule),
    Keyframes(KeyframesRule),
    CustomMedia(CustomMediaRule),
    LayerBlock(LayerBlockRule),
    LayerStatement(LayerStatementRule),
    Page(PageRule),
    FontFace(FontFaceRule),
    /// An at-rule this model does not interpret, kept for reprinting.
    Unknown(UnknownAtRule),
    /// A rule dropped during parsing; never reprinted.
    Ignored,
}

impl Rule {
    /// The rule's own source location, when it has one.
    pub fn location_mut(&mut self) -> Option<&mut Location> {
        match self {
            Self::Style(rule) => Some(&mut rule.loc),
            Self::Media(rule) => Some(&mut rule.loc),
            Self::Supports(rule) => Some(&mut rule.loc),
            Self::Keyframes(rule) => Some(&mut rule.loc),
            Self::CustomMedia(rule) => Some(&mut rule.loc),
            Self::LayerBlock(rule) => Some(&mut rule.loc),
            Self::LayerStatement(rule) => Some(&mut rule.loc),
            Self::Page(rule) => Some(&mut rule.loc),
            Self::FontFace(rule) => Some(&mut rule.loc),
            Self::Unknown(rule) => Some(&mut rule.loc),
            Self::Ignored => None,
        }
    }
}

/// `selector, selector { declarations }` with optional nested rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    pub declarations: DeclarationBlock,
    pub rules: Vec<Rule>,
    pub loc: Location,
}

/// `@media <queries> { rules }`
#[derive(Clone, Debug, PartialEq)]
pub struct MediaRule {
    pub query: Vec<MediaQuery>,
    pub rules: Vec<Rule>,
    pub loc: Location,
}

/// `@supports <condition> { rules }` — the condition is kept verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct SupportsRule {
    pub condition: String,
    pub rules: Vec<Rule>,
    pub loc: Location,
}

/// `@keyframes <name> { frames }`
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframesRule {
    pub name: String,
    pub frames: Vec<Keyframe>,
    pub loc: Location,
}

/// A single keyframe block (`from`, `to` or percentage selectors).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframe {
    pub selectors: Vec<String>,
    pub declarations: DeclarationBlock,
}

/// `@custom-media --name <queries>;`
#[derive(Clone, Debug, PartialEq)]
pub struct CustomMediaRule {
    pub name: String,
    pub query: Vec<MediaQuery>,
    pub loc: Location,
}

/// `@layer <name> { rules }`
#[derive(Clone, Debug, PartialEq)]
pub struct LayerBlockRule {
    /// Dotted layer name segments, e.g. `theme.base` is `["theme", "base"]`.
    pub name: Vec<String>,
    pub rules: Vec<Rule>,
    pub loc: Location,
}

/// `@layer a, b.c;`
#[derive(Clone, Debug, PartialEq)]
pub struct LayerStatementRule {
    pub names: Vec<String>,
    pub loc: Location,
}

/// `@page <selectors> { declarations; @top-left { ... } }`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageRule {
    pub selectors: Vec<String>,
    pub declarations: DeclarationBlock,
    pub margin_rules: Vec<PageMarginRule>,
    pub loc: Location,
}

/// A page-margin box inside `@page`, e.g. `@top-left`.
#[derive(Clone, Debug, PartialEq)]
pub struct PageMarginRule {
    pub name: String,
    pub declarations: DeclarationBlock,
    pub loc: Location,
}

/// `@font-face { declarations }`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontFaceRule {
    pub declarations: DeclarationBlock,
    pub loc: Location,
}

/// An uninterpreted at-rule, reprinted as parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownAtRule {
    pub name: String,
    pub prelude: String,
    /// Raw block contents without the surrounding braces, if the rule had a block.
    pub block: Option<String>,
    pub loc: Location,
}

/// Normal and `!important` declarations of one rule body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeclarationBlock {
    pub declarations: Vec<Declaration>,
    pub important_declarations: Vec<Declaration>,
}

impl DeclarationBlock {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.important_declarations.is_empty()
    }
}

/// A single `name: value` declaration.
///
/// The declaration is a custom property iff [`Declaration::is_custom`]; custom
/// property names keep their authored case, all others are lowercased.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Vec<ValueComponent>,
}

impl Declaration {
    pub fn is_custom(&self) -> bool {
        self.name.starts_with("--")
    }
}

/// One piece of a declaration value: opaque text, or a structured `var()`.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueComponent {
    Raw(String),
    Var(VarFunction),
}

/// `var(--name)` or `var(--name, <fallback>)`; fallbacks may nest further
/// `var()` references.
#[derive(Clone, Debug, PartialEq)]
pub struct VarFunction {
    pub name: String,
    pub fallback: Option<Vec<ValueComponent>>,
}

/// One comma-separated member of a media query list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaQuery {
    pub media_type: Option<String>,
    pub condition: Option<MediaCondition>,
}

/// A media condition tree.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaCondition {
    Feature(MediaFeature),
    Not(Box<MediaCondition>),
    Operation {
        operator: MediaOperator,
        conditions: Vec<MediaCondition>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaOperator {
    And,
    Or,
}

/// `(name)` or `(name: value)`; a custom-media reference is a feature whose
/// name starts with `--` and carries no value.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaFeature {
    pub name: String,
    pub value: Option<String>,
}
