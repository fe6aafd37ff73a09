//! CSS parsing, printing and bundling over the `props_ast` node shapes.
//!
//! This crate is the host-engine side of the injection pipeline: it turns
//! text into trees, trees back into text, and resolves `@import` when a
//! property source spans multiple files. The engine itself only consumes the
//! `props_ast` contract and never touches `cssparser` directly.

#![forbid(unsafe_code)]

mod bundle;
mod parser;
mod printer;

pub use bundle::{bundle, bundle_source};
pub use parser::{ParserOptions, parse_rule_fragment, parse_stylesheet, parse_value};
pub use printer::{PrintOptions, Targets, to_css};
