//! Owned CSS node shapes and the visitor contract shared between the parser
//! and the property-injection engine.

#![forbid(unsafe_code)]

mod nodes;
mod visit;

pub use nodes::*;
pub use visit::{
    NodeId, Visitor, walk_declaration, walk_declaration_block, walk_rule, walk_stylesheet,
};
