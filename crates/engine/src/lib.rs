//! Just-in-time resolution of CSS custom properties.
//!
//! Given a stylesheet under compilation and a pool of candidate definitions
//! (literal options or auxiliary source files), the engine determines the
//! minimal closure of properties, custom media rules and keyframes the sheet
//! actually references — transitively, through definitions whose values
//! reference other definitions — and splices exactly that closure into the
//! output, under the right light/dark selector context and optionally inside
//! a cascade layer.

#![forbid(unsafe_code)]

mod engine;
mod graph;
mod options;
mod purge;
mod registry;
mod sources;

pub use engine::JitProps;
pub use graph::{Expansion, expand};
pub use options::{DEFAULT_ADAPTIVE_MARKER, Options, PropLiteral};
pub use props_syntax::Targets;
pub use registry::{PropertyDefinition, PropertyValue, Registry};
