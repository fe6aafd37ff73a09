//! Plugin configuration.

use props_syntax::Targets;

/// Default marker identifying a property's dark-mode counterpart:
/// `--text-@media:dark` is the dark variant of `--text`.
pub const DEFAULT_ADAPTIVE_MARKER: &str = "-@media:dark";

/// Suffix under which a keyframes companion definition is registered, so
/// `var(--fade-in)` can pull in `@keyframes fade-in` through `--fade-in-@`.
pub(crate) const KEYFRAMES_COMPANION_SUFFIX: &str = "-@";

/// Default target selector for injected light-mode declarations.
pub(crate) const ROOT_SELECTOR: &str = ":root";

/// A literal property value: verbatim CSS text, or a number that is
/// stringified.
#[derive(Clone, Debug, PartialEq)]
pub enum PropLiteral {
    Text(String),
    Number(f64),
}

impl PropLiteral {
    pub(crate) fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{value:.0}")
                } else {
                    value.to_string()
                }
            }
        }
    }
}

impl From<&str> for PropLiteral {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropLiteral {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropLiteral {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropLiteral {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Configuration for [`crate::JitProps`].
///
/// `properties` keeps insertion order: when the same name is configured
/// twice, the later entry wins in the registry, and auxiliary files (parsed
/// after literals) override both.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Glob patterns naming auxiliary property source files.
    pub files: Vec<String>,
    /// Literal `--name` definitions.
    pub properties: Vec<(String, PropLiteral)>,
    /// Target selector for injected light declarations; defaults to `:root`.
    pub custom_selector: Option<String>,
    /// Target selector inside the dark media block; defaults to the light
    /// selector.
    pub custom_selector_dark: Option<String>,
    /// Suffix identifying dark-mode counterpart names; defaults to
    /// [`DEFAULT_ADAPTIVE_MARKER`].
    pub adaptive_prop_selector: Option<String>,
    /// Cascade layer wrapping all injected content.
    pub layer: Option<String>,
    /// Browser targets forwarded to the serializer, uninterpreted here.
    pub targets: Option<Targets>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropLiteral>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, pattern: impl Into<String>) -> Self {
        self.files.push(pattern.into());
        self
    }

    pub fn custom_selector(mut self, selector: impl Into<String>) -> Self {
        self.custom_selector = Some(selector.into());
        self
    }

    pub fn custom_selector_dark(mut self, selector: impl Into<String>) -> Self {
        self.custom_selector_dark = Some(selector.into());
        self
    }

    pub fn adaptive_prop_selector(mut self, marker: impl Into<String>) -> Self {
        self.adaptive_prop_selector = Some(marker.into());
        self
    }

    pub fn layer(mut self, name: impl Into<String>) -> Self {
        self.layer = Some(name.into());
        self
    }

    pub fn targets(mut self, targets: Targets) -> Self {
        self.targets = Some(targets);
        self
    }
}
