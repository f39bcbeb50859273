//! Prop selection keys, optionally renaming on connect.

use std::fmt;

use crate::diagnostics::{default_sink, Diagnostics, Warning};

/// Selects a state key or action name for a connector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropKey {
    /// Pass through under the same name.
    Direct(String),
    /// Pass `source` through under the prop name `target`.
    Renamed { source: String, target: String },
}

impl PropKey {
    /// Name looked up in state, overrides or the action table.
    pub fn source(&self) -> &str {
        match self {
            PropKey::Direct(name) => name,
            PropKey::Renamed { source, .. } => source,
        }
    }

    /// Name the selected value is exposed under.
    pub fn target(&self) -> &str {
        match self {
            PropKey::Direct(name) => name,
            PropKey::Renamed { target, .. } => target,
        }
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropKey::Direct(name) => f.write_str(name),
            PropKey::Renamed { source, target } => write!(f, "{} as {}", source, target),
        }
    }
}

impl From<&str> for PropKey {
    fn from(name: &str) -> Self {
        PropKey::Direct(name.to_string())
    }
}

impl From<String> for PropKey {
    fn from(name: String) -> Self {
        PropKey::Direct(name)
    }
}

impl From<&String> for PropKey {
    fn from(name: &String) -> Self {
        PropKey::Direct(name.clone())
    }
}

/// Renames `source` to `target` on connect.
///
/// Empty names are reported as a warning but the key is still built.
pub fn prop_as(source: impl Into<String>, target: impl Into<String>) -> PropKey {
    prop_as_with(source, target, default_sink().as_ref())
}

pub fn prop_as_with(
    source: impl Into<String>,
    target: impl Into<String>,
    diagnostics: &dyn Diagnostics,
) -> PropKey {
    let source = source.into();
    let target = target.into();
    if source.is_empty() || target.is_empty() {
        diagnostics.warn(Warning::MalformedRename {
            source: source.clone(),
            target: target.clone(),
        });
    }
    PropKey::Renamed { source, target }
}

/// Converts a list of anything key-like into [`PropKey`]s.
pub fn keys<K, I>(items: I) -> Vec<PropKey>
where
    K: Into<PropKey>,
    I: IntoIterator<Item = K>,
{
    items.into_iter().map(Into::into).collect()
}
