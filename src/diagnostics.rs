//! Non-fatal misuse reporting.
//!
//! Recoverable mistakes (unknown prop, unknown action, malformed rename,
//! namespace collision) never abort a mapping. They are reported to a
//! [`Diagnostics`] sink and the offending entry is skipped.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// A recoverable misuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Requested prop is neither in the namespace state nor an override.
    InvalidProp { connector: String, prop: String },
    /// Requested action is not in the connector's action table.
    InvalidAction { connector: String, action: String },
    /// `prop_as` was given an empty source or target name.
    MalformedRename { source: String, target: String },
    /// Two reducers declared the same namespace; the later one replaced the earlier.
    NamespaceCollision { namespace: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidProp { connector, prop } => {
                write!(f, "Connector '{}': invalid prop name '{}'", connector, prop)
            }
            Warning::InvalidAction { connector, action } => {
                write!(f, "Connector '{}': invalid action name '{}'", connector, action)
            }
            Warning::MalformedRename { source, target } => write!(
                f,
                "prop_as expects non-empty names (got '{}' -> '{}')",
                source, target
            ),
            Warning::NamespaceCollision { namespace } => write!(
                f,
                "Namespace '{}' registered twice, last reducer wins",
                namespace
            ),
        }
    }
}

/// Sink for [`Warning`]s.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, warning: Warning);
}

/// Default sink: one `tracing::warn!` event per warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, warning: Warning) {
        match &warning {
            Warning::InvalidProp { connector, prop } => {
                tracing::warn!(connector = %connector, prop = %prop, "{}", warning)
            }
            Warning::InvalidAction { connector, action } => {
                tracing::warn!(connector = %connector, action = %action, "{}", warning)
            }
            Warning::MalformedRename { source, target } => {
                tracing::warn!(source = %source, target = %target, "{}", warning)
            }
            Warning::NamespaceCollision { namespace } => {
                tracing::warn!(namespace = %namespace, "{}", warning)
            }
        }
    }
}

/// Collects warnings in memory so callers can inspect them.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    warnings: Mutex<Vec<Warning>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.warnings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().is_empty()
    }

    pub fn clear(&self) {
        self.warnings.lock().clear();
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, warning: Warning) {
        self.warnings.lock().push(warning);
    }
}

pub(crate) fn default_sink() -> Arc<dyn Diagnostics> {
    Arc::new(TracingDiagnostics)
}
