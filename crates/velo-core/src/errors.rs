//! Error types for the design-tool lookup services.

use std::fmt;
use thiserror::Error;

/// The kind of external reference a lookup was resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    MainComponent,
    Component,
    Style,
    Variable,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainComponent => write!(f, "main component"),
            Self::Component => write!(f, "component"),
            Self::Style => write!(f, "style"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// Faults raised by a [`DesignSource`](crate::DesignSource).
///
/// A reference that simply does not exist is not an error: lookups report it
/// as `Ok(None)`. These variants are reserved for failures of the service
/// itself, and abort a generation run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Lookup of {kind} '{id}' failed: {reason}")]
    Lookup {
        kind: LookupKind,
        id: String,
        reason: String,
    },

    #[error("Invalid component id '{0}': expected 'namespace:local'")]
    InvalidComponentId(String),
}

impl SourceError {
    pub fn lookup(kind: LookupKind, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Lookup {
            kind,
            id: id.into(),
            reason: reason.into(),
        }
    }
}
