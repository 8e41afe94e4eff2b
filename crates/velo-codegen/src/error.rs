//! Error types for code generation.

use thiserror::Error;
use velo_core::SourceError;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Faults that abort a generation run.
///
/// Missing styles, variables or components are not errors: they degrade to
/// documented defaults. Anything reported here replaces the whole output with
/// a single diagnostic artifact.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A lookup service failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A component is missing a child its kind requires.
    #[error("Component '{component}' has no child at {path}")]
    MissingChild {
        component: String,
        path: String,
    },

    /// A component is missing a property its kind requires.
    #[error("Missing required property '{property}' on component '{component}'")]
    MissingProperty {
        component: String,
        property: String,
    },

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
