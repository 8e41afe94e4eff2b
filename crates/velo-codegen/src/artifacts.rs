//! Generation entry point and the artifacts it produces.

use crate::config::CodegenConfig;
use crate::emitter::{CodeEmitter, TemplateEngine};
use crate::error::Result;
use crate::naming::sanitize_name;
use crate::snapshot::resolve;
use crate::view_state::ViewState;
use serde::Serialize;
use velo_core::{DesignSource, Node};

/// Title of the diagnostic artifact.
pub const ERROR_TITLE: &str = "Codegen Error";

/// Diagnostic when generation is asked for without a node.
pub const NO_NODE_MESSAGE: &str = "No valid node selected.";

/// Diagnostic for every aborted generation.
pub const FAILURE_MESSAGE: &str = "Error generating SwiftUI code.";

/// Language tag of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Swift,
    Plaintext,
}

/// One named piece of generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub language: Language,
    pub title: String,
    pub code: String,
}

impl Artifact {
    pub fn swift(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: Language::Swift,
            title: title.into(),
            code: code.into(),
        }
    }

    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self {
            language: Language::Plaintext,
            title: ERROR_TITLE.to_string(),
            code: message.into(),
        }
    }
}

/// Result of a generation run: both files, or a single diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutput {
    Generated {
        view: Artifact,
        view_model: Artifact,
        state: ViewState,
    },
    Failed(Artifact),
}

impl GenerationOutput {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The artifacts to hand back to the caller, view first.
    pub fn into_artifacts(self) -> Vec<Artifact> {
        match self {
            Self::Generated {
                view, view_model, ..
            } => vec![view, view_model],
            Self::Failed(diagnostic) => vec![diagnostic],
        }
    }
}

/// Generate the view and view-model files for `root`.
///
/// Never fails: a missing node or any fault during resolution, emission or
/// rendering yields a single diagnostic artifact. The fault itself is logged.
pub async fn generate<S: DesignSource>(
    source: &S,
    root: Option<&Node>,
    config: &CodegenConfig,
) -> GenerationOutput {
    let Some(root) = root else {
        log::error!("Generation requested without a node");
        return GenerationOutput::Failed(Artifact::diagnostic(NO_NODE_MESSAGE));
    };

    log::info!("Generating SwiftUI for {} '{}' ({})", root.kind, root.name, root.id);
    match try_generate(source, root, config).await {
        Ok(output) => output,
        Err(err) => {
            log::error!("Generation of '{}' failed: {}", root.name, err);
            GenerationOutput::Failed(Artifact::diagnostic(FAILURE_MESSAGE))
        }
    }
}

async fn try_generate<S: DesignSource>(
    source: &S,
    root: &Node,
    config: &CodegenConfig,
) -> Result<GenerationOutput> {
    let snapshot = resolve(source, root).await?;
    let emitted = CodeEmitter::new(config).emit(&snapshot)?;

    let templates = TemplateEngine::new()?;
    let type_name = sanitize_name(&root.name);
    let view = templates.render_view(&type_name, &root.name, &emitted.view, config)?;
    let view_model = templates.render_view_model(&type_name, &root.name, &emitted.state)?;

    Ok(GenerationOutput::Generated {
        view: Artifact::swift(format!("{}View.swift", type_name), view),
        view_model: Artifact::swift(format!("{}ViewModel.swift", type_name), view_model),
        state: emitted.state,
    })
}
