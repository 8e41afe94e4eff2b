//! Translation of design trees into SwiftUI views.
//!
//! A generation run has two phases. First [`snapshot::resolve`] asks a
//! [`DesignSource`](velo_core::DesignSource) for every external reference in
//! the tree (component identities, shared styles, bound variables, swap
//! targets). Then the [`CodeEmitter`] walks the resolved tree synchronously,
//! classifying instances, inferring layout and style, and collecting the
//! [`ViewState`] the view model must declare.
//!
//! # Example
//!
//! ```ignore
//! use velo_codegen::{generate, CodegenConfig};
//!
//! let output = futures::executor::block_on(generate(&source, Some(&root), &CodegenConfig::default()));
//! for artifact in output.into_artifacts() {
//!     println!("// {}\n{}", artifact.title, artifact.code);
//! }
//! ```

pub mod artifacts;
pub mod classify;
pub mod config;
pub mod emitter;
pub mod error;
pub mod layout;
pub mod naming;
pub mod snapshot;
pub mod style;
pub mod view_state;

pub use artifacts::{generate, Artifact, GenerationOutput, Language};
pub use classify::{classify, segment_options};
pub use config::{CodegenConfig, ComponentKind, ComponentTable};
pub use emitter::{CodeEmitter, EmittedView, TemplateEngine};
pub use error::{CodegenError, Result};
pub use layout::{LayoutDecision, Spacing, StackAxis, TextPosition};
pub use snapshot::{resolve, ResolvedNode};
pub use view_state::ViewState;
