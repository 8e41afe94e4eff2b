//! Core types for the velo SwiftUI translator.
//!
//! This crate provides the foundational types shared by the translation
//! engine and its front-ends:
//! - The design-tree node model, as exported by the design tool
//! - Component identities and resolved lookup results
//! - The asynchronous [`DesignSource`] lookup trait and an in-memory source
//! - Error types

pub mod errors;
pub mod node;
pub mod source;
pub mod types;

pub use errors::*;
pub use node::*;
pub use source::*;
pub use types::*;
