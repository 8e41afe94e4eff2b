//! Command line front-end for the velo SwiftUI translator.

pub mod cli;
