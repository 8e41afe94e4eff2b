use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "velo",
    about = "Translate design-tool selections into SwiftUI views and view models",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the view and view-model files for a design document
    Generate {
        /// Design document (JSON export of a selection)
        #[arg(value_name = "DOCUMENT")]
        input: PathBuf,

        /// Output directory for generated files
        #[arg(short, long, default_value = "./generated")]
        output_dir: PathBuf,

        /// Generation config (JSON); defaults apply when omitted
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Print the generated files instead of writing them
        #[arg(long)]
        stdout: bool,
    },

    /// List every instance in a design document with its component kind
    Classify {
        /// Design document (JSON export of a selection)
        #[arg(value_name = "DOCUMENT")]
        input: PathBuf,

        /// Generation config (JSON) providing the component table
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the default generation config as JSON
    Config,
}
