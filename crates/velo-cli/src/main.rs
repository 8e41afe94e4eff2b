use anyhow::Result;
use velo_cli::cli;

fn main() -> Result<()> {
    cli::run()
}
