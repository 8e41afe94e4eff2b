use crate::cli::args::{Cli, Commands};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use futures::executor::block_on;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use velo_codegen::naming::sanitize_name;
use velo_codegen::{classify, generate, resolve, Artifact, CodegenConfig, ComponentKind, Language};
use velo_core::{DesignDocument, NodeKind};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output_dir,
            config,
            stdout,
        } => generate_command(&input, &output_dir, config.as_deref(), stdout),
        Commands::Classify { input, config } => classify_command(&input, config.as_deref()),
        Commands::Config => config_command(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Read a design document from JSON.
pub fn load_document(path: &Path) -> Result<DesignDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read design document {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid design document {}", path.display()))
}

/// Read a generation config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CodegenConfig> {
    let Some(path) = path else {
        return Ok(CodegenConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    CodegenConfig::from_json(&json).map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))
}

/// File name an artifact is written under.
pub fn artifact_file_name(artifact: &Artifact) -> String {
    match artifact.language {
        Language::Swift => artifact.title.clone(),
        Language::Plaintext => format!("{}.txt", sanitize_name(&artifact.title)),
    }
}

/// Write artifacts into `output_dir`, creating it if needed.
pub fn write_artifacts(artifacts: &[Artifact], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = output_dir.join(artifact_file_name(artifact));
        fs::write(&path, &artifact.code)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn generate_command(input: &Path, output_dir: &Path, config: Option<&Path>, stdout: bool) -> Result<()> {
    let document = load_document(input)?;
    let config = load_config(config)?;
    debug!("Loaded {} ({} instances)", input.display(), document.source.instances.len());

    let output = block_on(generate(&document.source, document.root.as_ref(), &config));
    let failed = output.is_failure();
    let artifacts = output.into_artifacts();

    if stdout {
        for artifact in &artifacts {
            println!("// {}\n{}\n", artifact.title, artifact.code);
        }
    } else {
        for path in write_artifacts(&artifacts, output_dir)? {
            println!("Wrote {}", path.display());
        }
    }

    if failed {
        let message = artifacts.first().map(|a| a.code.as_str()).unwrap_or_default();
        bail!("Generation failed: {}", message);
    }
    Ok(())
}

/// An instance of a design document with its component kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedInstance {
    pub id: String,
    pub name: String,
    pub kind: ComponentKind,
}

/// Classify every instance the view is built from, in document order.
/// Instances nested inside other instances are part of their parent's
/// fragment and are not listed.
pub fn classify_document(document: &DesignDocument, config: &CodegenConfig) -> Result<Vec<ClassifiedInstance>> {
    let root = document
        .root
        .as_ref()
        .ok_or_else(|| anyhow!("Design document has no root node"))?;
    let resolved = block_on(resolve(&document.source, root))
        .map_err(|e| anyhow!("Failed to resolve design document: {}", e))?;

    let mut instances = Vec::new();
    resolved.walk(&mut |node| {
        if *node.kind() == NodeKind::Instance {
            instances.push(ClassifiedInstance {
                id: node.node.id.to_string(),
                name: node.name().to_string(),
                kind: classify(node, &config.components),
            });
        }
    });
    Ok(instances)
}

pub fn classify_command(input: &Path, config: Option<&Path>) -> Result<()> {
    let document = load_document(input)?;
    let config = load_config(config)?;

    for instance in classify_document(&document, &config)? {
        let marker = if instance.kind.is_stateful() { " (stateful)" } else { "" };
        println!("{}\t{}\t{}{}", instance.id, instance.name, instance.kind, marker);
    }
    Ok(())
}

pub fn config_command() -> Result<()> {
    let json = CodegenConfig::default()
        .to_json()
        .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;
    println!("{}", json);
    Ok(())
}
