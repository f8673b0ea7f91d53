// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};
use terraform_provider_k8s::{
    constants::ENV_OUTPUT_DIR,
    provider::Provider,
    render::{multi_document_yaml, render, write_manifests, RenderConfig, ResourceDiagnostics},
    resource::ImportStateRequest,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "terraform-provider-k8s")]
#[command(version)]
#[command(about = "Kubernetes custom resources as Terraform resources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print provider and resource schemas in `terraform providers schema -json` format
    Schema {
        /// Print only the schema of this resource type
        #[arg(short, long)]
        resource: Option<String>,
    },

    /// List all resource type names
    Resources,

    /// Validate resource configurations
    Validate {
        /// Render configuration file (YAML)
        config: PathBuf,
    },

    /// Render resource configurations into Kubernetes manifests
    Render {
        /// Render configuration file (YAML)
        config: PathBuf,

        /// Write one file per manifest into this directory (if not set, outputs to stdout)
        #[arg(short, long, env = ENV_OUTPUT_DIR)]
        output_dir: Option<PathBuf>,

        /// Print the resulting states as JSON instead of the manifests
        #[arg(long)]
        state: bool,
    },

    /// Convert an existing manifest into resource state
    Import {
        /// Resource type name
        resource: String,

        /// Manifest file (YAML)
        manifest: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("tf-provider-k8s")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

/// Logs go to stderr; stdout carries command output only.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`text` or `json`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .compact()
                .init();
        }
    }
}

async fn async_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let provider = Provider::new(env!("CARGO_PKG_VERSION"))?;
    debug!(
        "Loaded provider with {} resource types",
        provider.resource_type_names().len()
    );

    match cli.command {
        Commands::Schema { resource } => print_schema(&provider, resource.as_deref()),
        Commands::Resources => {
            for name in provider.resource_type_names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Validate { config } => validate(&provider, &config).await,
        Commands::Render {
            config,
            output_dir,
            state,
        } => render_config(&provider, &config, output_dir.as_deref(), state).await,
        Commands::Import { resource, manifest } => import(&provider, &resource, &manifest).await,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "terraform-provider-k8s",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

fn print_schema(provider: &Provider, resource: Option<&str>) -> Result<()> {
    let document = match resource {
        Some(type_name) => provider.resource(type_name)?.schema().to_json(),
        None => provider.schemas_json(),
    };
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn report(diagnostics: &[ResourceDiagnostics]) {
    for entry in diagnostics {
        eprintln!("{entry}\n");
    }
}

async fn validate(provider: &Provider, path: &Path) -> Result<()> {
    let config = RenderConfig::load(path).await?;

    let mut failures = Vec::new();
    for entry in &config.resources {
        let diagnostics = match provider.resource(&entry.type_name) {
            Ok(resource) => resource.validate_config(&entry.config),
            Err(e) => e.into(),
        };
        if !diagnostics.is_empty() {
            failures.push(ResourceDiagnostics {
                address: entry.address(),
                diagnostics,
            });
        }
    }

    report(&failures);
    let errors = failures.iter().filter(|f| f.diagnostics.has_error()).count();
    if errors > 0 {
        bail!("{errors} of {} resources are invalid", config.resources.len());
    }
    info!("{} resources are valid", config.resources.len());
    Ok(())
}

async fn render_config(
    provider: &Provider,
    path: &Path,
    output_dir: Option<&Path>,
    print_state: bool,
) -> Result<()> {
    let config = RenderConfig::load(path).await?;
    let output = render(provider, &config).await;
    report(&output.diagnostics);
    if output.has_error() {
        bail!("Rendering {} failed", path.display());
    }

    if print_state {
        let states: Vec<_> = output.manifests.iter().map(|m| &m.state).collect();
        println!("{}", serde_json::to_string_pretty(&states)?);
    } else if let Some(dir) = output_dir {
        write_manifests(dir, &output.manifests).await?;
    } else {
        print!("{}", multi_document_yaml(&output.manifests));
    }
    Ok(())
}

async fn import(provider: &Provider, type_name: &str, path: &Path) -> Result<()> {
    let resource = provider.resource(type_name)?;
    let manifest = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let response = resource.import_state(ImportStateRequest { manifest }).await;
    for diagnostic in response.diagnostics.iter() {
        eprintln!("{diagnostic}\n");
    }
    match response.state {
        Some(state) if !response.diagnostics.has_error() => {
            println!("{}", serde_json::to_string_pretty(&state)?);
            Ok(())
        }
        _ => bail!("Import of {} failed", path.display()),
    }
}
