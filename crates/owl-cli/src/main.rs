//! # owl2proto
//!
//! Command-line interface for turning an OWL/XML ontology into a protobuf
//! schema or a PlantUML class diagram.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use config::CliConfig;
use owl2proto_codegen::{Generator, ProtoGenerator, UmlGenerator};
use owl2proto_ir::Ontology;
use owl2proto_ontology::OntologyLoader;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "owl2proto")]
#[command(about = "Generate protobuf schemas and UML diagrams from OWL ontologies")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a protobuf schema
    Proto {
        /// OWL/XML ontology file
        owl_file: PathBuf,

        /// Class whose subtree is referenced by identifier
        #[arg(long)]
        root_resource_name: Option<String>,

        /// File whose content is placed at the top of the schema
        #[arg(long)]
        header_file: Option<PathBuf>,

        /// Output file [default: api/ontology.proto]
        #[arg(long)]
        output_path: Option<PathBuf>,

        /// Hash field numbers instead of counting up [default: true]
        #[arg(long, action = ArgAction::Set)]
        deterministic_field_numbers: Option<bool>,

        /// Emit IRIs, prefixes and parents as options [default: true]
        #[arg(long, action = ArgAction::Set)]
        full_semantic_mode: Option<bool>,
    },

    /// Generate a PlantUML class diagram
    Uml {
        /// OWL/XML ontology file
        owl_file: PathBuf,

        /// Class whose subtree is referenced by identifier
        #[arg(long)]
        root_resource_name: Option<String>,

        /// Output file [default: api/ontology.puml]
        #[arg(long)]
        output_path: Option<PathBuf>,
    },

    /// Print the normalized ontology as JSON
    Parse {
        /// OWL/XML ontology file
        owl_file: PathBuf,

        /// Class whose subtree is referenced by identifier
        #[arg(long)]
        root_resource_name: Option<String>,

        /// Write the JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Proto {
            owl_file,
            root_resource_name,
            header_file,
            output_path,
            deterministic_field_numbers,
            full_semantic_mode,
        } => {
            let root = config.root_resource_name(root_resource_name)?;
            let generator_config = config.generator_config(
                header_file,
                deterministic_field_numbers,
                full_semantic_mode,
            )?;
            let output_path = config.proto_output_path(output_path);

            tracing::info!("Generating protobuf schema {} -> {}", owl_file.display(), output_path.display());
            let ontology = load(&owl_file, &root)?;
            let schema = ProtoGenerator::new(generator_config)
                .generate(&ontology)
                .context("Failed to generate protobuf schema")?;
            output::write_atomic(&output_path, &schema)?;
        }
        Commands::Uml {
            owl_file,
            root_resource_name,
            output_path,
        } => {
            let root = config.root_resource_name(root_resource_name)?;
            let output_path = config.uml_output_path(output_path);

            tracing::info!("Generating UML diagram {} -> {}", owl_file.display(), output_path.display());
            let ontology = load(&owl_file, &root)?;
            let diagram = UmlGenerator::new()
                .generate(&ontology)
                .context("Failed to generate UML diagram")?;
            output::write_atomic(&output_path, &diagram)?;
        }
        Commands::Parse {
            owl_file,
            root_resource_name,
            output,
        } => {
            let root = config.root_resource_name(root_resource_name)?;
            let ontology = load(&owl_file, &root)?;
            let json = serde_json::to_string_pretty(&ontology)
                .context("Failed to serialize ontology")?;

            match output {
                Some(path) => output::write_atomic(&path, &format!("{json}\n"))?,
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn load(owl_file: &Path, root: &str) -> Result<Ontology> {
    OntologyLoader::new(root)
        .load_from_file(owl_file)
        .with_context(|| format!("Failed to load ontology {}", owl_file.display()))
}
