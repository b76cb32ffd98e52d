//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mmr config generate [--output FILE]` | Print or write the full configuration template |
//! | `mmr config check [--config FILE]` | Build every configured component and report |
//! | `mmr providers` | List categories and registered implementations |
//! | `mmr extract [--text T] [--image REF] [--video REF]` | Run the pipeline once, print the index payload |

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use mmr_application::ComponentManager;
use mmr_domain::value_objects::MultiModalData;
use mmr_infrastructure::logging::{init_logging, log_config_loaded};
use mmr_infrastructure::{AppContext, ConfigLoader};

/// Command line interface for the multimodal retriever
#[derive(Parser, Debug)]
#[command(name = "mmr")]
#[command(about = "Multimodal Retriever - ingestion and retrieval for text, image and video")]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration helpers
    #[command(subcommand)]
    Config(ConfigCommand),

    /// List categories and their registered implementations
    Providers,

    /// Run the extraction pipeline on one record
    Extract(ExtractArgs),
}

/// `config` subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the configuration template covering every implementation
    Generate {
        /// Write the template to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load configuration and build every configured component
    Check {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// `extract` arguments
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Record text
    #[arg(long)]
    pub text: Option<String>,

    /// Image URL or base64 payload
    #[arg(long)]
    pub image: Option<String>,

    /// Video URL or base64 payload
    #[arg(long)]
    pub video: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ExtractArgs {
    fn record(&self) -> MultiModalData {
        let mut data = MultiModalData::new();
        if let Some(text) = &self.text {
            data = data.with_text(text.as_str());
        }
        if let Some(image) = &self.image {
            data = data.with_image(image.as_str());
        }
        if let Some(video) = &self.video {
            data = data.with_video(video.as_str());
        }
        data
    }
}

fn loader(config: Option<&PathBuf>) -> ConfigLoader {
    match config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    }
}

fn load_context(config: Option<&PathBuf>) -> anyhow::Result<AppContext> {
    let loader = loader(config);
    let app_config = loader.load().context("Failed to load configuration")?;
    init_logging(&app_config.logging).context("Failed to initialize logging")?;
    if let Some((path, found)) = loader.config_source() {
        log_config_loaded(&path, found);
    }
    AppContext::from_config(app_config).context("Failed to build application context")
}

impl Cli {
    /// Execute the parsed command, writing results to `out`
    pub async fn run(&self, out: &mut impl Write) -> anyhow::Result<()> {
        match &self.command {
            Command::Config(ConfigCommand::Generate { output }) => {
                let template = ConfigLoader::generate_template(&ComponentManager::from_registered())?;
                match output {
                    Some(path) => {
                        std::fs::write(path, template)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        writeln!(out, "Configuration template written to {}", path.display())?;
                    }
                    None => write!(out, "{template}")?,
                }
            }
            Command::Config(ConfigCommand::Check { config }) => {
                let context = load_context(config.as_ref())?;
                let mut failed = 0;
                for status in context.check_components() {
                    match &status.result {
                        Ok(implementation) => {
                            writeln!(out, "{:<16} ok ({implementation})", status.category)?;
                        }
                        Err(e) => {
                            failed += 1;
                            writeln!(out, "{:<16} {:?}: {e}", status.category, e.kind())?;
                        }
                    }
                }
                if failed > 0 {
                    bail!("{failed} component(s) failed to build");
                }
            }
            Command::Providers => {
                let manager = ComponentManager::from_registered();
                for category in manager.categories() {
                    writeln!(out, "{category}")?;
                    if let Some(factory) = manager.factory(category) {
                        for (name, description) in factory.implementations() {
                            writeln!(out, "  {name:<10} {description}")?;
                        }
                    }
                }
            }
            Command::Extract(args) => {
                let record = args.record();
                if record.is_empty() {
                    bail!("Nothing to extract: pass --text, --image or --video");
                }
                let context = load_context(args.config.as_ref())?;
                let index_param = context.pipeline().extract(&record).await?;
                writeln!(out, "{}", serde_json::to_string_pretty(&index_param)?)?;
            }
        }
        Ok(())
    }
}
