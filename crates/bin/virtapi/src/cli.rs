//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "virtapi")]
#[command(version)]
#[command(about = "Check, document and publish the virtualization management API model")]
pub struct Cli {
    /// Configuration file (defaults to `virtapi.toml` when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the service definitions.
    #[arg(long, global = true)]
    pub model_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load the model and report structural problems.
    Check {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
        /// Fail on warnings too.
        #[arg(long)]
        strict: bool,
    },
    /// List every `METHOD /path` endpoint of the model.
    Endpoints {
        /// Only list endpoints of this service.
        #[arg(long)]
        service: Option<String>,
    },
    /// Export the model or its documentation views as JSON.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Model)]
        format: ExportFormat,
        /// Write to this file instead of standard output.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Render the HTML documentation site.
    Render {
        /// Output directory (overrides `docs.out_dir`).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Publish the documentation site as `master` or `tagged`.
    Publish {
        /// `master` or `tagged`.
        target: String,
        /// Release tag (overrides `publish.tag` and the CI environment).
        #[arg(long)]
        tag: Option<String>,
    },
    /// Serve the model API and documentation over HTTP.
    Serve {
        /// `host:port` to listen on (overrides `server.*`).
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// The raw model.
    Model,
    /// Documentation views.
    Docs,
}
