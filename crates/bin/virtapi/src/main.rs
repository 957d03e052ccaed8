//! # virtapi — API model toolchain
//!
//! Composition root that wires all adapters together and runs one command.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Load the service definitions through the filesystem source
//! - Derive the catalog (resource tree, endpoints, check report)
//! - Check, export, render or publish the model
//! - Build the axum router and serve the model and its documentation
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod config;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use virtapi_adapter_docs_html::renderer::HtmlRenderer;
use virtapi_adapter_http_axum::state::AppState;
use virtapi_adapter_source_fs::{FsModelSource, FsSiteWriter};
use virtapi_app::catalog::Catalog;
use virtapi_app::checker::{CheckReport, ModelChecker, Severity};
use virtapi_app::docs::DocSet;
use virtapi_app::ports::{DocRenderer, Site};
use virtapi_app::services::catalog_service::CatalogService;
use virtapi_app::services::publish_service::{PublishService, PublishTarget};
use virtapi_domain::name::Name;

use crate::cli::{Cli, Commands, ExportFormat};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.model_dir {
        config.model.dir = dir;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let checker = ModelChecker::new(config.docs.api_prefix.clone());
    let catalog = load_catalog(&config, checker.clone()).await?;

    match cli.command {
        Commands::Check { json, strict } => check(&catalog.report, json, strict),
        Commands::Endpoints { service } => {
            endpoints(&catalog, service.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Export { format, output } => {
            export(&catalog, format, output.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Render { out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.docs.out_dir.clone());
            let site = render(&config, &catalog)?;
            let pages = PublishService::new(FsSiteWriter::new(&out_dir))
                .write(&site)
                .await?;
            tracing::info!(pages, dir = %out_dir.display(), "documentation rendered");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Publish { target, tag } => {
            let tag = tag.or_else(|| config.publish.tag.clone());
            let target = PublishTarget::parse(&target, tag.as_deref())?;
            let site = render(&config, &catalog)?;
            let pages = PublishService::new(FsSiteWriter::new(&config.publish.site_dir))
                .publish(&target, &site)
                .await?;
            tracing::info!(
                pages,
                release = %target,
                dir = %config.publish.site_dir.display(),
                "documentation published"
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve { bind } => {
            let bind_addr = bind.unwrap_or_else(|| config.bind_addr());
            let site = render(&config, &catalog)?;
            serve(&bind_addr, AppState::new(catalog, site, checker)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn load_catalog(config: &Config, checker: ModelChecker) -> anyhow::Result<Catalog> {
    let root = config.root()?;
    let source = FsModelSource::new(&config.model.dir);
    let catalog = CatalogService::new(source, root, checker)
        .load()
        .await
        .with_context(|| format!("loading model from {}", config.model.dir.display()))?;
    tracing::info!(
        services = catalog.model.len(),
        endpoints = catalog.endpoints.len(),
        errors = catalog.report.errors().count(),
        warnings = catalog.report.warnings().count(),
        "model loaded"
    );
    Ok(catalog)
}

fn check(report: &CheckReport, json: bool, strict: bool) -> anyhow::Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for violation in &report.violations {
            let severity = match violation.severity {
                Severity::Warning => "warning",
                Severity::Error => "error",
            };
            println!("{severity}: {}: {}", violation.location, violation.message);
        }
        println!(
            "{} error(s), {} warning(s)",
            report.errors().count(),
            report.warnings().count()
        );
    }
    let failed = !report.is_ok() || (strict && report.warnings().next().is_some());
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn endpoints(catalog: &Catalog, service: Option<&str>) -> anyhow::Result<()> {
    match service {
        Some(service) => {
            let name: Name = service
                .parse()
                .with_context(|| format!("invalid service name `{service}`"))?;
            catalog
                .service(&name)
                .with_context(|| format!("service `{service}` not found"))?;
            for endpoint in catalog.endpoints_for(&name) {
                println!("{endpoint}\t{}.{}", endpoint.service, endpoint.operation);
            }
        }
        None => {
            for endpoint in catalog.endpoints.iter() {
                println!("{endpoint}\t{}.{}", endpoint.service, endpoint.operation);
            }
        }
    }
    Ok(())
}

async fn export(catalog: &Catalog, format: ExportFormat, output: Option<&Path>) -> anyhow::Result<()> {
    let json = match format {
        ExportFormat::Model => serde_json::to_string_pretty(&catalog.model)?,
        ExportFormat::Docs => serde_json::to_string_pretty(&DocSet::build(catalog))?,
    };
    match output {
        Some(path) => tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Render the documentation site, refusing models with errors.
fn render(config: &Config, catalog: &Catalog) -> anyhow::Result<Site> {
    if !catalog.report.is_ok() {
        bail!(
            "model has {} error(s), run `virtapi check` for details",
            catalog.report.errors().count()
        );
    }
    let docs = DocSet::build(catalog);
    Ok(HtmlRenderer::new(config.docs.title.clone()).render(&docs)?)
}

async fn serve(bind_addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = virtapi_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!("virtapi listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
