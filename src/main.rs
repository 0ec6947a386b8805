//! view-router command line.
//!
//! ```text
//! view-router [--config FILE] [--variant full|basic] <COMMAND>
//!
//!   resolve <PATH>...           resolve paths, print JSON
//!   href <NAME> [KEY=VALUE]...  render a named route
//!   routes                      list the active table
//!   check                       validate the config
//!   watch <PATH>...             re-resolve on every config change
//! ```
//!
//! `--variant` selects a built-in table and only applies when no config file
//! is given.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use view_router::config::{self, ConfigError, ViewRouterConfig};
use view_router::observability::logging;
use view_router::routing::{MatchResult, Params, Resolver, SharedResolver, TableVariant};

#[derive(Parser)]
#[command(name = "view-router")]
#[command(about = "Resolve front-end navigation paths against a route table", long_about = None)]
struct Cli {
    /// TOML file with router settings and routes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in table to use when no config file is given.
    #[arg(long, value_enum, default_value_t = TableVariant::Full)]
    variant: TableVariant,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more paths or URLs
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Render the path for a named route
    Href {
        name: String,
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// List the active route table
    Routes,
    /// Validate the configuration and report every problem
    Check,
    /// Watch the config file and re-resolve paths on every change
    Watch {
        paths: Vec<String>,
    },
}

#[derive(Serialize)]
struct Resolution<'a> {
    input: &'a str,
    #[serde(flatten)]
    result: MatchResult<'a, String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => config::load_config(path),
        None => {
            let mut config = ViewRouterConfig::default();
            config.router.variant = cli.variant;
            Ok(config)
        }
    };

    let observability = loaded
        .as_ref()
        .map(|c| c.observability.clone())
        .unwrap_or_default();
    logging::init_logging(&observability)?;

    let config = match loaded {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("Configuration is invalid:");
            for error in &errors {
                eprintln!("  - {}", error);
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::debug!(
        variant = ?config.router.variant,
        configured_routes = config.routes.len(),
        "Configuration loaded"
    );

    let resolver = config.build_resolver()?;

    match cli.command {
        Commands::Resolve { paths } => {
            for path in &paths {
                print_resolution(&resolver, path)?;
            }
        }
        Commands::Href { name, params } => {
            let params: Params = params.into_iter().collect();
            println!("{}", resolver.href(&name, &params)?);
        }
        Commands::Routes => {
            for entry in resolver.entries() {
                println!(
                    "{:<32} {:<28} {}",
                    entry.pattern().as_str(),
                    entry.name(),
                    entry.view()
                );
            }
        }
        Commands::Check => {
            println!("Configuration OK: {} routes", resolver.len());
        }
        Commands::Watch { paths } => {
            let Some(path) = cli.config.as_deref() else {
                eprintln!("Error: watch requires --config");
                return Ok(ExitCode::FAILURE);
            };
            watch(path, resolver, &paths).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn watch(
    path: &Path,
    resolver: Resolver<String>,
    paths: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedResolver::new(resolver);
    for p in paths {
        print_resolution(&shared.load(), p)?;
    }

    let (watcher, mut updates) = config::TableWatcher::new(path);
    let _guard = watcher.metrics(shared.load().options().metrics_enabled).run()?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(resolver) = update else { break };
                shared.store(resolver);
                let current = shared.load();
                for p in paths {
                    print_resolution(&current, p)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

fn print_resolution(resolver: &Resolver<String>, input: &str) -> Result<(), serde_json::Error> {
    let resolution = Resolution {
        input,
        result: resolver.resolve_location(input),
    };
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}
