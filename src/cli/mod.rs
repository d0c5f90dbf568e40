//! Command-line interface for fm-actions
//!
//! One subcommand per operation. Handlers return a [`CommandReport`]; this
//! module prints it and writes its outputs.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::{ApiClient, HttpTransport};
use crate::config::{load_settings, Settings, SettingsOverrides};
use crate::error::{self, FmError};
use crate::output::{CommandReport, OutputWriter};

pub mod create_flag;
pub mod delete_flag;
pub mod get_flag_config;
pub mod list_environments;
pub mod list_flags;
pub mod set_flag_config;

/// CloudBees Feature Management Actions CLI
///
/// Get and set feature flag configurations, list environments and flags, and
/// create or delete flags.
#[derive(Parser)]
#[command(name = "fm-actions")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args)]
struct GlobalArgs {
    /// CloudBees Platform API token (required)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Organization ID (required)
    #[arg(long, global = true, value_name = "ID")]
    org_id: Option<String>,

    /// Application name (required by every command except list-environments)
    #[arg(long, global = true, value_name = "NAME")]
    application_name: Option<String>,

    /// CloudBees Platform API URL [default: https://api.cloudbees.io]
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Use the organization ID as application ID for the flags API (legacy mode)
    #[arg(long, global = true)]
    use_org_as_app: bool,

    /// Settings file (defaults to ~/.fm-actions.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Verbose output; also raises the log level to DEBUG
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            org_id: self.org_id.clone(),
            application_name: self.application_name.clone(),
            use_org_as_app: self.use_org_as_app.then_some(true),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List all environments in the organization
    ListEnvironments(list_environments::ListEnvironmentsArgs),

    /// List all feature flags in the application
    ListFlags(list_flags::ListFlagsArgs),

    /// Create a new feature flag
    CreateFlag(create_flag::CreateFlagArgs),

    /// Get feature flag configuration for an environment
    GetFlagConfig(get_flag_config::GetFlagConfigArgs),

    /// Set feature flag configuration for an environment
    SetFlagConfig(set_flag_config::SetFlagConfigArgs),

    /// Delete a feature flag (cannot be undone)
    DeleteFlag(delete_flag::DeleteFlagArgs),
}

pub fn run() -> Result<()> {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.global.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let settings = load_settings(cli.global.config_file.as_deref(), &cli.global.overrides())?;

    let report = match cli.command {
        Commands::ListEnvironments(args) => list_environments::run(&settings, args)?,
        Commands::ListFlags(args) => list_flags::run(&settings, args)?,
        Commands::CreateFlag(args) => create_flag::run(&settings, args)?,
        Commands::GetFlagConfig(args) => get_flag_config::run(&settings, args)?,
        Commands::SetFlagConfig(args) => set_flag_config::run(&settings, args)?,
        Commands::DeleteFlag(args) => delete_flag::run(&settings, args)?,
    };

    print_report(&report, cli.global.verbose);
    OutputWriter::from_env().write_report(&report);
    Ok(())
}

/// Build the HTTP-backed client. Fails on missing token or organization ID
/// without touching the network.
pub(crate) fn connect(settings: &Settings) -> Result<ApiClient<HttpTransport>> {
    let token = settings.token()?;
    let org_id = settings.org_id()?;
    let transport = HttpTransport::new(&settings.api_url, token)?;
    tracing::debug!(
        api_url = %transport.base_url(),
        org_id,
        legacy_mode = settings.use_org_as_app,
        "configured API client"
    );
    Ok(ApiClient::new(transport, org_id).with_org_as_app(settings.use_org_as_app))
}

/// Reject a blank name argument before any lookup is attempted.
pub(crate) fn require_name(value: &str, flag: &str) -> error::Result<()> {
    if value.trim().is_empty() {
        return Err(FmError::validation(format!("{flag} is required")));
    }
    Ok(())
}

fn print_report(report: &CommandReport, verbose: bool) {
    for line in &report.summary {
        println!("{line}");
    }
    if verbose {
        for line in &report.details {
            println!("{line}");
        }
    }
}
