//! set-flag-config command implementation

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value};

use super::{connect, require_name};
use crate::api::{ApiClient, Transport};
use crate::config::merge::ENABLED;
use crate::config::{merge_flag_config, ConfigOverrides, Settings};
use crate::error;
use crate::output::{to_json, CommandReport};
use crate::resolve::Resolver;

#[derive(Args, Debug, Default)]
pub struct SetFlagConfigArgs {
    /// Flag name
    #[arg(short = 'f', long, value_name = "NAME")]
    pub flag_name: String,

    /// Environment name
    #[arg(short = 'e', long, value_name = "NAME")]
    pub environment_name: String,

    /// Enable or disable the flag (true/false)
    #[arg(long, value_name = "BOOL")]
    pub enabled: Option<String>,

    /// Default value for the flag (JSON, or plain text as a string)
    #[arg(long, value_name = "VALUE")]
    pub default_value: Option<String>,

    /// Enable or disable variants (true/false)
    #[arg(long, value_name = "BOOL")]
    pub variants_enabled: Option<String>,

    /// Stickiness property for consistent evaluation
    #[arg(long, value_name = "PROPERTY")]
    pub stickiness_property: Option<String>,

    /// Configuration fields as YAML; individual options override its keys
    #[arg(long, value_name = "YAML")]
    pub config: Option<String>,

    /// Validate and resolve without applying changes
    #[arg(long)]
    pub dry_run: bool,
}

impl SetFlagConfigArgs {
    /// The merged update payload. Fails when nothing would change.
    pub fn changes(&self) -> error::Result<Map<String, Value>> {
        let overrides = ConfigOverrides::from_text(
            self.enabled.as_deref(),
            self.default_value.as_deref(),
            self.variants_enabled.as_deref(),
            self.stickiness_property.as_deref(),
        )?;
        merge_flag_config(self.config.as_deref(), &overrides)
    }
}

pub fn run(settings: &Settings, args: SetFlagConfigArgs) -> Result<CommandReport> {
    let application_name = settings.application_name()?;
    let client = connect(settings)?;
    Ok(execute(&client, application_name, &args)?)
}

pub fn execute<T: Transport>(
    client: &ApiClient<T>,
    application_name: &str,
    args: &SetFlagConfigArgs,
) -> error::Result<CommandReport> {
    require_name(&args.flag_name, "flag-name")?;
    require_name(&args.environment_name, "environment-name")?;
    let changes = args.changes()?;

    let resolver = Resolver::new(client);
    let application = resolver.application(application_name)?;
    let flag = resolver.flag(&application.id, &args.flag_name)?;
    let environment = resolver.environment(&args.environment_name)?;

    let mut report = CommandReport::default();
    if args.dry_run {
        let pretty = serde_json::to_string_pretty(&changes).map_err(|source| {
            error::FmError::Encode { what: "configuration changes".into(), source }
        })?;
        report.summary(format!(
            "DRY RUN: Would update flag '{}' in environment '{}'",
            flag.name, environment.name
        ));
        report.summary(format!("Configuration changes:\n{pretty}"));
        return Ok(report);
    }

    client.set_flag_configuration(&application.id, &flag.id, &environment.id, &changes)?;

    report.output("flag-id", flag.id.clone());
    report.output("flag-name", flag.name.clone());
    report.output("application-id", application.id.clone());
    report.output("application-name", application.name.clone());
    report.output("environment-id", environment.id.clone());
    report.output("environment-name", environment.name.clone());
    report.output("configuration", to_json("configuration", &changes)?);
    if let Some(Value::Bool(enabled)) = changes.get(ENABLED) {
        report.output("enabled", enabled.to_string());
    }
    report.output("success", "true");

    report.detail(format!("Successfully updated flag: {} (ID: {})", flag.name, flag.id));
    report.detail(format!("Environment: {} (ID: {})", environment.name, environment.id));
    report.detail("Applied changes:");
    for (key, value) in &changes {
        report.detail(format!("  {key}: {value}"));
    }
    Ok(report)
}
