//! create-flag command implementation

use anyhow::Result;
use clap::Args;

use super::{connect, require_name};
use crate::api::{ApiClient, Transport};
use crate::config::parse::parse_variants;
use crate::config::Settings;
use crate::domain::{CreateFlagRequest, FlagType};
use crate::error;
use crate::output::CommandReport;
use crate::resolve::Resolver;

#[derive(Args, Debug, Default)]
pub struct CreateFlagArgs {
    /// Name of the flag to create
    #[arg(short = 'f', long, value_name = "NAME")]
    pub flag_name: String,

    /// Type of the flag (Boolean, String, Number)
    #[arg(short = 't', long, value_name = "TYPE", default_value = "Boolean")]
    pub flag_type: String,

    /// Description of the flag
    #[arg(short = 'd', long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Variants as a YAML list or comma-separated values (defaults based on type)
    #[arg(long, value_name = "LIST")]
    pub variants: Option<String>,

    /// Whether the flag is permanent
    #[arg(long)]
    pub is_permanent: bool,

    /// Validate flag details and resolve the application without creating
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateFlagArgs {
    /// Build the creation payload. Fails on an empty name or unknown type.
    pub fn request(&self) -> error::Result<CreateFlagRequest> {
        require_name(&self.flag_name, "flag-name")?;
        let flag_type: FlagType = self.flag_type.parse()?;
        let variants = self
            .variants
            .as_deref()
            .map(parse_variants)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| flag_type.default_variants());

        Ok(CreateFlagRequest {
            name: self.flag_name.clone(),
            flag_type: flag_type.as_str().to_string(),
            variants,
            description: self.description.clone(),
            is_permanent: self.is_permanent,
        })
    }
}

pub fn run(settings: &Settings, args: CreateFlagArgs) -> Result<CommandReport> {
    let application_name = settings.application_name()?;
    let client = connect(settings)?;
    Ok(execute(&client, application_name, &args)?)
}

pub fn execute<T: Transport>(
    client: &ApiClient<T>,
    application_name: &str,
    args: &CreateFlagArgs,
) -> error::Result<CommandReport> {
    let request = args.request()?;
    let application = Resolver::new(client).application(application_name)?;

    let mut report = CommandReport::default();
    if args.dry_run {
        report.summary(format!(
            "DRY RUN: Would create flag '{}' in application '{}'",
            request.name, application.name
        ));
        report.summary(format!("Type: {}", request.flag_type));
        report.summary(format!("Description: {}", request.description));
        report.summary(format!("Variants: {}", request.variants.join(", ")));
        report.summary(format!("Permanent: {}", request.is_permanent));
        return Ok(report);
    }

    let flag = client.create_flag(&application.id, &request)?;

    report.output("flag-id", flag.id.clone());
    report.output("flag-name", flag.name.clone());
    report.output("flag-type", flag.flag_type.clone());
    report.output_json("flag", &flag)?;
    report.output("success", "true");

    report.detail(format!("Successfully created flag: {} (ID: {})", flag.name, flag.id));
    report.detail(format!("Type: {}", flag.flag_type));
    if !flag.description.is_empty() {
        report.detail(format!("Description: {}", flag.description));
    }
    report.detail(format!("Variants: {}", flag.variants.join(", ")));
    report.detail(format!("Permanent: {}", flag.is_permanent));
    Ok(report)
}
