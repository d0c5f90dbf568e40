//! get-flag-config command implementation

use anyhow::Result;
use clap::Args;

use super::{connect, require_name};
use crate::api::{ApiClient, Transport};
use crate::config::Settings;
use crate::domain::FlagConfigurationDetail;
use crate::error;
use crate::output::{to_json, CommandReport};
use crate::resolve::Resolver;

#[derive(Args, Debug, Default)]
pub struct GetFlagConfigArgs {
    /// Flag name
    #[arg(short = 'f', long, value_name = "NAME")]
    pub flag_name: String,

    /// Environment name
    #[arg(short = 'e', long, value_name = "NAME")]
    pub environment_name: String,
}

pub fn run(settings: &Settings, args: GetFlagConfigArgs) -> Result<CommandReport> {
    let application_name = settings.application_name()?;
    let client = connect(settings)?;
    Ok(execute(&client, application_name, &args)?)
}

pub fn execute<T: Transport>(
    client: &ApiClient<T>,
    application_name: &str,
    args: &GetFlagConfigArgs,
) -> error::Result<CommandReport> {
    require_name(&args.flag_name, "flag-name")?;
    require_name(&args.environment_name, "environment-name")?;

    let resolver = Resolver::new(client);
    let application = resolver.application(application_name)?;
    let flag = resolver.flag(&application.id, &args.flag_name)?;
    let environment = resolver.environment(&args.environment_name)?;

    let configuration = client.get_flag_configuration(&application.id, &flag.id, &environment.id)?;
    let default_value = to_json("default-value", &configuration.default_value)?;
    let detail = FlagConfigurationDetail {
        flag_id: flag.id.clone(),
        flag_name: flag.name.clone(),
        configuration,
    };

    let mut report = CommandReport::default();
    report.output_json("flag-config", &detail)?;
    report.output("flag-id", flag.id.clone());
    report.output("environment-id", environment.id.clone());
    report.output("enabled", detail.configuration.enabled.to_string());
    report.output("default-value", default_value.clone());

    report.detail(format!("Flag: {} (ID: {})", flag.name, flag.id));
    report.detail(format!("Environment: {} (ID: {})", environment.name, environment.id));
    report.detail(format!("Enabled: {}", detail.configuration.enabled));
    if !detail.configuration.default_value.is_null() {
        report.detail(format!("Default Value: {default_value}"));
    }
    report.detail(format!("Variants Enabled: {}", detail.configuration.variants_enabled));
    if let Some(property) = &detail.configuration.stickiness_property {
        report.detail(format!("Stickiness Property: {property}"));
    }
    Ok(report)
}
