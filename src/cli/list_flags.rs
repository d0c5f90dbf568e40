//! list-flags command implementation

use anyhow::Result;
use clap::Args;

use super::connect;
use crate::api::{ApiClient, Transport};
use crate::config::Settings;
use crate::error;
use crate::output::CommandReport;
use crate::resolve::Resolver;

#[derive(Args, Debug, Default)]
pub struct ListFlagsArgs {}

pub fn run(settings: &Settings, args: ListFlagsArgs) -> Result<CommandReport> {
    let application_name = settings.application_name()?;
    let client = connect(settings)?;
    Ok(execute(&client, application_name, &args)?)
}

pub fn execute<T: Transport>(
    client: &ApiClient<T>,
    application_name: &str,
    _args: &ListFlagsArgs,
) -> error::Result<CommandReport> {
    let application = Resolver::new(client).application(application_name)?;
    let flags = client.list_flags(&application.id)?;

    let mut report = CommandReport::default();
    if flags.is_empty() {
        report.summary("No flags found");
    }
    report.output("flag-count", flags.len().to_string());
    report.output_json("flags", &flags)?;

    report.detail(format!("Found {} flags:", flags.len()));
    for flag in &flags {
        let lifetime = if flag.is_permanent { "permanent" } else { "temporary" };
        report.detail(format!(
            "- {} (ID: {}, Type: {}, {})",
            flag.name, flag.id, flag.flag_type, lifetime
        ));
        if !flag.description.is_empty() {
            report.detail(format!("  Description: {}", flag.description));
        }
    }
    Ok(report)
}
