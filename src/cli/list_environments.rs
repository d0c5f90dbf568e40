//! list-environments command implementation

use anyhow::Result;
use clap::Args;

use super::connect;
use crate::api::{ApiClient, Transport};
use crate::config::Settings;
use crate::error;
use crate::output::CommandReport;

#[derive(Args, Debug, Default)]
pub struct ListEnvironmentsArgs {}

pub fn run(settings: &Settings, args: ListEnvironmentsArgs) -> Result<CommandReport> {
    let client = connect(settings)?;
    Ok(execute(&client, &args)?)
}

pub fn execute<T: Transport>(
    client: &ApiClient<T>,
    _args: &ListEnvironmentsArgs,
) -> error::Result<CommandReport> {
    let environments = client.list_environments()?;

    let mut report = CommandReport::default();
    if environments.is_empty() {
        report.summary("No environments found");
    }
    report.output("environment-count", environments.len().to_string());
    report.output_json("environments", &environments)?;

    report.detail(format!("Found {} environments:", environments.len()));
    for env in &environments {
        let status = if env.is_disabled { "disabled" } else { "active" };
        report.detail(format!("- {} (ID: {}, Status: {})", env.name, env.id, status));
    }
    Ok(report)
}
