//! delete-flag command implementation

use anyhow::Result;
use clap::Args;

use super::{connect, require_name};
use crate::api::{ApiClient, Transport};
use crate::config::Settings;
use crate::error::{self, FmError};
use crate::output::CommandReport;
use crate::resolve::Resolver;

#[derive(Args, Debug, Default)]
pub struct DeleteFlagArgs {
    /// Name of the flag to delete
    #[arg(short = 'f', long, value_name = "NAME")]
    pub flag_name: String,

    /// Preview the deletion without deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Confirm the deletion (required unless using --dry-run)
    #[arg(long)]
    pub confirm: bool,
}

impl DeleteFlagArgs {
    fn ensure_confirmed(&self) -> error::Result<()> {
        if !self.confirm && !self.dry_run {
            return Err(FmError::validation(
                "this action will permanently delete the flag. Use --confirm to proceed or --dry-run to preview",
            ));
        }
        Ok(())
    }
}

pub fn run(settings: &Settings, args: DeleteFlagArgs) -> Result<CommandReport> {
    args.ensure_confirmed()?;
    let application_name = settings.application_name()?;
    let client = connect(settings)?;
    Ok(execute(&client, application_name, &args)?)
}

pub fn execute<T: Transport>(
    client: &ApiClient<T>,
    application_name: &str,
    args: &DeleteFlagArgs,
) -> error::Result<CommandReport> {
    args.ensure_confirmed()?;
    require_name(&args.flag_name, "flag-name")?;

    let resolver = Resolver::new(client);
    let application = resolver.application(application_name)?;
    let flag = resolver.flag(&application.id, &args.flag_name)?;

    let mut report = CommandReport::default();
    if args.dry_run {
        report.summary(format!("DRY RUN: Would delete flag '{}' (ID: {})", flag.name, flag.id));
        report.summary(format!("Type: {}", flag.flag_type));
        if !flag.description.is_empty() {
            report.summary(format!("Description: {}", flag.description));
        }
        report.summary(format!("Permanent: {}", flag.is_permanent));
        return Ok(report);
    }

    // Enabled flags are refused server-side; that error is surfaced as-is.
    client.delete_flag(&application.id, &flag.id)?;

    report.output("flag-id", flag.id.clone());
    report.output("flag-name", flag.name.clone());
    report.output("deleted", "true");
    report.output("success", "true");
    report.summary(format!("Flag '{}' deleted successfully", flag.name));
    report.detail(format!("Deleted flag ID: {}", flag.id));
    Ok(report)
}
