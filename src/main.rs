//! fm-actions: CloudBees feature management actions
//!
//! Lists environments and flags, creates and deletes flags, and reads or
//! writes per-environment flag configuration.

use anyhow::Result;

fn main() -> Result<()> {
    fm_actions::cli::run()
}
