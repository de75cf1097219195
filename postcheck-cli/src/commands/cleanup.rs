//! `postcheck cleanup` command handler
//!
//! Removes posts left behind by an interrupted run, using the same
//! existence-checked deletion as the test scenarios.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use postcheck_core::config::HarnessConfig;
use postcheck_fixtures::{CleanupRegistry, CleanupReport};
use postcheck_storage::StorageGateway;

use crate::cli::CleanupArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `cleanup` command.
pub async fn execute(args: CleanupArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let config = HarnessConfig::from_env()?;
    let gateway = Arc::new(StorageGateway::new(&config.database));

    let result = if args.dry_run {
        dry_run(&gateway, &args.ids).await
    } else {
        delete(&gateway, &args.ids).await
    };
    gateway.close().await?;

    writer.render(&result?)
}

async fn dry_run(gateway: &StorageGateway, ids: &[u64]) -> Result<CleanupSummary, CliError> {
    let mut report = CleanupReport::default();
    for &id in ids {
        if gateway.exists(id).await? {
            report.deleted.push(id);
        } else {
            report.already_absent.push(id);
        }
    }
    Ok(CleanupSummary::new(gateway.table(), true, report))
}

async fn delete(gateway: &Arc<StorageGateway>, ids: &[u64]) -> Result<CleanupSummary, CliError> {
    let registry = CleanupRegistry::new(Arc::clone(gateway));
    for &id in ids {
        registry.register(id)?;
    }

    let report = registry.cleanup().await?;
    info!(deleted = report.deleted.len(), "manual cleanup finished");
    Ok(CleanupSummary::new(gateway.table(), false, report))
}

/// What `cleanup` did, or would do with `--dry-run`.
#[derive(Debug, Serialize)]
pub struct CleanupSummary {
    pub table: String,
    pub dry_run: bool,
    /// Deleted ids, or ids that would be deleted on a dry run
    pub deleted: Vec<u64>,
    pub already_absent: Vec<u64>,
}

impl CleanupSummary {
    fn new(table: &str, dry_run: bool, report: CleanupReport) -> Self {
        Self {
            table: table.to_owned(),
            dry_run,
            deleted: report.deleted,
            already_absent: report.already_absent,
        }
    }
}

impl Render for CleanupSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let verb = if self.dry_run { "would delete" } else { "deleted" };
        writeln!(w, "Cleanup on {}", self.table.bold())?;
        for id in &self.deleted {
            writeln!(w, "  {:>10}  {}", id, verb.yellow())?;
        }
        for id in &self.already_absent {
            writeln!(w, "  {:>10}  {}", id, "absent".dimmed())?;
        }
        writeln!(
            w,
            "{} {}, {} already absent",
            self.deleted.len(),
            verb,
            self.already_absent.len()
        )?;
        Ok(())
    }
}
