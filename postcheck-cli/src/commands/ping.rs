//! `postcheck ping` command handler

use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use postcheck_client::ResourceClient;
use postcheck_core::config::HarnessConfig;
use postcheck_storage::StorageGateway;

use crate::cli::PingArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `ping` command.
///
/// Probes every selected channel before reporting, so one unreachable
/// channel does not hide the state of the other.
pub async fn execute(args: PingArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let config = HarnessConfig::from_env()?;
    let mut report = PingReport::default();

    if !args.db_only {
        report.channels.push(probe_api(&config).await?);
    }
    if !args.api_only {
        report.channels.push(probe_storage(&config).await);
    }

    writer.render(&report)?;

    let down: Vec<&str> = report
        .channels
        .iter()
        .filter(|c| !c.reachable)
        .map(|c| c.channel.as_str())
        .collect();
    if !down.is_empty() {
        return Err(CliError::Unreachable(down.join(", ")));
    }
    Ok(())
}

/// Any HTTP answer counts as reachable; the status is reported as-is.
async fn probe_api(config: &HarnessConfig) -> Result<ChannelStatus, CliError> {
    let client = ResourceClient::new(&config.api)?;
    let target = client.base_url().to_string();
    let started = Instant::now();

    let status = match client.list_posts(&[("per_page", "1")]).await {
        Ok(response) => {
            info!(status = response.status_code(), "api answered");
            ChannelStatus {
                channel: "api".to_owned(),
                target,
                reachable: true,
                detail: format!("HTTP {}", response.status_code()),
                elapsed_ms: elapsed_ms(started),
            }
        }
        Err(e) => {
            warn!(error = %e, "api probe failed");
            ChannelStatus {
                channel: "api".to_owned(),
                target,
                reachable: false,
                detail: e.to_string(),
                elapsed_ms: elapsed_ms(started),
            }
        }
    };
    Ok(status)
}

async fn probe_storage(config: &HarnessConfig) -> ChannelStatus {
    let gateway = StorageGateway::new(&config.database);
    let target = format!(
        "{}:{}/{} ({})",
        config.database.host,
        config.database.port,
        config.database.name,
        gateway.table()
    );
    let started = Instant::now();

    let result = gateway.ping().await;
    let elapsed = elapsed_ms(started);
    if let Err(e) = gateway.close().await {
        warn!(error = %e, "closing probe connection failed");
    }

    match result {
        Ok(()) => ChannelStatus {
            channel: "database".to_owned(),
            target,
            reachable: true,
            detail: "SELECT 1 ok".to_owned(),
            elapsed_ms: elapsed,
        },
        Err(e) => {
            warn!(error = %e, "database probe failed");
            ChannelStatus {
                channel: "database".to_owned(),
                target,
                reachable: false,
                detail: e.to_string(),
                elapsed_ms: elapsed,
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Result of probing one channel.
#[derive(Debug, Serialize)]
pub struct ChannelStatus {
    pub channel: String,
    pub target: String,
    pub reachable: bool,
    pub detail: String,
    pub elapsed_ms: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct PingReport {
    pub channels: Vec<ChannelStatus>,
}

impl Render for PingReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "{:<10} {:<8} {:>8}  {}",
            "CHANNEL", "STATE", "TIME", "TARGET / DETAIL"
        )?;
        for c in &self.channels {
            let state = if c.reachable {
                "UP".green().bold()
            } else {
                "DOWN".red().bold()
            };
            writeln!(
                w,
                "{:<10} {:<8} {:>6}ms  {}",
                c.channel, state, c.elapsed_ms, c.target
            )?;
            writeln!(w, "{:<10} {:<8} {:>8}  {}", "", "", "", c.detail)?;
        }
        Ok(())
    }
}
