//! `postcheck config` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use postcheck_core::config::HarnessConfig;
use postcheck_core::error::ConfigError;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

const SOURCE: &str = "environment";
const SECTIONS: [&str; 3] = ["general", "api", "database"];

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, writer: &OutputWriter) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(HarnessConfig::from_env(), writer),
        ConfigAction::Show { section } => {
            let config = HarnessConfig::from_env()?;
            writer.render(&build_report(&config, section.as_deref())?)
        }
    }
}

/// Reports the load result; an invalid configuration is also an error so
/// the process exits non-zero.
fn execute_validate(
    loaded: Result<HarnessConfig, ConfigError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!("validating configuration");

    let report = validation_report(&loaded);
    writer.render(&report)?;

    loaded.map(|_| ()).map_err(CliError::from)
}

fn validation_report(loaded: &Result<HarnessConfig, ConfigError>) -> ConfigValidationReport {
    let errors = match loaded {
        Ok(_) => Vec::new(),
        Err(ConfigError::MissingVars { names }) => names
            .iter()
            .map(|name| format!("missing required environment variable {name}"))
            .collect(),
        Err(e) => vec![e.to_string()],
    };

    ConfigValidationReport {
        source: SOURCE.to_owned(),
        valid: errors.is_empty(),
        errors,
    }
}

/// Builds the redacted TOML view of the configuration, optionally limited to
/// one section.
fn build_report(config: &HarnessConfig, section: Option<&str>) -> Result<ConfigReport, CliError> {
    let config = config.redacted();

    let rendered = match section {
        None => toml::to_string_pretty(&config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("api") => toml::to_string_pretty(&config.api),
        Some("database") => toml::to_string_pretty(&config.database),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: {})",
                SECTIONS.join(", ")
            )));
        }
    };

    Ok(ConfigReport {
        source: SOURCE.to_owned(),
        section: section.map(str::to_owned),
        config_toml: rendered.map_err(|e| CliError::Command(format!("cannot render config: {e}")))?,
        config,
    })
}

/// Configuration display report.
///
/// JSON output carries the structured (redacted) configuration; text output
/// prints the TOML rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub config: HarnessConfig,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match &self.section {
            Some(section) => writeln!(
                w,
                "Configuration {} (source: {})",
                format!("[{section}]").bold(),
                self.source
            )?,
            None => writeln!(w, "Configuration (source: {})", self.source.bold())?,
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;
        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Empty when valid
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;
        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }
        Ok(())
    }
}
