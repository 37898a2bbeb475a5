use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "staffing")]
#[command(about = "Company staffing and project model: summaries, reports and demo data")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print departments, projects, monthly cost and overloaded employees
    Summary {
        #[arg(long, help = "Company JSON file (defaults to the configured company file)")]
        input: Option<PathBuf>,
    },
    /// Write the employees and projects CSV reports
    Export {
        #[arg(long)]
        input: Option<PathBuf>,

        #[arg(long, help = "Directory for the reports (defaults to the configured data dir)")]
        output_dir: Option<PathBuf>,
    },
    /// Build a sample company and save it as JSON
    Demo {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl CliConfig {
    /// The TOML config named by `--config`, or the built-in defaults.
    /// `--verbose` and `--json-logs` on the command line win over the file.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_logs;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", &path.to_string_lossy())?;
        }
        let paths = match &self.command {
            Command::Summary { input } => vec![("input", input)],
            Command::Export { input, output_dir } => {
                vec![("input", input), ("output_dir", output_dir)]
            }
            Command::Demo { output } => vec![("output", output)],
        };
        for (field, path) in paths {
            if let Some(path) = path {
                validate_path(field, &path.to_string_lossy())?;
            }
        }
        Ok(())
    }
}
