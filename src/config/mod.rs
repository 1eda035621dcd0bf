pub mod cli;
pub mod toml_config;

use crate::app::render::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, validate_positive_number, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_DATABASE_PATH: &str = "epl_2018_2019.db";
pub const DEFAULT_DATASET_PATH: &str = "epl_2018_2019.csv";
pub const DEFAULT_ROWS: usize = 100;

/// Resolved settings: built-in defaults, then the TOML file, then command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: String,
    pub dataset_path: String,
    pub default_rows: usize,
    pub format: OutputFormat,
    pub skip_invalid_rows: bool,
    pub monitor: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            default_rows: DEFAULT_ROWS,
            format: OutputFormat::Table,
            skip_invalid_rows: false,
            monitor: false,
        }
    }
}

impl AppConfig {
    pub fn from_toml(toml: &TomlConfig) -> Result<Self> {
        toml.validate()?;

        let defaults = Self::default();
        Ok(Self {
            database_path: toml
                .database_path()
                .map(str::to_string)
                .unwrap_or(defaults.database_path),
            dataset_path: toml
                .dataset_path()
                .map(str::to_string)
                .unwrap_or(defaults.dataset_path),
            default_rows: toml.default_rows().unwrap_or(defaults.default_rows),
            format: match toml.format() {
                Some(format) => format.parse()?,
                None => defaults.format,
            },
            skip_invalid_rows: toml.skip_invalid_rows().unwrap_or(defaults.skip_invalid_rows),
            monitor: toml.monitoring_enabled(),
        })
    }
}

impl ConfigProvider for AppConfig {
    fn database_path(&self) -> &str {
        &self.database_path
    }

    fn dataset_path(&self) -> &str {
        &self.dataset_path
    }

    fn default_rows(&self) -> usize {
        self.default_rows
    }

    fn skip_invalid_rows(&self) -> bool {
        self.skip_invalid_rows
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("database_path", &self.database_path)?;
        validate_path("dataset_path", &self.dataset_path)?;
        validate_file_extension("dataset_path", &self.dataset_path, &["csv"])?;
        validate_positive_number("default_rows", self.default_rows, 1)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use self::args::{CliConfig, Command, ListArgs};

#[cfg(feature = "cli")]
mod args {
    use crate::app::render::OutputFormat;
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "epl")]
    #[command(about = "Explore the EPL 2018-2019 season from a local SQLite database")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// SQLite database file (overrides the config file)
        #[arg(long, global = true)]
        pub database: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Args, Default)]
    pub struct ListArgs {
        /// Maximum number of rows to display
        #[arg(long)]
        pub limit: Option<usize>,

        #[arg(long, value_enum)]
        pub format: Option<OutputFormat>,

        /// Also write the displayed rows to this CSV file
        #[arg(long)]
        pub output: Option<String>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Load the season CSV into the database
        Load {
            #[arg(long)]
            csv: Option<String>,

            #[arg(long)]
            skip_invalid_rows: bool,

            #[arg(long, help = "Log CPU and memory usage per phase")]
            monitor: bool,
        },
        /// Browse matches, optionally filtered by team, referee or free text
        Matches {
            #[arg(long)]
            team: Option<String>,

            #[arg(long)]
            referee: Option<String>,

            #[arg(long)]
            search: Option<String>,

            #[command(flatten)]
            list: ListArgs,
        },
        /// Case-insensitive search over team and referee names
        Search {
            text: String,

            #[command(flatten)]
            list: ListArgs,
        },
        /// Show one match by id
        Show { match_id: i64 },
        /// Goals for, against and in total for every team
        Goals {
            #[arg(long, value_enum)]
            format: Option<OutputFormat>,
        },
        /// Season records of two teams side by side, plus their head-to-head games
        Compare {
            team_a: String,
            team_b: String,

            #[arg(long, value_enum)]
            format: Option<OutputFormat>,
        },
        /// Overwrite a match score (requires --yes)
        Update {
            match_id: i64,

            #[arg(allow_negative_numbers = true)]
            home_goals: i64,

            #[arg(allow_negative_numbers = true)]
            away_goals: i64,

            #[arg(long, help = "Confirm the update; without it only a preview is shown")]
            yes: bool,
        },
        /// Headline numbers for a filtered view
        Summary {
            #[arg(long)]
            team: Option<String>,

            #[arg(long)]
            referee: Option<String>,

            #[arg(long)]
            search: Option<String>,
        },
        /// List team names
        Teams,
        /// List referee names
        Referees,
    }
}
