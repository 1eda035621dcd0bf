pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::sqlite::SqliteRepository;
pub use crate::config::{cli::LocalStorage, AppConfig};
pub use crate::core::{etl::LoadEngine, MatchRepository, SeasonPipeline};
pub use crate::domain::model::{MatchQuery, MatchRow, TeamComparison, TeamGoals, TeamRecord};
pub use crate::utils::error::{ExplorerError, Result};
