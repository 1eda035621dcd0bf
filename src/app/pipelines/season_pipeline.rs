use crate::adapters::csv_source::parse_season_csv;
use crate::adapters::sqlite::SqliteRepository;
use crate::core::{ConfigProvider, LoadReport, NormalizedSeason, Pipeline, RawMatch, Storage};
use crate::domain::services::normalize_season;
use crate::utils::error::Result;

/// CSV season file → normalized teams/referees/matches → SQLite.
pub struct SeasonPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SeasonPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SeasonPipeline<S, C> {
    fn extract(&self) -> Result<Vec<RawMatch>> {
        tracing::debug!("Reading season CSV from: {}", self.config.dataset_path());
        let data = self.storage.read_file(self.config.dataset_path())?;
        let records = parse_season_csv(&data)?;

        if records.is_empty() {
            tracing::warn!("Season CSV {} contains no rows", self.config.dataset_path());
        }
        Ok(records)
    }

    fn transform(&self, data: Vec<RawMatch>) -> Result<NormalizedSeason> {
        normalize_season(data, self.config.skip_invalid_rows())
    }

    fn load(&self, season: NormalizedSeason) -> Result<LoadReport> {
        tracing::debug!(
            "Writing {} teams, {} referees, {} matches to {}",
            season.teams.len(),
            season.referees.len(),
            season.matches.len(),
            self.config.database_path()
        );
        let repository = SqliteRepository::open(self.config.database_path())?;
        repository.import_season(&season)
    }
}
