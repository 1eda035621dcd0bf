use crate::domain::model::{
    LoadReport, MatchQuery, MatchRow, NormalizedSeason, RawMatch, TeamComparison, TeamGoals,
};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn database_path(&self) -> &str;
    fn dataset_path(&self) -> &str;
    fn default_rows(&self) -> usize;
    fn skip_invalid_rows(&self) -> bool;
}

/// The data-access contract between the shell and the database.
///
/// Every read is side-effect free; `update_match_result` is the only mutator.
pub trait MatchRepository {
    fn list_matches(&self, query: &MatchQuery) -> Result<Vec<MatchRow>>;
    fn search_matches(&self, text: &str) -> Result<Vec<MatchRow>>;
    fn find_match(&self, match_id: i64) -> Result<MatchRow>;
    fn goals_by_team(&self) -> Result<Vec<TeamGoals>>;
    fn compare_teams(&self, team_a: &str, team_b: &str) -> Result<TeamComparison>;
    fn update_match_result(&self, match_id: i64, home_goals: i64, away_goals: i64) -> Result<MatchRow>;
    fn teams(&self) -> Result<Vec<String>>;
    fn referees(&self) -> Result<Vec<String>>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<RawMatch>>;
    fn transform(&self, data: Vec<RawMatch>) -> Result<NormalizedSeason>;
    fn load(&self, season: NormalizedSeason) -> Result<LoadReport>;
}
