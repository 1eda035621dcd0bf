//! SQLite persistence for the season database.
//!
//! `SqliteRepository` implements the `MatchRepository` port on top of one
//! `rusqlite::Connection`. Queries live in `queries`, writes in `operations`.

pub mod operations;
pub mod queries;
pub mod schema;

use rusqlite::Connection;
use std::path::Path;

use crate::domain::model::{LoadReport, MatchQuery, MatchRow, NormalizedSeason, TeamComparison, TeamGoals};
use crate::domain::ports::MatchRepository;
use crate::domain::services::team_record;
use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::validate_goal_count;

pub use schema::{open_database, open_existing_database, open_memory};

pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: open_database(path.as_ref())?,
        })
    }

    /// Open an existing database without creating it or touching its schema.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExplorerError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database file not found: {}", path.display()),
            )));
        }
        Ok(Self {
            conn: open_existing_database(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_memory()?,
        })
    }

    pub fn import_season(&self, season: &NormalizedSeason) -> Result<LoadReport> {
        operations::import_season(&self.conn, season)
    }

    fn require_team(&self, name: &str) -> Result<()> {
        if queries::team_exists(&self.conn, name)? {
            Ok(())
        } else {
            Err(ExplorerError::not_found("team", name))
        }
    }

    fn require_referee(&self, name: &str) -> Result<()> {
        if queries::referee_exists(&self.conn, name)? {
            Ok(())
        } else {
            Err(ExplorerError::not_found("referee", name))
        }
    }
}

impl MatchRepository for SqliteRepository {
    fn list_matches(&self, query: &MatchQuery) -> Result<Vec<MatchRow>> {
        if let Some(team) = &query.team {
            self.require_team(team)?;
        }
        if let Some(referee) = &query.referee {
            self.require_referee(referee)?;
        }
        let rows = queries::list_matches(&self.conn, query)?;
        tracing::debug!("list_matches {:?} -> {} rows", query, rows.len());
        Ok(rows)
    }

    fn search_matches(&self, text: &str) -> Result<Vec<MatchRow>> {
        self.list_matches(&MatchQuery::all().search(text))
    }

    fn find_match(&self, match_id: i64) -> Result<MatchRow> {
        queries::find_match(&self.conn, match_id)?
            .ok_or_else(|| ExplorerError::not_found("match", match_id))
    }

    fn goals_by_team(&self) -> Result<Vec<TeamGoals>> {
        queries::goals_by_team(&self.conn)
    }

    fn compare_teams(&self, team_a: &str, team_b: &str) -> Result<TeamComparison> {
        // 兩隊都確認存在後才查詢，避免回傳部分結果
        self.require_team(team_a)?;
        self.require_team(team_b)?;

        let record_a = team_record(team_a, self.list_matches(&MatchQuery::all().team(team_a))?);
        let record_b = team_record(team_b, self.list_matches(&MatchQuery::all().team(team_b))?);

        let head_to_head = if team_a == team_b {
            Vec::new()
        } else {
            record_a
                .matches
                .iter()
                .filter(|m| m.involves(team_b))
                .cloned()
                .collect()
        };

        Ok(TeamComparison {
            team_a: record_a,
            team_b: record_b,
            head_to_head,
        })
    }

    fn update_match_result(&self, match_id: i64, home_goals: i64, away_goals: i64) -> Result<MatchRow> {
        let home_goals = validate_goal_count("home_goals", home_goals)?;
        let away_goals = validate_goal_count("away_goals", away_goals)?;

        operations::update_match_result(&self.conn, match_id, home_goals, away_goals)?;
        tracing::info!(
            "Updated match {} to {}-{}",
            match_id,
            home_goals,
            away_goals
        );
        self.find_match(match_id)
    }

    fn teams(&self) -> Result<Vec<String>> {
        queries::team_names(&self.conn)
    }

    fn referees(&self) -> Result<Vec<String>> {
        queries::referee_names(&self.conn)
    }
}
