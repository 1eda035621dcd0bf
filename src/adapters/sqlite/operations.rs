//! Write operations: season import and the match result update.

use rusqlite::{params, Connection};

use crate::domain::model::{FullTimeResult, LoadReport, NormalizedSeason};
use crate::utils::error::{ExplorerError, Result};

/// Insert a normalized season inside one transaction.
///
/// Teams, referees and matches are all `INSERT OR IGNORE`, so importing the
/// same season twice leaves the database unchanged and reports duplicates.
pub fn import_season(conn: &Connection, season: &NormalizedSeason) -> Result<LoadReport> {
    let tx = conn.unchecked_transaction()?;
    let mut report = LoadReport {
        rows_rejected: season.rejected_rows,
        ..LoadReport::default()
    };

    {
        let mut insert_team = tx.prepare("INSERT OR IGNORE INTO Teams (TeamName) VALUES (?1)")?;
        for team in &season.teams {
            report.teams_inserted += insert_team.execute(params![team])?;
        }

        let mut insert_referee =
            tx.prepare("INSERT OR IGNORE INTO Referees (RefereeName) VALUES (?1)")?;
        for referee in &season.referees {
            report.referees_inserted += insert_referee.execute(params![referee])?;
        }

        let mut insert_match = tx.prepare(
            "INSERT OR IGNORE INTO Matches
               (MatchDate, HomeTeamID, AwayTeamID, FTHG, FTAG, FTR, RefereeID, HY, AY, HR, AR)
             VALUES (
               ?1,
               (SELECT TeamID FROM Teams WHERE TeamName = ?2),
               (SELECT TeamID FROM Teams WHERE TeamName = ?3),
               ?4, ?5, ?6,
               (SELECT RefereeID FROM Referees WHERE RefereeName = ?7),
               ?8, ?9, ?10, ?11
             )",
        )?;
        for m in &season.matches {
            let inserted = insert_match.execute(params![
                m.match_date,
                m.home_team,
                m.away_team,
                m.home_goals,
                m.away_goals,
                m.result().code(),
                m.referee,
                m.home_discipline.yellow_cards,
                m.away_discipline.yellow_cards,
                m.home_discipline.red_cards,
                m.away_discipline.red_cards,
            ])?;
            if inserted == 0 {
                tracing::debug!(
                    "Skipping duplicate match {} v {} on {}",
                    m.home_team,
                    m.away_team,
                    m.match_date
                );
                report.duplicates_skipped += 1;
            } else {
                report.matches_inserted += 1;
            }
        }
    }

    tx.commit()?;
    Ok(report)
}

/// Overwrite the stored score and keep `FTR` in step with it.
pub fn update_match_result(
    conn: &Connection,
    match_id: i64,
    home_goals: u32,
    away_goals: u32,
) -> Result<()> {
    let result = FullTimeResult::from_score(home_goals, away_goals);
    let changed = conn.execute(
        "UPDATE Matches SET FTHG = ?2, FTAG = ?3, FTR = ?4 WHERE MatchID = ?1",
        params![match_id, home_goals, away_goals, result.code()],
    )?;
    if changed == 0 {
        return Err(ExplorerError::not_found("match", match_id));
    }
    Ok(())
}
