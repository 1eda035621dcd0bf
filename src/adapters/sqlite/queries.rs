//! Read queries against the season database.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::model::{Discipline, FullTimeResult, MatchQuery, MatchRow, TeamGoals};
use crate::domain::services::parse_match_date;
use crate::utils::error::Result;

const MATCH_SELECT: &str = "
SELECT
  m.MatchID,
  m.MatchDate,
  t1.TeamName AS HomeTeam,
  t2.TeamName AS AwayTeam,
  m.FTHG, m.FTAG, m.FTR,
  r.RefereeName,
  m.HY, m.AY, m.HR, m.AR
FROM Matches m
JOIN Teams t1 ON m.HomeTeamID = t1.TeamID
JOIN Teams t2 ON m.AwayTeamID = t2.TeamID
JOIN Referees r ON m.RefereeID = r.RefereeID";

// 日期欄位可能帶時間 (例如 "2018-08-10 00:00:00")，只取日期部分
fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    text.get(..10)
        .and_then(parse_match_date)
        .or_else(|| parse_match_date(&text))
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                format!("unrecognised match date '{}'", text).into(),
            )
        })
}

fn row_to_match(row: &Row<'_>) -> rusqlite::Result<MatchRow> {
    let home_goals: u32 = row.get(4)?;
    let away_goals: u32 = row.get(5)?;
    let code: Option<String> = row.get(6)?;
    let result = code
        .as_deref()
        .and_then(FullTimeResult::from_code)
        .unwrap_or_else(|| FullTimeResult::from_score(home_goals, away_goals));

    Ok(MatchRow {
        match_id: row.get(0)?,
        match_date: date_column(row, 1)?,
        home_team: row.get(2)?,
        away_team: row.get(3)?,
        home_goals,
        away_goals,
        result,
        referee: row.get(7)?,
        home_discipline: Discipline {
            yellow_cards: row.get(8)?,
            red_cards: row.get(10)?,
        },
        away_discipline: Discipline {
            yellow_cards: row.get(9)?,
            red_cards: row.get(11)?,
        },
    })
}

/// Escape LIKE wildcards so the search text is matched literally.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// List matches newest first, restricted by whichever filters are set.
pub fn list_matches(conn: &Connection, query: &MatchQuery) -> Result<Vec<MatchRow>> {
    let sql = format!(
        "{MATCH_SELECT}
WHERE (?1 IS NULL OR t1.TeamName = ?1 OR t2.TeamName = ?1)
  AND (?2 IS NULL OR r.RefereeName = ?2)
  AND (?3 IS NULL
       OR t1.TeamName LIKE ?3 ESCAPE '\\'
       OR t2.TeamName LIKE ?3 ESCAPE '\\'
       OR r.RefereeName LIKE ?3 ESCAPE '\\')
ORDER BY m.MatchDate DESC, m.MatchID DESC
LIMIT ?4"
    );

    let search = query
        .search
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(like_pattern);
    // LIMIT -1 在 SQLite 代表不限筆數
    let limit = query
        .limit
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
        .unwrap_or(-1);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![query.team, query.referee, search, limit],
        row_to_match,
    )?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn find_match(conn: &Connection, match_id: i64) -> Result<Option<MatchRow>> {
    let sql = format!("{MATCH_SELECT} WHERE m.MatchID = ?1");
    let row = conn
        .query_row(&sql, params![match_id], row_to_match)
        .optional()?;
    Ok(row)
}

/// Goals per team over the whole dataset, highest `total_goals` first.
pub fn goals_by_team(conn: &Connection) -> Result<Vec<TeamGoals>> {
    let mut stmt = conn.prepare(
        "SELECT
           t.TeamName,
           SUM(CASE WHEN m.HomeTeamID = t.TeamID THEN m.FTHG ELSE m.FTAG END) AS GoalsFor,
           SUM(CASE WHEN m.HomeTeamID = t.TeamID THEN m.FTAG ELSE m.FTHG END) AS GoalsAgainst
         FROM Teams t
         JOIN Matches m ON m.HomeTeamID = t.TeamID OR m.AwayTeamID = t.TeamID
         GROUP BY t.TeamID, t.TeamName
         ORDER BY (GoalsFor + GoalsAgainst) DESC, t.TeamName",
    )?;
    let rows = stmt.query_map([], |row| {
        let goals_for: u32 = row.get(1)?;
        let goals_against: u32 = row.get(2)?;
        Ok(TeamGoals {
            team: row.get(0)?,
            goals_for,
            goals_against,
            total_goals: goals_for + goals_against,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn team_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM Teams WHERE TeamName = ?1)",
        params![name],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

pub fn referee_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM Referees WHERE RefereeName = ?1)",
        params![name],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

pub fn team_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT TeamName FROM Teams ORDER BY TeamName")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn referee_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT RefereeName FROM Referees ORDER BY RefereeName")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}
