//! Pure domain logic: season normalization, team records and view summaries.
//!
//! Nothing here touches the database; the repository and the load pipeline
//! call into these functions with rows they already hold.

use crate::domain::model::{
    Discipline, FullTimeResult, MatchRow, MatchSummary, NewMatch, NormalizedSeason, RawMatch,
    TeamRecord,
};
use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::{validate_distinct_teams, validate_non_empty_string};
use chrono::NaiveDate;
use std::collections::BTreeSet;

const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%d/%m/%y"];

pub fn parse_match_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn validate_raw(raw: &RawMatch) -> Result<NewMatch> {
    validate_non_empty_string("HomeTeam", &raw.home_team)?;
    validate_non_empty_string("AwayTeam", &raw.away_team)?;
    validate_non_empty_string("Referee", &raw.referee)?;

    let home_team = raw.home_team.trim().to_string();
    let away_team = raw.away_team.trim().to_string();
    validate_distinct_teams(&home_team, &away_team)?;

    let match_date = parse_match_date(&raw.date).ok_or_else(|| {
        ExplorerError::validation("Date", format!("unrecognised date '{}'", raw.date))
    })?;

    let new_match = NewMatch {
        match_date,
        home_team,
        away_team,
        home_goals: raw.home_goals,
        away_goals: raw.away_goals,
        referee: raw.referee.trim().to_string(),
        home_discipline: Discipline {
            yellow_cards: raw.home_yellow,
            red_cards: raw.home_red,
        },
        away_discipline: Discipline {
            yellow_cards: raw.away_yellow,
            red_cards: raw.away_red,
        },
    };

    // FTR 一律由比分推導；來源資料不一致時只記錄警告
    if let Some(code) = raw.result.as_deref().filter(|c| !c.trim().is_empty()) {
        let derived = new_match.result();
        if FullTimeResult::from_code(code) != Some(derived) {
            tracing::warn!(
                "FTR '{}' disagrees with score {}-{} for {} v {}; using '{}'",
                code,
                new_match.home_goals,
                new_match.away_goals,
                new_match.home_team,
                new_match.away_team,
                derived.code()
            );
        }
    }

    Ok(new_match)
}

/// Turn raw CSV rows into reference data plus matches.
///
/// Row numbers in errors are 1-based CSV lines, counting the header as line 1.
/// With `skip_invalid_rows` set, bad rows are logged and counted instead of failing the load.
pub fn normalize_season(rows: Vec<RawMatch>, skip_invalid_rows: bool) -> Result<NormalizedSeason> {
    let mut teams = BTreeSet::new();
    let mut referees = BTreeSet::new();
    let mut matches = Vec::with_capacity(rows.len());
    let mut rejected_rows = 0;

    for (index, raw) in rows.iter().enumerate() {
        let line = index + 2;
        match validate_raw(raw) {
            Ok(new_match) => {
                teams.insert(new_match.home_team.clone());
                teams.insert(new_match.away_team.clone());
                referees.insert(new_match.referee.clone());
                matches.push(new_match);
            }
            Err(e) if skip_invalid_rows => {
                tracing::warn!("Skipping CSV line {}: {}", line, e);
                rejected_rows += 1;
            }
            Err(e) => {
                return Err(ExplorerError::DatasetError {
                    row: line,
                    message: e.to_string(),
                })
            }
        }
    }

    Ok(NormalizedSeason {
        teams: teams.into_iter().collect(),
        referees: referees.into_iter().collect(),
        matches,
        rejected_rows,
    })
}

/// Season record for `team` built from the matches it played.
pub fn team_record(team: &str, matches: Vec<MatchRow>) -> TeamRecord {
    let mut record = TeamRecord {
        team: team.to_string(),
        played: 0,
        wins: 0,
        draws: 0,
        losses: 0,
        goals_for: 0,
        goals_against: 0,
        matches: Vec::new(),
    };

    for row in &matches {
        let (scored, conceded) = if row.home_team == team {
            (row.home_goals, row.away_goals)
        } else if row.away_team == team {
            (row.away_goals, row.home_goals)
        } else {
            continue;
        };

        record.played += 1;
        record.goals_for += scored;
        record.goals_against += conceded;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => record.wins += 1,
            std::cmp::Ordering::Equal => record.draws += 1,
            std::cmp::Ordering::Less => record.losses += 1,
        }
    }

    record.matches = matches.into_iter().filter(|m| m.involves(team)).collect();
    record
}

pub fn summarize(rows: &[MatchRow]) -> MatchSummary {
    let teams: BTreeSet<&str> = rows
        .iter()
        .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()])
        .collect();
    let total_goals: u32 = rows.iter().map(MatchRow::total_goals).sum();
    let total_cards: u32 = rows
        .iter()
        .map(|m| m.home_discipline.total() + m.away_discipline.total())
        .sum();

    let avg_goals_per_match = if rows.is_empty() {
        0.0
    } else {
        (f64::from(total_goals) / rows.len() as f64 * 100.0).round() / 100.0
    };

    MatchSummary {
        matches: rows.len(),
        teams: teams.len(),
        total_goals,
        total_cards,
        avg_goals_per_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, home: &str, away: &str, hg: u32, ag: u32, referee: &str) -> RawMatch {
        RawMatch {
            date: date.to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals: hg,
            away_goals: ag,
            result: None,
            referee: referee.to_string(),
            home_yellow: Some(1),
            away_yellow: None,
            home_red: Some(0),
            away_red: None,
        }
    }

    fn row(id: i64, home: &str, away: &str, hg: u32, ag: u32) -> MatchRow {
        MatchRow {
            match_id: id,
            match_date: NaiveDate::from_ymd_opt(2018, 8, 10).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals: hg,
            away_goals: ag,
            result: FullTimeResult::from_score(hg, ag),
            referee: "M Oliver".to_string(),
            home_discipline: Discipline {
                yellow_cards: Some(2),
                red_cards: Some(0),
            },
            away_discipline: Discipline::default(),
        }
    }

    #[test]
    fn test_parse_match_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2018, 8, 10);
        assert_eq!(parse_match_date("10/08/2018"), expected);
        assert_eq!(parse_match_date("2018-08-10"), expected);
        assert_eq!(parse_match_date("10/08/18"), expected);
        assert_eq!(parse_match_date("August 10"), None);
    }

    #[test]
    fn test_normalize_collects_reference_data() {
        let rows = vec![
            raw("10/08/2018", " Man United ", "Leicester", 2, 1, "A Marriner"),
            raw("11/08/2018", "Liverpool", "West Ham", 4, 0, "A Taylor"),
            raw("12/08/2018", "Leicester", "Liverpool", 1, 2, "A Taylor"),
        ];

        let season = normalize_season(rows, false).unwrap();
        assert_eq!(
            season.teams,
            vec!["Leicester", "Liverpool", "Man United", "West Ham"]
        );
        assert_eq!(season.referees, vec!["A Marriner", "A Taylor"]);
        assert_eq!(season.matches.len(), 3);
        assert_eq!(season.matches[0].home_team, "Man United");
        assert_eq!(season.matches[0].home_discipline.yellow_cards, Some(1));
        assert_eq!(season.rejected_rows, 0);
    }

    #[test]
    fn test_normalize_rejects_same_team_in_strict_mode() {
        let rows = vec![
            raw("10/08/2018", "Arsenal", "Chelsea", 0, 0, "M Dean"),
            raw("11/08/2018", "Arsenal", "Arsenal", 1, 1, "M Dean"),
        ];

        match normalize_season(rows, false) {
            Err(ExplorerError::DatasetError { row, message }) => {
                assert_eq!(row, 3);
                assert!(message.contains("must differ"));
            }
            other => panic!("expected DatasetError, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_skips_bad_rows_when_lenient() {
        let rows = vec![
            raw("10/08/2018", "Arsenal", "Chelsea", 0, 0, "M Dean"),
            raw("not-a-date", "Fulham", "Burnley", 1, 1, "M Dean"),
            raw("12/08/2018", "Fulham", "Burnley", 1, 1, "  "),
        ];

        let season = normalize_season(rows, true).unwrap();
        assert_eq!(season.matches.len(), 1);
        assert_eq!(season.rejected_rows, 2);
        assert_eq!(season.teams, vec!["Arsenal", "Chelsea"]);
    }

    #[test]
    fn test_team_record_counts_both_sides() {
        let matches = vec![
            row(1, "Liverpool", "Everton", 1, 0),
            row(2, "Man City", "Liverpool", 2, 2),
            row(3, "Liverpool", "Chelsea", 0, 3),
            row(4, "Everton", "Chelsea", 1, 1),
        ];

        let record = team_record("Liverpool", matches);
        assert_eq!(record.played, 3);
        assert_eq!((record.wins, record.draws, record.losses), (1, 1, 1));
        assert_eq!(record.goals_for, 3);
        assert_eq!(record.goals_against, 5);
        assert_eq!(record.points(), 4);
        assert_eq!(record.matches.len(), 3);
    }

    #[test]
    fn test_summarize_view() {
        let rows = vec![
            row(1, "Liverpool", "Everton", 1, 0),
            row(2, "Man City", "Liverpool", 2, 2),
        ];

        let summary = summarize(&rows);
        assert_eq!(summary.matches, 2);
        assert_eq!(summary.teams, 3);
        assert_eq!(summary.total_goals, 5);
        assert_eq!(summary.total_cards, 4);
        assert_eq!(summary.avg_goals_per_match, 2.5);
    }

    #[test]
    fn test_summarize_empty_view() {
        let summary = summarize(&[]);
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.avg_goals_per_match, 0.0);
    }
}
