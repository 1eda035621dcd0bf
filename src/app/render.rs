//! Turns query results into text tables, JSON or CSV for the command line.

use crate::domain::model::{MatchRow, MatchSummary, TeamComparison, TeamGoals, TeamRecord};
use crate::utils::error::{ExplorerError, Result};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExplorerError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: table, json, csv".to_string(),
            }),
        }
    }
}

/// Column headers of the "current view" CSV export.
pub const EXPORT_HEADERS: [&str; 7] = [
    "MatchID",
    "MatchDate",
    "HomeTeam",
    "AwayTeam",
    "Score",
    "Full-Time Result",
    "RefereeName",
];

fn match_cells(row: &MatchRow) -> Vec<String> {
    vec![
        row.match_id.to_string(),
        row.match_date.to_string(),
        row.home_team.clone(),
        row.away_team.clone(),
        row.score(),
        row.result.label().to_string(),
        row.referee.clone(),
    ]
}

fn record_cells(record: &TeamRecord) -> Vec<String> {
    vec![
        record.team.clone(),
        record.played.to_string(),
        record.wins.to_string(),
        record.draws.to_string(),
        record.losses.to_string(),
        record.goals_for.to_string(),
        record.goals_against.to_string(),
        record.goal_difference().to_string(),
        record.points().to_string(),
    ]
}

const RECORD_HEADERS: [&str; 9] = ["Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"];

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(headers.to_vec()));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

fn to_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| ExplorerError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| ExplorerError::ConfigError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// CSV of the displayed rows, in display order.
pub fn matches_to_csv(rows: &[MatchRow]) -> Result<String> {
    let cells: Vec<Vec<String>> = rows.iter().map(match_cells).collect();
    to_csv(&EXPORT_HEADERS, &cells)
}

pub fn render_matches(rows: &[MatchRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(rows),
        OutputFormat::Csv => matches_to_csv(rows),
        OutputFormat::Table => {
            if rows.is_empty() {
                return Ok("No matches found.".to_string());
            }
            let cells: Vec<Vec<String>> = rows.iter().map(match_cells).collect();
            Ok(table(&EXPORT_HEADERS, &cells))
        }
    }
}

pub fn render_match_detail(row: &MatchRow) -> String {
    let cards = |yellow: Option<u32>, red: Option<u32>| match (yellow, red) {
        (None, None) => "not recorded".to_string(),
        (y, r) => format!(
            "{} yellow, {} red",
            y.map_or("?".to_string(), |v| v.to_string()),
            r.map_or("?".to_string(), |v| v.to_string())
        ),
    };

    [
        format!("Match {} ({})", row.match_id, row.match_date),
        format!(
            "  {} {} {}",
            row.home_team,
            row.score(),
            row.away_team
        ),
        format!("  Result:  {} ({})", row.result.label(), row.result.code()),
        format!("  Referee: {}", row.referee),
        format!(
            "  Cards:   {} / {}",
            cards(row.home_discipline.yellow_cards, row.home_discipline.red_cards),
            cards(row.away_discipline.yellow_cards, row.away_discipline.red_cards)
        ),
    ]
    .join("\n")
}

pub fn render_goals(goals: &[TeamGoals], format: OutputFormat) -> Result<String> {
    let headers = ["Team", "GoalsFor", "GoalsAgainst", "TotalGoals"];
    let cells: Vec<Vec<String>> = goals
        .iter()
        .map(|g| {
            vec![
                g.team.clone(),
                g.goals_for.to_string(),
                g.goals_against.to_string(),
                g.total_goals.to_string(),
            ]
        })
        .collect();

    match format {
        OutputFormat::Json => to_json(goals),
        OutputFormat::Csv => to_csv(&headers, &cells),
        OutputFormat::Table => Ok(table(&headers, &cells)),
    }
}

pub fn render_comparison(comparison: &TeamComparison, format: OutputFormat) -> Result<String> {
    let records = vec![
        record_cells(&comparison.team_a),
        record_cells(&comparison.team_b),
    ];

    match format {
        OutputFormat::Json => to_json(comparison),
        OutputFormat::Csv => to_csv(&RECORD_HEADERS, &records),
        OutputFormat::Table => {
            let mut out = table(&RECORD_HEADERS, &records);
            out.push_str("\n\nHead-to-head:\n");
            out.push_str(&render_matches(&comparison.head_to_head, OutputFormat::Table)?);
            Ok(out)
        }
    }
}

pub fn render_summary(summary: &MatchSummary) -> String {
    [
        format!("Matches:           {}", summary.matches),
        format!("Teams:             {}", summary.teams),
        format!("Total goals:       {}", summary.total_goals),
        format!("Total cards:       {}", summary.total_cards),
        format!("Avg goals / match: {:.2}", summary.avg_goals_per_match),
    ]
    .join("\n")
}
