//! Shell-side handlers: each takes explicit request parameters, calls the
//! repository once and returns the text to print.

use crate::app::render::{
    matches_to_csv, render_comparison, render_goals, render_match_detail, render_matches,
    render_summary, OutputFormat,
};
use crate::core::{MatchRepository, Storage};
use crate::domain::model::{FullTimeResult, MatchQuery};
use crate::domain::services::summarize;
use crate::utils::error::Result;
use crate::utils::validation::validate_goal_count;

/// Where to write a CSV copy of the displayed rows.
pub struct Export<'a, S: Storage> {
    pub storage: &'a S,
    pub path: &'a str,
}

pub fn browse<R: MatchRepository, S: Storage>(
    repo: &R,
    query: &MatchQuery,
    format: OutputFormat,
    export: Option<Export<'_, S>>,
) -> Result<String> {
    let rows = repo.list_matches(query)?;

    if let Some(export) = export {
        export
            .storage
            .write_file(export.path, matches_to_csv(&rows)?.as_bytes())?;
        tracing::info!("📁 Exported {} rows to {}", rows.len(), export.path);
    }

    render_matches(&rows, format)
}

pub fn show<R: MatchRepository>(repo: &R, match_id: i64) -> Result<String> {
    Ok(render_match_detail(&repo.find_match(match_id)?))
}

pub fn goals<R: MatchRepository>(repo: &R, format: OutputFormat) -> Result<String> {
    render_goals(&repo.goals_by_team()?, format)
}

pub fn compare<R: MatchRepository>(
    repo: &R,
    team_a: &str,
    team_b: &str,
    format: OutputFormat,
) -> Result<String> {
    render_comparison(&repo.compare_teams(team_a, team_b)?, format)
}

pub fn summary<R: MatchRepository>(repo: &R, query: &MatchQuery) -> Result<String> {
    let rows = repo.list_matches(query)?;
    Ok(render_summary(&summarize(&rows)))
}

/// Update a match score. Without `confirmed` nothing is written; the current
/// and proposed results are shown instead.
pub fn update<R: MatchRepository>(
    repo: &R,
    match_id: i64,
    home_goals: i64,
    away_goals: i64,
    confirmed: bool,
) -> Result<String> {
    if confirmed {
        let updated = repo.update_match_result(match_id, home_goals, away_goals)?;
        return Ok(format!(
            "✅ Updated match {} → {} ({})\n{}",
            updated.match_id,
            updated.score(),
            updated.result.label(),
            render_match_detail(&updated)
        ));
    }

    // 預覽模式也先驗證，讓使用者在確認前就看到錯誤
    let home = validate_goal_count("home_goals", home_goals)?;
    let away = validate_goal_count("away_goals", away_goals)?;
    let current = repo.find_match(match_id)?;
    Ok(format!(
        "{}\n\nProposed: {} - {} ({})\nNothing was changed. Re-run with --yes to apply.",
        render_match_detail(&current),
        home,
        away,
        FullTimeResult::from_score(home, away).label()
    ))
}

pub fn names(names: &[String]) -> String {
    names.join("\n")
}
