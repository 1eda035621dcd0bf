use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Full-time result code as stored in the `FTR` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FullTimeResult {
    #[serde(rename = "H")]
    HomeWin,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "A")]
    AwayWin,
}

impl FullTimeResult {
    pub fn from_score(home_goals: u32, away_goals: u32) -> Self {
        match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => Self::HomeWin,
            std::cmp::Ordering::Equal => Self::Draw,
            std::cmp::Ordering::Less => Self::AwayWin,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" => Some(Self::HomeWin),
            "D" => Some(Self::Draw),
            "A" => Some(Self::AwayWin),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::HomeWin => "H",
            Self::Draw => "D",
            Self::AwayWin => "A",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HomeWin => "Home Win",
            Self::Draw => "Draw",
            Self::AwayWin => "Away Win",
        }
    }
}

/// Yellow and red cards shown to one side. Either count may be missing in the source data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
}

impl Discipline {
    pub fn total(&self) -> u32 {
        self.yellow_cards.unwrap_or(0) + self.red_cards.unwrap_or(0)
    }
}

/// A match joined with its team and referee names, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    pub match_id: i64,
    pub match_date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub result: FullTimeResult,
    pub referee: String,
    pub home_discipline: Discipline,
    pub away_discipline: Discipline,
}

impl MatchRow {
    pub fn score(&self) -> String {
        format!("{} - {}", self.home_goals, self.away_goals)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn total_goals(&self) -> u32 {
        self.home_goals + self.away_goals
    }
}

/// Explicit request parameters for browsing matches. `None` means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchQuery {
    pub team: Option<String>,
    pub referee: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl MatchQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn referee(mut self, referee: impl Into<String>) -> Self {
        self.referee = Some(referee.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGoals {
    pub team: String,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Every goal scored in the team's matches, by either side.
    pub total_goals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub matches: Vec<MatchRow>,
}

impl TeamRecord {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn points(&self) -> u32 {
        self.wins * 3 + self.draws
    }
}

/// Side-by-side season records for two teams plus the games they played against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamComparison {
    pub team_a: TeamRecord,
    pub team_b: TeamRecord,
    pub head_to_head: Vec<MatchRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matches: usize,
    pub teams: usize,
    pub total_goals: u32,
    pub total_cards: u32,
    pub avg_goals_per_match: f64,
}

/// One CSV row as it appears in the raw season file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMatch {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "FTHG")]
    pub home_goals: u32,
    #[serde(rename = "FTAG")]
    pub away_goals: u32,
    #[serde(rename = "FTR", default)]
    pub result: Option<String>,
    #[serde(rename = "Referee")]
    pub referee: String,
    #[serde(rename = "HY", default)]
    pub home_yellow: Option<u32>,
    #[serde(rename = "AY", default)]
    pub away_yellow: Option<u32>,
    #[serde(rename = "HR", default)]
    pub home_red: Option<u32>,
    #[serde(rename = "AR", default)]
    pub away_red: Option<u32>,
}

/// A validated match that still refers to teams and referees by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub match_date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub referee: String,
    pub home_discipline: Discipline,
    pub away_discipline: Discipline,
}

impl NewMatch {
    pub fn result(&self) -> FullTimeResult {
        FullTimeResult::from_score(self.home_goals, self.away_goals)
    }
}

/// Output of the transform phase: reference data plus the matches that point at it.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSeason {
    pub teams: Vec<String>,
    pub referees: Vec<String>,
    pub matches: Vec<NewMatch>,
    pub rejected_rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub teams_inserted: usize,
    pub referees_inserted: usize,
    pub matches_inserted: usize,
    pub duplicates_skipped: usize,
    pub rows_rejected: usize,
}
