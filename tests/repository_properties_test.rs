use epl_explorer::adapters::csv_source::parse_season_csv;
use epl_explorer::domain::services::normalize_season;
use epl_explorer::{MatchQuery, MatchRepository, MatchRow, SqliteRepository};
use std::collections::BTreeSet;

const SAMPLE_CSV: &str = include_str!("fixtures/epl_sample.csv");

fn setup_repo() -> SqliteRepository {
    let rows = parse_season_csv(SAMPLE_CSV.as_bytes()).unwrap();
    let season = normalize_season(rows, false).unwrap();
    let repo = SqliteRepository::open_in_memory().unwrap();
    repo.import_season(&season).unwrap();
    repo
}

fn ids(rows: &[MatchRow]) -> BTreeSet<i64> {
    rows.iter().map(|m| m.match_id).collect()
}

#[test]
fn filters_are_subsets_and_combine_as_intersection() {
    let repo = setup_repo();
    let all = ids(&repo.list_matches(&MatchQuery::all()).unwrap());

    for team in repo.teams().unwrap() {
        let by_team = repo.list_matches(&MatchQuery::all().team(&team)).unwrap();
        assert!(by_team.iter().all(|m| m.involves(&team)));
        let by_team = ids(&by_team);
        assert!(by_team.is_subset(&all));

        for referee in repo.referees().unwrap() {
            let by_referee = ids(&repo.list_matches(&MatchQuery::all().referee(&referee)).unwrap());
            assert!(by_referee.is_subset(&all));

            let both = ids(
                &repo
                    .list_matches(&MatchQuery::all().team(&team).referee(&referee))
                    .unwrap(),
            );
            let expected: BTreeSet<i64> = by_team.intersection(&by_referee).copied().collect();
            assert_eq!(both, expected, "team={} referee={}", team, referee);
        }
    }
}

#[test]
fn team_filter_includes_example_match() {
    let repo = setup_repo();
    let rows = repo.list_matches(&MatchQuery::all().team("Liverpool")).unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows
        .iter()
        .any(|m| m.home_team == "Liverpool" && m.away_team == "Everton" && m.referee == "M Oliver"));

    let with_referee = repo
        .list_matches(&MatchQuery::all().team("Liverpool").referee("M Oliver"))
        .unwrap();
    assert_eq!(with_referee.len(), 1);
    assert_eq!(with_referee[0].match_id, 7);
}

#[test]
fn goals_by_team_sum_is_twice_total_goals() {
    let repo = setup_repo();
    let total: u32 = repo
        .list_matches(&MatchQuery::all())
        .unwrap()
        .iter()
        .map(MatchRow::total_goals)
        .sum();
    assert_eq!(total, 27);

    let goals = repo.goals_by_team().unwrap();
    assert_eq!(goals.len(), 10);
    let sum: u32 = goals.iter().map(|g| g.total_goals).sum();
    assert_eq!(sum, 2 * total);

    let scored: u32 = goals.iter().map(|g| g.goals_for).sum();
    assert_eq!(scored, total);
}

#[test]
fn goals_by_team_ordering_and_values() {
    let repo = setup_repo();
    let goals = repo.goals_by_team().unwrap();

    assert_eq!(goals[0].team, "Man City");
    assert_eq!((goals[0].goals_for, goals[0].goals_against), (10, 2));
    assert_eq!(goals[0].total_goals, 12);

    let liverpool = goals.iter().find(|g| g.team == "Liverpool").unwrap();
    assert_eq!((liverpool.goals_for, liverpool.goals_against), (8, 2));

    assert!(goals.windows(2).all(|w| w[0].total_goals >= w[1].total_goals));
}

#[test]
fn update_then_reread_returns_new_counts() {
    let repo = setup_repo();
    let updated = repo.update_match_result(7, 2, 0).unwrap();
    assert_eq!((updated.home_goals, updated.away_goals), (2, 0));

    let reread = repo.find_match(7).unwrap();
    assert_eq!(reread.home_goals, 2);
    assert_eq!(reread.away_goals, 0);

    let liverpool = repo
        .goals_by_team()
        .unwrap()
        .into_iter()
        .find(|g| g.team == "Liverpool")
        .unwrap();
    assert_eq!(liverpool.goals_for, 9);
}

#[test]
fn negative_update_leaves_match_unchanged() {
    let repo = setup_repo();
    let before = repo.find_match(7).unwrap();

    let err = repo.update_match_result(7, -1, 0).unwrap_err();
    assert!(err.is_validation());
    let err = repo.update_match_result(7, 3, -2).unwrap_err();
    assert!(err.is_validation());

    assert_eq!(repo.find_match(7).unwrap(), before);
}

#[test]
fn update_unknown_match_is_not_found() {
    let repo = setup_repo();
    assert!(repo.update_match_result(4242, 1, 1).unwrap_err().is_not_found());
}

#[test]
fn compare_existing_teams_without_head_to_head() {
    let repo = setup_repo();
    let comparison = repo.compare_teams("West Ham", "Southampton").unwrap();

    assert!(comparison.head_to_head.is_empty());
    assert_eq!(comparison.team_a.played, 1);
    assert_eq!(comparison.team_a.losses, 1);
    assert_eq!(comparison.team_b.played, 1);
    assert_eq!(comparison.team_b.goals_for, 1);
    assert_eq!(comparison.team_b.goals_against, 2);
}

#[test]
fn compare_with_head_to_head() {
    let repo = setup_repo();
    let comparison = repo.compare_teams("Liverpool", "Man City").unwrap();

    let liverpool = &comparison.team_a;
    assert_eq!(liverpool.played, 5);
    assert_eq!((liverpool.wins, liverpool.draws, liverpool.losses), (3, 1, 1));
    assert_eq!((liverpool.goals_for, liverpool.goals_against), (8, 2));
    assert_eq!(liverpool.points(), 10);

    let city = &comparison.team_b;
    assert_eq!((city.wins, city.draws, city.losses), (3, 0, 0));

    assert_eq!(comparison.head_to_head.len(), 1);
    assert_eq!(comparison.head_to_head[0].match_id, 8);
}

#[test]
fn compare_unknown_team_is_not_found() {
    let repo = setup_repo();
    assert!(repo.compare_teams("Liverpool", "Gotham City").unwrap_err().is_not_found());
    assert!(repo.compare_teams("Gotham City", "Liverpool").unwrap_err().is_not_found());
}

#[test]
fn search_is_case_insensitive_substring() {
    let repo = setup_repo();

    let rows = repo.search_matches("man").unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows
        .iter()
        .all(|m| m.home_team.contains("Man") || m.away_team.contains("Man")));

    let rows = repo.search_matches("EVERTON").unwrap();
    assert_eq!(ids(&rows), BTreeSet::from([7, 9]));

    let rows = repo.search_matches("mason").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].referee, "L Mason");
}

#[test]
fn search_for_absent_text_is_empty() {
    let repo = setup_repo();
    assert!(repo.search_matches("Barcelona").unwrap().is_empty());
}

#[test]
fn search_combines_with_filters() {
    let repo = setup_repo();
    let rows = repo
        .list_matches(&MatchQuery::all().referee("M Oliver").search("arsenal"))
        .unwrap();
    assert_eq!(ids(&rows), BTreeSet::from([3, 10]));
}

#[test]
fn unknown_filter_names_are_not_found() {
    let repo = setup_repo();
    let err = repo
        .list_matches(&MatchQuery::all().referee("M Olivier"))
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(repo
        .list_matches(&MatchQuery::all().team("Liverpol"))
        .unwrap_err()
        .is_not_found());
}
