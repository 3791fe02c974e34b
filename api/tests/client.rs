use chrono::NaiveDate;
use mockito::{Matcher, Server, ServerGuard};
use pitchside_api::client::{ApiError, FootballApi, NOT_STARTED};
use pitchside_api::insights::{self, BestOdds, FormFilter};
use pitchside_api::{Outcome, Side, StatType};
use std::fs;
use std::path::PathBuf;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn query(pairs: &[(&str, &str)]) -> Matcher {
    Matcher::AllOf(
        pairs
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded((*k).into(), (*v).into()))
            .collect(),
    )
}

async fn json_mock(server: &mut ServerGuard, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_leagues_are_mapped_and_rows_without_ids_dropped() {
    let mut server = Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "/leagues/",
        r#"[
            {"league_id": 39, "name": "Premier League", "country": {"name": "England", "flag": "gb.svg"}},
            {"name": "Ghost League"},
            {"league_id": 140, "name": "La Liga"}
        ]"#,
    )
    .await;

    let leagues = FootballApi::new(server.url()).fetch_leagues().await.unwrap();

    mock.assert_async().await;
    assert_eq!(leagues.len(), 2);
    assert_eq!(leagues[0].label(), "Premier League (England)");
    assert_eq!(leagues[1].label(), "La Liga");
}

#[tokio::test]
async fn test_standings_request_carries_season() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/standings/39")
        .match_query(query(&[("season_year", "2024")]))
        .with_status(200)
        .with_body(
            r#"[{"rank": 1, "team": {"team_id": 50, "name": "Manchester City"}, "matches_played": 38,
                 "wins": 28, "draws": 7, "losses": 3, "points": 91}]"#,
        )
        .create_async()
        .await;

    let rows = FootballApi::new(server.url()).fetch_standings(39, 2024).await.unwrap();

    mock.assert_async().await;
    assert_eq!(rows[0].team.name, "Manchester City");
    assert_eq!(rows[0].points, 91);
}

#[tokio::test]
async fn test_fixtures_for_a_day_come_back_sorted_by_date() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/fixtures/")
        .match_query(query(&[
            ("league_id", "39"),
            ("season_year", "2024"),
            ("date_from", "2024-05-01"),
            ("date_to", "2024-05-02"),
        ]))
        .with_status(200)
        .with_body(
            r#"[
                {"fixture_id": 2, "date": "2024-05-02", "home_team": {"team_id": 1}, "away_team": {"team_id": 2}},
                {"fixture_id": 1, "date": "2024-05-01", "home_team": {"team_id": 3}, "away_team": {"team_id": 4}}
            ]"#,
        )
        .create_async()
        .await;

    let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
    let fixtures = FootballApi::new(server.url())
        .fetch_fixtures_between(39, 2024, day(1), day(2))
        .await
        .unwrap();

    mock.assert_async().await;
    let ids: Vec<u32> = fixtures.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_upcoming_fixtures_filter_by_status_and_limit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/fixtures/")
        .match_query(query(&[("league_id", "39"), ("status", "NS"), ("limit", "10")]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let fixtures = FootballApi::new(server.url())
        .fetch_upcoming_fixtures(39, NOT_STARTED, 10)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(fixtures.is_empty());
}

#[tokio::test]
async fn test_detailed_fixture_feeds_the_derived_values() {
    let mut server = Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "/fixtures/1035037/detailed",
        &read_fixture("fixture_detailed.json"),
    )
    .await;

    let detail = FootballApi::new(server.url())
        .fetch_fixture_detail(1035037)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(detail.fixture.home_team.name, "Arsenal");
    assert_eq!(detail.referee.as_deref(), Some("Michael Oliver"));
    assert_eq!(detail.venue.as_ref().and_then(|v| v.city.as_deref()), Some("London"));

    assert_eq!(insights::predicted_outcome(&detail), Some(Outcome::Home));
    assert_eq!(
        insights::best_odds(&detail),
        Some(BestOdds { odd: "2.10".into(), bookmaker: "Unibet".into() })
    );

    let prediction = detail.prediction.as_ref().unwrap();
    assert_eq!(insights::format_share(prediction.percent_home), "60%");
    assert_eq!(prediction.comparison.len(), 2);

    let home_games = insights::filter_recent_form(&detail.home_recent_form, FormFilter::Home, false);
    assert_eq!(home_games.len(), 1);
    assert_eq!(home_games[0].side, Some(Side::Home));

    let home_stats = detail.home_team_stats.as_ref().unwrap();
    let away_stats = detail.away_team_stats.as_ref().unwrap();
    let rows = insights::team_stat_comparison(home_stats, away_stats);
    let shots = rows.iter().find(|r| r.label == "Avg Shots on Target").unwrap();
    assert_eq!((shots.home.as_str(), shots.away.as_str()), ("6.05", "N/A"));
    let gd = rows.iter().find(|r| r.label == "Goal Difference").unwrap();
    assert_eq!(gd.away, "-13");

    assert_eq!(detail.match_events[0].minute(), "23'");
    assert_eq!(detail.match_statistics.len(), 2);
}

#[tokio::test]
async fn test_server_error_fails_once_without_retry() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/players/stats/rankings/")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let result = FootballApi::new(server.url())
        .fetch_rankings(StatType::Goals, 39, 2024, 10)
        .await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ApiError::Status(status, _)) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_client_errors_are_failures_too() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/teams/999")
        .with_status(404)
        .create_async()
        .await;

    let result = FootballApi::new(server.url()).fetch_team(999).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ApiError::Status(status, _)) if status.as_u16() == 404));
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(&mut server, "/leagues/", "<html>oops</html>").await;

    let result = FootballApi::new(server.url()).fetch_leagues().await;

    assert!(matches!(result, Err(ApiError::Parsing(_, _))));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let result = FootballApi::new("http://127.0.0.1:1").fetch_leagues().await;
    assert!(matches!(result, Err(ApiError::Network(_, _))));
}

#[tokio::test]
async fn test_single_fixture_without_teams_is_a_schema_error() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(&mut server, "/fixtures/5", r#"{"fixture_id": 5}"#).await;

    let result = FootballApi::new(server.url()).fetch_fixture(5).await;

    assert!(matches!(result, Err(ApiError::Schema(_))));
}

#[tokio::test]
async fn test_team_overview_fetches_team_then_statistics() {
    let mut server = Server::new_async().await;
    let team = json_mock(
        &mut server,
        "/teams/42",
        r#"{"team_id": 42, "name": "Arsenal", "founded": 1886, "country": "England"}"#,
    )
    .await;
    let stats = server
        .mock("GET", "/teams/42/statistics")
        .match_query(query(&[("season_year", "2024")]))
        .with_status(200)
        .with_body(r#"{"matches_played": 38, "wins": 28, "average_passes_accuracy": "86.3"}"#)
        .create_async()
        .await;

    let overview = FootballApi::new(server.url())
        .fetch_team_overview(42, 2024)
        .await
        .unwrap();

    team.assert_async().await;
    stats.assert_async().await;
    assert_eq!(overview.team.founded, Some(1886));
    assert_eq!(overview.team.country.as_deref(), Some("England"));
    assert_eq!(overview.statistics.wins, 28);
    assert_eq!(overview.statistics.average_passes_accuracy, Some(86.3));
}

#[tokio::test]
async fn test_team_overview_fails_when_statistics_fail() {
    let mut server = Server::new_async().await;
    let _team = json_mock(&mut server, "/teams/42", r#"{"team_id": 42, "name": "Arsenal"}"#).await;
    let _stats = server
        .mock("GET", "/teams/42/statistics")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let result = FootballApi::new(server.url()).fetch_team_overview(42, 2024).await;

    assert!(matches!(result, Err(ApiError::Status(_, _))));
}

#[tokio::test]
async fn test_player_profile_uses_first_statistics_record() {
    let mut server = Server::new_async().await;
    let _player = json_mock(
        &mut server,
        "/players/1100",
        r#"{"player_id": 1100, "name": "E. Haaland", "age": 23, "team": {"team_id": 50, "name": "Manchester City"}}"#,
    )
    .await;
    let stats = server
        .mock("GET", "/player_statistics/")
        .match_query(query(&[("player_id", "1100"), ("season_year", "2024")]))
        .with_status(200)
        .with_body(r#"[{"appearances": 31, "goals_total": 27}, {"appearances": 2}]"#)
        .create_async()
        .await;

    let profile = FootballApi::new(server.url())
        .fetch_player_profile(1100, 2024)
        .await
        .unwrap();

    stats.assert_async().await;
    assert_eq!(profile.player.team.as_ref().map(|t| t.name.as_str()), Some("Manchester City"));
    let statistics = profile.statistics.unwrap();
    assert_eq!(statistics.appearances, Some(31));
    assert_eq!(statistics.goals_total, Some(27));
}

#[tokio::test]
async fn test_player_profile_without_statistics() {
    let mut server = Server::new_async().await;
    let _player = json_mock(&mut server, "/players/7", r#"{"player_id": 7, "name": "Reserve"}"#).await;
    let _stats = server
        .mock("GET", "/player_statistics/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let profile = FootballApi::new(server.url()).fetch_player_profile(7, 2024).await.unwrap();

    assert!(profile.statistics.is_none());
}

#[tokio::test]
async fn test_rankings_are_stable_across_identical_requests() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/players/stats/rankings/")
        .match_query(query(&[
            ("stat_type", "yellow_cards"),
            ("league_id", "39"),
            ("season_year", "2024"),
            ("limit", "10"),
        ]))
        .with_status(200)
        .with_body(
            r#"[
                {"rank": 1, "player": {"player_id": 3, "name": "C"}, "stat_value": 11},
                {"rank": 2, "player": {"player_id": 1, "name": "A"}, "stat_value": 9},
                {"rank": 3, "player": {"player_id": 2, "name": "B"}, "stat_value": 9}
            ]"#,
        )
        .expect(2)
        .create_async()
        .await;

    let api = FootballApi::new(server.url());
    let first = api.fetch_rankings(StatType::YellowCards, 39, 2024, 10).await.unwrap();
    let second = api.fetch_rankings(StatType::YellowCards, 39, 2024, 10).await.unwrap();

    mock.assert_async().await;
    assert_eq!(first, second);
    let ids: Vec<u32> = first.iter().map(|r| r.player.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_head_to_head_passes_both_teams() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/head-to-head/")
        .match_query(query(&[("team1_id", "42"), ("team2_id", "47"), ("limit", "5")]))
        .with_status(200)
        .with_body(
            r#"[{"fixture_id": 9, "date": "2024-04-28T13:00:00+00:00", "home_team": {"team_id": 47, "name": "Tottenham"},
                 "away_team": {"team_id": 42, "name": "Arsenal"}, "goals_home": 2, "goals_away": 3}]"#,
        )
        .create_async()
        .await;

    let meetings = FootballApi::new(server.url()).fetch_head_to_head(42, 47, 5).await.unwrap();

    mock.assert_async().await;
    assert_eq!(meetings[0].score_line(), "2 - 3");
}

#[tokio::test]
async fn test_teams_list_uses_limit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/teams/")
        .match_query(query(&[("limit", "1000")]))
        .with_status(200)
        .with_body(r#"[{"team_id": 42, "name": "Arsenal"}, {"name": "No Id"}]"#)
        .create_async()
        .await;

    let teams = FootballApi::new(server.url()).fetch_teams(1000).await.unwrap();

    mock.assert_async().await;
    assert_eq!(teams.len(), 1);
}
