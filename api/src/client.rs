use crate::insights::sort_fixtures_by_date;
use crate::wire::{
    WireCountryField, WireFixture, WireFormEntry, WireLeague, WireMatchEvent, WireMatchStatistics,
    WireOdds, WirePlayer, WirePlayerStatistics, WirePrediction, WireRanking, WireStanding,
    WireTeam, WireTeamStatistics, WireTopPlayer, value_text,
};
use crate::{
    Bet, BookmakerOdds, Country, Fixture, FixtureDetail, FixtureId, FormEntry, League, LeagueId,
    LeagueRef, MatchEvent, MatchResult, OddValue, Player, PlayerId, PlayerProfile,
    PlayerStatistics, PredictedWinner, Prediction, RankedPlayer, RankingRow, Side, StandingRow,
    StatComparison, StatType, Team, TeamId, TeamOverview, TeamRef, TeamStatistics, TopPlayer,
    Venue,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, error};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `status` filter the backend uses for fixtures that have not started.
pub const NOT_STARTED: &str = "NS";

const UNKNOWN_TEAM: &str = "Unknown Team";
const UNKNOWN_PLAYER: &str = "Unknown Player";

/// Client for the football statistics backend.
#[derive(Debug, Clone)]
pub struct FootballApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for FootballApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    InvalidUrl(String),
    Network(reqwest::Error, String),
    Status(StatusCode, String),
    Parsing(reqwest::Error, String),
    Schema(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(status, url) => write!(f, "HTTP {status} for {url}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Schema(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

impl FootballApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("pitchside/0.1 (terminal football stats)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_leagues(&self) -> ApiResult<Vec<League>> {
        let raw: Vec<WireLeague> = self.get("/leagues/", &[]).await?;
        Ok(raw.into_iter().filter_map(map_league).collect())
    }

    pub async fn fetch_standings(&self, league_id: LeagueId, season: u16) -> ApiResult<Vec<StandingRow>> {
        let endpoint = format!("/standings/{league_id}");
        let raw: Vec<WireStanding> = self
            .get(&endpoint, &[("season_year", season.to_string())])
            .await?;
        Ok(raw.into_iter().filter_map(map_standing).collect())
    }

    /// Fixtures of a league within an inclusive date range, earliest first.
    pub async fn fetch_fixtures_between(
        &self,
        league_id: LeagueId,
        season: u16,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<Vec<Fixture>> {
        let query = [
            ("league_id", league_id.to_string()),
            ("season_year", season.to_string()),
            ("date_from", from.format("%Y-%m-%d").to_string()),
            ("date_to", to.format("%Y-%m-%d").to_string()),
        ];
        let raw: Vec<WireFixture> = self.get("/fixtures/", &query).await?;
        let mut fixtures: Vec<Fixture> = raw.into_iter().filter_map(map_fixture).collect();
        sort_fixtures_by_date(&mut fixtures);
        Ok(fixtures)
    }

    /// Fixtures of a league with the given status (usually [`NOT_STARTED`]), earliest first.
    pub async fn fetch_upcoming_fixtures(
        &self,
        league_id: LeagueId,
        status: &str,
        limit: u32,
    ) -> ApiResult<Vec<Fixture>> {
        let query = [
            ("league_id", league_id.to_string()),
            ("status", status.to_string()),
            ("limit", limit.to_string()),
        ];
        let raw: Vec<WireFixture> = self.get("/fixtures/", &query).await?;
        let mut fixtures: Vec<Fixture> = raw.into_iter().filter_map(map_fixture).collect();
        sort_fixtures_by_date(&mut fixtures);
        Ok(fixtures)
    }

    pub async fn fetch_fixture(&self, fixture_id: FixtureId) -> ApiResult<Fixture> {
        let raw: WireFixture = self.get(&format!("/fixtures/{fixture_id}"), &[]).await?;
        map_fixture(raw).ok_or_else(|| schema_error(format!("fixture {fixture_id} is missing its id or teams")))
    }

    /// Fixture enriched with prediction, odds, recent form, statistics and events.
    pub async fn fetch_fixture_detail(&self, fixture_id: FixtureId) -> ApiResult<FixtureDetail> {
        let raw: WireFixture = self
            .get(&format!("/fixtures/{fixture_id}/detailed"), &[])
            .await?;
        map_fixture_detail(raw)
            .ok_or_else(|| schema_error(format!("fixture {fixture_id} is missing its id or teams")))
    }

    pub async fn fetch_team(&self, team_id: TeamId) -> ApiResult<Team> {
        let raw: WireTeam = self.get(&format!("/teams/{team_id}"), &[]).await?;
        map_team(raw).ok_or_else(|| schema_error(format!("team {team_id} is missing its team_id")))
    }

    pub async fn fetch_team_statistics(&self, team_id: TeamId, season: u16) -> ApiResult<TeamStatistics> {
        let raw: WireTeamStatistics = self
            .get(
                &format!("/teams/{team_id}/statistics"),
                &[("season_year", season.to_string())],
            )
            .await?;
        Ok(map_team_statistics(raw))
    }

    /// Team info, then its season statistics. Fails if either call fails.
    pub async fn fetch_team_overview(&self, team_id: TeamId, season: u16) -> ApiResult<TeamOverview> {
        let team = self.fetch_team(team_id).await?;
        let statistics = self.fetch_team_statistics(team_id, season).await?;
        Ok(TeamOverview { team, statistics })
    }

    pub async fn fetch_player(&self, player_id: PlayerId) -> ApiResult<Player> {
        let raw: WirePlayer = self.get(&format!("/players/{player_id}"), &[]).await?;
        map_player(raw).ok_or_else(|| schema_error(format!("player {player_id} is missing its player_id")))
    }

    /// The first statistics record the backend returns for the season, if any.
    pub async fn fetch_player_statistics(
        &self,
        player_id: PlayerId,
        season: u16,
    ) -> ApiResult<Option<PlayerStatistics>> {
        let query = [
            ("player_id", player_id.to_string()),
            ("season_year", season.to_string()),
        ];
        let raw: Vec<WirePlayerStatistics> = self.get("/player_statistics/", &query).await?;
        Ok(raw.into_iter().next().map(map_player_statistics))
    }

    /// Player info, then the season statistics. Fails if either call fails.
    pub async fn fetch_player_profile(&self, player_id: PlayerId, season: u16) -> ApiResult<PlayerProfile> {
        let player = self.fetch_player(player_id).await?;
        let statistics = self.fetch_player_statistics(player_id, season).await?;
        Ok(PlayerProfile { player, statistics })
    }

    /// Ranked players for a statistic, in the order the backend ranked them.
    pub async fn fetch_rankings(
        &self,
        stat: StatType,
        league_id: LeagueId,
        season: u16,
        limit: u32,
    ) -> ApiResult<Vec<RankingRow>> {
        let query = [
            ("stat_type", stat.as_query().to_string()),
            ("league_id", league_id.to_string()),
            ("season_year", season.to_string()),
            ("limit", limit.to_string()),
        ];
        let raw: Vec<WireRanking> = self.get("/players/stats/rankings/", &query).await?;
        Ok(raw.into_iter().filter_map(map_ranking).collect())
    }

    pub async fn fetch_teams(&self, limit: u32) -> ApiResult<Vec<Team>> {
        let raw: Vec<WireTeam> = self.get("/teams/", &[("limit", limit.to_string())]).await?;
        Ok(raw.into_iter().filter_map(map_team).collect())
    }

    /// Past meetings between two teams, in backend order.
    pub async fn fetch_head_to_head(
        &self,
        team1: TeamId,
        team2: TeamId,
        limit: u32,
    ) -> ApiResult<Vec<Fixture>> {
        let query = [
            ("team1_id", team1.to_string()),
            ("team2_id", team2.to_string()),
            ("limit", limit.to_string()),
        ];
        let raw: Vec<WireFixture> = self.get("/head-to-head/", &query).await?;
        Ok(raw.into_iter().filter_map(map_fixture).collect())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let result = match self.endpoint_url(endpoint, query) {
            Ok(url) => self.send(url).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            error!("GET {endpoint} failed: {e}");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status, url.to_string()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_string()))
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> ApiResult<Url> {
        let raw = format!("{}{endpoint}", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn schema_error(msg: String) -> ApiError {
    error!("{msg}");
    ApiError::Schema(msg)
}

// ---------------------------------------------------------------------------
// Mapping: wire types → validated domain types
// ---------------------------------------------------------------------------

/// Parse the backend's dates: RFC 3339, naive date-times (taken as UTC), or bare dates.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn map_league(l: WireLeague) -> Option<League> {
    let Some(id) = l.league_id else {
        debug!("dropping league without league_id: {:?}", l.name);
        return None;
    };
    let country = l.country.and_then(|c| match c {
        WireCountryField::Name(name) => Some(Country { name, flag: None }),
        WireCountryField::Detail(detail) => detail.name.map(|name| Country { name, flag: detail.flag }),
    });
    Some(League {
        id,
        name: l.name.unwrap_or_else(|| "Unknown League".into()),
        country,
    })
}

fn map_team_ref(t: WireTeam) -> Option<TeamRef> {
    Some(TeamRef {
        id: t.team_id?,
        name: t.name.unwrap_or_else(|| UNKNOWN_TEAM.into()),
        logo: t.logo,
    })
}

fn map_team(t: WireTeam) -> Option<Team> {
    let Some(id) = t.team_id else {
        debug!("dropping team without team_id: {:?}", t.name);
        return None;
    };
    let country = t.country.and_then(|c| match c {
        WireCountryField::Name(name) => Some(name),
        WireCountryField::Detail(detail) => detail.name,
    });
    Some(Team {
        id,
        name: t.name.unwrap_or_else(|| UNKNOWN_TEAM.into()),
        logo: t.logo,
        founded: t.founded.and_then(|y| u16::try_from(y).ok()),
        country,
    })
}

fn map_team_statistics(s: WireTeamStatistics) -> TeamStatistics {
    TeamStatistics {
        matches_played: s.matches_played.unwrap_or_default(),
        wins: s.wins.unwrap_or_default(),
        draws: s.draws.unwrap_or_default(),
        losses: s.losses.unwrap_or_default(),
        goals_for: s.goals_for.unwrap_or_default(),
        goals_against: s.goals_against.unwrap_or_default(),
        goal_difference: s.goal_difference.unwrap_or_default(),
        clean_sheets: s.clean_sheets.unwrap_or_default(),
        average_shots_on_target: s.average_shots_on_target,
        average_tackles: s.average_tackles,
        average_passes_accuracy: s.average_passes_accuracy,
    }
}

fn map_fixture(f: WireFixture) -> Option<Fixture> {
    let Some(id) = f.fixture_id else {
        debug!("dropping fixture without fixture_id");
        return None;
    };
    let home_team = f.home_team.and_then(map_team_ref);
    let away_team = f.away_team.and_then(map_team_ref);
    let (Some(home_team), Some(away_team)) = (home_team, away_team) else {
        debug!("dropping fixture {id}: home or away team is missing");
        return None;
    };
    Some(Fixture {
        id,
        date: f.date.as_deref().and_then(parse_date),
        home_team,
        away_team,
        status_short: f.status_short,
        goals_home: f.goals_home,
        goals_away: f.goals_away,
        league_name: f.league.and_then(|l| l.name),
    })
}

fn map_fixture_detail(mut f: WireFixture) -> Option<FixtureDetail> {
    let venue = f.venue.take().map(|v| Venue { name: v.name, city: v.city });
    let referee = f.referee.take();
    let league = f.league.clone().map(|l| LeagueRef {
        id: l.league_id,
        name: l.name.unwrap_or_else(|| "Unknown".into()),
    });
    let prediction = f.prediction.take().map(map_prediction);
    let bookmakers = f.odds.take().map(map_odds).unwrap_or_default();
    let home_recent_form = map_form(f.home_recent_form.take());
    let away_recent_form = map_form(f.away_recent_form.take());
    let home_team_stats = f.home_team_stats.take().map(map_team_statistics);
    let away_team_stats = f.away_team_stats.take().map(map_team_statistics);
    let home_top_players = map_top_players(f.home_top_players.take());
    let away_top_players = map_top_players(f.away_top_players.take());
    let match_statistics = f.match_statistics.take().map(map_match_statistics).unwrap_or_default();
    let match_events = f
        .match_events
        .take()
        .unwrap_or_default()
        .into_iter()
        .map(map_event)
        .collect();

    Some(FixtureDetail {
        fixture: map_fixture(f)?,
        venue,
        referee,
        league,
        prediction,
        bookmakers,
        home_recent_form,
        away_recent_form,
        home_team_stats,
        away_team_stats,
        home_top_players,
        away_top_players,
        match_statistics,
        match_events,
    })
}

fn map_prediction(p: WirePrediction) -> Prediction {
    let winner = p.winner_team_id.map(|id| match id {
        Some(id) => PredictedWinner::Team(id),
        None => PredictedWinner::NoWinner,
    });
    let comparison = p
        .comparison
        .unwrap_or_default()
        .into_iter()
        .map(|(key, pair)| StatComparison {
            label: humanize_key(&key),
            home: pair.home.as_ref().map_or_else(|| "N/A".into(), value_text),
            away: pair.away.as_ref().map_or_else(|| "N/A".into(), value_text),
        })
        .collect();
    Prediction {
        winner,
        percent_home: p.percent_home,
        percent_draw: p.percent_draw,
        percent_away: p.percent_away,
        advice: p.advice,
        comparison,
    }
}

fn map_odds(o: WireOdds) -> Vec<BookmakerOdds> {
    o.fixture_bookmakers
        .unwrap_or_default()
        .into_iter()
        .map(|fb| BookmakerOdds {
            bookmaker: fb
                .bookmaker
                .and_then(|b| b.name)
                .unwrap_or_else(|| "Unknown".into()),
            bets: fb
                .bets
                .unwrap_or_default()
                .into_iter()
                .map(|bet| Bet {
                    name: bet.bet_type.and_then(|t| t.name),
                    values: bet
                        .odd_values
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|v| Some(OddValue { value: v.value?, odd: v.odd? }))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

fn map_form(entries: Option<Vec<WireFormEntry>>) -> Vec<FormEntry> {
    entries
        .unwrap_or_default()
        .into_iter()
        .map(|e| FormEntry {
            fixture_id: e.fixture_id,
            date: e.date.as_deref().and_then(parse_date),
            opponent: e.opponent.unwrap_or_else(|| UNKNOWN_TEAM.into()),
            opponent_team_id: e.opponent_team_id,
            opponent_logo: e.opponent_logo,
            result: e.outcome.as_deref().and_then(parse_result),
            side: e.home_or_away.as_deref().and_then(parse_side),
            goals_for: e.goals_for,
            goals_against: e.goals_against,
        })
        .collect()
}

fn parse_result(s: &str) -> Option<MatchResult> {
    match s.trim().to_ascii_uppercase().as_str() {
        "W" | "WIN" => Some(MatchResult::Win),
        "D" | "DRAW" => Some(MatchResult::Draw),
        "L" | "LOSS" => Some(MatchResult::Loss),
        _ => None,
    }
}

fn parse_side(s: &str) -> Option<Side> {
    match s.trim().to_ascii_lowercase().as_str() {
        "home" => Some(Side::Home),
        "away" => Some(Side::Away),
        _ => None,
    }
}

fn map_top_players(players: Option<Vec<WireTopPlayer>>) -> Vec<TopPlayer> {
    players
        .unwrap_or_default()
        .into_iter()
        .map(|p| TopPlayer {
            player_id: p.player_id,
            name: p.name.unwrap_or_else(|| UNKNOWN_PLAYER.into()),
            position: p.position,
            goals: p.goals.unwrap_or_default(),
        })
        .collect()
}

/// One row per stat name present on either side; the missing side reads "N/A".
fn map_match_statistics(s: WireMatchStatistics) -> Vec<StatComparison> {
    let home = s.home.unwrap_or_default();
    let away = s.away.unwrap_or_default();
    let keys: BTreeSet<&String> = home.keys().chain(away.keys()).collect();
    keys.into_iter()
        .map(|key| StatComparison {
            label: humanize_key(key),
            home: home.get(key).map_or_else(|| "N/A".into(), value_text),
            away: away.get(key).map_or_else(|| "N/A".into(), value_text),
        })
        .collect()
}

fn map_event(e: WireMatchEvent) -> MatchEvent {
    MatchEvent {
        elapsed: e.elapsed,
        extra: e.extra,
        team_id: e.team_id,
        team_name: e.team_name,
        player_name: e.player_name,
        assist_name: e.assist_name,
        kind: e.kind.unwrap_or_else(|| "Event".into()),
        detail: e.detail,
    }
}

fn map_standing(s: WireStanding) -> Option<StandingRow> {
    let Some(team) = s.team.and_then(map_team_ref) else {
        debug!("dropping standing row without team id (rank {:?})", s.rank);
        return None;
    };
    Some(StandingRow {
        rank: s.rank.unwrap_or_default(),
        team,
        matches_played: s.matches_played.unwrap_or_default(),
        wins: s.wins.unwrap_or_default(),
        draws: s.draws.unwrap_or_default(),
        losses: s.losses.unwrap_or_default(),
        points: s.points.unwrap_or_default(),
        goal_difference: s.goal_difference,
        form: s.form,
    })
}

fn map_player(p: WirePlayer) -> Option<Player> {
    let Some(id) = p.player_id else {
        debug!("dropping player without player_id: {:?}", p.name);
        return None;
    };
    Some(Player {
        id,
        name: p.name.unwrap_or_else(|| UNKNOWN_PLAYER.into()),
        photo: p.photo,
        age: p.age,
        nationality: p.nationality,
        position: p.position,
        team: p.team.and_then(map_team_ref),
    })
}

fn map_player_statistics(s: WirePlayerStatistics) -> PlayerStatistics {
    PlayerStatistics {
        appearances: s.appearances,
        minutes: s.minutes,
        rating: s.rating,
        goals_total: s.goals_total,
        goals_assists: s.goals_assists,
        shots_total: s.shots_total,
        shots_on: s.shots_on,
        passes_total: s.passes_total,
        passes_key: s.passes_key,
        passes_accuracy: s.passes_accuracy,
        tackles_total: s.tackles_total,
        tackles_blocks: s.tackles_blocks,
        tackles_interceptions: s.tackles_interceptions,
        cards_yellow: s.cards_yellow,
        cards_red: s.cards_red,
        dribbles_attempts: s.dribbles_attempts,
        dribbles_success: s.dribbles_success,
        duels_total: s.duels_total,
        duels_won: s.duels_won,
        fouls_drawn: s.fouls_drawn,
        fouls_committed: s.fouls_committed,
        penalty_won: s.penalty_won,
        penalty_scored: s.penalty_scored,
        penalty_missed: s.penalty_missed,
    }
}

fn map_ranking(r: WireRanking) -> Option<RankingRow> {
    let Some(player) = r.player else {
        debug!("dropping ranking row without player (rank {:?})", r.rank);
        return None;
    };
    let Some(id) = player.player_id else {
        debug!("dropping ranking row without player_id (rank {:?})", r.rank);
        return None;
    };
    Some(RankingRow {
        rank: r.rank,
        player: RankedPlayer {
            id,
            name: player.name.unwrap_or_else(|| UNKNOWN_PLAYER.into()),
            photo: player.photo,
            team_name: player
                .team
                .and_then(|t| t.name)
                .unwrap_or_else(|| UNKNOWN_TEAM.into()),
        },
        stat_value: r.stat_value,
    })
}

/// "shots_on_goal" → "Shots On Goal".
fn humanize_key(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn wire<T: DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let rfc = parse_date("2024-05-01T19:45:00+02:00").unwrap();
        assert_eq!((rfc.hour(), rfc.minute()), (17, 45));

        let naive = parse_date("2024-05-01T19:45:00").unwrap();
        assert_eq!(naive.hour(), 19);

        let date_only = parse_date("2024-05-02").unwrap();
        assert_eq!((date_only.month(), date_only.day(), date_only.hour()), (5, 2, 0));

        assert!(parse_date("soon").is_none());
    }

    #[test]
    fn test_fixture_without_id_or_team_is_dropped() {
        let raw: Vec<WireFixture> = wire(
            r#"[
                {"fixture_id": 1, "home_team": {"team_id": 10, "name": "A"}, "away_team": {"team_id": 20, "name": "B"}},
                {"home_team": {"team_id": 10}, "away_team": {"team_id": 20}},
                {"fixture_id": 3, "home_team": {"name": "No Id"}, "away_team": {"team_id": 20}}
            ]"#,
        );
        let fixtures: Vec<Fixture> = raw.into_iter().filter_map(map_fixture).collect();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].id, 1);
        assert_eq!(fixtures[0].home_team.name, "A");
    }

    #[test]
    fn test_missing_names_get_placeholders() {
        let raw: WireStanding = wire(r#"{"rank": 1, "team": {"team_id": 42}}"#);
        let row = map_standing(raw).unwrap();
        assert_eq!(row.team.name, "Unknown Team");
        assert_eq!(row.points, 0);
        assert_eq!(row.matches_played, 0);
    }

    #[test]
    fn test_prediction_winner_mapping() {
        let draw = map_prediction(wire(r#"{"winner_team_id": null, "advice": "Double chance"}"#));
        assert_eq!(draw.winner, Some(PredictedWinner::NoWinner));
        let team = map_prediction(wire(r#"{"winner_team_id": 7}"#));
        assert_eq!(team.winner, Some(PredictedWinner::Team(7)));
        let absent = map_prediction(wire("{}"));
        assert_eq!(absent.winner, None);
    }

    #[test]
    fn test_malformed_winner_is_no_prediction() {
        for raw in [r#""abc""#, "-1", "1.5", "true"] {
            let f: WireFixture = wire(&format!(
                r#"{{
                    "fixture_id": 5,
                    "home_team": {{"team_id": 10, "name": "Home FC"}},
                    "away_team": {{"team_id": 20, "name": "Away FC"}},
                    "prediction": {{"winner_team_id": {raw}}},
                    "odds": {{"fixture_bookmakers": [{{"bookmaker": {{"name": "Bet365"}}, "bets": [
                        {{"bet_type": {{"name": "Match Winner"}}, "odd_values": [{{"value": "Draw", "odd": "3.40"}}]}}
                    ]}}]}}
                }}"#
            ));
            let detail = map_fixture_detail(f).unwrap();
            assert_eq!(detail.prediction.as_ref().unwrap().winner, None, "winner_team_id = {raw}");
            assert_eq!(crate::insights::predicted_outcome(&detail), None, "winner_team_id = {raw}");
            assert!(crate::insights::best_odds(&detail).is_none(), "winner_team_id = {raw}");
        }
    }

    #[test]
    fn test_prediction_comparison_rows() {
        let p = map_prediction(wire(
            r#"{"comparison": {"poisson_distribution": {"home": "55%", "away": "45%"}, "att": {"home": "60%"}}}"#,
        ));
        assert_eq!(
            p.comparison,
            vec![
                StatComparison { label: "Att".into(), home: "60%".into(), away: "N/A".into() },
                StatComparison {
                    label: "Poisson Distribution".into(),
                    home: "55%".into(),
                    away: "45%".into()
                },
            ]
        );
    }

    #[test]
    fn test_match_statistics_union_of_keys() {
        let rows = map_match_statistics(wire(
            r#"{"home": {"shots_on_goal": 5, "ball_possession": "61%"}, "away": {"shots_on_goal": 2, "fouls": 11}}"#,
        ));
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Ball Possession", "Fouls", "Shots On Goal"]);
        assert_eq!(rows[1].home, "N/A");
        assert_eq!(rows[2].away, "2");
    }

    #[test]
    fn test_form_entry_parsing() {
        let form = map_form(Some(wire(
            r#"[{"fixture_id": 9, "date": "2024-04-20T14:00:00+00:00", "opponent": "Chelsea",
                 "outcome": "W", "home_or_away": "Away", "goals_for": 2, "goals_against": 1}]"#,
        )));
        assert_eq!(form[0].result, Some(MatchResult::Win));
        assert_eq!(form[0].side, Some(Side::Away));
        assert_eq!(form[0].opponent, "Chelsea");
    }

    #[test]
    fn test_odd_values_without_odd_are_skipped() {
        let odds = map_odds(wire(
            r#"{"fixture_bookmakers": [{"bets": [{"bet_type": {"name": "Match Winner"},
                "odd_values": [{"value": "Home", "odd": "1.5"}, {"value": "Draw"}]}]}]}"#,
        ));
        assert_eq!(odds[0].bookmaker, "Unknown");
        assert_eq!(odds[0].bets[0].values.len(), 1);
    }

    #[test]
    fn test_ranking_rows_need_a_player_id() {
        let raw: Vec<WireRanking> = wire(
            r#"[{"rank": 1, "player": {"player_id": 5, "name": "Haaland", "team": {"name": "City"}}, "stat_value": 27},
                {"rank": 2, "player": {"name": "Nobody"}, "stat_value": 20},
                {"rank": 3, "stat_value": 19}]"#,
        );
        let rows: Vec<RankingRow> = raw.into_iter().filter_map(map_ranking).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player.team_name, "City");
        assert_eq!(rows[0].stat_value, Some(27.0));
    }

    #[test]
    fn test_endpoint_url_encodes_query() {
        let api = FootballApi::new("http://localhost:8000/");
        let url = api
            .endpoint_url("/fixtures/", &[("status", "NS".into()), ("q", "a b".into())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/fixtures/?status=NS&q=a+b");
        let bare = api.endpoint_url("/leagues/", &[]).unwrap();
        assert_eq!(bare.as_str(), "http://localhost:8000/leagues/");
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("total_shots"), "Total Shots");
        assert_eq!(humanize_key("form"), "Form");
    }
}
