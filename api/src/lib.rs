pub mod client;
pub mod insights;
pub mod wire;

use chrono::{DateTime, Utc};

pub type LeagueId = u32;
pub type TeamId = u32;
pub type PlayerId = u32;
pub type FixtureId = u32;

// ---------------------------------------------------------------------------
// Domain types, validated at the client boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub country: Option<Country>,
}

impl League {
    /// "Premier League (England)", or just the name when the country is unknown.
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{} ({})", self.name, country.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    pub name: String,
    pub flag: Option<String>,
}

/// A team as referenced from another resource (fixture side, standing row, player).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub logo: Option<String>,
    pub founded: Option<u16>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixture {
    pub id: FixtureId,
    pub date: Option<DateTime<Utc>>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub status_short: Option<String>,
    pub goals_home: Option<u32>,
    pub goals_away: Option<u32>,
    pub league_name: Option<String>,
}

impl Fixture {
    /// "2 - 1", with "-" standing in for a side that has no goals recorded yet.
    pub fn score_line(&self) -> String {
        let side = |g: Option<u32>| g.map_or("-".to_string(), |g| g.to_string());
        format!("{} - {}", side(self.goals_home), side(self.goals_away))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Venue {
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueRef {
    pub id: Option<LeagueId>,
    pub name: String,
}

/// A fixture enriched with prediction, odds, form, statistics and events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureDetail {
    pub fixture: Fixture,
    pub venue: Option<Venue>,
    pub referee: Option<String>,
    pub league: Option<LeagueRef>,
    pub prediction: Option<Prediction>,
    pub bookmakers: Vec<BookmakerOdds>,
    pub home_recent_form: Vec<FormEntry>,
    pub away_recent_form: Vec<FormEntry>,
    pub home_team_stats: Option<TeamStatistics>,
    pub away_team_stats: Option<TeamStatistics>,
    pub home_top_players: Vec<TopPlayer>,
    pub away_top_players: Vec<TopPlayer>,
    pub match_statistics: Vec<StatComparison>,
    pub match_events: Vec<MatchEvent>,
}

/// Who the backend expects to win. `NoWinner` is an explicit null winner id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictedWinner {
    Team(TeamId),
    NoWinner,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    /// `None` when the backend omitted the winner field entirely.
    pub winner: Option<PredictedWinner>,
    pub percent_home: Option<f64>,
    pub percent_draw: Option<f64>,
    pub percent_away: Option<f64>,
    pub advice: Option<String>,
    pub comparison: Vec<StatComparison>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    /// The label bookmakers use for this outcome in "Match Winner" bets.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Home => "Home",
            Outcome::Draw => "Draw",
            Outcome::Away => "Away",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmakerOdds {
    pub bookmaker: String,
    pub bets: Vec<Bet>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bet {
    pub name: Option<String>,
    pub values: Vec<OddValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OddValue {
    pub value: String,
    /// Decimal odd exactly as the backend sent it, e.g. "2.10".
    pub odd: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Home => "Home",
            Side::Away => "Away",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    pub fn letter(&self) -> char {
        match self {
            MatchResult::Win => 'W',
            MatchResult::Draw => 'D',
            MatchResult::Loss => 'L',
        }
    }
}

/// One past match in a team's recent form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormEntry {
    pub fixture_id: Option<FixtureId>,
    pub date: Option<DateTime<Utc>>,
    pub opponent: String,
    pub opponent_team_id: Option<TeamId>,
    pub opponent_logo: Option<String>,
    pub result: Option<MatchResult>,
    pub side: Option<Side>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStatistics {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub clean_sheets: u32,
    pub average_shots_on_target: Option<f64>,
    pub average_tackles: Option<f64>,
    pub average_passes_accuracy: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopPlayer {
    pub player_id: Option<PlayerId>,
    pub name: String,
    pub position: Option<String>,
    pub goals: u32,
}

/// A labelled home-vs-away pair of already formatted values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatComparison {
    pub label: String,
    pub home: String,
    pub away: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchEvent {
    pub elapsed: Option<u32>,
    pub extra: Option<u32>,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
    pub player_name: Option<String>,
    pub assist_name: Option<String>,
    pub kind: String,
    pub detail: Option<String>,
}

impl MatchEvent {
    /// "45+2'" style minute marker.
    pub fn minute(&self) -> String {
        match (self.elapsed, self.extra) {
            (Some(m), Some(x)) if x > 0 => format!("{m}+{x}'"),
            (Some(m), _) => format!("{m}'"),
            _ => "--".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandingRow {
    pub rank: u32,
    pub team: TeamRef,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub goal_difference: Option<i32>,
    pub form: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub photo: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub position: Option<String>,
    pub team: Option<TeamRef>,
}

/// Flat season record of a player's counters. Absent counters stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStatistics {
    pub appearances: Option<u32>,
    pub minutes: Option<u32>,
    pub rating: Option<f64>,
    pub goals_total: Option<u32>,
    pub goals_assists: Option<u32>,
    pub shots_total: Option<u32>,
    pub shots_on: Option<u32>,
    pub passes_total: Option<u32>,
    pub passes_key: Option<u32>,
    pub passes_accuracy: Option<f64>,
    pub tackles_total: Option<u32>,
    pub tackles_blocks: Option<u32>,
    pub tackles_interceptions: Option<u32>,
    pub cards_yellow: Option<u32>,
    pub cards_red: Option<u32>,
    pub dribbles_attempts: Option<u32>,
    pub dribbles_success: Option<u32>,
    pub duels_total: Option<u32>,
    pub duels_won: Option<u32>,
    pub fouls_drawn: Option<u32>,
    pub fouls_committed: Option<u32>,
    pub penalty_won: Option<u32>,
    pub penalty_scored: Option<u32>,
    pub penalty_missed: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub photo: Option<String>,
    pub team_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingRow {
    pub rank: Option<u32>,
    pub player: RankedPlayer,
    pub stat_value: Option<f64>,
}

/// Statistic a player ranking is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatType {
    #[default]
    Goals,
    Assists,
    YellowCards,
    RedCards,
}

impl StatType {
    pub const ALL: [StatType; 4] = [
        StatType::Goals,
        StatType::Assists,
        StatType::YellowCards,
        StatType::RedCards,
    ];

    pub fn as_query(&self) -> &'static str {
        match self {
            StatType::Goals => "goals",
            StatType::Assists => "assists",
            StatType::YellowCards => "yellow_cards",
            StatType::RedCards => "red_cards",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatType::Goals => "Goals",
            StatType::Assists => "Assists",
            StatType::YellowCards => "Yellow Cards",
            StatType::RedCards => "Red Cards",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatType::Goals => StatType::Assists,
            StatType::Assists => StatType::YellowCards,
            StatType::YellowCards => StatType::RedCards,
            StatType::RedCards => StatType::Goals,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            StatType::Goals => StatType::RedCards,
            StatType::Assists => StatType::Goals,
            StatType::YellowCards => StatType::Assists,
            StatType::RedCards => StatType::YellowCards,
        }
    }
}

/// Team info plus its season statistics, fetched one after the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamOverview {
    pub team: Team,
    pub statistics: TeamStatistics,
}

/// Player info plus the first statistics record for the season, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProfile {
    pub player: Player,
    pub statistics: Option<PlayerStatistics>,
}
