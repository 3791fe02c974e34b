use crate::state::fetch::RequestId;
use crate::state::network::LoadingState;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use pitchside_api::{
    Fixture, FixtureDetail, FixtureId, League, LeagueId, PlayerId, PlayerProfile, RankingRow,
    StandingRow, StatType, Team, TeamId, TeamOverview,
};

/// What the worker should fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Leagues,
    Standings { league_id: LeagueId, season: u16 },
    FixturesOn { league_id: LeagueId, season: u16, date: NaiveDate },
    UpcomingFixtures { league_id: LeagueId },
    FixtureDetail { fixture_id: FixtureId },
    TeamOverview { team_id: TeamId, season: u16 },
    PlayerProfile { player_id: PlayerId, season: u16 },
    Rankings { stat: StatType, league_id: LeagueId, season: u16 },
    Teams,
    HeadToHead { team1: TeamId, team2: TeamId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkRequest {
    pub id: RequestId,
    pub query: Query,
}

#[derive(Debug)]
pub enum Payload {
    Leagues(Vec<League>),
    Standings(Vec<StandingRow>),
    Fixtures(Vec<Fixture>),
    UpcomingFixtures(Vec<Fixture>),
    FixtureDetail(Box<FixtureDetail>),
    TeamOverview(Box<TeamOverview>),
    PlayerProfile(Box<PlayerProfile>),
    Rankings(Vec<RankingRow>),
    Teams(Vec<Team>),
    HeadToHead(Vec<Fixture>),
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    Loaded { id: RequestId, payload: Payload },
    Failed { id: RequestId, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    AnimationTick,
}
