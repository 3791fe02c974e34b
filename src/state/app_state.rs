use crate::app::MenuItem;
use crate::state::app_settings::AppSettings;
use crate::state::fetch::{RequestCounter, RequestId, Tracked};
use crate::state::messages::{NetworkRequest, Query};
use chrono::{Local, NaiveDate};
use pitchside_api::insights::{self, FormFilter};
use pitchside_api::{
    Fixture, FixtureDetail, FixtureId, FormEntry, League, LeagueId, PlayerId, PlayerProfile, RankingRow,
    StandingRow, StatType, Team, TeamId, TeamOverview,
};
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Banner animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index into the banner frames, wraps at FRAME_COUNT.
    pub frame: usize,
    /// Monotonic tick counter, drives the bouncing ball.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count.max(1);
    }
}

// ---------------------------------------------------------------------------
// Outgoing requests
// ---------------------------------------------------------------------------

/// Requests queued by the app, drained and sent by the caller once the app lock is released.
#[derive(Debug, Default)]
pub struct Outbox {
    ids: RequestCounter,
    queued: Vec<NetworkRequest>,
}

impl Outbox {
    pub fn send(&mut self, query: Query) -> RequestId {
        let id = self.ids.next_id();
        self.queued.push(NetworkRequest { id, query });
        id
    }

    pub fn drain(&mut self) -> Vec<NetworkRequest> {
        std::mem::take(&mut self.queued)
    }
}

// ---------------------------------------------------------------------------
// List selection
// ---------------------------------------------------------------------------

pub fn select_next(selected: &mut usize, len: usize) {
    if len > 0 && *selected + 1 < len {
        *selected += 1;
    }
}

pub fn select_prev(selected: &mut usize) {
    *selected = selected.saturating_sub(1);
}

fn loaded_len<T>(slot: &Tracked<Vec<T>>) -> usize {
    slot.data().map_or(0, Vec::len)
}

// ---------------------------------------------------------------------------
// Tab screens
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct HomeState {
    pub upcoming: Tracked<Vec<Fixture>>,
    pub selected: usize,
}

impl HomeState {
    pub fn selected_fixture(&self) -> Option<&Fixture> {
        self.upcoming.data()?.get(self.selected)
    }

    pub fn len(&self) -> usize {
        loaded_len(&self.upcoming)
    }
}

#[derive(Debug, Default)]
pub struct StandingsState {
    pub league_id: LeagueId,
    pub rows: Tracked<Vec<StandingRow>>,
    pub selected: usize,
}

impl StandingsState {
    pub fn selected_row(&self) -> Option<&StandingRow> {
        self.rows.data()?.get(self.selected)
    }

    pub fn len(&self) -> usize {
        loaded_len(&self.rows)
    }
}

#[derive(Debug)]
pub struct FixturesState {
    pub league_id: LeagueId,
    pub date: NaiveDate,
    pub fixtures: Tracked<Vec<Fixture>>,
    pub selected: usize,
}

impl FixturesState {
    pub fn selected_fixture(&self) -> Option<&Fixture> {
        self.fixtures.data()?.get(self.selected)
    }

    pub fn len(&self) -> usize {
        loaded_len(&self.fixtures)
    }
}

#[derive(Debug, Default)]
pub struct RankingsState {
    pub stat: StatType,
    pub rows: Tracked<Vec<RankingRow>>,
    pub selected: usize,
}

impl RankingsState {
    pub fn selected_row(&self) -> Option<&RankingRow> {
        self.rows.data()?.get(self.selected)
    }

    pub fn len(&self) -> usize {
        loaded_len(&self.rows)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadToHeadFocus {
    #[default]
    Teams,
    Meetings,
}

#[derive(Debug, Default)]
pub struct HeadToHeadState {
    pub teams: Tracked<Vec<Team>>,
    /// Case-insensitive name filter over the team list.
    pub filter: String,
    pub searching: bool,
    /// Index into [`HeadToHeadState::visible_teams`].
    pub cursor: usize,
    pub first: Option<Team>,
    pub second: Option<Team>,
    pub focus: HeadToHeadFocus,
    pub meetings: Tracked<Vec<Fixture>>,
    pub selected: usize,
}

impl HeadToHeadState {
    pub fn visible_teams(&self) -> Vec<&Team> {
        let Some(teams) = self.teams.data() else {
            return Vec::new();
        };
        let needle = self.filter.trim().to_lowercase();
        teams
            .iter()
            .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn highlighted_team(&self) -> Option<&Team> {
        self.visible_teams().get(self.cursor).copied()
    }

    pub fn selected_meeting(&self) -> Option<&Fixture> {
        self.meetings.data()?.get(self.selected)
    }

    pub fn meetings_len(&self) -> usize {
        loaded_len(&self.meetings)
    }

    /// Both picks made and distinct.
    pub fn pair(&self) -> Option<(TeamId, TeamId)> {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) if a.id != b.id => Some((a.id, b.id)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Detail screens, stacked over the active tab
// ---------------------------------------------------------------------------

/// Vertical scroll of a detail screen. `max` is set from the rendered line count.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: u16,
    pub max: u16,
}

impl ScrollState {
    pub fn down(&mut self) {
        if self.offset < self.max {
            self.offset += 1;
        }
    }

    pub fn up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Bound scrolling to `content` lines shown `height` lines at a time.
    pub fn fit(&mut self, content: usize, height: u16) {
        let max = content.saturating_sub(usize::from(height));
        self.max = u16::try_from(max).unwrap_or(u16::MAX);
        self.offset = self.offset.min(self.max);
    }
}

#[derive(Debug)]
pub struct MatchScreen {
    pub fixture_id: FixtureId,
    pub detail: Tracked<FixtureDetail>,
    pub home_filter: FormFilter,
    pub away_filter: FormFilter,
    pub show_more: bool,
    /// Highlighted recent-form row, counting the home rows first.
    pub form_cursor: Option<usize>,
    pub scroll: ScrollState,
}

impl MatchScreen {
    pub fn new(fixture_id: FixtureId) -> Self {
        Self {
            fixture_id,
            detail: Tracked::default(),
            home_filter: FormFilter::All,
            away_filter: FormFilter::All,
            show_more: false,
            form_cursor: None,
            scroll: ScrollState::default(),
        }
    }

    /// Recent-form rows as displayed: `(home rows, away rows)`.
    pub fn visible_form(&self) -> (Vec<&FormEntry>, Vec<&FormEntry>) {
        match self.detail.data() {
            Some(d) => (
                insights::filter_recent_form(&d.home_recent_form, self.home_filter, self.show_more),
                insights::filter_recent_form(&d.away_recent_form, self.away_filter, self.show_more),
            ),
            None => (Vec::new(), Vec::new()),
        }
    }

    pub fn highlighted_form_entry(&self) -> Option<&FormEntry> {
        let cursor = self.form_cursor?;
        let (home, away) = self.visible_form();
        if cursor < home.len() {
            home.get(cursor).copied()
        } else {
            away.get(cursor - home.len()).copied()
        }
    }

    /// Step the form cursor through the visible rows, leaving the list past either end.
    pub fn step_form_cursor(&mut self, forward: bool) {
        let (home, away) = self.visible_form();
        let len = home.len() + away.len();
        self.form_cursor = match (self.form_cursor, forward) {
            _ if len == 0 => None,
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(0), false) => None,
            (Some(i), false) => Some(i.min(len) - 1),
            (Some(_), true) => None,
        };
    }
}

#[derive(Debug)]
pub struct TeamScreen {
    pub team_id: TeamId,
    pub overview: Tracked<TeamOverview>,
    pub scroll: ScrollState,
}

#[derive(Debug)]
pub struct PlayerScreen {
    pub player_id: PlayerId,
    pub profile: Tracked<PlayerProfile>,
    pub scroll: ScrollState,
}

#[derive(Debug)]
pub enum Screen {
    Match(MatchScreen),
    Team(TeamScreen),
    Player(PlayerScreen),
}

impl Screen {
    pub fn team(team_id: TeamId) -> Self {
        Screen::Team(TeamScreen { team_id, overview: Tracked::default(), scroll: ScrollState::default() })
    }

    pub fn player(player_id: PlayerId) -> Self {
        Screen::Player(PlayerScreen { player_id, profile: Tracked::default(), scroll: ScrollState::default() })
    }

    pub fn query(&self, season: u16) -> Query {
        match self {
            Screen::Match(m) => Query::FixtureDetail { fixture_id: m.fixture_id },
            Screen::Team(t) => Query::TeamOverview { team_id: t.team_id, season },
            Screen::Player(p) => Query::PlayerProfile { player_id: p.player_id, season },
        }
    }

    pub fn begin(&mut self, id: RequestId) {
        match self {
            Screen::Match(m) => m.detail.begin(id),
            Screen::Team(t) => t.overview.begin(id),
            Screen::Player(p) => p.profile.begin(id),
        }
    }

    pub fn fail(&mut self, id: RequestId, message: String) -> bool {
        match self {
            Screen::Match(m) => m.detail.fail(id, message),
            Screen::Team(t) => t.overview.fail(id, message),
            Screen::Player(p) => p.profile.fail(id, message),
        }
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        match self {
            Screen::Match(m) => &mut m.scroll,
            Screen::Team(t) => &mut t.scroll,
            Screen::Player(p) => &mut p.scroll,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Match(_) => "Match Details",
            Screen::Team(_) => "Team Details",
            Screen::Player(_) => "Player Profile",
        }
    }
}

// ---------------------------------------------------------------------------
// Whole app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    /// Failures waiting to be acknowledged, oldest first.
    pub alerts: VecDeque<String>,
    pub outbox: Outbox,
    /// Shared by the Standings and Fixtures league pickers.
    pub leagues: Tracked<Vec<League>>,
    pub home: HomeState,
    pub standings: StandingsState,
    pub fixtures: FixturesState,
    pub rankings: RankingsState,
    pub head_to_head: HeadToHeadState,
    pub stack: Vec<Screen>,
    pub animation: AnimationState,
}

impl AppState {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            alerts: VecDeque::new(),
            outbox: Outbox::default(),
            leagues: Tracked::default(),
            home: HomeState::default(),
            standings: StandingsState {
                league_id: settings.league_id,
                ..StandingsState::default()
            },
            fixtures: FixturesState {
                league_id: settings.league_id,
                date: Local::now().date_naive(),
                fixtures: Tracked::default(),
                selected: 0,
            },
            rankings: RankingsState::default(),
            head_to_head: HeadToHeadState::default(),
            stack: Vec::new(),
            animation: AnimationState::default(),
        }
    }

    pub fn league_name(&self, league_id: LeagueId) -> Option<String> {
        self.leagues
            .data()?
            .iter()
            .find(|l| l.id == league_id)
            .map(League::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: TeamId, name: &str) -> Team {
        Team { id, name: name.into(), ..Default::default() }
    }

    #[test]
    fn test_outbox_ids_are_unique_and_drained() {
        let mut outbox = Outbox::default();
        let a = outbox.send(Query::Leagues);
        let b = outbox.send(Query::Teams);
        assert_ne!(a, b);
        let drained = outbox.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1], NetworkRequest { id: b, query: Query::Teams });
        assert!(outbox.drain().is_empty());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut selected = 0;
        select_next(&mut selected, 2);
        select_next(&mut selected, 2);
        assert_eq!(selected, 1);
        select_prev(&mut selected);
        select_prev(&mut selected);
        assert_eq!(selected, 0);
        select_next(&mut selected, 0);
        assert_eq!(selected, 0);
    }

    #[test]
    fn test_team_filter_is_case_insensitive() {
        let mut h2h = HeadToHeadState::default();
        h2h.teams.begin(1);
        h2h.teams.resolve(1, vec![team(1, "Arsenal"), team(2, "Aston Villa"), team(3, "Chelsea")]);
        h2h.filter = "ARS".into();
        let names: Vec<&str> = h2h.visible_teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Arsenal"]);
    }

    #[test]
    fn test_pair_requires_two_different_teams() {
        let mut h2h = HeadToHeadState { first: Some(team(1, "A")), ..Default::default() };
        assert_eq!(h2h.pair(), None);
        h2h.second = Some(team(1, "A"));
        assert_eq!(h2h.pair(), None);
        h2h.second = Some(team(2, "B"));
        assert_eq!(h2h.pair(), Some((1, 2)));
    }

    #[test]
    fn test_scroll_stops_at_last_page() {
        let mut scroll = ScrollState::default();
        scroll.down();
        assert_eq!(scroll.offset, 0);

        scroll.fit(12, 10);
        for _ in 0..5 {
            scroll.down();
        }
        assert_eq!(scroll.offset, 2);

        scroll.fit(11, 10);
        assert_eq!(scroll.offset, 1);
        scroll.up();
        scroll.up();
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn test_form_cursor_walks_home_then_away_rows() {
        let entry = |opponent: &str| FormEntry { opponent: opponent.into(), ..Default::default() };
        let mut screen = MatchScreen::new(1);
        screen.step_form_cursor(true);
        assert_eq!(screen.form_cursor, None);

        screen.detail.begin(1);
        screen.detail.resolve(
            1,
            FixtureDetail {
                home_recent_form: vec![entry("Chelsea")],
                away_recent_form: vec![entry("Everton"), entry("Fulham")],
                ..Default::default()
            },
        );
        let opponents = |s: &MatchScreen| s.highlighted_form_entry().map(|e| e.opponent.clone());

        screen.step_form_cursor(true);
        assert_eq!(opponents(&screen).as_deref(), Some("Chelsea"));
        screen.step_form_cursor(true);
        screen.step_form_cursor(true);
        assert_eq!(opponents(&screen).as_deref(), Some("Fulham"));
        screen.step_form_cursor(true);
        assert_eq!(screen.form_cursor, None);
        screen.step_form_cursor(false);
        assert_eq!(opponents(&screen).as_deref(), Some("Fulham"));
    }
}
