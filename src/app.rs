use crate::state::app_settings::AppSettings;
use crate::state::app_state::{
    AppState, HeadToHeadFocus, HeadToHeadState, MatchScreen, Screen, select_next, select_prev,
};
use crate::state::fetch::RequestId;
use crate::state::messages::{NetworkRequest, Payload, Query};
use chrono::{Days, Local};
use log::{debug, info};
use pitchside_api::{FixtureId, PlayerId, Team, TeamId};

pub const SAME_TEAM_ALERT: &str = "Please select two different teams.";

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Home,
    Standings,
    Rankings,
    Fixtures,
    HeadToHead,
    Help,
}

/// What currently owns the main area: a detail screen on the stack, or the active tab.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum View {
    Tab(MenuItem),
    Match,
    Team,
    Player,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(&settings),
            settings,
        };

        log::set_max_level(app.settings.log_level);
        tui_logger::set_default_level(app.settings.log_level);

        app
    }

    pub fn start(&mut self) {
        info!("using API at {}", self.settings.api_url);
        self.load_current();
    }

    pub fn view(&self) -> View {
        match self.state.stack.last() {
            Some(Screen::Match(_)) => View::Match,
            Some(Screen::Team(_)) => View::Team,
            Some(Screen::Player(_)) => View::Player,
            None => View::Tab(self.state.active_tab),
        }
    }

    /// Requests queued since the last call, ready to hand to the network worker.
    pub fn take_requests(&mut self) -> Vec<NetworkRequest> {
        self.state.outbox.drain()
    }

    // -----------------------------------------------------------------------
    // Fetching
    // -----------------------------------------------------------------------

    /// Fetch whatever the visible screen shows. Also bound to `r`.
    pub fn load_current(&mut self) {
        let season = self.settings.season;
        let state = &mut self.state;

        if let Some(screen) = state.stack.last_mut() {
            let id = state.outbox.send(screen.query(season));
            screen.begin(id);
            return;
        }

        match state.active_tab {
            MenuItem::Home => {
                let league_id = self.settings.league_id;
                let id = state.outbox.send(Query::UpcomingFixtures { league_id });
                state.home.upcoming.begin(id);
                state.home.selected = 0;
            }
            MenuItem::Standings => {
                self.load_leagues_once();
                self.load_standings();
            }
            MenuItem::Fixtures => {
                self.load_leagues_once();
                self.load_fixtures();
            }
            MenuItem::Rankings => self.load_rankings(),
            MenuItem::HeadToHead => {
                let id = state.outbox.send(Query::Teams);
                state.head_to_head.teams.begin(id);
                self.load_head_to_head();
            }
            MenuItem::Help => {}
        }
    }

    fn load_leagues_once(&mut self) {
        if self.state.leagues.needs_fetch() {
            let id = self.state.outbox.send(Query::Leagues);
            self.state.leagues.begin(id);
        }
    }

    fn load_standings(&mut self) {
        let query = Query::Standings {
            league_id: self.state.standings.league_id,
            season: self.settings.season,
        };
        let id = self.state.outbox.send(query);
        self.state.standings.rows.begin(id);
        self.state.standings.selected = 0;
    }

    fn load_fixtures(&mut self) {
        let query = Query::FixturesOn {
            league_id: self.state.fixtures.league_id,
            season: self.settings.season,
            date: self.state.fixtures.date,
        };
        let id = self.state.outbox.send(query);
        self.state.fixtures.fixtures.begin(id);
        self.state.fixtures.selected = 0;
    }

    fn load_rankings(&mut self) {
        let query = Query::Rankings {
            stat: self.state.rankings.stat,
            league_id: self.settings.league_id,
            season: self.settings.season,
        };
        let id = self.state.outbox.send(query);
        self.state.rankings.rows.begin(id);
        self.state.rankings.selected = 0;
    }

    /// Meetings for the current picks. Same team twice raises an alert and clears results.
    fn load_head_to_head(&mut self) {
        let h2h = &mut self.state.head_to_head;
        if let (Some(a), Some(b)) = (&h2h.first, &h2h.second)
            && a.id == b.id
        {
            h2h.meetings.reset();
            self.state.alerts.push_back(SAME_TEAM_ALERT.to_string());
            return;
        }
        let Some((team1, team2)) = h2h.pair() else {
            h2h.meetings.reset();
            return;
        };
        let id = self.state.outbox.send(Query::HeadToHead { team1, team2 });
        h2h.meetings.begin(id);
        h2h.selected = 0;
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Returns whether the payload landed in a live slot.
    pub fn on_loaded(&mut self, id: RequestId, payload: Payload) -> bool {
        let state = &mut self.state;
        let accepted = match payload {
            Payload::Leagues(leagues) => state.leagues.resolve(id, leagues),
            Payload::Standings(rows) => state.standings.rows.resolve(id, rows),
            Payload::Fixtures(fixtures) => state.fixtures.fixtures.resolve(id, fixtures),
            Payload::UpcomingFixtures(fixtures) => state.home.upcoming.resolve(id, fixtures),
            Payload::Rankings(rows) => state.rankings.rows.resolve(id, rows),
            Payload::HeadToHead(meetings) => state.head_to_head.meetings.resolve(id, meetings),
            Payload::Teams(teams) => {
                let accepted = state.head_to_head.teams.resolve(id, teams);
                if accepted {
                    let visible = state.head_to_head.visible_teams().len();
                    let cursor = &mut state.head_to_head.cursor;
                    *cursor = (*cursor).min(visible.saturating_sub(1));
                }
                accepted
            }
            Payload::FixtureDetail(detail) => state
                .stack
                .iter_mut()
                .find_map(|s| match s {
                    Screen::Match(m) if m.detail.is_pending(id) => Some(m),
                    _ => None,
                })
                .is_some_and(|m| m.detail.resolve(id, *detail)),
            Payload::TeamOverview(overview) => state
                .stack
                .iter_mut()
                .find_map(|s| match s {
                    Screen::Team(t) if t.overview.is_pending(id) => Some(t),
                    _ => None,
                })
                .is_some_and(|t| t.overview.resolve(id, *overview)),
            Payload::PlayerProfile(profile) => state
                .stack
                .iter_mut()
                .find_map(|s| match s {
                    Screen::Player(p) if p.profile.is_pending(id) => Some(p),
                    _ => None,
                })
                .is_some_and(|p| p.profile.resolve(id, *profile)),
        };

        if !accepted {
            debug!("discarding stale response for request {id}");
        }
        accepted
    }

    /// A failure for a live slot raises exactly one alert; stale failures are only logged.
    pub fn on_failed(&mut self, id: RequestId, message: String) -> bool {
        let state = &mut self.state;
        let msg = || message.clone();
        let live = state.leagues.fail(id, msg())
            || state.home.upcoming.fail(id, msg())
            || state.standings.rows.fail(id, msg())
            || state.fixtures.fixtures.fail(id, msg())
            || state.rankings.rows.fail(id, msg())
            || state.head_to_head.teams.fail(id, msg())
            || state.head_to_head.meetings.fail(id, msg())
            || state.stack.iter_mut().any(|s| s.fail(id, msg()));

        if live {
            state.alerts.push_back(message);
        } else {
            debug!("discarding stale failure for request {id}: {message}");
        }
        live
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.state.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.state.alerts.pop_front();
    }

    // -----------------------------------------------------------------------
    // Tab and stack management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next && self.state.stack.is_empty() {
            return;
        }
        self.state.stack.clear();
        if self.state.active_tab != next {
            self.state.previous_tab = self.state.active_tab;
            self.state.active_tab = next;
        }
        self.load_current();
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
            self.load_current();
        }
    }

    fn push_screen(&mut self, screen: Screen) {
        self.state.stack.push(screen);
        self.load_current();
    }

    pub fn open_match(&mut self, fixture_id: FixtureId) {
        self.push_screen(Screen::Match(MatchScreen::new(fixture_id)));
    }

    pub fn open_team(&mut self, team_id: TeamId) {
        self.push_screen(Screen::team(team_id));
    }

    pub fn open_player(&mut self, player_id: PlayerId) {
        self.push_screen(Screen::player(player_id));
    }

    /// Esc: leave the top detail screen, or help. Returns false when there was nothing to leave.
    pub fn back(&mut self) -> bool {
        if self.state.stack.pop().is_some() {
            return true;
        }
        if self.state.active_tab == MenuItem::Help {
            self.exit_help();
            return true;
        }
        false
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn advance_animation(&mut self, frame_count: usize) {
        self.state.animation.advance(frame_count);
    }

    // -----------------------------------------------------------------------
    // List navigation
    // -----------------------------------------------------------------------

    pub fn move_down(&mut self) {
        let state = &mut self.state;
        if let Some(screen) = state.stack.last_mut() {
            screen.scroll_mut().down();
            return;
        }
        match state.active_tab {
            MenuItem::Home => {
                let len = state.home.len();
                select_next(&mut state.home.selected, len);
            }
            MenuItem::Standings => {
                let len = state.standings.len();
                select_next(&mut state.standings.selected, len);
            }
            MenuItem::Fixtures => {
                let len = state.fixtures.len();
                select_next(&mut state.fixtures.selected, len);
            }
            MenuItem::Rankings => {
                let len = state.rankings.len();
                select_next(&mut state.rankings.selected, len);
            }
            MenuItem::HeadToHead => {
                let h2h = &mut state.head_to_head;
                match h2h.focus {
                    HeadToHeadFocus::Teams => {
                        let len = h2h.visible_teams().len();
                        select_next(&mut h2h.cursor, len);
                    }
                    HeadToHeadFocus::Meetings => {
                        let len = h2h.meetings_len();
                        select_next(&mut h2h.selected, len);
                    }
                }
            }
            MenuItem::Help => {}
        }
    }

    pub fn move_up(&mut self) {
        let state = &mut self.state;
        if let Some(screen) = state.stack.last_mut() {
            screen.scroll_mut().up();
            return;
        }
        match state.active_tab {
            MenuItem::Home => select_prev(&mut state.home.selected),
            MenuItem::Standings => select_prev(&mut state.standings.selected),
            MenuItem::Fixtures => select_prev(&mut state.fixtures.selected),
            MenuItem::Rankings => select_prev(&mut state.rankings.selected),
            MenuItem::HeadToHead => match state.head_to_head.focus {
                HeadToHeadFocus::Teams => select_prev(&mut state.head_to_head.cursor),
                HeadToHeadFocus::Meetings => select_prev(&mut state.head_to_head.selected),
            },
            MenuItem::Help => {}
        }
    }

    /// Enter on a list row opens the matching detail screen. On Match Details it
    /// opens the opponent of the highlighted recent-form row.
    pub fn activate(&mut self) {
        if !self.state.stack.is_empty() {
            let opponent = self
                .match_screen()
                .and_then(|m| m.highlighted_form_entry())
                .and_then(|e| e.opponent_team_id);
            if let Some(team_id) = opponent {
                self.open_team(team_id);
            }
            return;
        }
        let state = &self.state;
        match state.active_tab {
            MenuItem::Home => {
                if let Some(id) = state.home.selected_fixture().map(|f| f.id) {
                    self.open_match(id);
                }
            }
            MenuItem::Standings => {
                if let Some(id) = state.standings.selected_row().map(|r| r.team.id) {
                    self.open_team(id);
                }
            }
            MenuItem::Fixtures => {
                if let Some(id) = state.fixtures.selected_fixture().map(|f| f.id) {
                    self.open_match(id);
                }
            }
            MenuItem::Rankings => {
                if let Some(id) = state.rankings.selected_row().map(|r| r.player.id) {
                    self.open_player(id);
                }
            }
            MenuItem::HeadToHead => {
                if state.head_to_head.focus == HeadToHeadFocus::Meetings
                    && let Some(id) = state.head_to_head.selected_meeting().map(|f| f.id)
                {
                    self.open_match(id);
                }
            }
            MenuItem::Help => {}
        }
    }

    // -----------------------------------------------------------------------
    // Tab-specific parameters
    // -----------------------------------------------------------------------

    /// Step through the loaded leagues on the Standings or Fixtures tab.
    pub fn cycle_league(&mut self, forward: bool) {
        let Some(leagues) = self.state.leagues.data() else {
            return;
        };
        if leagues.is_empty() {
            return;
        }
        let current = match self.state.active_tab {
            MenuItem::Standings => self.state.standings.league_id,
            MenuItem::Fixtures => self.state.fixtures.league_id,
            _ => return,
        };
        let len = leagues.len();
        let next = match leagues.iter().position(|l| l.id == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        let league_id = leagues[next].id;

        match self.state.active_tab {
            MenuItem::Standings => {
                self.state.standings.league_id = league_id;
                self.load_standings();
            }
            MenuItem::Fixtures => {
                self.state.fixtures.league_id = league_id;
                self.load_fixtures();
            }
            _ => {}
        }
    }

    pub fn shift_fixture_date(&mut self, forward: bool) {
        let date = self.state.fixtures.date;
        let moved = if forward {
            date.checked_add_days(Days::new(1))
        } else {
            date.checked_sub_days(Days::new(1))
        };
        if let Some(date) = moved {
            self.state.fixtures.date = date;
            self.load_fixtures();
        }
    }

    pub fn fixtures_today(&mut self) {
        self.state.fixtures.date = Local::now().date_naive();
        self.load_fixtures();
    }

    pub fn cycle_stat(&mut self, forward: bool) {
        let stat = self.state.rankings.stat;
        self.state.rankings.stat = if forward { stat.next() } else { stat.prev() };
        self.load_rankings();
    }

    // -----------------------------------------------------------------------
    // Head-to-head pickers
    // -----------------------------------------------------------------------

    pub fn pick_first_team(&mut self) {
        self.pick_team(|h2h, team| h2h.first = Some(team));
    }

    pub fn pick_second_team(&mut self) {
        self.pick_team(|h2h, team| h2h.second = Some(team));
    }

    fn pick_team(&mut self, assign: impl FnOnce(&mut HeadToHeadState, Team)) {
        let Some(team) = self.state.head_to_head.highlighted_team().cloned() else {
            return;
        };
        assign(&mut self.state.head_to_head, team);
        self.load_head_to_head();
    }

    pub fn toggle_head_to_head_focus(&mut self) {
        let h2h = &mut self.state.head_to_head;
        h2h.focus = match h2h.focus {
            HeadToHeadFocus::Teams => HeadToHeadFocus::Meetings,
            HeadToHeadFocus::Meetings => HeadToHeadFocus::Teams,
        };
    }

    pub fn start_team_search(&mut self) {
        let h2h = &mut self.state.head_to_head;
        h2h.focus = HeadToHeadFocus::Teams;
        h2h.searching = true;
    }

    pub fn team_search_input(&mut self, c: char) {
        let h2h = &mut self.state.head_to_head;
        h2h.filter.push(c);
        h2h.cursor = 0;
    }

    pub fn team_search_backspace(&mut self) {
        let h2h = &mut self.state.head_to_head;
        h2h.filter.pop();
        h2h.cursor = 0;
    }

    /// Leave search mode; `clear` also drops the filter text.
    pub fn end_team_search(&mut self, clear: bool) {
        let h2h = &mut self.state.head_to_head;
        h2h.searching = false;
        if clear {
            h2h.filter.clear();
            h2h.cursor = 0;
        }
    }

    // -----------------------------------------------------------------------
    // Match details
    // -----------------------------------------------------------------------

    fn match_screen(&mut self) -> Option<&mut MatchScreen> {
        match self.state.stack.last_mut() {
            Some(Screen::Match(m)) => Some(m),
            _ => None,
        }
    }

    pub fn cycle_home_form_filter(&mut self) {
        if let Some(m) = self.match_screen() {
            m.home_filter = m.home_filter.next();
            m.form_cursor = None;
        }
    }

    pub fn cycle_away_form_filter(&mut self) {
        if let Some(m) = self.match_screen() {
            m.away_filter = m.away_filter.next();
            m.form_cursor = None;
        }
    }

    pub fn toggle_form_show_more(&mut self) {
        if let Some(m) = self.match_screen() {
            m.show_more = !m.show_more;
            m.form_cursor = None;
        }
    }

    /// Tab / Shift-Tab on Match Details: move through the recent-form rows.
    pub fn step_form_cursor(&mut self, forward: bool) {
        if let Some(m) = self.match_screen() {
            m.step_form_cursor(forward);
        }
    }

    /// Open Team Details for the home (or away) side of the loaded match.
    pub fn open_match_team(&mut self, home: bool) {
        let team_id = self.match_screen().and_then(|m| {
            let fixture = &m.detail.data()?.fixture;
            Some(if home { fixture.home_team.id } else { fixture.away_team.id })
        });
        if let Some(team_id) = team_id {
            self.open_team(team_id);
        }
    }
}
