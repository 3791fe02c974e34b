use chrono::{DateTime, Local, Utc};
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::banner::PitchBanner;
use crate::state::app_state::{
    HeadToHeadFocus, MatchScreen, PlayerScreen, Screen, ScrollState, TeamScreen,
};
use crate::state::fetch::{FetchState, Tracked};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use pitchside_api::insights::{self, FormFilter};
use pitchside_api::{Fixture, FixtureDetail, FormEntry, StatComparison, StatType, TopPlayer};

static TABS: &[&str; 5] = &["Home", "Standings", "Rankings", "Fixtures", "Head-to-Head"];

pub const EMPTY_HINT: &str = "Nothing to show yet.";
pub const PICK_TEAMS_HINT: &str = "Pick two teams to compare.";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        if let Some(top) = app.state.stack.last_mut() {
            match top {
                Screen::Match(screen) => draw_match(f, layout.main, screen),
                Screen::Team(screen) => draw_team(f, layout.main, screen),
                Screen::Player(screen) => draw_player(f, layout.main, screen),
            }
        } else {
            match app.state.active_tab {
                MenuItem::Home => draw_home(f, layout.main, app),
                MenuItem::Standings => draw_standings(f, layout.main, app),
                MenuItem::Rankings => draw_rankings(f, layout.main, app),
                MenuItem::Fixtures => draw_fixtures(f, layout.main, app),
                MenuItem::HeadToHead => draw_head_to_head(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);

        if let Some(message) = app.current_alert() {
            draw_alert(f, f.area(), message);
        }
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn tab_index(item: MenuItem) -> usize {
    match item {
        MenuItem::Home | MenuItem::Help => 0,
        MenuItem::Standings => 1,
        MenuItem::Rankings => 2,
        MenuItem::Fixtures => 3,
        MenuItem::HeadToHead => 4,
    }
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let shown = if app.state.active_tab == MenuItem::Help {
        app.state.previous_tab
    } else {
        app.state.active_tab
    };

    let titles: Vec<Line> = TABS
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {t}", i + 1)))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index(shown))
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Text to show in place of a resource that has not loaded, or `None` once it has.
fn fetch_placeholder<T>(slot: &Tracked<T>, what: &str) -> Option<String> {
    match slot.state() {
        FetchState::Idle => Some(EMPTY_HINT.to_string()),
        FetchState::Loading => Some(format!("Loading {what}...")),
        FetchState::Failed(_) => Some(format!("Could not load {what}. Press r to try again.")),
        FetchState::Loaded(_) => None,
    }
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)))
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

/// Rows `[start, end)` of a list that keep `selected` on screen.
fn visible_range(len: usize, selected: usize, height: usize) -> (usize, usize) {
    if height == 0 {
        return (0, 0);
    }
    let start = selected.saturating_sub(height - 1);
    (start, (start + height).min(len))
}

fn list_line(text: String, selected: bool) -> Line<'static> {
    let marker = if selected { ">" } else { " " };
    let style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(Span::styled(format!("{marker} {text}"), style))
}

fn fit(text: &str, width: usize) -> String {
    let mut s: String = text.chars().take(width).collect();
    while s.chars().count() < width {
        s.push(' ');
    }
    s
}

fn kickoff(date: Option<DateTime<Utc>>, format: &str) -> String {
    date.map(|d| d.with_timezone(&Local).format(format).to_string())
        .unwrap_or_else(|| "TBD".to_string())
}

fn fixture_line(fixture: &Fixture, date_format: &str) -> String {
    let status = fixture.status_short.as_deref().unwrap_or("--");
    format!(
        "{}  {} {:^7} {}  [{status}]",
        kickoff(fixture.date, date_format),
        fit(&fixture.home_team.name, 22),
        fixture.score_line(),
        fit(&fixture.away_team.name, 22),
    )
}

fn meeting_line(fixture: &Fixture) -> String {
    let line = fixture_line(fixture, "%Y-%m-%d");
    match fixture.league_name.as_deref() {
        Some(league) => format!("{line}  {league}"),
        None => line,
    }
}

fn draw_list(f: &mut Frame, area: Rect, rows: Vec<String>, selected: usize) {
    let (start, end) = visible_range(rows.len(), selected, area.height as usize);
    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .skip(start)
        .take(end.saturating_sub(start))
        .map(|(i, row)| list_line(row, i == selected))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

fn draw_home(f: &mut Frame, area: Rect, app: &App) {
    let [banner_area, list_area, links_area] = Layout::vertical([
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let league = app
        .state
        .league_name(app.settings.league_id)
        .unwrap_or_else(|| format!("League {}, season {}", app.settings.league_id, app.settings.season));
    f.render_widget(
        PitchBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            subtitle: &league,
        },
        banner_area,
    );

    let block = default_border(Color::White).title(" Upcoming Fixtures ");
    let inner = block.inner(list_area);
    f.render_widget(block, list_area);

    let home = &app.state.home;
    if let Some(msg) = fetch_placeholder(&home.upcoming, "upcoming fixtures") {
        draw_message(f, inner, &msg);
    } else if let Some(fixtures) = home.upcoming.data() {
        if fixtures.is_empty() {
            draw_message(f, inner, "No upcoming fixtures.");
        } else {
            let rows = fixtures.iter().map(|fx| fixture_line(fx, "%a %d %b %H:%M")).collect();
            draw_list(f, inner, rows, home.selected);
        }
    }

    f.render_widget(
        Paragraph::new(hint_line(
            "Enter match details  2 Standings  3 Rankings  4 Fixtures  5 Head-to-Head  q quit",
        ))
        .alignment(Alignment::Center),
        links_area,
    );
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let standings = &app.state.standings;
    let league = app
        .state
        .league_name(standings.league_id)
        .unwrap_or_else(|| format!("League {}", standings.league_id));
    let block = default_border(Color::White).title(format!(" Standings: {league} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [legend, header, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        Paragraph::new(hint_line("[/] league  j/k move  Enter team details  r refresh")),
        legend,
    );

    if let Some(msg) = fetch_placeholder(&standings.rows, "standings") {
        draw_message(f, body, &msg);
        return;
    }
    let Some(rows) = standings.rows.data() else {
        return;
    };
    if rows.is_empty() {
        draw_message(f, body, "No standings available for this league.");
        return;
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(
                "  {:>3} {} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}  Form",
                "#",
                fit("Team", 24),
                "P",
                "W",
                "D",
                "L",
                "GD",
                "Pts"
            ),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        ))),
        header,
    );

    let lines = rows
        .iter()
        .map(|r| {
            let gd = r.goal_difference.map_or("-".to_string(), |gd| format!("{gd:+}"));
            format!(
                "{:>3} {} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}  {}",
                r.rank,
                fit(&r.team.name, 24),
                r.matches_played,
                r.wins,
                r.draws,
                r.losses,
                gd,
                r.points,
                r.form.as_deref().unwrap_or("")
            )
        })
        .collect();
    draw_list(f, body, lines, standings.selected);
}

fn draw_fixtures(f: &mut Frame, area: Rect, app: &App) {
    let fixtures = &app.state.fixtures;
    let league = app
        .state
        .league_name(fixtures.league_id)
        .unwrap_or_else(|| format!("League {}", fixtures.league_id));
    let block = default_border(Color::White).title(format!(
        " Fixtures: {league} | {} ",
        fixtures.date.format("%a %d %b %Y")
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [legend, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(hint_line("h/l day  t today  [/] league  j/k move  Enter match details")),
        legend,
    );

    if let Some(msg) = fetch_placeholder(&fixtures.fixtures, "fixtures") {
        draw_message(f, body, &msg);
        return;
    }
    let Some(list) = fixtures.fixtures.data() else {
        return;
    };
    if list.is_empty() {
        draw_message(f, body, "No fixtures on this date.");
        return;
    }
    let rows = list.iter().map(|fx| fixture_line(fx, "%H:%M")).collect();
    draw_list(f, body, rows, fixtures.selected);
}

fn draw_rankings(f: &mut Frame, area: Rect, app: &App) {
    let rankings = &app.state.rankings;
    let block = default_border(Color::White).title(" Player Rankings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [stats, legend, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let mut spans = Vec::new();
    for stat in StatType::ALL {
        let style = if stat == rankings.stat {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(stat.label(), style));
        spans.push(Span::raw("   "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), stats);
    f.render_widget(
        Paragraph::new(hint_line("h/l stat  j/k move  Enter player profile  r refresh")),
        legend,
    );

    if let Some(msg) = fetch_placeholder(&rankings.rows, "rankings") {
        draw_message(f, body, &msg);
        return;
    }
    let Some(rows) = rankings.rows.data() else {
        return;
    };
    if rows.is_empty() {
        draw_message(f, body, "No rankings available.");
        return;
    }
    let lines = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let rank = r.rank.unwrap_or(i as u32 + 1);
            format!(
                "{rank:>3}. {} {} {:>6}",
                fit(&r.player.name, 24),
                fit(&r.player.team_name, 24),
                insights::format_stat_value(r.stat_value)
            )
        })
        .collect();
    draw_list(f, body, lines, rankings.selected);
}

fn draw_head_to_head(f: &mut Frame, area: Rect, app: &App) {
    let h2h = &app.state.head_to_head;
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let teams_color = if h2h.focus == HeadToHeadFocus::Teams { Color::Yellow } else { Color::DarkGray };
    let block = default_border(teams_color).title(" Teams ");
    let inner = block.inner(left);
    f.render_widget(block, left);

    let [search, list] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    let search_text = if h2h.searching {
        Line::from(Span::styled(format!("/{}_", h2h.filter), Style::default().fg(Color::Yellow)))
    } else if h2h.filter.is_empty() {
        hint_line("/ search  a team A  b team B  Tab switch")
    } else {
        hint_line(&format!("filter: {}", h2h.filter))
    };
    f.render_widget(Paragraph::new(search_text), search);

    if let Some(msg) = fetch_placeholder(&h2h.teams, "teams") {
        draw_message(f, list, &msg);
    } else {
        let teams = h2h.visible_teams();
        if teams.is_empty() {
            draw_message(f, list, "No teams match.");
        } else {
            let rows = teams.iter().map(|t| t.name.clone()).collect();
            draw_list(f, list, rows, h2h.cursor);
        }
    }

    let meetings_color = if h2h.focus == HeadToHeadFocus::Meetings { Color::Yellow } else { Color::DarkGray };
    let block = default_border(meetings_color).title(" Head-to-Head ");
    let inner = block.inner(right);
    f.render_widget(block, right);

    let [picks, body] = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(inner);
    let pick = |label: &str, team: Option<&pitchside_api::Team>| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
            Span::raw(team.map_or("--".to_string(), |t| t.name.clone())),
        ])
    };
    f.render_widget(
        Paragraph::new(vec![
            pick("Team A", h2h.first.as_ref()),
            pick("Team B", h2h.second.as_ref()),
        ]),
        picks,
    );

    if h2h.pair().is_none() {
        draw_message(f, body, PICK_TEAMS_HINT);
        return;
    }
    if let Some(msg) = fetch_placeholder(&h2h.meetings, "previous meetings") {
        draw_message(f, body, &msg);
        return;
    }
    let Some(meetings) = h2h.meetings.data() else {
        return;
    };
    if meetings.is_empty() {
        draw_message(f, body, "No previous meetings found.");
        return;
    }
    let rows = meetings.iter().map(meeting_line).collect();
    draw_list(f, body, rows, h2h.selected);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let keys: &[(&str, &str)] = &[
        ("1-5", "switch tab"),
        ("j/k, Up/Down", "move selection or scroll"),
        ("Enter", "open the selected row"),
        ("Esc", "go back / dismiss alert"),
        ("r", "refresh the current screen"),
        ("[ / ]", "previous / next league (Standings, Fixtures)"),
        ("h/l", "previous / next day (Fixtures), stat (Rankings)"),
        ("t", "jump to today (Fixtures)"),
        ("a / b", "pick team A / B (Head-to-Head)"),
        ("/", "search teams (Head-to-Head)"),
        ("Tab", "switch between teams and meetings (Head-to-Head)"),
        ("h / a", "home / away team details (Match)"),
        ("f / g", "home / away form filter (Match)"),
        ("m", "show more recent form (Match)"),
        ("Tab / S-Tab", "highlight a recent-form row, Enter opens the opponent (Match)"),
        ("F", "toggle full screen"),
        ("\"", "toggle log pane"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>14}  "), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Detail screens
// ---------------------------------------------------------------------------

fn draw_detail_frame(f: &mut Frame, area: Rect, screen_title: &str, hint: &str) -> Rect {
    let block = default_border(Color::Cyan).title(format!(" {screen_title} "));
    let inner = block.inner(area);
    f.render_widget(block, area);
    let [legend, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(hint_line(hint)), legend);
    body
}

fn comparison_lines(rows: &[StatComparison], home: &str, away: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("  {} {:>14} {:>14}", fit("", 26), fit(home, 14), fit(away, 14)),
        Style::default().fg(Color::Gray),
    ))];
    lines.extend(
        rows.iter()
            .map(|r| Line::from(format!("  {} {:>14} {:>14}", fit(&r.label, 26), r.home, r.away))),
    );
    lines
}

/// `highlight` indexes into `shown`, the rows left after filtering.
fn form_lines(
    team: &str,
    shown: &[&FormEntry],
    filter: FormFilter,
    key: char,
    highlight: Option<usize>,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{team} "), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("[{key}: {}]", filter.label()), Style::default().fg(Color::Gray)),
    ])];
    if shown.is_empty() {
        lines.push(hint_line("  No recent matches."));
    }
    for (i, entry) in shown.iter().enumerate() {
        let selected = highlight == Some(i);
        let (letter, color) = match entry.result {
            Some(r @ pitchside_api::MatchResult::Win) => (r.letter(), Color::Green),
            Some(r @ pitchside_api::MatchResult::Draw) => (r.letter(), Color::Yellow),
            Some(r @ pitchside_api::MatchResult::Loss) => (r.letter(), Color::Red),
            None => ('?', Color::DarkGray),
        };
        let score = match (entry.goals_for, entry.goals_against) {
            (Some(gf), Some(ga)) => format!("{gf}-{ga}"),
            _ => "-".to_string(),
        };
        let text_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, text_style),
            Span::styled(letter.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {score:>5}  {}", insights::form_line(entry)), text_style),
        ]));
    }
    lines
}

fn top_player_lines(team: &str, players: &[TopPlayer]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        team.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if players.is_empty() {
        lines.push(hint_line("  No top players listed."));
    }
    for p in players {
        lines.push(Line::from(format!(
            "  {} {} {:>3} goals",
            fit(&p.name, 24),
            fit(p.position.as_deref().unwrap_or("-"), 12),
            p.goals
        )));
    }
    lines
}

fn match_lines(detail: &FixtureDetail, screen: &MatchScreen) -> Vec<Line<'static>> {
    let fixture = &detail.fixture;
    let home = fixture.home_team.name.as_str();
    let away = fixture.away_team.name.as_str();
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(home.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}  ", fixture.score_line())),
        Span::styled(away.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    ]));
    lines.push(Line::from(format!(
        "Kickoff: {}   Status: {}",
        kickoff(fixture.date, "%A %d %B %Y, %H:%M"),
        fixture.status_short.as_deref().unwrap_or("--")
    )));
    if let Some(venue) = &detail.venue {
        let place = [venue.name.as_deref(), venue.city.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(format!("Venue: {}", if place.is_empty() { "N/A" } else { &place })));
    }
    lines.push(Line::from(format!("Referee: {}", detail.referee.as_deref().unwrap_or("N/A"))));
    if let Some(league) = &detail.league {
        lines.push(Line::from(format!("League: {}", league.name)));
    }

    lines.push(Line::from(""));
    lines.push(heading("Prediction"));
    match &detail.prediction {
        Some(prediction) => {
            if let Some(advice) = &prediction.advice {
                lines.push(Line::from(format!("  {advice}")));
            }
            lines.push(Line::from(format!(
                "  Home {}  |  Draw {}  |  Away {}",
                insights::format_share(prediction.percent_home),
                insights::format_share(prediction.percent_draw),
                insights::format_share(prediction.percent_away)
            )));
            if let Some(outcome) = insights::predicted_outcome(detail) {
                lines.push(Line::from(format!("  Predicted outcome: {}", outcome.label())));
            }
            if !prediction.comparison.is_empty() {
                lines.extend(comparison_lines(&prediction.comparison, home, away));
            }
        }
        None => lines.push(hint_line("  No prediction available for this match.")),
    }
    match insights::best_odds(detail) {
        Some(best) => lines.push(Line::from(Span::styled(
            format!("  Odds: {} (via {})", best.odd, best.bookmaker),
            Style::default().fg(Color::Green),
        ))),
        None => lines.push(hint_line("  Odds not available for the predicted outcome.")),
    }

    lines.push(Line::from(""));
    lines.push(heading(if screen.show_more { "Recent Form (m: show less)" } else { "Recent Form (m: show more)" }));
    let (home_form, away_form) = screen.visible_form();
    let home_highlight = screen.form_cursor.filter(|&i| i < home_form.len());
    let away_highlight = screen
        .form_cursor
        .and_then(|i| i.checked_sub(home_form.len()));
    lines.extend(form_lines(home, &home_form, screen.home_filter, 'f', home_highlight));
    lines.extend(form_lines(away, &away_form, screen.away_filter, 'g', away_highlight));

    lines.push(Line::from(""));
    lines.push(heading("Team Statistics"));
    match (&detail.home_team_stats, &detail.away_team_stats) {
        (Some(h), Some(a)) => lines.extend(comparison_lines(&insights::team_stat_comparison(h, a), home, away)),
        _ => lines.push(hint_line("  Team statistics not available.")),
    }

    lines.push(Line::from(""));
    lines.push(heading("Top Players"));
    lines.extend(top_player_lines(home, &detail.home_top_players));
    lines.extend(top_player_lines(away, &detail.away_top_players));

    if !detail.match_statistics.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Match Statistics"));
        lines.extend(comparison_lines(&detail.match_statistics, home, away));
    }

    if !detail.match_events.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Events"));
        for event in &detail.match_events {
            let mut text = format!(
                "  {:>6}  {} {}",
                event.minute(),
                fit(event.team_name.as_deref().unwrap_or(""), 18),
                event.kind
            );
            if let Some(player) = &event.player_name {
                text.push_str(&format!(": {player}"));
            }
            if let Some(assist) = &event.assist_name {
                text.push_str(&format!(" (assist {assist})"));
            }
            if let Some(d) = &event.detail {
                text.push_str(&format!(" - {d}"));
            }
            lines.push(Line::from(text));
        }
    }

    lines
}

fn draw_scrolled(f: &mut Frame, body: Rect, lines: Vec<Line<'static>>, scroll: &mut ScrollState) {
    scroll.fit(lines.len(), body.height);
    f.render_widget(Paragraph::new(lines).scroll((scroll.offset, 0)), body);
}

fn draw_match(f: &mut Frame, area: Rect, screen: &mut MatchScreen) {
    let body = draw_detail_frame(
        f,
        area,
        "Match Details",
        "h/a team details  f/g form filter  m more  Tab form row  Enter opponent  j/k scroll  Esc back",
    );
    if let Some(msg) = fetch_placeholder(&screen.detail, "match details") {
        draw_message(f, body, &msg);
        return;
    }
    let Some(detail) = screen.detail.data() else {
        return;
    };
    let lines = match_lines(detail, screen);
    draw_scrolled(f, body, lines, &mut screen.scroll);
}

fn draw_team(f: &mut Frame, area: Rect, screen: &mut TeamScreen) {
    let body = draw_detail_frame(f, area, "Team Details", "j/k scroll  r refresh  Esc back");
    if let Some(msg) = fetch_placeholder(&screen.overview, "team details") {
        draw_message(f, body, &msg);
        return;
    }
    let Some(overview) = screen.overview.data() else {
        return;
    };

    let team = &overview.team;
    let mut lines = vec![
        Line::from(Span::styled(team.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("Founded: {}", team.founded.map_or("N/A".to_string(), |y| y.to_string()))),
        Line::from(format!("Country: {}", team.country.as_deref().unwrap_or("N/A"))),
        Line::from(""),
        heading("Season Statistics"),
    ];
    lines.extend(
        insights::team_stat_rows(&overview.statistics)
            .into_iter()
            .map(|(label, value)| Line::from(format!("  {} {value:>10}", fit(label, 26)))),
    );
    draw_scrolled(f, body, lines, &mut screen.scroll);
}

fn draw_player(f: &mut Frame, area: Rect, screen: &mut PlayerScreen) {
    let body = draw_detail_frame(f, area, "Player Profile", "j/k scroll  r refresh  Esc back");
    if let Some(msg) = fetch_placeholder(&screen.profile, "player profile") {
        draw_message(f, body, &msg);
        return;
    }
    let Some(profile) = screen.profile.data() else {
        return;
    };

    let player = &profile.player;
    let or_na = |v: Option<&str>| v.unwrap_or("N/A").to_string();
    let mut lines = vec![
        Line::from(Span::styled(player.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("Age: {}", player.age.map_or("N/A".to_string(), |a| a.to_string()))),
        Line::from(format!("Nationality: {}", or_na(player.nationality.as_deref()))),
        Line::from(format!("Position: {}", or_na(player.position.as_deref()))),
        Line::from(format!("Team: {}", or_na(player.team.as_ref().map(|t| t.name.as_str())))),
    ];

    match &profile.statistics {
        Some(stats) => {
            for section in insights::player_stat_sections(stats) {
                lines.push(Line::from(""));
                lines.push(heading(section.title));
                lines.extend(
                    section
                        .rows
                        .into_iter()
                        .map(|(label, value)| Line::from(format!("  {} {value:>10}", fit(label, 20)))),
                );
            }
        }
        None => {
            lines.push(Line::from(""));
            lines.push(hint_line("No statistics available for this season."));
        }
    }
    draw_scrolled(f, body, lines, &mut screen.scroll);
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn draw_alert(f: &mut Frame, area: Rect, message: &str) {
    let width = (area.width * 3 / 5).max(30).min(area.width);
    let height = 7.min(area.height);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    f.render_widget(Clear, popup);
    let block = default_border(Color::Red).title(" Error ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let [text, prompt] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(message.to_string())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        text,
    );
    f.render_widget(
        Paragraph::new(hint_line("Enter/Esc to dismiss")).alignment(Alignment::Center),
        prompt,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray))
        .output_file(false)
        .output_line(false);
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
