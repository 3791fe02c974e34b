use crate::app::{App, MenuItem, View};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    apply_key(&mut guard, key_event);
    let requests = guard.take_requests();
    drop(guard);

    for request in requests {
        let _ = network_requests.send(request).await;
    }
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}

fn apply_key(app: &mut App, key_event: KeyEvent) {
    let is_quit = matches!(
        (key_event.code, key_event.modifiers),
        (Char('c'), KeyModifiers::CONTROL)
    );

    // An open alert swallows everything until acknowledged.
    if app.current_alert().is_some() {
        match key_event.code {
            KeyCode::Enter | KeyCode::Esc => app.dismiss_alert(),
            _ if is_quit => quit(),
            _ => {}
        }
        return;
    }

    if app.view() == View::Tab(MenuItem::HeadToHead) && app.state.head_to_head.searching {
        match key_event.code {
            KeyCode::Enter => app.end_team_search(false),
            KeyCode::Esc => app.end_team_search(true),
            KeyCode::Backspace => app.team_search_backspace(),
            KeyCode::Down => app.move_down(),
            KeyCode::Up => app.move_up(),
            Char(c) if !is_quit => app.team_search_input(c),
            _ if is_quit => quit(),
            _ => {}
        }
        return;
    }

    match (app.view(), key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => quit(),

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Home),
        (_, Char('2'), _) => app.update_tab(MenuItem::Standings),
        (_, Char('3'), _) => app.update_tab(MenuItem::Rankings),
        (_, Char('4'), _) => app.update_tab(MenuItem::Fixtures),
        (_, Char('5'), _) => app.update_tab(MenuItem::HeadToHead),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (_, KeyCode::Esc, _) => {
            app.back();
        }

        // Lists and scrolling
        (_, Char('j') | KeyCode::Down, _) => app.move_down(),
        (_, Char('k') | KeyCode::Up, _) => app.move_up(),
        (_, KeyCode::Enter, _) => app.activate(),
        (_, Char('r'), _) => app.load_current(),

        // League pickers
        (View::Tab(MenuItem::Standings | MenuItem::Fixtures), Char(']'), _) => app.cycle_league(true),
        (View::Tab(MenuItem::Standings | MenuItem::Fixtures), Char('['), _) => app.cycle_league(false),

        // Fixtures date
        (View::Tab(MenuItem::Fixtures), Char('l') | KeyCode::Right, _) => app.shift_fixture_date(true),
        (View::Tab(MenuItem::Fixtures), Char('h') | KeyCode::Left, _) => app.shift_fixture_date(false),
        (View::Tab(MenuItem::Fixtures), Char('t'), _) => app.fixtures_today(),

        // Rankings stat type
        (View::Tab(MenuItem::Rankings), Char('l') | KeyCode::Right, _) => app.cycle_stat(true),
        (View::Tab(MenuItem::Rankings), Char('h') | KeyCode::Left, _) => app.cycle_stat(false),

        // Head-to-head pickers
        (View::Tab(MenuItem::HeadToHead), Char('a'), _) => app.pick_first_team(),
        (View::Tab(MenuItem::HeadToHead), Char('b'), _) => app.pick_second_team(),
        (View::Tab(MenuItem::HeadToHead), KeyCode::Tab, _) => app.toggle_head_to_head_focus(),
        (View::Tab(MenuItem::HeadToHead), Char('/'), _) => app.start_team_search(),

        // Match details
        (View::Match, Char('h'), _) => app.open_match_team(true),
        (View::Match, Char('a'), _) => app.open_match_team(false),
        (View::Match, Char('f'), _) => app.cycle_home_form_filter(),
        (View::Match, Char('g'), _) => app.cycle_away_form_filter(),
        (View::Match, Char('m'), _) => app.toggle_form_show_more(),
        (View::Match, KeyCode::Tab, _) => app.step_form_cursor(true),
        (View::Match, KeyCode::BackTab, _) => app.step_form_cursor(false),

        // Global
        (_, Char('F'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
}
