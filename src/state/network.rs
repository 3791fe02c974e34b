use crate::state::messages::{NetworkRequest, NetworkResponse, Payload, Query};
use log::{debug, error};
use pitchside_api::client::{ApiResult, FootballApi, NOT_STARTED};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

pub const UPCOMING_LIMIT: u32 = 10;
pub const RANKINGS_LIMIT: u32 = 10;
pub const TEAMS_LIMIT: u32 = 1000;
pub const HEAD_TO_HEAD_LIMIT: u32 = 5;

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serves requests one at a time, in arrival order. Every answer carries the
/// id of the request it belongs to.
pub struct NetworkWorker {
    client: FootballApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: FootballApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(NetworkRequest { id, query }) = self.requests.recv().await {
            self.start_loading_animation().await;

            debug!("request {id}: {query:?}");
            let result = self.fetch(query).await;

            debug!("request {id} complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = match result {
                Ok(payload) => NetworkResponse::Loaded { id, payload },
                Err(err) => NetworkResponse::Failed { id, message: err.to_string() },
            };

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn fetch(&self, query: Query) -> ApiResult<Payload> {
        let api = &self.client;
        let payload = match query {
            Query::Leagues => Payload::Leagues(api.fetch_leagues().await?),
            Query::Standings { league_id, season } => {
                Payload::Standings(api.fetch_standings(league_id, season).await?)
            }
            Query::FixturesOn { league_id, season, date } => {
                Payload::Fixtures(api.fetch_fixtures_between(league_id, season, date, date).await?)
            }
            Query::UpcomingFixtures { league_id } => Payload::UpcomingFixtures(
                api.fetch_upcoming_fixtures(league_id, NOT_STARTED, UPCOMING_LIMIT)
                    .await?,
            ),
            Query::FixtureDetail { fixture_id } => {
                Payload::FixtureDetail(Box::new(api.fetch_fixture_detail(fixture_id).await?))
            }
            Query::TeamOverview { team_id, season } => {
                Payload::TeamOverview(Box::new(api.fetch_team_overview(team_id, season).await?))
            }
            Query::PlayerProfile { player_id, season } => {
                Payload::PlayerProfile(Box::new(api.fetch_player_profile(player_id, season).await?))
            }
            Query::Rankings { stat, league_id, season } => Payload::Rankings(
                api.fetch_rankings(stat, league_id, season, RANKINGS_LIMIT)
                    .await?,
            ),
            Query::Teams => Payload::Teams(api.fetch_teams(TEAMS_LIMIT).await?),
            Query::HeadToHead { team1, team2 } => Payload::HeadToHead(
                api.fetch_head_to_head(team1, team2, HEAD_TO_HEAD_LIMIT)
                    .await?,
            ),
        };
        Ok(payload)
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
