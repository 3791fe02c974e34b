use log::LevelFilter;
use pitchside_api::LeagueId;
use pitchside_api::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use std::str::FromStr;
use std::time::Duration;

pub const API_URL_VAR: &str = "PITCHSIDE_API_URL";
pub const SEASON_VAR: &str = "PITCHSIDE_SEASON";
pub const LEAGUE_ID_VAR: &str = "PITCHSIDE_LEAGUE_ID";
pub const TIMEOUT_VAR: &str = "PITCHSIDE_TIMEOUT_SECS";
pub const LOG_LEVEL_VAR: &str = "PITCHSIDE_LOG_LEVEL";

pub const DEFAULT_SEASON: u16 = 2024;
pub const DEFAULT_LEAGUE_ID: LeagueId = 39;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub api_url: String,
    pub season: u16,
    pub league_id: LeagueId,
    pub timeout: Duration,
    /// Problems found while reading the environment, logged once the logger is up.
    pub warnings: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: LevelFilter::Error,
            api_url: DEFAULT_BASE_URL.to_string(),
            season: DEFAULT_SEASON,
            league_id: DEFAULT_LEAGUE_ID,
            timeout: DEFAULT_TIMEOUT,
            warnings: Vec::new(),
        }
    }
}

impl AppSettings {
    /// Read settings from the process environment, after `.env.local` / `.env`.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let mut warnings = Vec::new();

        if let Some(url) = lookup(API_URL_VAR).map(|v| v.trim().to_string())
            && !url.is_empty()
        {
            settings.api_url = url;
        }
        if let Some(season) = parse_var(&lookup, SEASON_VAR, &mut warnings) {
            settings.season = season;
        }
        if let Some(league_id) = parse_var(&lookup, LEAGUE_ID_VAR, &mut warnings) {
            settings.league_id = league_id;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, TIMEOUT_VAR, &mut warnings) {
            if secs == 0 {
                warnings.push(format!("{TIMEOUT_VAR} must be at least 1, using default"));
            } else {
                settings.timeout = Duration::from_secs(secs);
            }
        }
        if let Some(level) = parse_var(&lookup, LOG_LEVEL_VAR, &mut warnings) {
            settings.log_level = level;
        }

        settings.warnings = warnings;
        settings
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("ignoring invalid {key}={raw:?}, using default"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]);
        assert_eq!(s.api_url, "http://127.0.0.1:8000");
        assert_eq!(s.season, 2024);
        assert_eq!(s.league_id, 39);
        assert_eq!(s.timeout, Duration::from_secs(10));
        assert_eq!(s.log_level, LevelFilter::Error);
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            (API_URL_VAR, "https://stats.example.org"),
            (SEASON_VAR, "2023"),
            (LEAGUE_ID_VAR, " 140 "),
            (TIMEOUT_VAR, "3"),
            (LOG_LEVEL_VAR, "debug"),
        ]);
        assert_eq!(s.api_url, "https://stats.example.org");
        assert_eq!(s.season, 2023);
        assert_eq!(s.league_id, 140);
        assert_eq!(s.timeout, Duration::from_secs(3));
        assert_eq!(s.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_fall_back_with_warning() {
        let s = settings(&[(SEASON_VAR, "last year"), (TIMEOUT_VAR, "0"), (LOG_LEVEL_VAR, "loud")]);
        assert_eq!(s.season, DEFAULT_SEASON);
        assert_eq!(s.timeout, DEFAULT_TIMEOUT);
        assert_eq!(s.log_level, LevelFilter::Error);
        assert_eq!(s.warnings.len(), 3);
    }
}
