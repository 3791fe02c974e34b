/// Raw wire types: serde shapes for deserializing the stats backend's responses.
/// Every field is optional here; client.rs validates them into the domain types.
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Lenient scalar decoding
// ---------------------------------------------------------------------------

/// The backend sends some numbers as JSON numbers and others as text ("45%", "2.10").
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn parse_number(raw: Option<NumberOrText>) -> Option<f64> {
    match raw? {
        NumberOrText::Number(n) => Some(n),
        NumberOrText::Text(t) => t.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        NumberOrText::Other(_) => None,
    }
    .filter(|n| n.is_finite())
}

pub fn lenient_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(d).map(parse_number)
}

pub fn lenient_u32<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_f64(d)?;
    Ok(n.filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

pub fn lenient_i32<'de, D>(d: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_f64(d)?;
    Ok(n.filter(|n| n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX))
        .map(|n| n as i32))
}

/// Text that may arrive as a JSON number ("odd": 2.1 vs "odd": "2.10").
pub fn lenient_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(d)?;
    Ok(raw.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
/// Use together with `#[serde(default)]`. A value that is neither `null` nor a
/// non-negative integer id (as a number or digit string) decodes as absent.
pub fn nullable_id<'de, D>(d: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(d)?;
    Ok(match raw {
        Value::Null => Some(None),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).map(Some),
        Value::String(s) => s.trim().parse::<u32>().ok().map(Some),
        _ => None,
    })
}

/// Render a loosely typed stat value for display.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Leagues and teams
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireLeague {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub league_id: Option<u32>,
    pub name: Option<String>,
    pub country: Option<WireCountryField>,
}

/// Leagues carry a `{name, flag}` object; teams usually carry a bare name.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum WireCountryField {
    Name(String),
    Detail(WireCountry),
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireCountry {
    pub name: Option<String>,
    pub flag: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub team_id: Option<u32>,
    pub name: Option<String>,
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub founded: Option<u32>,
    pub country: Option<WireCountryField>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeamStatistics {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub matches_played: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub wins: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub draws: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub losses: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_for: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_against: Option<u32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub goal_difference: Option<i32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub clean_sheets: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_shots_on_target: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_tackles: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_passes_accuracy: Option<f64>,
}

// ---------------------------------------------------------------------------
// Fixtures  (summary and `/detailed` share one shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireFixture {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub fixture_id: Option<u32>,
    pub date: Option<String>, // ISO 8601, sometimes date-only
    pub home_team: Option<WireTeam>,
    pub away_team: Option<WireTeam>,
    pub status_short: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_home: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_away: Option<u32>,
    pub league: Option<WireLeague>,

    // Only present on `/fixtures/{id}/detailed`.
    pub venue: Option<WireVenue>,
    pub referee: Option<String>,
    pub prediction: Option<WirePrediction>,
    pub odds: Option<WireOdds>,
    pub home_recent_form: Option<Vec<WireFormEntry>>,
    pub away_recent_form: Option<Vec<WireFormEntry>>,
    pub home_team_stats: Option<WireTeamStatistics>,
    pub away_team_stats: Option<WireTeamStatistics>,
    pub home_top_players: Option<Vec<WireTopPlayer>>,
    pub away_top_players: Option<Vec<WireTopPlayer>>,
    pub match_statistics: Option<WireMatchStatistics>,
    pub match_events: Option<Vec<WireMatchEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireVenue {
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePrediction {
    #[serde(default, deserialize_with = "nullable_id")]
    pub winner_team_id: Option<Option<u32>>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent_home: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent_draw: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent_away: Option<f64>,
    pub advice: Option<String>,
    /// e.g. `{"form": {"home": "60%", "away": "40%"}, "att": {...}}`
    pub comparison: Option<BTreeMap<String, WireComparisonPair>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireComparisonPair {
    pub home: Option<Value>,
    pub away: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireOdds {
    pub fixture_bookmakers: Option<Vec<WireFixtureBookmaker>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireFixtureBookmaker {
    pub bookmaker: Option<WireBookmaker>,
    pub bets: Option<Vec<WireBet>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireBookmaker {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireBet {
    pub bet_type: Option<WireBetType>,
    pub odd_values: Option<Vec<WireOddValue>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireBetType {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireOddValue {
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub odd: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireFormEntry {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub fixture_id: Option<u32>,
    pub date: Option<String>,
    pub opponent: Option<String>,
    pub opponent_logo: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub opponent_team_id: Option<u32>,
    pub outcome: Option<String>, // "W" | "D" | "L"
    pub home_or_away: Option<String>, // "Home" | "Away"
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_for: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_against: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTopPlayer {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub player_id: Option<u32>,
    pub name: Option<String>,
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatchStatistics {
    pub home: Option<BTreeMap<String, Value>>,
    pub away: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatchEvent {
    #[serde(default, alias = "time_elapsed", deserialize_with = "lenient_u32")]
    pub elapsed: Option<u32>,
    #[serde(default, alias = "time_extra", deserialize_with = "lenient_u32")]
    pub extra: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub team_id: Option<u32>,
    pub team_name: Option<String>,
    pub player_name: Option<String>,
    pub assist_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub detail: Option<String>,
}

// ---------------------------------------------------------------------------
// Standings, players, rankings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireStanding {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub rank: Option<u32>,
    pub team: Option<WireTeam>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub matches_played: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub wins: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub draws: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub losses: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub points: Option<u32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub goal_difference: Option<i32>,
    pub form: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayer {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub player_id: Option<u32>,
    pub name: Option<String>,
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub position: Option<String>,
    pub team: Option<WireTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayerStatistics {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub appearances: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub minutes: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_total: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_assists: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub shots_total: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub shots_on: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub passes_total: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub passes_key: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub passes_accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub tackles_total: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub tackles_blocks: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub tackles_interceptions: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub cards_yellow: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub cards_red: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub dribbles_attempts: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub dribbles_success: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub duels_total: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub duels_won: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub fouls_drawn: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub fouls_committed: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub penalty_won: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub penalty_scored: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub penalty_missed: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireRanking {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub rank: Option<u32>,
    pub player: Option<WirePlayer>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stat_value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_strings_and_numbers_decode_to_the_same_value() {
        let text: WirePrediction =
            serde_json::from_str(r#"{"percent_home": "45%", "percent_draw": " 30 % "}"#).unwrap();
        let number: WirePrediction = serde_json::from_str(r#"{"percent_home": 45}"#).unwrap();
        assert_eq!(text.percent_home, Some(45.0));
        assert_eq!(text.percent_draw, Some(30.0));
        assert_eq!(number.percent_home, Some(45.0));
        assert_eq!(text.percent_away, None);
    }

    #[test]
    fn test_winner_null_is_distinct_from_missing() {
        let explicit: WirePrediction = serde_json::from_str(r#"{"winner_team_id": null}"#).unwrap();
        let missing: WirePrediction = serde_json::from_str("{}").unwrap();
        let team: WirePrediction = serde_json::from_str(r#"{"winner_team_id": 33}"#).unwrap();
        assert_eq!(explicit.winner_team_id, Some(None));
        assert_eq!(missing.winner_team_id, None);
        assert_eq!(team.winner_team_id, Some(Some(33)));
    }

    #[test]
    fn test_unusable_winner_ids_decode_as_absent() {
        for raw in [r#""abc""#, "-1", "1.5", "true", "[]", "{}"] {
            let p: WirePrediction =
                serde_json::from_str(&format!(r#"{{"winner_team_id": {raw}}}"#)).unwrap();
            assert_eq!(p.winner_team_id, None, "winner_team_id = {raw}");
        }
        let text: WirePrediction = serde_json::from_str(r#"{"winner_team_id": "33"}"#).unwrap();
        assert_eq!(text.winner_team_id, Some(Some(33)));
    }

    #[test]
    fn test_odd_accepts_number_or_text() {
        let v: Vec<WireOddValue> =
            serde_json::from_str(r#"[{"value": "Home", "odd": "2.10"}, {"value": "Away", "odd": 1.9}]"#)
                .unwrap();
        assert_eq!(v[0].odd.as_deref(), Some("2.10"));
        assert_eq!(v[1].odd.as_deref(), Some("1.9"));
    }

    #[test]
    fn test_unexpected_scalar_types_are_ignored_not_fatal() {
        let s: WireStanding =
            serde_json::from_str(r#"{"rank": true, "points": "n/a", "goal_difference": "-3"}"#).unwrap();
        assert_eq!(s.rank, None);
        assert_eq!(s.points, None);
        assert_eq!(s.goal_difference, Some(-3));
    }

    #[test]
    fn test_country_accepts_name_or_object() {
        let team: WireTeam = serde_json::from_str(r#"{"team_id": 1, "country": "England"}"#).unwrap();
        let league: WireLeague =
            serde_json::from_str(r#"{"league_id": 39, "country": {"name": "England", "flag": "gb.svg"}}"#)
                .unwrap();
        assert!(matches!(team.country, Some(WireCountryField::Name(ref n)) if n == "England"));
        assert!(matches!(league.country, Some(WireCountryField::Detail(_))));
    }
}
