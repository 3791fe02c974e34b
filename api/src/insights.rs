//! Display values derived from fetched data: predicted outcome, best odds,
//! recent-form slices, fixture ordering and stat formatting.

use crate::{
    Fixture, FixtureDetail, FormEntry, Outcome, PlayerStatistics, PredictedWinner, Side,
    StatComparison, TeamStatistics,
};

pub const MATCH_WINNER_BET: &str = "Match Winner";

/// Recent-form entries shown before and after toggling "show more".
pub const FORM_PAGE: usize = 5;
pub const FORM_PAGE_EXPANDED: usize = 10;

/// Map the prediction's winner onto the fixture's sides.
///
/// A winner id matching neither side, or a missing prediction, yields `None`.
pub fn predicted_outcome(detail: &FixtureDetail) -> Option<Outcome> {
    let prediction = detail.prediction.as_ref()?;
    match prediction.winner? {
        PredictedWinner::Team(id) if id == detail.fixture.home_team.id => Some(Outcome::Home),
        PredictedWinner::Team(id) if id == detail.fixture.away_team.id => Some(Outcome::Away),
        PredictedWinner::Team(_) => None,
        PredictedWinner::NoWinner => Some(Outcome::Draw),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestOdds {
    /// The odd as the bookmaker quoted it.
    pub odd: String,
    pub bookmaker: String,
}

/// Highest "Match Winner" odd any bookmaker offers on the predicted outcome.
///
/// The first matching odd is taken, later ones replace it only when strictly
/// greater. Odds that do not parse never win a comparison.
pub fn best_odds(detail: &FixtureDetail) -> Option<BestOdds> {
    let outcome = predicted_outcome(detail)?;
    let mut best: Option<(f64, &str, &str)> = None;

    for bookmaker in &detail.bookmakers {
        let bets = bookmaker
            .bets
            .iter()
            .filter(|bet| bet.name.as_deref() == Some(MATCH_WINNER_BET));
        for bet in bets {
            for value in bet.values.iter().filter(|v| v.value == outcome.label()) {
                let parsed = value.odd.trim().parse::<f64>().unwrap_or(f64::NAN);
                let replaces = match best {
                    None => true,
                    Some((current, _, _)) => parsed > current,
                };
                if replaces {
                    best = Some((parsed, value.odd.as_str(), bookmaker.bookmaker.as_str()));
                }
            }
        }
    }

    best.map(|(_, odd, bookmaker)| BestOdds {
        odd: odd.to_string(),
        bookmaker: bookmaker.to_string(),
    })
}

/// Which of a team's recent matches to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormFilter {
    #[default]
    All,
    Home,
    Away,
}

impl FormFilter {
    pub const ALL: [FormFilter; 3] = [FormFilter::All, FormFilter::Home, FormFilter::Away];

    pub fn label(&self) -> &'static str {
        match self {
            FormFilter::All => "All",
            FormFilter::Home => "Home",
            FormFilter::Away => "Away",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormFilter::All => FormFilter::Home,
            FormFilter::Home => FormFilter::Away,
            FormFilter::Away => FormFilter::All,
        }
    }

    fn accepts(&self, entry: &FormEntry) -> bool {
        match self {
            FormFilter::All => true,
            FormFilter::Home => entry.side == Some(Side::Home),
            FormFilter::Away => entry.side == Some(Side::Away),
        }
    }
}

/// Keep the entries played on the filtered side, then cut to one page.
/// Order is the backend's (most recent first).
pub fn filter_recent_form(entries: &[FormEntry], filter: FormFilter, show_more: bool) -> Vec<&FormEntry> {
    let limit = if show_more { FORM_PAGE_EXPANDED } else { FORM_PAGE };
    entries
        .iter()
        .filter(|e| filter.accepts(e))
        .take(limit)
        .collect()
}

/// "2024-04-20 vs Chelsea (Away)"
pub fn form_line(entry: &FormEntry) -> String {
    let date = entry
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    let side = entry.side.map_or("?", |s| s.label());
    format!("{date} vs {} ({side})", entry.opponent)
}

/// Stable ascending sort by kickoff; fixtures without a date go last.
pub fn sort_fixtures_by_date(fixtures: &mut [Fixture]) {
    fixtures.sort_by_key(|f| (f.date.is_none(), f.date));
}

pub fn format_decimal(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

pub fn format_percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"))
}

pub fn format_count(value: Option<u32>) -> String {
    value.unwrap_or_default().to_string()
}

/// Prediction shares are whole percentages: "45%".
pub fn format_share(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.0}%"))
}

/// Ranking values: whole numbers without decimals, "0" when absent.
pub fn format_stat_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
        None => "0".to_string(),
    }
}

/// Season statistics as labelled display rows.
pub fn team_stat_rows(stats: &TeamStatistics) -> Vec<(&'static str, String)> {
    vec![
        ("Matches Played", stats.matches_played.to_string()),
        ("Wins", stats.wins.to_string()),
        ("Draws", stats.draws.to_string()),
        ("Losses", stats.losses.to_string()),
        ("Goals For", stats.goals_for.to_string()),
        ("Goals Against", stats.goals_against.to_string()),
        ("Goal Difference", stats.goal_difference.to_string()),
        ("Clean Sheets", stats.clean_sheets.to_string()),
        ("Avg Shots on Target", format_decimal(stats.average_shots_on_target)),
        ("Avg Tackles", format_decimal(stats.average_tackles)),
        ("Avg Pass Accuracy", format_percentage(stats.average_passes_accuracy)),
    ]
}

/// Side-by-side rows for two teams' season statistics.
pub fn team_stat_comparison(home: &TeamStatistics, away: &TeamStatistics) -> Vec<StatComparison> {
    team_stat_rows(home)
        .into_iter()
        .zip(team_stat_rows(away))
        .map(|((label, home), (_, away))| StatComparison {
            label: label.to_string(),
            home,
            away,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatSection {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

/// A player's season counters grouped for the profile screen.
pub fn player_stat_sections(stats: &PlayerStatistics) -> Vec<StatSection> {
    let count = format_count;
    vec![
        StatSection {
            title: "General",
            rows: vec![
                ("Appearances", count(stats.appearances)),
                ("Minutes", count(stats.minutes)),
                ("Rating", format_decimal(stats.rating)),
            ],
        },
        StatSection {
            title: "Goals & Assists",
            rows: vec![
                ("Goals", count(stats.goals_total)),
                ("Assists", count(stats.goals_assists)),
                ("Shots", count(stats.shots_total)),
                ("Shots on Target", count(stats.shots_on)),
            ],
        },
        StatSection {
            title: "Passing",
            rows: vec![
                ("Total Passes", count(stats.passes_total)),
                ("Key Passes", count(stats.passes_key)),
                ("Pass Accuracy", format_percentage(stats.passes_accuracy)),
            ],
        },
        StatSection {
            title: "Defensive",
            rows: vec![
                ("Tackles", count(stats.tackles_total)),
                ("Blocks", count(stats.tackles_blocks)),
                ("Interceptions", count(stats.tackles_interceptions)),
            ],
        },
        StatSection {
            title: "Discipline",
            rows: vec![
                ("Yellow Cards", count(stats.cards_yellow)),
                ("Red Cards", count(stats.cards_red)),
            ],
        },
        StatSection {
            title: "Dribbles",
            rows: vec![
                ("Attempts", count(stats.dribbles_attempts)),
                ("Successful", count(stats.dribbles_success)),
            ],
        },
        StatSection {
            title: "Duels",
            rows: vec![
                ("Total", count(stats.duels_total)),
                ("Won", count(stats.duels_won)),
            ],
        },
        StatSection {
            title: "Fouls",
            rows: vec![
                ("Drawn", count(stats.fouls_drawn)),
                ("Committed", count(stats.fouls_committed)),
            ],
        },
        StatSection {
            title: "Penalties",
            rows: vec![
                ("Won", count(stats.penalty_won)),
                ("Scored", count(stats.penalty_scored)),
                ("Missed", count(stats.penalty_missed)),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::parse_date;
    use crate::{Bet, BookmakerOdds, OddValue, Prediction, TeamRef};

    fn detail(winner: Option<PredictedWinner>) -> FixtureDetail {
        FixtureDetail {
            fixture: Fixture {
                id: 1,
                home_team: TeamRef { id: 10, name: "Arsenal".into(), logo: None },
                away_team: TeamRef { id: 20, name: "Spurs".into(), logo: None },
                ..Default::default()
            },
            prediction: Some(Prediction { winner, ..Default::default() }),
            ..Default::default()
        }
    }

    fn bookmaker(name: &str, bet: &str, offers: &[(&str, &str)]) -> BookmakerOdds {
        BookmakerOdds {
            bookmaker: name.into(),
            bets: vec![Bet {
                name: Some(bet.into()),
                values: offers
                    .iter()
                    .map(|(value, odd)| OddValue { value: (*value).into(), odd: (*odd).into() })
                    .collect(),
            }],
        }
    }

    fn form(side: Side, n: u32) -> FormEntry {
        FormEntry {
            fixture_id: Some(n),
            opponent: format!("Opponent {n}"),
            side: Some(side),
            ..Default::default()
        }
    }

    #[test]
    fn test_predicted_outcome_maps_sides() {
        assert_eq!(predicted_outcome(&detail(Some(PredictedWinner::Team(10)))), Some(Outcome::Home));
        assert_eq!(predicted_outcome(&detail(Some(PredictedWinner::Team(20)))), Some(Outcome::Away));
        assert_eq!(predicted_outcome(&detail(Some(PredictedWinner::NoWinner))), Some(Outcome::Draw));
        assert_eq!(predicted_outcome(&detail(Some(PredictedWinner::Team(99)))), None);
        assert_eq!(predicted_outcome(&detail(None)), None);

        let mut no_prediction = detail(None);
        no_prediction.prediction = None;
        assert_eq!(predicted_outcome(&no_prediction), None);
    }

    #[test]
    fn test_best_odds_picks_highest_for_predicted_outcome() {
        let mut d = detail(Some(PredictedWinner::Team(10)));
        d.bookmakers = vec![
            bookmaker("Bet365", MATCH_WINNER_BET, &[("Home", "1.8")]),
            bookmaker("Unibet", MATCH_WINNER_BET, &[("Home", "2.1")]),
            bookmaker("Pinnacle", MATCH_WINNER_BET, &[("Away", "1.9")]),
        ];
        assert_eq!(
            best_odds(&d),
            Some(BestOdds { odd: "2.1".into(), bookmaker: "Unibet".into() })
        );
    }

    #[test]
    fn test_best_odds_ignores_other_bet_types_and_keeps_first_on_tie() {
        let mut d = detail(Some(PredictedWinner::NoWinner));
        d.bookmakers = vec![
            bookmaker("First", MATCH_WINNER_BET, &[("Draw", "3.40")]),
            bookmaker("Second", MATCH_WINNER_BET, &[("Draw", "3.4")]),
            bookmaker("Goals", "Goals Over/Under", &[("Draw", "9.0")]),
        ];
        assert_eq!(
            best_odds(&d),
            Some(BestOdds { odd: "3.40".into(), bookmaker: "First".into() })
        );
    }

    #[test]
    fn test_best_odds_none_without_outcome_or_offers() {
        let mut unknown = detail(Some(PredictedWinner::Team(99)));
        unknown.bookmakers = vec![bookmaker("Bet365", MATCH_WINNER_BET, &[("Home", "1.8")])];
        assert_eq!(best_odds(&unknown), None);

        let no_offers = detail(Some(PredictedWinner::Team(10)));
        assert_eq!(best_odds(&no_offers), None);
    }

    #[test]
    fn test_recent_form_filter_and_page_size() {
        let entries: Vec<FormEntry> = (0..8)
            .map(|n| form(Side::Home, n))
            .chain((8..16).map(|n| form(Side::Away, n)))
            .collect();

        let home = filter_recent_form(&entries, FormFilter::Home, false);
        assert_eq!(home.len(), 5);
        assert!(home.iter().all(|e| e.side == Some(Side::Home)));

        let home_more = filter_recent_form(&entries, FormFilter::Home, true);
        assert_eq!(home_more.len(), 8);
        assert!(home_more.iter().all(|e| e.side == Some(Side::Home)));

        let all_more = filter_recent_form(&entries, FormFilter::All, true);
        assert_eq!(all_more.len(), 10);
        assert_eq!(all_more[0].fixture_id, Some(0));
    }

    #[test]
    fn test_form_line() {
        let entry = FormEntry {
            date: parse_date("2024-04-20T14:00:00+00:00"),
            opponent: "Chelsea".into(),
            side: Some(Side::Away),
            ..Default::default()
        };
        assert_eq!(form_line(&entry), "2024-04-20 vs Chelsea (Away)");
    }

    #[test]
    fn test_sort_fixtures_by_date_ascending() {
        let fixture = |id, date: &str| Fixture { id, date: parse_date(date), ..Default::default() };
        let mut fixtures = vec![
            fixture(1, "2024-05-02"),
            fixture(2, "not a date"),
            fixture(3, "2024-05-01"),
        ];
        sort_fixtures_by_date(&mut fixtures);
        let ids: Vec<u32> = fixtures.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_stat_formatting() {
        assert_eq!(format_decimal(Some(4.256)), "4.26");
        assert_eq!(format_decimal(None), "N/A");
        assert_eq!(format_percentage(Some(81.5)), "81.50%");
        assert_eq!(format_percentage(None), "N/A");
        assert_eq!(format_count(None), "0");
        assert_eq!(format_share(Some(45.0)), "45%");
        assert_eq!(format_stat_value(Some(27.0)), "27");
        assert_eq!(format_stat_value(Some(7.35)), "7.35");
        assert_eq!(format_stat_value(None), "0");
    }

    #[test]
    fn test_team_stat_comparison_pairs_rows() {
        let home = TeamStatistics { wins: 20, average_tackles: Some(15.5), ..Default::default() };
        let away = TeamStatistics { wins: 12, ..Default::default() };
        let rows = team_stat_comparison(&home, &away);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[1], StatComparison { label: "Wins".into(), home: "20".into(), away: "12".into() });
        assert_eq!(rows[9].home, "15.50");
        assert_eq!(rows[9].away, "N/A");
    }

    #[test]
    fn test_player_stat_sections_default_to_zero() {
        let sections = player_stat_sections(&PlayerStatistics {
            goals_total: Some(12),
            ..Default::default()
        });
        let goals = sections.iter().find(|s| s.title == "Goals & Assists").unwrap();
        assert_eq!(goals.rows[0], ("Goals", "12".to_string()));
        assert_eq!(goals.rows[1], ("Assists", "0".to_string()));
        assert_eq!(sections.len(), 9);
    }
}
