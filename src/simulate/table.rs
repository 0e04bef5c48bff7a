//! Season table builder.
//!
//! Plays a double round-robin between the given clubs and ranks the result.

use std::cmp::Ordering;
use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::generate_result;
use super::strength::calculate_strength;
use super::PreviousStandings;
use crate::models::{Club, ClubId, Fixture, LeagueRules, StandingRow, StandingStatus};

/// Ranked standings plus every fixture that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonOutcome {
    pub standings: Vec<StandingRow>,
    pub fixtures: Vec<Fixture>,
}

/// Draw one strength per club for the whole season, in input order.
pub fn season_strengths(
    clubs: &[Club],
    rules: &LeagueRules,
    previous: &PreviousStandings,
    rng: &mut impl Rng,
) -> Vec<f64> {
    clubs
        .iter()
        .map(|club| calculate_strength(club, previous.position_of(&club.id), rules.tier, rng))
        .collect()
}

/// Play every ordered pair once with the first club at home.
pub fn play_round_robin(clubs: &[Club], strengths: &[f64], rng: &mut impl Rng) -> Vec<Fixture> {
    let n = clubs.len();
    let mut fixtures = Vec::with_capacity(n * n.saturating_sub(1));

    for (i, home) in clubs.iter().enumerate() {
        for (j, away) in clubs.iter().enumerate() {
            if i == j {
                continue;
            }
            fixtures.push(Fixture {
                home_club_id: home.id.clone(),
                away_club_id: away.id.clone(),
                result: generate_result(strengths[i], strengths[j], rng),
            });
        }
    }

    fixtures
}

/// Sum fixtures into one unranked row per club, in input order.
pub fn aggregate(clubs: &[Club], fixtures: &[Fixture]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = clubs
        .iter()
        .map(|c| StandingRow::new(c.id.clone(), c.name.clone()))
        .collect();
    let index: HashMap<&ClubId, usize> =
        clubs.iter().enumerate().map(|(i, c)| (&c.id, i)).collect();

    for fixture in fixtures {
        if let Some(&home) = index.get(&fixture.home_club_id) {
            rows[home].record_home(&fixture.result);
        }
        if let Some(&away) = index.get(&fixture.away_club_id) {
            rows[away].record_away(&fixture.result);
        }
    }

    rows
}

/// Table order: points, goal difference, goals for (all descending), then
/// club id ascending.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.club_id.cmp(&b.club_id))
}

/// Sort rows into table order and set their 1-based positions.
pub fn rank(rows: &mut [StandingRow]) {
    rows.sort_by(compare_rows);
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }
}

/// Classify ranked rows. Champion beats promoted beats relegated when the
/// configured spots overlap in a small league.
pub fn assign_statuses(rows: &mut [StandingRow], rules: &LeagueRules) {
    let n = rows.len() as u32;
    let relegation_start = n.saturating_sub(rules.relegation_spots);

    for (i, row) in rows.iter_mut().enumerate() {
        let rank = i as u32 + 1;
        row.status = if rank == 1 {
            StandingStatus::Champion
        } else if rules.tier > 1 && rank <= 1 + rules.promotion_spots {
            StandingStatus::Promoted
        } else if rank > relegation_start {
            StandingStatus::Relegated
        } else {
            StandingStatus::MidTable
        };
    }
}

/// Simulate a full season. Accepts any number of clubs; fewer than two
/// simply plays no fixtures.
pub fn build_table(
    clubs: &[Club],
    rules: &LeagueRules,
    previous: &PreviousStandings,
    rng: &mut impl Rng,
) -> SeasonOutcome {
    let strengths = season_strengths(clubs, rules, previous, rng);
    for (club, strength) in clubs.iter().zip(&strengths) {
        debug!(club = %club.name, strength, "Season strength");
    }

    let fixtures = play_round_robin(clubs, &strengths, rng);
    let mut standings = aggregate(clubs, &fixtures);
    rank(&mut standings);
    assign_statuses(&mut standings, rules);

    SeasonOutcome {
        standings,
        fixtures,
    }
}
