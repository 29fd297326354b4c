//! Statistics calculation engine.
//!
//! Computes derived metrics from the loaded scrim tables:
//! - Per-map game outcomes and win rates
//! - Attack/defence round win rates derived from half splits
//! - Agent composition win rates
//! - Pistol round win rates and second-round conversions
//! - Per-player role aggregates and benchmark comparison
//!
//! Every function here is pure: immutable inputs in, a new derived table
//! out. Re-running an aggregator on the same input yields identical output.

use crate::models::Outcome;

mod benchmarks;
mod compositions;
mod outcomes;
mod pistols;
mod players;
mod sides;

pub use benchmarks::{aggregate_player_role, radar_comparison};
pub use compositions::{composition_maps, top_compositions};
pub use outcomes::aggregate_outcomes;
pub use pistols::{conversion_split, pistol_win_rates};
pub use players::aggregate_agent_stats;
pub use sides::aggregate_round_stats;

/// Ratio as a fraction, or `None` when the denominator is zero.
///
/// The `None` is a real no-data marker: a map with zero games has no win
/// rate, which is not the same thing as a 0% win rate.
pub fn rate(numerator: u32, denominator: u32) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(f64::from(numerator) / f64::from(denominator))
    }
}

/// Mean of the present values, or `None` when nothing is present.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

/// Win/draw/loss counter shared by the per-map aggregators.
///
/// Unresolved outcomes count toward `games` but toward none of the three
/// buckets, so `wins + draws + losses <= games`.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct OutcomeTally {
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl OutcomeTally {
    pub fn push(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Unknown => {}
        }
    }
}
