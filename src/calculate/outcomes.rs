//! Per-map game outcome aggregation.

use std::collections::BTreeMap;

use crate::models::{MapOutcome, MatchRound};

use super::{rate, OutcomeTally};

/// Games, wins, draws, losses and win rate per map.
///
/// Maps are grouped by exact name and emitted in ascending name order, so
/// output is deterministic. Callers that want a different ordering re-sort
/// the result.
pub fn aggregate_outcomes(rounds: &[MatchRound]) -> Vec<MapOutcome> {
    let mut by_map: BTreeMap<&str, OutcomeTally> = BTreeMap::new();

    for round in rounds {
        by_map.entry(&round.map).or_default().push(round.outcome);
    }

    by_map
        .into_iter()
        .map(|(map, tally)| MapOutcome {
            map: map.to_string(),
            games: tally.games,
            wins: tally.wins,
            draws: tally.draws,
            losses: tally.losses,
            win_rate: rate(tally.wins, tally.games),
        })
        .collect()
}
