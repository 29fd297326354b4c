//! Agent composition win rates per map.

use std::collections::HashMap;

use crate::models::{AgentPick, Composition, CompositionStat, MatchRound, TEAM_SIZE};

use super::{rate, OutcomeTally};

/// Maps that have at least one valid composition block, sorted ascending.
pub fn composition_maps(picks: &[AgentPick]) -> Vec<String> {
    let mut maps: Vec<String> = picks
        .chunks_exact(TEAM_SIZE)
        .filter(|block| block_is_valid(block))
        .map(|block| block[0].map.clone())
        .collect();
    maps.sort();
    maps.dedup();
    maps
}

/// Top composition win rates for one map.
///
/// The player table is scanned in fixed non-overlapping windows of five
/// consecutive rows. A window only counts when all five rows share one map
/// and one result; a window with even a single mismatched row contributes
/// nothing at all. Valid blocks must additionally be corroborated by at
/// least one record in `rounds` with the same map and result — `rounds` is
/// expected to already carry the active date filter, which keeps blocks
/// from out-of-scope scrims out of the ranking.
///
/// Compositions are ranked by win rate descending and cut to `top`. Ties
/// keep first-appearance order (a stable, chosen rule, not an inherent
/// one).
pub fn top_compositions(
    picks: &[AgentPick],
    rounds: &[MatchRound],
    map: &str,
    top: usize,
) -> Vec<CompositionStat> {
    let mut groups: Vec<(Composition, OutcomeTally)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for block in picks.chunks_exact(TEAM_SIZE) {
        if !block_is_valid(block) || block[0].map != map {
            continue;
        }

        let outcome = block[0].outcome;
        let corroborated = rounds
            .iter()
            .any(|r| r.map == block[0].map && r.outcome == outcome);
        if !corroborated {
            continue;
        }

        let composition = Composition::new(block.iter().map(|p| p.agent.clone()).collect());
        let slot = *index.entry(composition.key()).or_insert_with(|| {
            groups.push((composition, OutcomeTally::default()));
            groups.len() - 1
        });
        groups[slot].1.push(outcome);
    }

    let mut stats: Vec<CompositionStat> = groups
        .into_iter()
        .map(|(composition, tally)| CompositionStat {
            composition,
            games: tally.games,
            wins: tally.wins,
            draws: tally.draws,
            losses: tally.losses,
            win_rate: rate(tally.wins, tally.games),
        })
        .collect();

    // Stable sort keeps first-appearance order on ties
    stats.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats.truncate(top);
    stats
}

fn block_is_valid(block: &[AgentPick]) -> bool {
    let first = &block[0];
    block
        .iter()
        .all(|pick| pick.map == first.map && pick.outcome == first.outcome)
}
