//! Per-agent stat lines for a single player.

use std::collections::BTreeMap;

use crate::models::{AgentPick, AgentStatLine};

use super::{mean, rate};

/// Aggregate a player's records into one stat line per agent.
///
/// Counts are pooled sums; ACS is the mean over the agent's rows. The
/// derived ratios use the pooled sums, so a 0-death agent reports an
/// undefined K/D rather than an infinite one.
pub fn aggregate_agent_stats(picks: &[AgentPick]) -> Vec<AgentStatLine> {
    let mut by_agent: BTreeMap<&str, Vec<&AgentPick>> = BTreeMap::new();
    for pick in picks {
        by_agent.entry(&pick.agent).or_default().push(pick);
    }

    by_agent
        .into_iter()
        .map(|(agent, rows)| {
            let rounds: u32 = rows.iter().map(|p| p.rounds).sum();
            let kills: u32 = rows.iter().map(|p| p.kills).sum();
            let deaths: u32 = rows.iter().map(|p| p.deaths).sum();
            let assists: u32 = rows.iter().map(|p| p.assists).sum();

            AgentStatLine {
                agent: agent.to_string(),
                rounds,
                kills,
                deaths,
                assists,
                first_kills: rows.iter().map(|p| p.first_kills).sum(),
                plants: rows.iter().map(|p| p.plants).sum(),
                acs: mean(rows.iter().filter_map(|p| p.acs)),
                kd_ratio: rate(kills, deaths),
                ka_per_round: rate(kills + assists, rounds),
            }
        })
        .collect()
}
