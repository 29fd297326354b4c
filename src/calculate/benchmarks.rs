//! Role aggregation and benchmark normalization.

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::CalibrationConfig;
use crate::models::{AgentPick, Metric, RadarAxis, RadarComparison, Role, RoleAggregate};

use super::{mean, rate};

/// Aggregate a player's records over one role.
///
/// Only rows whose agent maps to `role` contribute; agents missing from
/// the role table are excluded rather than guessed. Reducers differ by
/// metric: FK and K+A are pooled per-round rates (a mean of means would
/// overweight short maps), K/D is the pooled kill/death ratio with an
/// explicit undefined result on zero deaths, and everything else is an
/// unweighted mean over the rows that carry the value.
pub fn aggregate_player_role(
    picks: &[AgentPick],
    role: Role,
    calibration: &CalibrationConfig,
) -> RoleAggregate {
    let rows: Vec<&AgentPick> = picks
        .iter()
        .filter(|p| calibration.role_of(&p.agent) == Some(role))
        .collect();

    let rounds: u32 = rows.iter().map(|p| p.rounds).sum();
    let kills: u32 = rows.iter().map(|p| p.kills).sum();
    let deaths: u32 = rows.iter().map(|p| p.deaths).sum();
    let assists: u32 = rows.iter().map(|p| p.assists).sum();
    let first_kills: u32 = rows.iter().map(|p| p.first_kills).sum();

    let mut values: BTreeMap<Metric, Option<f64>> = BTreeMap::new();
    values.insert(Metric::FkPerRound, rate(first_kills, rounds));
    values.insert(Metric::KaPerRound, rate(kills + assists, rounds));
    values.insert(Metric::KdRatio, rate(kills, deaths));
    values.insert(Metric::Acs, mean(rows.iter().filter_map(|p| p.acs)));
    values.insert(Metric::Kpr, mean(rows.iter().filter_map(|p| p.kpr)));
    values.insert(Metric::Fbsr, mean(rows.iter().filter_map(|p| p.fbsr)));
    values.insert(Metric::Fkpr, mean(rows.iter().filter_map(|p| p.fkpr)));
    values.insert(
        Metric::AtkEntry,
        mean(rows.iter().filter_map(|p| p.atk_entry)),
    );
    values.insert(Metric::Fd, mean(rows.iter().filter_map(|p| p.fd)));
    values.insert(
        Metric::Assists,
        mean(rows.iter().map(|p| f64::from(p.assists))),
    );
    values.insert(
        Metric::MultiKills,
        mean(rows.iter().filter_map(|p| p.multi_kills)),
    );
    values.insert(
        Metric::AnchorTime,
        mean(rows.iter().filter_map(|p| p.anchor_time)),
    );

    RoleAggregate {
        role,
        rows: rows.len() as u32,
        values,
    }
}

/// Put the player aggregate and the role benchmark on a common scale.
///
/// Each axis divides both values by the metric's configured ceiling. A
/// metric the player has no data for is zero-filled on the scaled axis —
/// the raw `player` field stays `None` so the distinction survives to the
/// caller. Returns `None` when the role has no benchmark vector at all.
pub fn radar_comparison(
    aggregate: &RoleAggregate,
    calibration: &CalibrationConfig,
) -> Option<RadarComparison> {
    let benchmark = calibration.benchmark(aggregate.role)?;

    let mut axes = Vec::with_capacity(benchmark.len());
    for (&metric, &reference) in benchmark {
        let Some(ceiling) = calibration.ceiling(metric) else {
            warn!("No ceiling configured for {}; skipping axis", metric);
            continue;
        };

        let player = aggregate.value(metric);
        let filled = player.unwrap_or(0.0);
        axes.push(RadarAxis {
            metric,
            player,
            benchmark: reference,
            player_scaled: filled / ceiling,
            benchmark_scaled: reference / ceiling,
            delta: filled - reference,
        });
    }

    if axes.is_empty() {
        None
    } else {
        Some(RadarComparison {
            role: aggregate.role,
            axes,
        })
    }
}
