//! Attack/defence round win rates and post-plant success per map.

use std::collections::BTreeMap;

use crate::models::{MatchRound, RoundStats, Side};

use super::{mean, OutcomeTally};

/// Round-level summary per map.
///
/// The attack and defence means are taken independently, each over the
/// records where the side rate could be derived, so the two denominators
/// can differ. The combined round win rate averages the two means and is
/// `None` whenever either side has no data — a one-sided map must not
/// read as a silently halved average.
///
/// Post-plant columns are averaged the same way and then scaled to the
/// 0–100 range exactly once: when every observed mean is at most 1.0 the
/// source was fractional and the result is multiplied by 100, otherwise
/// the source was already percent and is left alone.
pub fn aggregate_round_stats(rounds: &[MatchRound]) -> Vec<RoundStats> {
    let mut by_map: BTreeMap<&str, Vec<&MatchRound>> = BTreeMap::new();
    for round in rounds {
        by_map.entry(&round.map).or_default().push(round);
    }

    let mut stats: Vec<RoundStats> = by_map
        .into_iter()
        .map(|(map, group)| {
            let mut tally = OutcomeTally::default();
            for round in &group {
                tally.push(round.outcome);
            }

            let attack = mean(group.iter().filter_map(|r| r.side_win_rate(Side::Attack)));
            let defence = mean(group.iter().filter_map(|r| r.side_win_rate(Side::Defence)));
            let round_win_rate = match (attack, defence) {
                (Some(atk), Some(def)) => Some((atk + def) / 2.0),
                _ => None,
            };

            RoundStats {
                map: map.to_string(),
                games: tally.games,
                wins: tally.wins,
                draws: tally.draws,
                losses: tally.losses,
                attack_win_rate: attack,
                defence_win_rate: defence,
                round_win_rate,
                atk_post_plant: mean(group.iter().filter_map(|r| r.atk_post_plant)),
                def_post_plant: mean(group.iter().filter_map(|r| r.def_post_plant)),
            }
        })
        .collect();

    scale_post_plant(&mut stats);
    stats
}

/// One-shot fraction-vs-percent detection over the whole result set.
fn scale_post_plant(stats: &mut [RoundStats]) {
    let max = stats
        .iter()
        .flat_map(|s| [s.atk_post_plant, s.def_post_plant])
        .flatten()
        .fold(f64::NEG_INFINITY, f64::max);

    if max.is_finite() && max <= 1.0 {
        for stat in stats {
            stat.atk_post_plant = stat.atk_post_plant.map(|v| v * 100.0);
            stat.def_post_plant = stat.def_post_plant.map(|v| v * 100.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use chrono::NaiveDate;

    fn round(
        map: &str,
        start: Option<Side>,
        first: Option<f64>,
        second: Option<f64>,
    ) -> MatchRound {
        MatchRound {
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            map: map.to_string(),
            outcome: Outcome::Win,
            starting_side: start,
            first_half_win_rate: first,
            second_half_win_rate: second,
            first_pistol_won: None,
            second_pistol_won: None,
            atk_second_round: None,
            def_second_round: None,
            atk_post_plant: None,
            def_post_plant: None,
        }
    }

    #[test]
    fn test_side_means_use_start_side() {
        // Attack start: first half is the attack rate.
        // Defence start: first half is the defence rate.
        let rounds = vec![
            round("Ascent", Some(Side::Attack), Some(0.8), Some(0.4)),
            round("Ascent", Some(Side::Defence), Some(0.6), Some(0.2)),
        ];

        let stats = aggregate_round_stats(&rounds);
        let ascent = &stats[0];
        // Attack values: 0.8 (first record) and 0.2 (second record)
        assert_eq!(ascent.attack_win_rate, Some(0.5));
        // Defence values: 0.4 and 0.6
        assert_eq!(ascent.defence_win_rate, Some(0.5));
        assert_eq!(ascent.round_win_rate, Some(0.5));
    }

    #[test]
    fn test_null_rows_excluded_per_side() {
        let rounds = vec![
            round("Ascent", Some(Side::Attack), Some(0.8), Some(0.4)),
            round("Ascent", None, Some(0.9), Some(0.9)),
        ];

        let stats = aggregate_round_stats(&rounds);
        // The null-start record contributes to neither side mean
        assert_eq!(stats[0].attack_win_rate, Some(0.8));
        assert_eq!(stats[0].defence_win_rate, Some(0.4));
        assert_eq!(stats[0].games, 2);
    }

    #[test]
    fn test_one_sided_map_propagates_none() {
        // Second halves missing everywhere: no side rate can be derived at
        // all, so the combined rate must be None, not half of something.
        let rounds = vec![round("Ascent", Some(Side::Attack), Some(0.8), None)];
        let stats = aggregate_round_stats(&rounds);
        assert_eq!(stats[0].attack_win_rate, None);
        assert_eq!(stats[0].defence_win_rate, None);
        assert_eq!(stats[0].round_win_rate, None);
    }

    #[test]
    fn test_round_rate_is_mean_of_side_means() {
        // Two attack observations, one defence observation: the combined
        // rate averages the two means, not the three raw values.
        let rounds = vec![
            round("Ascent", Some(Side::Attack), Some(1.0), Some(0.0)),
            round("Ascent", Some(Side::Attack), Some(0.5), Some(0.0)),
        ];
        let stats = aggregate_round_stats(&rounds);
        assert_eq!(stats[0].attack_win_rate, Some(0.75));
        assert_eq!(stats[0].defence_win_rate, Some(0.0));
        assert_eq!(stats[0].round_win_rate, Some(0.375));
    }

    #[test]
    fn test_post_plant_fractional_scaled_once() {
        let mut a = round("Ascent", None, None, None);
        a.atk_post_plant = Some(0.7);
        a.def_post_plant = Some(0.3);
        let mut b = round("Ascent", None, None, None);
        b.atk_post_plant = Some(0.5);

        let stats = aggregate_round_stats(&[a, b]);
        assert_eq!(stats[0].atk_post_plant, Some(60.0));
        assert_eq!(stats[0].def_post_plant, Some(30.0));
    }

    #[test]
    fn test_post_plant_percent_left_alone() {
        let mut a = round("Ascent", None, None, None);
        a.atk_post_plant = Some(70.0);
        a.def_post_plant = Some(30.0);

        let stats = aggregate_round_stats(&[a]);
        assert_eq!(stats[0].atk_post_plant, Some(70.0));
        assert_eq!(stats[0].def_post_plant, Some(30.0));
    }

    #[test]
    fn test_post_plant_missing_everywhere() {
        let rounds = vec![round("Ascent", None, None, None)];
        let stats = aggregate_round_stats(&rounds);
        assert_eq!(stats[0].atk_post_plant, None);
        assert_eq!(stats[0].def_post_plant, None);
    }

    #[test]
    fn test_idempotent() {
        let rounds = vec![
            round("Ascent", Some(Side::Attack), Some(0.8), Some(0.4)),
            round("Bind", Some(Side::Defence), Some(0.6), Some(0.2)),
        ];
        assert_eq!(aggregate_round_stats(&rounds), aggregate_round_stats(&rounds));
    }
}
