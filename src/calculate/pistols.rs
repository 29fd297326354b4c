//! Pistol round win rates and second-round conversions.

use std::collections::BTreeMap;

use crate::models::{ConversionBucket, ConversionCount, ConversionSplit, MatchRound, PistolStats};

use super::rate;

/// Pistol win rate per map.
///
/// Each match instance contributes exactly two pistol opportunities (one
/// per half), so the denominator is twice the record count. Records with
/// absent pistol cells still count their opportunities.
pub fn pistol_win_rates(rounds: &[MatchRound]) -> Vec<PistolStats> {
    let mut by_map: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

    for round in rounds {
        let entry = by_map.entry(&round.map).or_default();
        entry.0 += round.pistols_won();
        entry.1 += 1;
    }

    by_map
        .into_iter()
        .map(|(map, (won, records))| {
            let played = records * 2;
            PistolStats {
                map: map.to_string(),
                pistols_won: won,
                pistols_played: played,
                win_rate: rate(won, played),
            }
        })
        .collect()
}

/// Normalized second-round split for one map and one pistol bucket.
///
/// Pools the attack and defence conversion columns, keeps the bucket's two
/// outcomes and returns their percentage shares. A map with no matching
/// rows returns `None` — there is no such thing as a 0/0 split.
pub fn conversion_split(
    rounds: &[MatchRound],
    map: &str,
    bucket: ConversionBucket,
) -> Option<ConversionSplit> {
    let [first, second] = bucket.outcomes();
    let mut counts = [0u32; 2];

    let pooled = rounds
        .iter()
        .filter(|r| r.map == map)
        .flat_map(|r| [r.atk_second_round, r.def_second_round])
        .flatten()
        .filter(|c| c.bucket() == bucket);

    for conversion in pooled {
        if conversion == first {
            counts[0] += 1;
        } else {
            counts[1] += 1;
        }
    }

    let samples = counts[0] + counts[1];
    if samples == 0 {
        return None;
    }

    let split = [(first, counts[0]), (second, counts[1])]
        .into_iter()
        .map(|(outcome, count)| ConversionCount {
            outcome,
            count,
            share: f64::from(count) / f64::from(samples) * 100.0,
        })
        .collect();

    Some(ConversionSplit {
        map: map.to_string(),
        bucket,
        samples,
        split,
    })
}
