//! Derived statistics models.
//!
//! Every rate here is `Option<f64>`: `None` is the explicit no-data marker
//! and is never collapsed into a zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Composition, Conversion, ConversionBucket};

/// Inclusive date range for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Check if a date falls within this range, both bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Per-map game outcome summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOutcome {
    pub map: String,

    /// Total grouped rows, including unresolved outcomes
    pub games: u32,

    pub wins: u32,

    pub draws: u32,

    pub losses: u32,

    /// wins / games as a fraction, `None` when games is 0
    pub win_rate: Option<f64>,
}

/// Per-map round-level summary.
///
/// Side and round win rates are fractions in [0,1]; post-plant values are
/// on the 0–100 display scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub map: String,

    pub games: u32,

    pub wins: u32,

    pub draws: u32,

    pub losses: u32,

    /// Mean derived attack round win rate
    pub attack_win_rate: Option<f64>,

    /// Mean derived defence round win rate
    pub defence_win_rate: Option<f64>,

    /// (attack + defence) / 2, `None` when either side has no data
    pub round_win_rate: Option<f64>,

    /// Mean attack post-plant success, percent
    pub atk_post_plant: Option<f64>,

    /// Mean defence retake success, percent
    pub def_post_plant: Option<f64>,
}

/// Per-map pistol round summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PistolStats {
    pub map: String,

    pub pistols_won: u32,

    /// Two opportunities per match instance
    pub pistols_played: u32,

    pub win_rate: Option<f64>,
}

/// One slice of a conversion distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionCount {
    pub outcome: Conversion,

    pub count: u32,

    /// Share of the bucket, percent
    pub share: f64,
}

/// Normalized second-round split within one pistol bucket on one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSplit {
    pub map: String,

    pub bucket: ConversionBucket,

    pub samples: u32,

    pub split: Vec<ConversionCount>,
}

/// Aggregated record for one composition on one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionStat {
    pub composition: Composition,

    pub games: u32,

    pub wins: u32,

    pub draws: u32,

    pub losses: u32,

    pub win_rate: Option<f64>,
}

/// Per-agent stat line for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatLine {
    pub agent: String,

    pub rounds: u32,

    pub kills: u32,

    pub deaths: u32,

    pub assists: u32,

    pub first_kills: u32,

    pub plants: u32,

    /// Mean combat score across the agent's rows
    pub acs: Option<f64>,

    /// Pooled kills / deaths, `None` on zero deaths
    pub kd_ratio: Option<f64>,

    /// Pooled (kills + assists) / rounds
    pub ka_per_round: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
        );
        assert!(range.contains(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
    }

    #[test]
    fn test_map_outcome_serialization() {
        let outcome = MapOutcome {
            map: "Ascent".to_string(),
            games: 4,
            wins: 2,
            draws: 1,
            losses: 1,
            win_rate: Some(0.5),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: MapOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn test_no_data_survives_serialization() {
        let stats = PistolStats {
            map: "Bind".to_string(),
            pistols_won: 0,
            pistols_played: 0,
            win_rate: None,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: PistolStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.win_rate, None);
    }
}
