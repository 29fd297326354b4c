//! Round-level match record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Conversion, Outcome, Side};

/// One row of the round-level table: a single team-map instance.
///
/// Half win rates are fractions in [0,1]. The first-half rate always belongs
/// to whichever side the team started on. Post-plant values keep the raw
/// scale found in the source; the aggregation layer resolves
/// fraction-vs-percent once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRound {
    /// Scrim date
    pub date: NaiveDate,

    /// Map name, compared exactly when grouping
    pub map: String,

    /// Map result
    pub outcome: Outcome,

    /// Side the team started on
    pub starting_side: Option<Side>,

    /// Round win rate over the first half
    pub first_half_win_rate: Option<f64>,

    /// Round win rate over the second half
    pub second_half_win_rate: Option<f64>,

    /// Pistol rounds won in the first half
    pub first_pistol_won: Option<u32>,

    /// Pistol rounds won in the second half
    pub second_pistol_won: Option<u32>,

    /// Second-round result after the attack pistol (WW/WL)
    pub atk_second_round: Option<Conversion>,

    /// Second-round result after the defence pistol (LL/LW)
    pub def_second_round: Option<Conversion>,

    /// Attack post-plant success
    pub atk_post_plant: Option<f64>,

    /// Defence retake success
    pub def_post_plant: Option<f64>,
}

impl MatchRound {
    /// Win rate this record contributes for `side`.
    ///
    /// Returns the first-half rate when the team started on `side`, the
    /// second-half rate otherwise. Returns `None` whenever the starting side
    /// or either half rate is absent.
    pub fn side_win_rate(&self, side: Side) -> Option<f64> {
        let start = self.starting_side?;
        let first = self.first_half_win_rate?;
        let second = self.second_half_win_rate?;
        if start == side {
            Some(first)
        } else {
            Some(second)
        }
    }

    /// Pistol rounds won across both halves. Absent cells contribute nothing.
    pub fn pistols_won(&self) -> u32 {
        self.first_pistol_won.unwrap_or(0) + self.second_pistol_won.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(start: Option<Side>, first: Option<f64>, second: Option<f64>) -> MatchRound {
        MatchRound {
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            map: "Ascent".to_string(),
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
    fn test_side_win_rate_attack_start() {
        let r = round(Some(Side::Attack), Some(0.75), Some(0.25));
        assert_eq!(r.side_win_rate(Side::Attack), Some(0.75));
        assert_eq!(r.side_win_rate(Side::Defence), Some(0.25));
    }

    #[test]
    fn test_side_win_rate_defence_start() {
        let r = round(Some(Side::Defence), Some(0.6), Some(0.4));
        assert_eq!(r.side_win_rate(Side::Attack), Some(0.4));
        assert_eq!(r.side_win_rate(Side::Defence), Some(0.6));
    }

    #[test]
    fn test_side_win_rate_missing_start_is_none() {
        let r = round(None, Some(0.6), Some(0.4));
        assert_eq!(r.side_win_rate(Side::Attack), None);
        assert_eq!(r.side_win_rate(Side::Defence), None);
    }

    #[test]
    fn test_side_win_rate_missing_half_is_none() {
        // Either missing half makes the derivation unusable, even for the
        // side whose half is present.
        let r = round(Some(Side::Attack), Some(0.6), None);
        assert_eq!(r.side_win_rate(Side::Attack), None);

        let r = round(Some(Side::Attack), None, Some(0.4));
        assert_eq!(r.side_win_rate(Side::Defence), None);
    }

    #[test]
    fn test_pistols_won_absent_cells() {
        let mut r = round(None, None, None);
        r.first_pistol_won = Some(1);
        assert_eq!(r.pistols_won(), 1);
        r.second_pistol_won = Some(1);
        assert_eq!(r.pistols_won(), 2);
    }

    #[test]
    fn test_round_serialization() {
        let r = round(Some(Side::Attack), Some(0.5), Some(0.5));
        let json = serde_json::to_string(&r).unwrap();
        let back: MatchRound = serde_json::from_str(&json).unwrap();
        assert_eq!(back.map, "Ascent");
        assert_eq!(back.starting_side, Some(Side::Attack));
    }
}
