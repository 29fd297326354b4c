//! Player-level per-map record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Outcome;

/// One row of the player-level table: one player on one agent for one
/// map instance.
///
/// Count columns are plain sums downstream, so a bad cell degrades to 0.
/// Rate-like columns stay optional so missing data is excluded from means
/// instead of dragging them toward zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPick {
    pub player: String,

    pub agent: String,

    pub map: String,

    pub date: NaiveDate,

    /// Map result, shared by the five rows of a composition block
    pub outcome: Outcome,

    pub rounds: u32,

    pub kills: u32,

    pub deaths: u32,

    pub assists: u32,

    pub first_kills: u32,

    pub plants: u32,

    /// Average combat score
    pub acs: Option<f64>,

    /// First blood success rate
    pub fbsr: Option<f64>,

    /// First kills per round
    pub fkpr: Option<f64>,

    /// Kills per round
    pub kpr: Option<f64>,

    /// Attack entry success
    pub atk_entry: Option<f64>,

    /// First deaths
    pub fd: Option<f64>,

    /// Multi-kill rounds
    pub multi_kills: Option<f64>,

    /// Site anchor time
    pub anchor_time: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_serialization() {
        let pick = AgentPick {
            player: "ominous".to_string(),
            agent: "Jett".to_string(),
            map: "Ascent".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            outcome: Outcome::Win,
            rounds: 24,
            kills: 20,
            deaths: 14,
            assists: 5,
            first_kills: 4,
            plants: 1,
            acs: Some(245.0),
            fbsr: Some(0.6),
            fkpr: None,
            kpr: Some(0.83),
            atk_entry: None,
            fd: Some(3.0),
            multi_kills: None,
            anchor_time: None,
        };

        let json = serde_json::to_string(&pick).unwrap();
        let back: AgentPick = serde_json::from_str(&json).unwrap();
        assert_eq!(back.agent, "Jett");
        assert_eq!(back.acs, Some(245.0));
        assert_eq!(back.fkpr, None);
    }
}
