//! Role and benchmark comparison models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coarse agent classification used to select a comparable benchmark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Duelist,
    Initiator,
    Controller,
    Sentinel,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Duelist,
        Role::Initiator,
        Role::Controller,
        Role::Sentinel,
    ];

    /// Parse a role name case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "duelist" => Some(Role::Duelist),
            "initiator" => Some(Role::Initiator),
            "controller" => Some(Role::Controller),
            "sentinel" => Some(Role::Sentinel),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Duelist => write!(f, "Duelist"),
            Role::Initiator => write!(f, "Initiator"),
            Role::Controller => write!(f, "Controller"),
            Role::Sentinel => write!(f, "Sentinel"),
        }
    }
}

/// A benchmarkable player metric.
///
/// The serialized names double as configuration keys for the benchmark
/// and ceiling tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Metric {
    #[serde(rename = "ACS")]
    Acs,
    #[serde(rename = "KPR")]
    Kpr,
    #[serde(rename = "K/D Ratio")]
    KdRatio,
    #[serde(rename = "K+A per Round")]
    KaPerRound,
    #[serde(rename = "FK")]
    FkPerRound,
    #[serde(rename = "FBSR")]
    Fbsr,
    #[serde(rename = "FKPR")]
    Fkpr,
    #[serde(rename = "Atk Entry")]
    AtkEntry,
    #[serde(rename = "FD")]
    Fd,
    #[serde(rename = "Assists")]
    Assists,
    #[serde(rename = "Multi Kills")]
    MultiKills,
    #[serde(rename = "Anchor Time")]
    AnchorTime,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Metric::Acs => "ACS",
            Metric::Kpr => "KPR",
            Metric::KdRatio => "K/D Ratio",
            Metric::KaPerRound => "K+A per Round",
            Metric::FkPerRound => "FK",
            Metric::Fbsr => "FBSR",
            Metric::Fkpr => "FKPR",
            Metric::AtkEntry => "Atk Entry",
            Metric::Fd => "FD",
            Metric::Assists => "Assists",
            Metric::MultiKills => "Multi Kills",
            Metric::AnchorTime => "Anchor Time",
        };
        write!(f, "{}", label)
    }
}

/// A player's metric values aggregated over one role.
///
/// `None` means the metric had no data at all (or an undefined ratio, like
/// K/D over zero deaths). Zero-filling for the radar scale happens at
/// normalization, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAggregate {
    pub role: Role,

    /// Number of agent-rows that contributed
    pub rows: u32,

    pub values: BTreeMap<Metric, Option<f64>>,
}

impl RoleAggregate {
    /// Aggregated value for a metric, flattened across "metric not
    /// computed" and "metric had no data".
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }
}

/// One radar axis: a metric with player and benchmark values on both the
/// raw and the common 0–1 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub metric: Metric,

    /// Raw aggregated player value, `None` when the player had no data
    pub player: Option<f64>,

    /// Raw benchmark reference value
    pub benchmark: f64,

    /// Player value over the metric ceiling, missing data zero-filled
    pub player_scaled: f64,

    /// Benchmark value over the metric ceiling
    pub benchmark_scaled: f64,

    /// Player minus benchmark on the raw scale, missing data zero-filled
    pub delta: f64,
}

/// A player's radar comparison against a role benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarComparison {
    pub role: Role,

    pub axes: Vec<RadarAxis>,
}
