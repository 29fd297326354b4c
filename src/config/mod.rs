//! Configuration loading and validation.
//!
//! The calibration tables (agent roles, role benchmarks, metric ceilings)
//! live here rather than in the aggregation code: they are a calibration
//! choice, not a law, and can be overridden from the config file without
//! touching any statistics logic.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Metric, Role};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Calibration tables for composition ranking and benchmark comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// How many compositions the ranking keeps
    #[serde(default = "default_top_compositions")]
    pub top_compositions: usize,

    /// Agent name to role. Agents absent here cannot be benchmarked.
    #[serde(default = "default_agent_roles")]
    pub agent_roles: HashMap<String, Role>,

    /// Per-role benchmark reference vectors
    #[serde(default = "default_role_benchmarks")]
    pub benchmarks: HashMap<Role, BTreeMap<Metric, f64>>,

    /// Per-metric upper bounds used to put player and benchmark values on
    /// a common 0–1 scale
    #[serde(default = "default_metric_ceilings")]
    pub ceilings: BTreeMap<Metric, f64>,
}

fn default_top_compositions() -> usize {
    15
}

fn default_agent_roles() -> HashMap<String, Role> {
    use Role::*;
    [
        ("Jett", Duelist),
        ("Raze", Duelist),
        ("Reyna", Duelist),
        ("Yoru", Duelist),
        ("Phoenix", Duelist),
        ("Iso", Duelist),
        ("Waylay", Duelist),
        ("Neon", Duelist),
        ("Skye", Initiator),
        ("KAY/O", Initiator),
        ("Breach", Initiator),
        ("Fade", Initiator),
        ("Sova", Initiator),
        ("Gekko", Initiator),
        ("Tejo", Initiator),
        ("Omen", Controller),
        ("Brimstone", Controller),
        ("Astra", Controller),
        ("Viper", Controller),
        ("Harbor", Controller),
        ("Clove", Controller),
        ("Killjoy", Sentinel),
        ("Cypher", Sentinel),
        ("Chamber", Sentinel),
        ("Sage", Sentinel),
        ("Deadlock", Sentinel),
        ("Vyse", Sentinel),
    ]
    .into_iter()
    .map(|(agent, role)| (agent.to_string(), role))
    .collect()
}

fn default_role_benchmarks() -> HashMap<Role, BTreeMap<Metric, f64>> {
    use Metric::*;
    let duelist = [
        (Acs, 240.0),
        (Kpr, 0.90),
        (Fbsr, 0.55),
        (Fkpr, 0.18),
        (AtkEntry, 0.55),
    ];
    let initiator = [
        (Acs, 196.0),
        (Kpr, 0.90),
        (Fd, 2.0),
        (KaPerRound, 1.0),
        (Assists, 10.0),
    ];
    let controller = [
        (Acs, 203.0),
        (Kpr, 0.90),
        (Fd, 2.0),
        (KaPerRound, 1.0),
        (MultiKills, 0.25),
    ];
    let sentinel = [
        (Acs, 200.0),
        (Kpr, 0.90),
        (Fd, 2.0),
        (MultiKills, 0.25),
        (AnchorTime, 48.0),
    ];

    [
        (Role::Duelist, duelist.into_iter().collect()),
        (Role::Initiator, initiator.into_iter().collect()),
        (Role::Controller, controller.into_iter().collect()),
        (Role::Sentinel, sentinel.into_iter().collect()),
    ]
    .into_iter()
    .collect()
}

fn default_metric_ceilings() -> BTreeMap<Metric, f64> {
    use Metric::*;
    [
        (Acs, 300.0),
        (KdRatio, 2.0),
        (FkPerRound, 0.3),
        (KaPerRound, 1.2),
        (Kpr, 1.2),
        (Fbsr, 1.0),
        (Fkpr, 0.3),
        (AtkEntry, 1.0),
        (Fd, 20.0),
        (Assists, 20.0),
        (MultiKills, 0.3),
        (AnchorTime, 80.0),
    ]
    .into_iter()
    .collect()
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            top_compositions: default_top_compositions(),
            agent_roles: default_agent_roles(),
            benchmarks: default_role_benchmarks(),
            ceilings: default_metric_ceilings(),
        }
    }
}

impl CalibrationConfig {
    /// Role for an agent, `None` when the agent is not in the table.
    pub fn role_of(&self, agent: &str) -> Option<Role> {
        self.agent_roles.get(agent).copied()
    }

    /// Benchmark vector for a role.
    pub fn benchmark(&self, role: Role) -> Option<&BTreeMap<Metric, f64>> {
        self.benchmarks.get(&role)
    }

    /// Normalization ceiling for a metric.
    pub fn ceiling(&self, metric: Metric) -> Option<f64> {
        self.ceilings.get(&metric).copied()
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_rounds_file")]
    pub rounds_file: String,

    #[serde(default = "default_players_file")]
    pub players_file: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub calibration: CalibrationConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_rounds_file() -> String {
    "rounds.csv".to_string()
}

fn default_players_file() -> String {
    "players.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rounds_file: default_rounds_file(),
            players_file: default_players_file(),
            log_level: default_log_level(),
            calibration: CalibrationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calibration.top_compositions == 0 {
            return Err(ConfigError::ValidationError(
                "top_compositions must be greater than 0".to_string(),
            ));
        }

        for (metric, ceiling) in &self.calibration.ceilings {
            if *ceiling <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "ceiling for {} must be greater than 0",
                    metric
                )));
            }
        }

        for (role, benchmark) in &self.calibration.benchmarks {
            for metric in benchmark.keys() {
                if !self.calibration.ceilings.contains_key(metric) {
                    return Err(ConfigError::ValidationError(format!(
                        "{} benchmark uses {} but no ceiling is configured",
                        role, metric
                    )));
                }
            }
        }

        Ok(())
    }
}
