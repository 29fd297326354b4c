//! Match outcome, starting side and second-round conversion enums.

use serde::{Deserialize, Serialize};

/// Result of one team-map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
    /// Source cell did not resolve to win/draw/loss.
    #[default]
    Unknown,
}

impl Outcome {
    /// Parse a source cell case-insensitively. Unresolvable values become
    /// `Unknown` rather than failing the row.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "win" => Outcome::Win,
            "draw" => Outcome::Draw,
            "loss" => Outcome::Loss,
            _ => Outcome::Unknown,
        }
    }

    /// Returns true if the outcome resolved to one of the three kinds.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Unknown)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which side a team started the map on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Attack,
    Defence,
}

impl Side {
    /// Parse a source cell case-insensitively. Accepts both the British and
    /// American spelling of defence.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "attack" => Some(Side::Attack),
            "defence" | "defense" => Some(Side::Defence),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Attack => write!(f, "Attack"),
            Side::Defence => write!(f, "Defence"),
        }
    }
}

/// Second-round result following a pistol round.
///
/// The first letter is the pistol result, the second the next round:
/// `WW`/`WL` follow a won attack pistol, `LL`/`LW` a lost defence pistol
/// (`LW` is the comeback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conversion {
    WW,
    WL,
    LL,
    LW,
}

impl Conversion {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "WW" => Some(Conversion::WW),
            "WL" => Some(Conversion::WL),
            "LL" => Some(Conversion::LL),
            "LW" => Some(Conversion::LW),
            _ => None,
        }
    }

    /// The 2-state bucket this conversion belongs to.
    pub fn bucket(&self) -> ConversionBucket {
        match self {
            Conversion::WW | Conversion::WL => ConversionBucket::Win,
            Conversion::LL | Conversion::LW => ConversionBucket::Loss,
        }
    }
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conversion::WW => write!(f, "WW"),
            Conversion::WL => write!(f, "WL"),
            Conversion::LL => write!(f, "LL"),
            Conversion::LW => write!(f, "LW"),
        }
    }
}

/// Pistol-round condition for a conversion distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionBucket {
    /// Won the pistol: splits into WW vs WL.
    Win,
    /// Lost the pistol: splits into LL vs LW.
    Loss,
}

impl ConversionBucket {
    /// The two conversion outcomes that make up this bucket.
    pub fn outcomes(&self) -> [Conversion; 2] {
        match self {
            ConversionBucket::Win => [Conversion::WW, Conversion::WL],
            ConversionBucket::Loss => [Conversion::LL, Conversion::LW],
        }
    }
}
