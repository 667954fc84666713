use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CombinedEventError;

/// Whether a discipline is decided by a time or by a measured mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisciplineKind {
    Track,
    Field,
}

/// Unit the scoring tables expect a mark in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkUnit {
    Seconds,
    Meters,
    Centimeters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Discipline {
    #[serde(rename = "60M")]
    Sprint60,
    #[serde(rename = "100M")]
    Sprint100,
    #[serde(rename = "200M")]
    Sprint200,
    #[serde(rename = "400M")]
    Run400,
    #[serde(rename = "600M")]
    Run600,
    #[serde(rename = "800M")]
    Run800,
    #[serde(rename = "1000M")]
    Run1000,
    #[serde(rename = "1500M")]
    Run1500,
    #[serde(rename = "60MH")]
    Hurdles60,
    #[serde(rename = "100MH")]
    Hurdles100,
    #[serde(rename = "110MH")]
    Hurdles110,
    #[serde(rename = "HJ")]
    HighJump,
    #[serde(rename = "PV")]
    PoleVault,
    #[serde(rename = "LJ")]
    LongJump,
    #[serde(rename = "SP")]
    ShotPut,
    #[serde(rename = "SP_3KG")]
    ShotPut3Kg,
    #[serde(rename = "SP_4KG")]
    ShotPut4Kg,
    #[serde(rename = "DT")]
    DiscusThrow,
    #[serde(rename = "JT")]
    JavelinThrow,
    #[serde(rename = "HT")]
    HammerThrow,
    #[serde(rename = "WT")]
    WeightThrow,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sprint60 => "60M",
            Self::Sprint100 => "100M",
            Self::Sprint200 => "200M",
            Self::Run400 => "400M",
            Self::Run600 => "600M",
            Self::Run800 => "800M",
            Self::Run1000 => "1000M",
            Self::Run1500 => "1500M",
            Self::Hurdles60 => "60MH",
            Self::Hurdles100 => "100MH",
            Self::Hurdles110 => "110MH",
            Self::HighJump => "HJ",
            Self::PoleVault => "PV",
            Self::LongJump => "LJ",
            Self::ShotPut => "SP",
            Self::ShotPut3Kg => "SP_3KG",
            Self::ShotPut4Kg => "SP_4KG",
            Self::DiscusThrow => "DT",
            Self::JavelinThrow => "JT",
            Self::HammerThrow => "HT",
            Self::WeightThrow => "WT",
        }
    }

    pub fn all() -> &'static [Discipline] {
        &[
            Self::Sprint60,
            Self::Sprint100,
            Self::Sprint200,
            Self::Run400,
            Self::Run600,
            Self::Run800,
            Self::Run1000,
            Self::Run1500,
            Self::Hurdles60,
            Self::Hurdles100,
            Self::Hurdles110,
            Self::HighJump,
            Self::PoleVault,
            Self::LongJump,
            Self::ShotPut,
            Self::ShotPut3Kg,
            Self::ShotPut4Kg,
            Self::DiscusThrow,
            Self::JavelinThrow,
            Self::HammerThrow,
            Self::WeightThrow,
        ]
    }

    pub fn kind(&self) -> DisciplineKind {
        match self {
            Self::Sprint60
            | Self::Sprint100
            | Self::Sprint200
            | Self::Run400
            | Self::Run600
            | Self::Run800
            | Self::Run1000
            | Self::Run1500
            | Self::Hurdles60
            | Self::Hurdles100
            | Self::Hurdles110 => DisciplineKind::Track,
            _ => DisciplineKind::Field,
        }
    }

    /// Jumps are scored in centimeters, throws in meters, runs in seconds.
    pub fn unit(&self) -> MarkUnit {
        match self {
            Self::HighJump | Self::PoleVault | Self::LongJump => MarkUnit::Centimeters,
            _ if self.kind() == DisciplineKind::Track => MarkUnit::Seconds,
            _ => MarkUnit::Meters,
        }
    }

    /// Vertical jump marks go through the height parser.
    pub fn is_vertical_jump(&self) -> bool {
        matches!(self, Self::HighJump | Self::PoleVault)
    }

    fn parse_str(s: &str) -> Result<Self, CombinedEventError> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| CombinedEventError::InvalidDiscipline(s.to_string()))
    }
}

impl FromStr for Discipline {
    type Err = CombinedEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
