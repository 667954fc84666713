use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Gender;
use crate::error::CombinedEventError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Decathlon,
    Heptathlon,
    HeptathlonIndoor,
    PentathlonIndoor,
    DecathlonMasters,
    HeptathlonMasters,
    PentathlonIndoorMasters,
    PentathlonOutdoorMasters,
    ThrowsPentathlonMasters,
    PentathlonU16Male,
    PentathlonU16Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EventCategory {
    Senior,
    Masters,
    Youth,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decathlon => "DECATHLON",
            Self::Heptathlon => "HEPTATHLON",
            Self::HeptathlonIndoor => "HEPTATHLON_INDOOR",
            Self::PentathlonIndoor => "PENTATHLON_INDOOR",
            Self::DecathlonMasters => "DECATHLON_MASTERS",
            Self::HeptathlonMasters => "HEPTATHLON_MASTERS",
            Self::PentathlonIndoorMasters => "PENTATHLON_INDOOR_MASTERS",
            Self::PentathlonOutdoorMasters => "PENTATHLON_OUTDOOR_MASTERS",
            Self::ThrowsPentathlonMasters => "THROWS_PENTATHLON_MASTERS",
            Self::PentathlonU16Male => "PENTATHLON_U16_MALE",
            Self::PentathlonU16Female => "PENTATHLON_U16_FEMALE",
        }
    }

    pub fn all() -> &'static [EventType] {
        &[
            Self::Decathlon,
            Self::Heptathlon,
            Self::HeptathlonIndoor,
            Self::PentathlonIndoor,
            Self::DecathlonMasters,
            Self::HeptathlonMasters,
            Self::PentathlonIndoorMasters,
            Self::PentathlonOutdoorMasters,
            Self::ThrowsPentathlonMasters,
            Self::PentathlonU16Male,
            Self::PentathlonU16Female,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Decathlon => "Decathlon",
            Self::Heptathlon => "Heptathlon",
            Self::HeptathlonIndoor => "Indoor Heptathlon",
            Self::PentathlonIndoor => "Indoor Pentathlon",
            Self::DecathlonMasters => "Masters Decathlon",
            Self::HeptathlonMasters => "Masters Heptathlon",
            Self::PentathlonIndoorMasters => "Masters Indoor Pentathlon",
            Self::PentathlonOutdoorMasters => "Masters Outdoor Pentathlon",
            Self::ThrowsPentathlonMasters => "Masters Throws Pentathlon",
            Self::PentathlonU16Male => "U16 Boys Pentathlon",
            Self::PentathlonU16Female => "U16 Girls Pentathlon",
        }
    }

    /// Gender the event is contested by, `None` when both genders have their own programme.
    pub fn expected_gender(&self) -> Option<Gender> {
        match self {
            Self::Decathlon
            | Self::HeptathlonIndoor
            | Self::DecathlonMasters
            | Self::PentathlonU16Male => Some(Gender::Male),
            Self::Heptathlon
            | Self::PentathlonIndoor
            | Self::HeptathlonMasters
            | Self::PentathlonIndoorMasters
            | Self::PentathlonU16Female => Some(Gender::Female),
            Self::PentathlonOutdoorMasters | Self::ThrowsPentathlonMasters => None,
        }
    }

    /// World Athletics events, as opposed to masters or youth programmes.
    pub fn is_official(&self) -> bool {
        matches!(
            self,
            Self::Decathlon | Self::Heptathlon | Self::HeptathlonIndoor | Self::PentathlonIndoor
        )
    }

    pub fn category(&self) -> EventCategory {
        match self {
            Self::Decathlon | Self::Heptathlon | Self::HeptathlonIndoor | Self::PentathlonIndoor => {
                EventCategory::Senior
            }
            Self::PentathlonU16Male | Self::PentathlonU16Female => EventCategory::Youth,
            _ => EventCategory::Masters,
        }
    }

    fn parse_str(s: &str) -> Result<Self, CombinedEventError> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| CombinedEventError::UnknownEventType(s.to_string()))
    }
}

impl FromStr for EventType {
    type Err = CombinedEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
