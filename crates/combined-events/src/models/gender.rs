use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CombinedEventError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[serde(alias = "M", alias = "MEN")]
    Male,
    #[serde(alias = "F", alias = "WOMEN")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    pub fn all() -> &'static [Gender] {
        &[Self::Male, Self::Female]
    }
}

impl FromStr for Gender {
    type Err = CombinedEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MALE" | "MEN" => Ok(Self::Male),
            "F" | "FEMALE" | "WOMEN" => Ok(Self::Female),
            _ => Err(CombinedEventError::InvalidGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
