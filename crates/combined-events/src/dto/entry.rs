use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::{EventType, Gender, NewCombinedEvent};

/// Request payload for registering an athlete into a combined event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEntryRequest {
    #[validate(length(min = 1, max = 64, message = "Event type must be between 1 and 64 characters"))]
    pub event_type: String,

    #[validate(length(min = 1, max = 16, message = "Gender must be between 1 and 16 characters"))]
    pub gender: String,

    pub athlete_id: Uuid,

    pub competition_id: Uuid,
}

impl CreateEntryRequest {
    /// Resolves the textual codes into a typed entry.
    pub fn to_new_entry(&self) -> Result<NewCombinedEvent> {
        Ok(NewCombinedEvent {
            event_type: self.event_type.parse::<EventType>()?,
            gender: self.gender.parse::<Gender>()?,
            athlete_id: self.athlete_id,
            competition_id: self.competition_id,
        })
    }
}

/// Request payload for submitting a performance for one discipline
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateResultRequest {
    #[validate(length(min = 1, max = 32, message = "Performance must be between 1 and 32 characters"))]
    pub performance: String,

    #[validate(custom(function = "validate_wind"))]
    pub wind: Option<Decimal>,
}

/// Query parameters for listing the entries of a competition
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EntryListQuery {
    /// Restricts the list to one event type code
    pub event_type: Option<String>,
}

impl EntryListQuery {
    pub fn event_type(&self) -> Result<Option<EventType>> {
        self.event_type
            .as_deref()
            .map(str::parse::<EventType>)
            .transpose()
    }
}

fn validate_wind(wind: &Decimal) -> std::result::Result<(), validator::ValidationError> {
    // fits NUMERIC(4, 1)
    if wind.abs() < Decimal::from(100) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("wind_out_of_range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CombinedEventError;

    fn request(event_type: &str, gender: &str) -> CreateEntryRequest {
        CreateEntryRequest {
            event_type: event_type.to_string(),
            gender: gender.to_string(),
            athlete_id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_to_new_entry_parses_codes() {
        let new_entry = request("decathlon", "M").to_new_entry().unwrap();
        assert_eq!(new_entry.event_type, EventType::Decathlon);
        assert_eq!(new_entry.gender, Gender::Male);
    }

    #[test]
    fn test_to_new_entry_rejects_unknown_codes() {
        assert!(matches!(
            request("octathlon", "M").to_new_entry(),
            Err(CombinedEventError::UnknownEventType(_))
        ));
        assert!(matches!(
            request("decathlon", "?").to_new_entry(),
            Err(CombinedEventError::InvalidGender(_))
        ));
    }

    #[test]
    fn test_entry_list_query_event_type() {
        let query = EntryListQuery {
            event_type: Some("heptathlon_indoor".to_string()),
        };
        assert_eq!(query.event_type().unwrap(), Some(EventType::HeptathlonIndoor));
        assert_eq!(EntryListQuery::default().event_type().unwrap(), None);

        let unknown = EntryListQuery {
            event_type: Some("triathlon".to_string()),
        };
        assert!(unknown.event_type().is_err());
    }

    #[test]
    fn test_update_request_validation() {
        let valid = UpdateResultRequest {
            performance: "10.85".to_string(),
            wind: Some(Decimal::new(-12, 1)),
        };
        assert!(valid.validate().is_ok());

        let empty = UpdateResultRequest {
            performance: String::new(),
            wind: None,
        };
        assert!(empty.validate().is_err());

        let gale = UpdateResultRequest {
            performance: "10.85".to_string(),
            wind: Some(Decimal::from(150)),
        };
        assert!(gale.validate().is_err());
    }
}
