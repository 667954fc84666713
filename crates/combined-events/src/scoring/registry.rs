//! Compiled-in discipline order of every combined event.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Discipline, EventCategory, EventType, Gender};

use Discipline::*;

const DECATHLON: &[Discipline] = &[
    Sprint100,
    LongJump,
    ShotPut,
    HighJump,
    Run400,
    Hurdles110,
    DiscusThrow,
    PoleVault,
    JavelinThrow,
    Run1500,
];

const HEPTATHLON: &[Discipline] = &[
    Hurdles100,
    HighJump,
    ShotPut,
    Sprint200,
    LongJump,
    JavelinThrow,
    Run800,
];

const HEPTATHLON_INDOOR: &[Discipline] = &[
    Sprint60, LongJump, ShotPut, HighJump, Hurdles60, PoleVault, Run1000,
];

const PENTATHLON_INDOOR: &[Discipline] = &[Hurdles60, HighJump, ShotPut, LongJump, Run800];

const PENTATHLON_OUTDOOR_MASTERS_MALE: &[Discipline] =
    &[LongJump, JavelinThrow, Sprint200, DiscusThrow, Run1500];

const PENTATHLON_OUTDOOR_MASTERS_FEMALE: &[Discipline] =
    &[Hurdles100, HighJump, ShotPut, LongJump, Run800];

const THROWS_PENTATHLON: &[Discipline] =
    &[HammerThrow, ShotPut, DiscusThrow, JavelinThrow, WeightThrow];

const PENTATHLON_U16_MALE: &[Discipline] = &[Hurdles100, LongJump, ShotPut4Kg, HighJump, Run1000];

const PENTATHLON_U16_FEMALE: &[Discipline] = &[Hurdles100, HighJump, ShotPut3Kg, LongJump, Run800];

/// Ordered disciplines of `event_type` for an athlete of `gender`.
///
/// Only the outdoor masters pentathlon has a programme per gender; every other
/// event returns its single list whatever the gender.
pub fn disciplines_for(event_type: EventType, gender: Gender) -> &'static [Discipline] {
    match event_type {
        EventType::Decathlon | EventType::DecathlonMasters => DECATHLON,
        EventType::Heptathlon | EventType::HeptathlonMasters => HEPTATHLON,
        EventType::HeptathlonIndoor => HEPTATHLON_INDOOR,
        EventType::PentathlonIndoor | EventType::PentathlonIndoorMasters => PENTATHLON_INDOOR,
        EventType::PentathlonOutdoorMasters => match gender {
            Gender::Male => PENTATHLON_OUTDOOR_MASTERS_MALE,
            Gender::Female => PENTATHLON_OUTDOOR_MASTERS_FEMALE,
        },
        EventType::ThrowsPentathlonMasters => THROWS_PENTATHLON,
        EventType::PentathlonU16Male => PENTATHLON_U16_MALE,
        EventType::PentathlonU16Female => PENTATHLON_U16_FEMALE,
    }
}

/// Lookup by event-type code; unknown codes resolve to an empty list.
pub fn disciplines_for_code(event_type: &str, gender: Gender) -> &'static [Discipline] {
    event_type
        .parse::<EventType>()
        .map(|event_type| disciplines_for(event_type, gender))
        .unwrap_or(&[])
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventTypeInfo {
    pub event_type: EventType,
    pub name: String,
    pub expected_gender: Option<Gender>,
    pub discipline_count: usize,
    pub is_official: bool,
    pub category: EventCategory,
}

/// Catalog of every supported combined event.
pub fn list_event_types() -> Vec<EventTypeInfo> {
    EventType::all()
        .iter()
        .map(|&event_type| {
            let gender = event_type.expected_gender().unwrap_or(Gender::Male);
            EventTypeInfo {
                event_type,
                name: event_type.display_name().to_string(),
                expected_gender: event_type.expected_gender(),
                discipline_count: disciplines_for(event_type, gender).len(),
                is_official: event_type.is_official(),
                category: event_type.category(),
            }
        })
        .collect()
}
