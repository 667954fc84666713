use std::ops::RangeInclusive;

use crate::models::{Discipline, DisciplineKind};

use super::performance::{ParseError, parse_distance, parse_height, parse_time};

/// Upper bound used for track disciplines without a dedicated range, in seconds.
const TRACK_FALLBACK_LIMIT: f64 = 3600.0;
/// Upper bound used for field disciplines without a dedicated range, in meters.
const FIELD_FALLBACK_LIMIT: f64 = 200.0;

fn plausible_range(discipline: Discipline) -> Option<RangeInclusive<f64>> {
    use Discipline::*;

    let range = match discipline {
        Sprint60 => 6.0..=12.0,
        Sprint100 => 9.0..=15.0,
        Sprint200 => 19.0..=35.0,
        Run400 => 43.0..=80.0,
        Run600 => 60.0..=180.0,
        Run800 => 100.0..=240.0,
        Run1000 => 130.0..=300.0,
        Run1500 => 200.0..=420.0,
        Hurdles60 => 7.0..=14.0,
        Hurdles100 => 12.0..=22.0,
        Hurdles110 => 12.5..=25.0,
        HighJump => 1.0..=3.0,
        PoleVault => 1.0..=7.0,
        LongJump => 3.0..=10.0,
        ShotPut => 5.0..=25.0,
        ShotPut3Kg | ShotPut4Kg => 3.0..=25.0,
        DiscusThrow => 10.0..=80.0,
        JavelinThrow => 10.0..=100.0,
        HammerThrow | WeightThrow => return None,
    };
    Some(range)
}

/// Time in seconds for track disciplines, mark in meters for field ones.
fn plausibility_value(discipline: Discipline, performance: &str) -> Result<f64, ParseError> {
    match discipline.kind() {
        DisciplineKind::Track => parse_time(performance),
        DisciplineKind::Field if discipline.is_vertical_jump() => parse_height(performance),
        DisciplineKind::Field => parse_distance(performance),
    }
}

/// Rejects malformed or obviously mistyped performances. Never fails.
pub fn is_plausible(discipline: Discipline, performance: &str) -> bool {
    let Ok(value) = plausibility_value(discipline, performance) else {
        return false;
    };

    match plausible_range(discipline) {
        Some(range) => range.contains(&value),
        None => {
            let limit = match discipline.kind() {
                DisciplineKind::Track => TRACK_FALLBACK_LIMIT,
                DisciplineKind::Field => FIELD_FALLBACK_LIMIT,
            };
            value > 0.0 && value < limit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprint_range() {
        assert!(!is_plausible(Discipline::Sprint100, "8.50"));
        assert!(is_plausible(Discipline::Sprint100, "10.85"));
        assert!(is_plausible(Discipline::Sprint100, "9.0"));
        assert!(is_plausible(Discipline::Sprint100, "15.0"));
        assert!(!is_plausible(Discipline::Sprint100, "15.01"));
    }

    #[test]
    fn test_middle_distance_accepts_minutes() {
        assert!(is_plausible(Discipline::Run1500, "4:30.12"));
        assert!(!is_plausible(Discipline::Run1500, "1:30"));
    }

    #[test]
    fn test_600m_range() {
        assert!(is_plausible(Discipline::Run600, "60"));
        assert!(is_plausible(Discipline::Run600, "1:32.40"));
        assert!(is_plausible(Discipline::Run600, "3:00"));
        assert!(!is_plausible(Discipline::Run600, "59.99"));
        assert!(!is_plausible(Discipline::Run600, "3:00.01"));
    }

    #[test]
    fn test_heights_accept_centimeters() {
        assert!(is_plausible(Discipline::HighJump, "2.05"));
        assert!(is_plausible(Discipline::HighJump, "205"));
        assert!(!is_plausible(Discipline::HighJump, "0.80"));
        assert!(is_plausible(Discipline::PoleVault, "520"));
    }

    #[test]
    fn test_throws_range() {
        assert!(is_plausible(Discipline::ShotPut, "15.20m"));
        assert!(!is_plausible(Discipline::ShotPut, "30"));
        assert!(!is_plausible(Discipline::ShotPut, "-15"));
    }

    #[test]
    fn test_generic_fallback() {
        assert!(is_plausible(Discipline::HammerThrow, "45.10"));
        assert!(!is_plausible(Discipline::HammerThrow, "0"));
        assert!(!is_plausible(Discipline::WeightThrow, "250"));
    }

    #[test]
    fn test_unparseable_is_not_plausible() {
        assert!(!is_plausible(Discipline::Sprint100, "fast"));
        assert!(!is_plausible(Discipline::Run400, "10:85"));
        assert!(!is_plausible(Discipline::LongJump, ""));
        assert!(!is_plausible(Discipline::LongJump, "-"));
    }
}
