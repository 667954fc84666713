//! Scoring table constants.
//!
//! Track: points = A · (B − T)^C with T in seconds.
//! Field: points = A · (M − B)^C with M in centimeters for jumps, meters for throws.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Discipline, Gender};

use Discipline::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    /// Sentinel for a discipline the table has no entry for.
    pub const UNKNOWN: Coefficients = Coefficients::new(0.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn is_unknown(&self) -> bool {
        self.a == 0.0
    }
}

/// Men's table, also used for women wherever no override exists.
const BASE_TABLE: &[(Discipline, Coefficients)] = &[
    (Sprint60, Coefficients::new(58.015, 11.5, 1.81)),
    (Sprint100, Coefficients::new(25.4347, 18.0, 1.81)),
    (Sprint200, Coefficients::new(5.8425, 38.0, 1.81)),
    (Run400, Coefficients::new(1.53775, 82.0, 1.81)),
    (Run600, Coefficients::new(0.1983, 177.0, 1.85)),
    (Run800, Coefficients::new(0.11193, 254.0, 1.88)),
    (Run1000, Coefficients::new(0.08713, 305.5, 1.85)),
    (Run1500, Coefficients::new(0.03768, 480.0, 1.85)),
    (Hurdles60, Coefficients::new(20.5173, 15.5, 1.92)),
    (Hurdles100, Coefficients::new(9.23076, 26.7, 1.835)),
    (Hurdles110, Coefficients::new(5.74352, 28.5, 1.92)),
    (HighJump, Coefficients::new(0.8465, 75.0, 1.42)),
    (PoleVault, Coefficients::new(0.2797, 100.0, 1.35)),
    (LongJump, Coefficients::new(0.14354, 220.0, 1.4)),
    (ShotPut, Coefficients::new(51.39, 1.5, 1.05)),
    (ShotPut3Kg, Coefficients::new(56.0211, 2.5, 1.05)),
    (ShotPut4Kg, Coefficients::new(51.39, 2.0, 1.05)),
    (DiscusThrow, Coefficients::new(12.91, 4.0, 1.1)),
    (JavelinThrow, Coefficients::new(10.14, 7.0, 1.08)),
    (HammerThrow, Coefficients::new(13.0449, 7.0, 1.05)),
    (WeightThrow, Coefficients::new(47.8338, 1.5, 1.05)),
];

const FEMALE_OVERRIDES: &[(Discipline, Coefficients)] = &[
    (Sprint60, Coefficients::new(46.0849, 13.0, 1.81)),
    (Sprint100, Coefficients::new(17.857, 21.0, 1.81)),
    (Sprint200, Coefficients::new(4.99087, 42.5, 1.81)),
    (Run400, Coefficients::new(1.34285, 91.7, 1.81)),
    (Run600, Coefficients::new(0.1521, 196.0, 1.85)),
    (Run1500, Coefficients::new(0.02883, 535.0, 1.88)),
    (Hurdles60, Coefficients::new(20.0479, 17.0, 1.835)),
    (HighJump, Coefficients::new(1.84523, 75.0, 1.348)),
    (PoleVault, Coefficients::new(0.44125, 100.0, 1.35)),
    (LongJump, Coefficients::new(0.188807, 210.0, 1.41)),
    (ShotPut, Coefficients::new(56.0211, 1.5, 1.05)),
    (DiscusThrow, Coefficients::new(12.3311, 3.0, 1.1)),
    (JavelinThrow, Coefficients::new(15.9803, 3.8, 1.04)),
    (HammerThrow, Coefficients::new(17.5458, 6.0, 1.05)),
    (WeightThrow, Coefficients::new(44.2593, 1.5, 1.05)),
];

fn lookup(table: &[(Discipline, Coefficients)], discipline: Discipline) -> Option<Coefficients> {
    table
        .iter()
        .find(|(d, _)| *d == discipline)
        .map(|(_, coefficients)| *coefficients)
}

/// Coefficients for `discipline`, or [`Coefficients::UNKNOWN`] when none are tabled.
pub fn coefficients_for(discipline: Discipline, gender: Gender) -> Coefficients {
    let override_entry = match gender {
        Gender::Female => lookup(FEMALE_OVERRIDES, discipline),
        Gender::Male => None,
    };

    override_entry
        .or_else(|| lookup(BASE_TABLE, discipline))
        .unwrap_or(Coefficients::UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_discipline_is_tabled_for_both_genders() {
        for discipline in Discipline::all() {
            for gender in Gender::all() {
                let coefficients = coefficients_for(*discipline, *gender);
                assert!(
                    !coefficients.is_unknown(),
                    "{discipline} has no coefficients for {gender}"
                );
                assert!(coefficients.b > 0.0 && coefficients.c > 0.0);
            }
        }
    }

    #[test]
    fn test_female_overrides_differ_from_base() {
        assert_eq!(
            coefficients_for(Sprint100, Gender::Male),
            Coefficients::new(25.4347, 18.0, 1.81)
        );
        assert_ne!(
            coefficients_for(Sprint100, Gender::Female),
            coefficients_for(Sprint100, Gender::Male)
        );
        assert_ne!(
            coefficients_for(JavelinThrow, Gender::Female),
            coefficients_for(JavelinThrow, Gender::Male)
        );
    }

    #[test]
    fn test_shared_table_fallback() {
        assert_eq!(
            coefficients_for(Run800, Gender::Male),
            coefficients_for(Run800, Gender::Female)
        );
        assert_eq!(
            coefficients_for(Hurdles110, Gender::Female),
            coefficients_for(Hurdles110, Gender::Male)
        );
    }

    #[test]
    fn test_implement_weights_use_distinct_tables() {
        let three = coefficients_for(ShotPut3Kg, Gender::Female);
        let four = coefficients_for(ShotPut4Kg, Gender::Male);
        assert_ne!(three, four);
        assert_ne!(four, coefficients_for(ShotPut, Gender::Male));
    }

    #[test]
    fn test_base_table_has_no_duplicates() {
        let mut seen: Vec<Discipline> = BASE_TABLE.iter().map(|(d, _)| *d).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), BASE_TABLE.len());
        assert_eq!(seen.len(), Discipline::all().len());
    }
}
