use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{CombinedEventError, Result};
use crate::models::{Discipline, DisciplineKind, Gender, MarkUnit};

use super::coefficients::coefficients_for;
use super::performance::{ParseError, parse_distance, parse_height, parse_time};
use super::validation::is_plausible;

/// Converts a performance into the unit its scoring table is expressed in.
pub fn measure(discipline: Discipline, performance: &str) -> std::result::Result<f64, ParseError> {
    match discipline.unit() {
        MarkUnit::Seconds => parse_time(performance),
        MarkUnit::Meters => parse_distance(performance),
        MarkUnit::Centimeters if discipline.is_vertical_jump() => {
            parse_height(performance).map(|meters| meters * 100.0)
        }
        MarkUnit::Centimeters => parse_distance(performance).map(|meters| meters * 100.0),
    }
}

/// Unrounded table value, clamped at zero below the threshold B.
pub fn raw_points(discipline: Discipline, performance: &str, gender: Gender) -> Result<f64> {
    let coefficients = coefficients_for(discipline, gender);
    if coefficients.is_unknown() {
        return Err(CombinedEventError::UnknownDiscipline { discipline, gender });
    }

    let mark = measure(discipline, performance)?;
    let diff = match discipline.kind() {
        DisciplineKind::Track => coefficients.b - mark,
        DisciplineKind::Field => mark - coefficients.b,
    };

    if diff <= 0.0 {
        return Ok(0.0);
    }

    Ok(coefficients.a * diff.powf(coefficients.c))
}

/// Points scored by `performance`, rounded to the nearest integer.
///
/// Marks so far out of range that their points do not fit an `i32` are rejected.
pub fn compute_points(discipline: Discipline, performance: &str, gender: Gender) -> Result<i32> {
    let rounded = raw_points(discipline, performance, gender)?.round();
    if !rounded.is_finite() || rounded > f64::from(i32::MAX) {
        return Err(CombinedEventError::PointsOutOfRange {
            discipline,
            performance: performance.trim().to_string(),
        });
    }

    let points = rounded as i32;
    debug!(%discipline, %gender, performance, points, "computed points");
    Ok(points)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PointsPreview {
    pub discipline: Discipline,
    pub kind: DisciplineKind,
    pub gender: Gender,
    pub performance: String,
    pub points: i32,
    pub plausible: bool,
}

/// What a performance would score, without touching any entry.
pub fn preview_points(
    discipline: Discipline,
    performance: &str,
    gender: Gender,
) -> Result<PointsPreview> {
    let points = compute_points(discipline, performance, gender)?;

    Ok(PointsPreview {
        discipline,
        kind: discipline.kind(),
        gender,
        performance: performance.trim().to_string(),
        points,
        plausible: is_plausible(discipline, performance),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_100m_reference_score() {
        let points = compute_points(Discipline::Sprint100, "10.85", Gender::Male).unwrap();
        assert!(points > 800 && points < 900, "got {points}");
        assert_eq!(points, 895);
    }

    #[test]
    fn test_high_jump_is_scored_in_centimeters() {
        let points = compute_points(Discipline::HighJump, "2.05", Gender::Male).unwrap();
        assert!(points > 800 && points < 900, "got {points}");
        assert_eq!(points, 850);
        assert_eq!(
            compute_points(Discipline::HighJump, "205", Gender::Male).unwrap(),
            points
        );
    }

    #[test]
    fn test_long_jump_and_throws() {
        assert_eq!(
            compute_points(Discipline::LongJump, "7.50", Gender::Male).unwrap(),
            935
        );
        assert_eq!(
            compute_points(Discipline::ShotPut, "15.00", Gender::Male).unwrap(),
            790
        );
        assert_eq!(
            compute_points(Discipline::PoleVault, "5.00", Gender::Male).unwrap(),
            911
        );
    }

    #[test]
    fn test_minutes_format_for_middle_distance() {
        assert_eq!(
            compute_points(Discipline::Run1500, "4:30", Gender::Male).unwrap(),
            745
        );
        assert_eq!(
            compute_points(Discipline::Run800, "2:10", Gender::Female).unwrap(),
            965
        );
    }

    #[test]
    fn test_threshold_scores_zero() {
        assert_eq!(
            compute_points(Discipline::Sprint100, "18.00", Gender::Male).unwrap(),
            0
        );
        assert_eq!(
            compute_points(Discipline::Sprint100, "25", Gender::Male).unwrap(),
            0
        );
        assert_eq!(
            compute_points(Discipline::ShotPut, "1.2", Gender::Male).unwrap(),
            0
        );
    }

    #[test]
    fn test_just_inside_threshold_is_positive() {
        let raw = raw_points(Discipline::Sprint100, "17.99", Gender::Male).unwrap();
        assert!(raw > 0.0);
        assert!(compute_points(Discipline::Sprint100, "17.50", Gender::Male).unwrap() > 0);
    }

    #[test]
    fn test_600m_scoring() {
        assert_eq!(
            compute_points(Discipline::Run600, "1:24", Gender::Male).unwrap(),
            869
        );
        assert_eq!(
            compute_points(Discipline::Run600, "1:36", Gender::Female).unwrap(),
            762
        );
    }

    #[test]
    fn test_out_of_range_marks_are_rejected() {
        let huge = "9".repeat(30);
        let err = compute_points(Discipline::ShotPut, &huge, Gender::Male).unwrap_err();
        assert!(matches!(
            err,
            CombinedEventError::PointsOutOfRange {
                discipline: Discipline::ShotPut,
                ..
            }
        ));

        let err = compute_points(Discipline::HighJump, &"9".repeat(400), Gender::Male).unwrap_err();
        assert!(matches!(err, CombinedEventError::PointsOutOfRange { .. }));
    }

    #[test]
    fn test_gender_tables_differ() {
        let male = compute_points(Discipline::Sprint200, "23.80", Gender::Male).unwrap();
        let female = compute_points(Discipline::Sprint200, "23.80", Gender::Female).unwrap();
        assert_eq!(female, 1000);
        assert_ne!(male, female);
    }

    #[test]
    fn test_parse_errors_propagate() {
        let err = compute_points(Discipline::Sprint100, "10:85", Gender::Male).unwrap_err();
        assert!(matches!(
            err,
            CombinedEventError::Parse(ParseError::SecondsOutOfRange(_))
        ));
    }

    #[test]
    fn test_preview_flags_implausible_marks() {
        let preview = preview_points(Discipline::Sprint100, "8.50", Gender::Male).unwrap();
        assert!(!preview.plausible);
        assert!(preview.points > 1000);
        assert_eq!(preview.kind, DisciplineKind::Track);
    }
}
