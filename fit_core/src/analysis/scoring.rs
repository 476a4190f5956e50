//! # Candidate Scoring
//!
//! Ranks already-fetched candidate fasteners against a
//! [`RequirementFilter`]. Every candidate is re-validated against the full
//! requirement set, not just whatever coarse filtering the catalog applied:
//! hard criteria exclude, soft criteria score.
//!
//! The score is the fraction of specified soft criteria the candidate
//! satisfies, in [0, 1]; a filter with no soft criteria scores every
//! survivor 1. Output ordering is deterministic: descending score, ties
//! broken by ascending `part_id`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::engagement::check_length_compatibility;
use crate::analysis::strength::calculate_joint_strength;
use crate::analysis::thread_fit::check_thread_compatibility;
use crate::catalog::RequirementFilter;
use crate::errors::{FitError, FitResult};
use crate::geometry::PartSpec;
use crate::materials::MaterialTables;

/// A candidate that passed every hard requirement, with its soft-criteria
/// score in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub part: PartSpec,
    pub score: Decimal,
}

/// Score and rank candidates against a requirement filter.
///
/// Hard criteria (exact diameter and pitch, length window, proof load,
/// inventory membership, thread fit against a mating thread, length
/// compatibility in an installation, allowable-load floor) exclude
/// candidates; the survivors are scored on the soft criteria and sorted
/// by descending score with `part_id` as the tie-break.
///
/// `min_allowable_load_kn` needs an engagement length to evaluate, so it
/// requires `installation` to be set; a filter specifying the former
/// without the latter is a [`FitError::MissingField`].
///
/// Errors also surface for invalid candidate records and unknown base
/// materials - malformed inputs are never silently dropped.
pub fn score_candidates(
    filter: &RequirementFilter,
    candidates: &[PartSpec],
    tables: &MaterialTables,
) -> FitResult<Vec<ScoredCandidate>> {
    if filter.min_allowable_load_kn.is_some() && filter.installation.is_none() {
        return Err(FitError::missing_field("installation"));
    }

    let mut scored = Vec::new();
    for part in candidates {
        part.validate()?;
        if passes_hard_requirements(filter, part, tables)? {
            scored.push(ScoredCandidate {
                part: part.clone(),
                score: soft_score(filter, part),
            });
        }
    }

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.part.part_id.cmp(&b.part.part_id))
    });
    Ok(scored)
}

fn passes_hard_requirements(
    filter: &RequirementFilter,
    part: &PartSpec,
    tables: &MaterialTables,
) -> FitResult<bool> {
    if let Some(diameter) = filter.thread_diameter_mm {
        if part.thread.nominal_diameter_mm != diameter {
            return Ok(false);
        }
    }
    if let Some(pitch) = filter.thread_pitch_mm {
        if part.thread.pitch_mm != pitch {
            return Ok(false);
        }
    }
    if let Some(min_length) = filter.min_length_mm {
        if part.length_mm < min_length {
            return Ok(false);
        }
    }
    if let Some(max_length) = filter.max_length_mm {
        if part.length_mm > max_length {
            return Ok(false);
        }
    }
    if let Some(min_proof) = filter.min_proof_load_kn {
        if part.proof_load_kn < min_proof {
            return Ok(false);
        }
    }
    if let Some(inventory) = &filter.inventory {
        if !inventory.iter().any(|id| id == &part.part_id) {
            return Ok(false);
        }
    }

    if let Some(mating) = &filter.mating_thread {
        let fit = check_thread_compatibility(&part.thread, mating, tables)?;
        if !fit.is_compatible() {
            return Ok(false);
        }
    }

    if let Some(install) = &filter.installation {
        let length_check = check_length_compatibility(part, install, tables)?;
        if !length_check.length_compatible {
            return Ok(false);
        }
        if let Some(load_floor) = filter.min_allowable_load_kn {
            let strength = calculate_joint_strength(
                part,
                length_check.engagement_length_mm,
                install,
                tables,
            )?;
            if strength.allowable_load_kn < load_floor {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

fn soft_score(filter: &RequirementFilter, part: &PartSpec) -> Decimal {
    let mut specified = 0u32;
    let mut satisfied = 0u32;

    if let Some(drive) = &filter.drive_type {
        specified += 1;
        if part.drive_type.as_deref() == Some(drive.as_str()) {
            satisfied += 1;
        }
    }
    if let Some(grade) = &filter.preferred_grade {
        specified += 1;
        if &part.material_grade == grade {
            satisfied += 1;
        }
    }
    if let Some(class) = &filter.preferred_thread_class {
        specified += 1;
        if &part.thread.thread_class == class {
            satisfied += 1;
        }
    }

    if specified == 0 {
        dec!(1)
    } else {
        Decimal::from(satisfied) / Decimal::from(specified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Installation, ThreadSpec};
    use rust_decimal_macros::dec;

    fn m5_thread(class: &str) -> ThreadSpec {
        ThreadSpec {
            nominal_diameter_mm: dec!(5.0),
            pitch_mm: dec!(0.8),
            thread_class: class.to_string(),
            major_dia_min_mm: dec!(4.826),
            major_dia_max_mm: dec!(4.976),
            pitch_dia_min_mm: dec!(4.456),
            pitch_dia_max_mm: dec!(4.556),
            minor_dia_min_mm: dec!(4.134),
            minor_dia_max_mm: dec!(4.334),
            thread_angle_deg: dec!(60),
        }
    }

    fn screw(id: &str, length_mm: Decimal, grade: &str, drive: Option<&str>) -> PartSpec {
        PartSpec {
            part_id: id.to_string(),
            thread: m5_thread("6g"),
            length_mm,
            length_tolerance_plus_mm: dec!(0),
            length_tolerance_minus_mm: dec!(-0.5),
            material_grade: grade.to_string(),
            tensile_strength_mpa: dec!(800),
            proof_load_kn: dec!(8.14),
            head_height_mm: None,
            thread_length_mm: None,
            drive_type: drive.map(str::to_string),
        }
    }

    #[test]
    fn test_hard_diameter_mismatch_excludes() {
        let tables = MaterialTables::standard();
        let filter = RequirementFilter {
            thread_diameter_mm: Some(dec!(6.0)),
            ..RequirementFilter::default()
        };
        let candidates = vec![screw("A", dec!(16), "8.8", None)];

        let scored = score_candidates(&filter, &candidates, &tables).unwrap();
        assert!(scored.is_empty());
    }

    #[test]
    fn test_length_window_and_proof_load() {
        let tables = MaterialTables::standard();
        let filter = RequirementFilter {
            min_length_mm: Some(dec!(12)),
            max_length_mm: Some(dec!(20)),
            min_proof_load_kn: Some(dec!(5)),
            ..RequirementFilter::default()
        };
        let candidates = vec![
            screw("short", dec!(10), "8.8", None),
            screw("fits", dec!(16), "8.8", None),
            screw("long", dec!(25), "8.8", None),
        ];

        let scored = score_candidates(&filter, &candidates, &tables).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].part.part_id, "fits");
        assert_eq!(scored[0].score, dec!(1));
    }

    #[test]
    fn test_inventory_restriction() {
        let tables = MaterialTables::standard();
        let filter = RequirementFilter {
            inventory: Some(vec!["B".to_string()]),
            ..RequirementFilter::default()
        };
        let candidates = vec![
            screw("A", dec!(16), "8.8", None),
            screw("B", dec!(16), "8.8", None),
        ];

        let scored = score_candidates(&filter, &candidates, &tables).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].part.part_id, "B");
    }

    #[test]
    fn test_soft_scoring_and_tie_break() {
        let tables = MaterialTables::standard();
        let filter = RequirementFilter {
            drive_type: Some("torx".to_string()),
            preferred_grade: Some("10.9".to_string()),
            ..RequirementFilter::default()
        };
        let candidates = vec![
            screw("zeta", dec!(16), "8.8", Some("torx")),
            screw("alpha", dec!(16), "8.8", Some("torx")),
            screw("best", dec!(16), "10.9", Some("torx")),
            screw("worst", dec!(16), "8.8", Some("phillips")),
        ];

        let scored = score_candidates(&filter, &candidates, &tables).unwrap();
        let ids: Vec<&str> = scored.iter().map(|s| s.part.part_id.as_str()).collect();
        // 1.0, then the two 0.5 scores ordered by id, then 0.0
        assert_eq!(ids, vec!["best", "alpha", "zeta", "worst"]);
        assert_eq!(scored[0].score, dec!(1));
        assert_eq!(scored[1].score, dec!(0.5));
        assert_eq!(scored[3].score, dec!(0));
    }

    #[test]
    fn test_mating_thread_requirement() {
        let tables = MaterialTables::standard();
        let mut internal = m5_thread("6H");
        internal.pitch_dia_min_mm = dec!(4.580);
        internal.pitch_dia_max_mm = dec!(4.660);

        let filter = RequirementFilter {
            mating_thread: Some(internal),
            ..RequirementFilter::default()
        };

        let mut wrong_pitch = screw("wrong", dec!(16), "8.8", None);
        wrong_pitch.thread.pitch_mm = dec!(0.5);
        let candidates = vec![screw("mates", dec!(16), "8.8", None), wrong_pitch];

        let scored = score_candidates(&filter, &candidates, &tables).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].part.part_id, "mates");
    }

    #[test]
    fn test_installation_and_load_floor() {
        let tables = MaterialTables::standard();
        let filter = RequirementFilter {
            installation: Some(Installation::blind_hole(dec!(10), "aluminum_6061")),
            min_allowable_load_kn: Some(dec!(3)),
            ..RequirementFilter::default()
        };
        // 16 mm 8.8 in a 10 mm aluminum hole: ratio 2.0 meets the (8.8,
        // aluminum) table entry of 2.0, allowable 3.256 kN passes the floor.
        // The 8 mm screw only reaches ratio 1.6 and is excluded.
        let candidates = vec![
            screw("M5x16", dec!(16), "8.8", None),
            screw("M5x8", dec!(8), "8.8", None),
        ];

        let scored = score_candidates(&filter, &candidates, &tables).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].part.part_id, "M5x16");
    }

    #[test]
    fn test_load_floor_without_installation_is_error() {
        let tables = MaterialTables::standard();
        let filter = RequirementFilter {
            min_allowable_load_kn: Some(dec!(3)),
            ..RequirementFilter::default()
        };
        let err = score_candidates(&filter, &[], &tables).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_invalid_candidate_is_error() {
        let tables = MaterialTables::standard();
        let mut bad = screw("bad", dec!(16), "8.8", None);
        bad.proof_load_kn = dec!(0);

        let err = score_candidates(&RequirementFilter::default(), &[bad], &tables).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_empty_filter_scores_everything_one() {
        let tables = MaterialTables::standard();
        let candidates = vec![
            screw("B", dec!(16), "8.8", None),
            screw("A", dec!(12), "10.9", None),
        ];

        let scored =
            score_candidates(&RequirementFilter::default(), &candidates, &tables).unwrap();
        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|s| s.score == dec!(1)));
        // Equal scores: ordered by part_id
        assert_eq!(scored[0].part.part_id, "A");
        assert_eq!(scored[1].part.part_id, "B");
    }
}
