//! # Thread Fit Analysis
//!
//! Evaluates whether an external and an internal thread geometrically mate,
//! per the ISO 965-1 tolerance-stack rules. Dimension mismatches and
//! interference are reported as verdicts in [`ThreadFit`], not as errors;
//! [`FitError`](crate::errors::FitError) is reserved for invalid geometry.
//!
//! The clearance arithmetic is exact `Decimal` subtraction. A mating pair
//! whose guaranteed clearance is exactly zero assembles; a float
//! representation could tip that verdict either way.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fit_core::analysis::thread_fit::check_thread_compatibility;
//!
//! let fit = check_thread_compatibility(&external, &internal, &tables)?;
//! if fit.is_compatible() {
//!     // safe to assemble
//! }
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::FitResult;
use crate::geometry::ThreadSpec;
use crate::materials::{MaterialTables, ToleranceClassFit};

/// Which dimension failed the exact-equality mate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchField {
    NominalDiameter,
    Pitch,
}

impl std::fmt::Display for MismatchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchField::NominalDiameter => write!(f, "nominal_diameter"),
            MismatchField::Pitch => write!(f, "pitch"),
        }
    }
}

/// Verdict of a thread compatibility check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "verdict": "compatible",
///   "clearance_min_mm": "0.024",
///   "clearance_max_mm": "0.204",
///   "engagement_quality": "0.1176470588235294117647058824",
///   "tolerance_class_match": "medium"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ThreadFit {
    /// Nominal diameter or pitch differ; the threads cannot mate.
    DimensionMismatch {
        field: MismatchField,
        external_mm: Decimal,
        internal_mm: Decimal,
    },
    /// Worst-case pitch diameters overlap; the threads will not assemble.
    /// `clearance_min_mm` is negative and shows the magnitude of overlap.
    Interference { clearance_min_mm: Decimal },
    /// The threads mate across the full tolerance band.
    Compatible {
        /// Guaranteed clearance at worst case (mm)
        clearance_min_mm: Decimal,
        /// Largest possible clearance (mm)
        clearance_max_mm: Decimal,
        /// Fraction of the clearance band that is guaranteed, in [0, 1]
        engagement_quality: Decimal,
        /// Preferred-fit classification of the tolerance class pairing
        tolerance_class_match: ToleranceClassFit,
    },
}

impl ThreadFit {
    /// True only for the `Compatible` verdict.
    pub fn is_compatible(&self) -> bool {
        matches!(self, ThreadFit::Compatible { .. })
    }

    /// Human-readable reason for a negative verdict, None when compatible.
    pub fn rejection_reason(&self) -> Option<String> {
        match self {
            ThreadFit::DimensionMismatch {
                field,
                external_mm,
                internal_mm,
            } => Some(format!(
                "{} mismatch: {} vs {}",
                field, external_mm, internal_mm
            )),
            ThreadFit::Interference { clearance_min_mm } => Some(format!(
                "Interference fit - threads will not assemble (clearance {} mm)",
                clearance_min_mm
            )),
            ThreadFit::Compatible { .. } => None,
        }
    }
}

/// Engagement quality of a compatible pair: `clearance_min / clearance_max`,
/// the fraction of the maximum clearance that is guaranteed at worst case.
///
/// 1 means the clearance band is a single value (every assembly sees the same
/// fit); 0 means the guaranteed clearance is zero even though the band allows
/// more. A line-to-line pair (both clearances zero) is defined as 1.
fn engagement_quality(clearance_min: Decimal, clearance_max: Decimal) -> Decimal {
    if clearance_max > dec!(0) {
        clearance_min / clearance_max
    } else {
        dec!(1)
    }
}

/// Check whether an external thread mates with an internal thread.
///
/// Fails fast on nominal-diameter or pitch mismatch (exact equality, no
/// rounding tolerance), then runs the tolerance-stack clearance analysis:
///
/// ```text
/// clearance_min = internal.pitch_dia_min - external.pitch_dia_max
/// clearance_max = internal.pitch_dia_max - external.pitch_dia_min
/// ```
///
/// A negative `clearance_min` is an interference verdict. Otherwise the pair
/// is compatible and the result carries both clearances, the engagement
/// quality, and the preferred-fit classification of the class pairing
/// (soft lookup, unknown pairings are `non-standard`).
///
/// Returns `Err` only for invalid thread geometry.
pub fn check_thread_compatibility(
    external: &ThreadSpec,
    internal: &ThreadSpec,
    tables: &MaterialTables,
) -> FitResult<ThreadFit> {
    external.validate()?;
    internal.validate()?;

    if external.nominal_diameter_mm != internal.nominal_diameter_mm {
        return Ok(ThreadFit::DimensionMismatch {
            field: MismatchField::NominalDiameter,
            external_mm: external.nominal_diameter_mm,
            internal_mm: internal.nominal_diameter_mm,
        });
    }
    if external.pitch_mm != internal.pitch_mm {
        return Ok(ThreadFit::DimensionMismatch {
            field: MismatchField::Pitch,
            external_mm: external.pitch_mm,
            internal_mm: internal.pitch_mm,
        });
    }

    let clearance_min = internal.pitch_dia_min_mm - external.pitch_dia_max_mm;
    let clearance_max = internal.pitch_dia_max_mm - external.pitch_dia_min_mm;

    if clearance_min < dec!(0) {
        return Ok(ThreadFit::Interference {
            clearance_min_mm: clearance_min,
        });
    }

    Ok(ThreadFit::Compatible {
        clearance_min_mm: clearance_min,
        clearance_max_mm: clearance_max,
        engagement_quality: engagement_quality(clearance_min, clearance_max),
        tolerance_class_match: tables
            .tolerance_class_fit(&external.thread_class, &internal.thread_class),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m5_external_6g() -> ThreadSpec {
        ThreadSpec {
            nominal_diameter_mm: dec!(5.0),
            pitch_mm: dec!(0.8),
            thread_class: "6g".to_string(),
            major_dia_min_mm: dec!(4.826),
            major_dia_max_mm: dec!(4.976),
            pitch_dia_min_mm: dec!(4.456),
            pitch_dia_max_mm: dec!(4.556),
            minor_dia_min_mm: dec!(4.134),
            minor_dia_max_mm: dec!(4.334),
            thread_angle_deg: dec!(60),
        }
    }

    fn m5_internal_6h() -> ThreadSpec {
        ThreadSpec {
            nominal_diameter_mm: dec!(5.0),
            pitch_mm: dec!(0.8),
            thread_class: "6H".to_string(),
            major_dia_min_mm: dec!(5.000),
            major_dia_max_mm: dec!(5.200),
            pitch_dia_min_mm: dec!(4.580),
            pitch_dia_max_mm: dec!(4.660),
            minor_dia_min_mm: dec!(4.134),
            minor_dia_max_mm: dec!(4.334),
            thread_angle_deg: dec!(60),
        }
    }

    #[test]
    fn test_compatible_pair() {
        let tables = MaterialTables::standard();
        let fit =
            check_thread_compatibility(&m5_external_6g(), &m5_internal_6h(), &tables).unwrap();

        match fit {
            ThreadFit::Compatible {
                clearance_min_mm,
                clearance_max_mm,
                tolerance_class_match,
                ..
            } => {
                assert_eq!(clearance_min_mm, dec!(0.024));
                assert_eq!(clearance_max_mm, dec!(0.204));
                assert_eq!(tolerance_class_match, ToleranceClassFit::Medium);
            }
            other => panic!("expected compatible, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_clearance_is_compatible() {
        // Internal pitch_dia_min exactly equals external pitch_dia_max
        let tables = MaterialTables::standard();
        let mut internal = m5_internal_6h();
        internal.pitch_dia_min_mm = dec!(4.556);

        let fit = check_thread_compatibility(&m5_external_6g(), &internal, &tables).unwrap();
        match fit {
            ThreadFit::Compatible {
                clearance_min_mm,
                engagement_quality,
                ..
            } => {
                assert_eq!(clearance_min_mm, dec!(0.000));
                assert_eq!(engagement_quality, dec!(0));
            }
            other => panic!("expected compatible, got {:?}", other),
        }
    }

    #[test]
    fn test_diameter_mismatch_names_field() {
        let tables = MaterialTables::standard();
        let mut internal = m5_internal_6h();
        internal.nominal_diameter_mm = dec!(6.0);

        let fit = check_thread_compatibility(&m5_external_6g(), &internal, &tables).unwrap();
        match fit {
            ThreadFit::DimensionMismatch {
                field,
                external_mm,
                internal_mm,
            } => {
                assert_eq!(field, MismatchField::NominalDiameter);
                assert_eq!(external_mm, dec!(5.0));
                assert_eq!(internal_mm, dec!(6.0));
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    fn fit_is_pitch_mismatch(fit: &ThreadFit) -> bool {
        matches!(
            fit,
            ThreadFit::DimensionMismatch {
                field: MismatchField::Pitch,
                ..
            }
        )
    }

    #[test]
    fn test_pitch_mismatch_names_field() {
        let tables = MaterialTables::standard();
        let mut internal = m5_internal_6h();
        internal.pitch_mm = dec!(0.5);

        let fit = check_thread_compatibility(&m5_external_6g(), &internal, &tables).unwrap();
        assert!(fit_is_pitch_mismatch(&fit));
        assert_eq!(
            fit.rejection_reason().unwrap(),
            "pitch mismatch: 0.8 vs 0.5"
        );
    }

    #[test]
    fn test_interference_reports_overlap() {
        let tables = MaterialTables::standard();
        let mut internal = m5_internal_6h();
        internal.pitch_dia_min_mm = dec!(4.400);

        let fit = check_thread_compatibility(&m5_external_6g(), &internal, &tables).unwrap();
        assert!(!fit.is_compatible());
        match fit {
            ThreadFit::Interference { clearance_min_mm } => {
                assert_eq!(clearance_min_mm, dec!(-0.156));
            }
            other => panic!("expected interference, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_class_pairing_is_non_standard() {
        let tables = MaterialTables::standard();
        let mut external = m5_external_6g();
        external.thread_class = "5g6g".to_string();

        let fit = check_thread_compatibility(&external, &m5_internal_6h(), &tables).unwrap();
        match fit {
            ThreadFit::Compatible {
                tolerance_class_match,
                ..
            } => assert_eq!(tolerance_class_match, ToleranceClassFit::NonStandard),
            other => panic!("expected compatible, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_geometry_is_error_not_verdict() {
        let tables = MaterialTables::standard();
        let mut external = m5_external_6g();
        external.pitch_mm = dec!(0);

        assert!(check_thread_compatibility(&external, &m5_internal_6h(), &tables).is_err());
    }

    #[test]
    fn test_engagement_quality_bounds() {
        assert_eq!(engagement_quality(dec!(0), dec!(0.2)), dec!(0));
        assert_eq!(engagement_quality(dec!(0.2), dec!(0.2)), dec!(1));
        assert_eq!(engagement_quality(dec!(0), dec!(0)), dec!(1));
        let q = engagement_quality(dec!(0.05), dec!(0.2));
        assert_eq!(q, dec!(0.25));
    }

    #[test]
    fn test_determinism() {
        let tables = MaterialTables::standard();
        let a = check_thread_compatibility(&m5_external_6g(), &m5_internal_6h(), &tables).unwrap();
        let b = check_thread_compatibility(&m5_external_6g(), &m5_internal_6h(), &tables).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_verdict_serialization() {
        let tables = MaterialTables::standard();
        let fit = check_thread_compatibility(&m5_external_6g(), &m5_internal_6h(), &tables).unwrap();
        let json = serde_json::to_string(&fit).unwrap();
        assert!(json.contains("\"verdict\":\"compatible\""));
        let roundtrip: ThreadFit = serde_json::from_str(&json).unwrap();
        assert_eq!(fit, roundtrip);
    }
}
