//! # Joint Strength Analysis
//!
//! Computes the thread shear area and the three candidate failure loads of a
//! threaded joint, then selects the limiting mode:
//!
//! 1. **Screw tensile** - the fastener's rated proof load.
//! 2. **External thread strip** - shear failure of the screw's thread flanks.
//! 3. **Internal thread strip** - shear failure of the base material's
//!    threads (taken as 25% stronger than the external threads, per
//!    convention).
//!
//! The shear area follows the ISO 898-1 approximation:
//!
//! ```text
//! As = 0.5 * pi * d * Le * (0.5 + 0.577 * (d - d2) / P)
//! ```
//!
//! with d2 the basic pitch diameter. The limiting mode is tracked directly
//! as the argmin of the three-way comparison; it is never re-derived by
//! comparing computed values for equality afterwards.
//!
//! The base material's tensile strength is a hard lookup: an unknown
//! material fails with [`FitError::MaterialNotFound`] instead of defaulting,
//! because every strip-strength number depends on it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{FitError, FitResult};
use crate::geometry::{Installation, PartSpec, ThreadSpec};
use crate::materials::MaterialTables;

/// Shear strength as a fraction of tensile strength (von Mises).
pub const SHEAR_TO_TENSILE: Decimal = dec!(0.577);

/// Internal threads are taken as 25% stronger than external threads.
pub const INTERNAL_THREAD_FACTOR: Decimal = dec!(1.25);

/// pi at f64 precision, the precision used by the published shear-area
/// tables this formula approximates.
const PI: Decimal = dec!(3.141592653589793);

/// Which failure mode limits the joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Bulk tensile failure of the fastener at its proof load
    ScrewTensile,
    /// Stripping of the screw's external threads
    ExternalThreadStrip,
    /// Stripping of the base material's internal threads
    InternalThreadStrip,
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureMode::ScrewTensile => write!(f, "screw_tensile"),
            FailureMode::ExternalThreadStrip => write!(f, "external_thread_strip"),
            FailureMode::InternalThreadStrip => write!(f, "internal_thread_strip"),
        }
    }
}

/// Strength breakdown for a threaded joint.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thread_shear_area_mm2": "67.25",
///   "screw_tensile_strength_kn": "8.14",
///   "external_strip_strength_kn": "31.04",
///   "internal_strip_strength_kn": "15.04",
///   "limiting_strength_kn": "8.14",
///   "limiting_mode": "screw_tensile",
///   "safety_factor": "2.5",
///   "allowable_load_kn": "3.256",
///   "allowable_load_n": "3256"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointStrength {
    /// Thread shear area As (mm^2)
    pub thread_shear_area_mm2: Decimal,

    /// Candidate: fastener proof load (kN)
    pub screw_tensile_strength_kn: Decimal,

    /// Candidate: external thread strip strength (kN)
    pub external_strip_strength_kn: Decimal,

    /// Candidate: internal thread strip strength (kN)
    pub internal_strip_strength_kn: Decimal,

    /// The smallest of the three candidates (kN)
    pub limiting_strength_kn: Decimal,

    /// Which candidate produced the minimum
    pub limiting_mode: FailureMode,

    /// Safety factor applied to the limiting strength
    pub safety_factor: Decimal,

    /// Allowable working load (kN)
    pub allowable_load_kn: Decimal,

    /// Allowable working load (N)
    pub allowable_load_n: Decimal,
}

/// Thread shear area per the ISO 898-1 approximation (mm^2).
///
/// Errors if `engagement_length_mm <= 0`; a zero or negative shear area is
/// never silently produced.
pub fn thread_shear_area(
    thread: &ThreadSpec,
    engagement_length_mm: Decimal,
) -> FitResult<Decimal> {
    thread.validate()?;
    if engagement_length_mm <= dec!(0) {
        return Err(FitError::invalid_input(
            "engagement_length_mm",
            engagement_length_mm.to_string(),
            "Engagement length must be positive",
        ));
    }

    let d = thread.nominal_diameter_mm;
    let d2 = thread.pitch_dia_basic_mm();

    Ok(dec!(0.5)
        * PI
        * d
        * engagement_length_mm
        * (dec!(0.5) + SHEAR_TO_TENSILE * (d - d2) / thread.pitch_mm))
}

/// Calculate the strength of a threaded joint.
///
/// `engagement_length_mm` is the axial length over which the threads carry
/// load - typically the engagement reported by the length analysis. The base
/// material and safety factor come from the installation context.
///
/// Validation failures (`engagement_length <= 0`, invalid part or
/// installation, unknown base material) are errors; there is no
/// "zero-strength success" outcome.
pub fn calculate_joint_strength(
    screw: &PartSpec,
    engagement_length_mm: Decimal,
    install: &Installation,
    tables: &MaterialTables,
) -> FitResult<JointStrength> {
    screw.validate()?;
    install.validate()?;

    let shear_area = thread_shear_area(&screw.thread, engagement_length_mm)?;
    let base_tensile = tables.base_tensile_mpa(&install.base_material)?;

    // Candidate failure loads, normalized to kN
    let screw_tensile = screw.proof_load_kn;
    let external_strip = shear_area * screw.tensile_strength_mpa * SHEAR_TO_TENSILE / dec!(1000);
    let internal_strip =
        shear_area * base_tensile * SHEAR_TO_TENSILE * INTERNAL_THREAD_FACTOR / dec!(1000);

    // Argmin with strict comparison; ties keep the earlier candidate.
    let mut limiting_mode = FailureMode::ScrewTensile;
    let mut limiting = screw_tensile;
    for (mode, candidate) in [
        (FailureMode::ExternalThreadStrip, external_strip),
        (FailureMode::InternalThreadStrip, internal_strip),
    ] {
        if candidate < limiting {
            limiting_mode = mode;
            limiting = candidate;
        }
    }

    let allowable_kn = limiting / install.safety_factor;

    Ok(JointStrength {
        thread_shear_area_mm2: shear_area,
        screw_tensile_strength_kn: screw_tensile,
        external_strip_strength_kn: external_strip,
        internal_strip_strength_kn: internal_strip,
        limiting_strength_kn: limiting,
        limiting_mode,
        safety_factor: install.safety_factor,
        allowable_load_kn: allowable_kn,
        allowable_load_n: allowable_kn * dec!(1000),
    })
}
