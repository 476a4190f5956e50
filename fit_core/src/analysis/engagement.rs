//! # Length and Engagement Analysis
//!
//! Evaluates whether a fastener's length, in a given installation, yields
//! adequate and safe thread engagement.
//!
//! Two installation types branch the analysis:
//!
//! - **Through-bolt with nut**: engagement is the nut height, and at least
//!   one full thread pitch must protrude past the nut at the shortest
//!   realized length (the ISO 898-2 visual-inspection rule).
//! - **Blind tapped hole**: engagement is limited by the available depth,
//!   and feasibility is governed entirely by the engagement ratio.
//!
//! The required minimum engagement ratio is a soft lookup keyed by
//! (screw grade, base-material family); unknown pairs use the conservative
//! default of 2.0 diameters.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::FitResult;
use crate::geometry::{Installation, PartSpec};
use crate::materials::{material_family, MaterialTables};

/// Engagement is "marginal" below this multiple of the required minimum
/// ratio; marginal joints get an advisory recommendation.
const MARGINAL_RATIO_FACTOR: Decimal = dec!(1.1);

/// Protrusion past the nut beyond this many pitches draws an
/// excessive-protrusion advisory.
const EXCESS_PROTRUSION_PITCHES: Decimal = dec!(3);

/// Results of a length/engagement check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_compatible": true,
///   "length_ok": true,
///   "sufficient_engagement": true,
///   "engagement_length_mm": "10",
///   "engagement_ratio": "2",
///   "min_engagement_ratio": "2.0",
///   "protrusion_min_mm": "5.5",
///   "protrusion_max_mm": "6",
///   "grip_length_mm": "0",
///   "recommendations": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthCheck {
    /// Overall verdict: `length_ok && sufficient_engagement`
    pub length_compatible: bool,

    /// Length rule for the installation type (always true for blind holes)
    pub length_ok: bool,

    /// `engagement_ratio >= min_engagement_ratio`
    pub sufficient_engagement: bool,

    /// Thread engagement length (mm)
    pub engagement_length_mm: Decimal,

    /// Engagement length divided by nominal diameter
    pub engagement_ratio: Decimal,

    /// Required minimum ratio from the lookup table (or its default)
    pub min_engagement_ratio: Decimal,

    /// Protrusion past the material at the shortest realized length (mm)
    pub protrusion_min_mm: Decimal,

    /// Protrusion past the material at the longest realized length (mm)
    pub protrusion_max_mm: Decimal,

    /// Unthreaded grip length under the head (mm); 0 when fully threaded
    pub grip_length_mm: Decimal,

    /// Actionable advisories for marginal or oversized selections
    pub recommendations: Vec<String>,
}

/// Check a fastener's length against an installation.
///
/// Derives the realized length range from the asymmetric tolerances,
/// computes engagement and protrusion for the installation type, and
/// compares the engagement ratio against the table minimum for the
/// (screw grade, base-material family) pair.
///
/// Inadequate length or engagement is a verdict in [`LengthCheck`], not an
/// error; `Err` is returned only for invalid part or installation data.
pub fn check_length_compatibility(
    screw: &PartSpec,
    install: &Installation,
    tables: &MaterialTables,
) -> FitResult<LengthCheck> {
    screw.validate()?;
    install.validate()?;

    let min_length = screw.min_length_mm();
    let max_length = screw.max_length_mm();
    let grip_length = screw.grip_length_mm();
    let pitch = screw.thread.pitch_mm;
    let thickness = install.material_thickness_mm;

    let (engagement, protrusion_min, protrusion_max, length_ok) = match install.nut_height_mm {
        Some(nut_height) => {
            // Through-bolt: the nut provides the engagement, and the shortest
            // screw must still show one full pitch past the nut.
            let protrusion_min = min_length - thickness;
            let protrusion_max = max_length - thickness;
            let length_ok = protrusion_min >= nut_height + pitch;
            (nut_height, protrusion_min, protrusion_max, length_ok)
        }
        None => {
            // Blind hole: engagement limited by available depth; feasibility
            // is governed by the engagement ratio alone.
            let engagement = max_length.min(thickness);
            let protrusion_min = (min_length - thickness).max(dec!(0));
            let protrusion_max = (max_length - thickness).max(dec!(0));
            (engagement, protrusion_min, protrusion_max, true)
        }
    };

    let engagement_ratio = engagement / screw.thread.nominal_diameter_mm;
    let min_engagement_ratio = tables.min_engagement_ratio(
        &screw.material_grade,
        material_family(&install.base_material),
    );
    let sufficient_engagement = engagement_ratio >= min_engagement_ratio;

    let recommendations = length_recommendations(
        screw,
        install,
        engagement_ratio,
        min_engagement_ratio,
        protrusion_min,
        protrusion_max,
        length_ok,
    );

    Ok(LengthCheck {
        length_compatible: length_ok && sufficient_engagement,
        length_ok,
        sufficient_engagement,
        engagement_length_mm: engagement,
        engagement_ratio,
        min_engagement_ratio,
        protrusion_min_mm: protrusion_min,
        protrusion_max_mm: protrusion_max,
        grip_length_mm: grip_length,
        recommendations,
    })
}

/// Threshold-driven advisory strings for marginal or oversized selections.
fn length_recommendations(
    screw: &PartSpec,
    install: &Installation,
    engagement_ratio: Decimal,
    min_engagement_ratio: Decimal,
    protrusion_min: Decimal,
    protrusion_max: Decimal,
    length_ok: bool,
) -> Vec<String> {
    let mut recs = Vec::new();
    let pitch = screw.thread.pitch_mm;

    if engagement_ratio < min_engagement_ratio {
        let needed = min_engagement_ratio * screw.thread.nominal_diameter_mm;
        recs.push(format!(
            "Insufficient thread engagement: at least {} mm ({} x diameter) is required",
            needed, min_engagement_ratio
        ));
    } else if engagement_ratio < min_engagement_ratio * MARGINAL_RATIO_FACTOR {
        recs.push(
            "Thread engagement is marginal; consider the next longer standard length".to_string(),
        );
    }

    match install.nut_height_mm {
        Some(nut_height) => {
            if !length_ok {
                recs.push(format!(
                    "Shortest realized length protrudes {} mm; at least one full pitch \
                     ({} mm) must show past the nut",
                    protrusion_min,
                    nut_height + pitch
                ));
            } else if protrusion_max > nut_height + EXCESS_PROTRUSION_PITCHES * pitch {
                recs.push(format!(
                    "Protrusion of up to {} mm past the joint; a shorter fastener reduces \
                     snag and clearance issues",
                    protrusion_max
                ));
            }
        }
        None => {
            if protrusion_max > dec!(0) {
                recs.push(format!(
                    "Fastener exceeds the available thread depth by up to {} mm and may \
                     bottom out",
                    protrusion_max
                ));
            }
        }
    }

    recs
}
