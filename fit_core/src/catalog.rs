//! # Parts Catalog Interface
//!
//! The engine never talks to storage. Candidate fasteners arrive through the
//! [`PartsCatalog`] trait, implemented by the host against whatever parts
//! database it has; the core only consumes the returned [`PartSpec`] records
//! and re-validates them exactly. Query composition, indexing, and timeouts
//! all belong on the host side of this boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::FitResult;
use crate::geometry::{Installation, PartSpec, ThreadSpec};

/// Requirement filter for candidate fasteners.
///
/// Fields split into three groups:
///
/// - **Hard criteria**: `thread_diameter_mm`, `thread_pitch_mm`,
///   `min_length_mm`, `max_length_mm`, `min_proof_load_kn`, `inventory`.
///   A candidate failing any of these is excluded outright.
/// - **Full-analysis criteria** (also hard): `mating_thread` runs the thread
///   fit check, `installation` runs the length/engagement check, and
///   `min_allowable_load_kn` runs the joint strength calculation against
///   the engagement the installation yields.
/// - **Soft criteria**: `drive_type`, `preferred_grade`,
///   `preferred_thread_class`. These only influence the score.
///
/// Every field is optional; an empty filter accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementFilter {
    /// Required nominal thread diameter (mm), exact match
    pub thread_diameter_mm: Option<Decimal>,

    /// Required thread pitch (mm), exact match
    pub thread_pitch_mm: Option<Decimal>,

    /// Minimum nominal length (mm)
    pub min_length_mm: Option<Decimal>,

    /// Maximum nominal length (mm)
    pub max_length_mm: Option<Decimal>,

    /// Minimum rated proof load (kN)
    pub min_proof_load_kn: Option<Decimal>,

    /// Restrict candidates to these part ids (e.g. on-hand inventory)
    pub inventory: Option<Vec<String>>,

    /// Internal thread the candidate must mate with
    pub mating_thread: Option<ThreadSpec>,

    /// Installation the candidate's length must suit
    pub installation: Option<Installation>,

    /// Minimum allowable working load (kN); requires `installation`
    pub min_allowable_load_kn: Option<Decimal>,

    /// Preferred drive type (soft)
    pub drive_type: Option<String>,

    /// Preferred material grade (soft)
    pub preferred_grade: Option<String>,

    /// Preferred thread tolerance class (soft)
    pub preferred_thread_class: Option<String>,
}

/// A source of candidate fasteners, implemented by the host.
///
/// The core consumes query results; it never composes the query itself.
pub trait PartsCatalog {
    /// Fetch candidate parts matching the filter's coarse criteria.
    ///
    /// The scorer re-validates every returned candidate against the full
    /// filter, so an implementation may over-return but must not under-return.
    fn query(&self, filter: &RequirementFilter) -> FitResult<Vec<PartSpec>>;
}
