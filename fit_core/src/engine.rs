//! # Compatibility Engine
//!
//! [`CompatibilityEngine`] bundles the material tables with the four
//! analyses behind one API. The engine holds no mutable state - the tables
//! are built once at construction - so a single instance can serve
//! concurrent requests from many threads.
//!
//! ## Example
//!
//! ```rust
//! use fit_core::engine::CompatibilityEngine;
//!
//! let engine = CompatibilityEngine::standard();
//! // hand `&engine` to request handlers; all methods take &self
//! ```

use rust_decimal::Decimal;

use crate::analysis::{
    calculate_joint_strength, check_length_compatibility, check_thread_compatibility,
    score_candidates, JointStrength, LengthCheck, ScoredCandidate, ThreadFit,
};
use crate::catalog::RequirementFilter;
use crate::errors::FitResult;
use crate::geometry::{Installation, PartSpec, ThreadSpec};
use crate::materials::MaterialTables;

/// The technical compatibility engine: thread fit, length/engagement, joint
/// strength, and candidate scoring over one set of material tables.
#[derive(Debug, Clone)]
pub struct CompatibilityEngine {
    tables: MaterialTables,
}

impl CompatibilityEngine {
    /// Create an engine over the given tables.
    pub fn new(tables: MaterialTables) -> Self {
        CompatibilityEngine { tables }
    }

    /// Create an engine over [`MaterialTables::standard`].
    pub fn standard() -> Self {
        CompatibilityEngine::new(MaterialTables::standard())
    }

    /// The tables this engine consults.
    pub fn tables(&self) -> &MaterialTables {
        &self.tables
    }

    /// Do an external and an internal thread geometrically mate?
    pub fn check_thread_compatibility(
        &self,
        external: &ThreadSpec,
        internal: &ThreadSpec,
    ) -> FitResult<ThreadFit> {
        check_thread_compatibility(external, internal, &self.tables)
    }

    /// Is the fastener's length adequate and safely engaged in the
    /// installation?
    pub fn check_length_compatibility(
        &self,
        screw: &PartSpec,
        install: &Installation,
    ) -> FitResult<LengthCheck> {
        check_length_compatibility(screw, install, &self.tables)
    }

    /// What load can the joint bear, and which failure mode limits it?
    pub fn calculate_joint_strength(
        &self,
        screw: &PartSpec,
        engagement_length_mm: Decimal,
        install: &Installation,
    ) -> FitResult<JointStrength> {
        calculate_joint_strength(screw, engagement_length_mm, install, &self.tables)
    }

    /// Rank already-fetched candidates against a requirement filter.
    pub fn score_candidates(
        &self,
        filter: &RequirementFilter,
        candidates: &[PartSpec],
    ) -> FitResult<Vec<ScoredCandidate>> {
        score_candidates(filter, candidates, &self.tables)
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        CompatibilityEngine::standard()
    }
}
