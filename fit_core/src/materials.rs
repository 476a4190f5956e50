//! # Material Property Tables
//!
//! Read-only lookup tables consulted by the analyzers: base-material tensile
//! strengths, minimum thread-engagement ratios, and preferred tolerance-class
//! fits. Built once with [`MaterialTables::standard`] and never written
//! afterwards, so a single instance can be shared across threads.
//!
//! Two lookup policies exist, deliberately:
//!
//! - **Hard lookup** ([`MaterialTables::base_tensile_mpa`]): joint strength
//!   depends entirely on the base material's tensile value, so an unknown
//!   material is a [`FitError::MaterialNotFound`], never a default.
//! - **Soft lookup** ([`MaterialTables::min_engagement_ratio`],
//!   [`MaterialTables::tolerance_class_fit`]): unknown keys fall back to
//!   named conservative defaults ([`DEFAULT_MIN_ENGAGEMENT_RATIO`],
//!   [`ToleranceClassFit::NonStandard`]).
//!
//! ## Example
//!
//! ```rust
//! use fit_core::materials::MaterialTables;
//! use rust_decimal_macros::dec;
//!
//! let tables = MaterialTables::standard();
//! assert_eq!(tables.base_tensile_mpa("aluminum_6061").unwrap(), dec!(310));
//! assert_eq!(tables.min_engagement_ratio("10.9", "steel"), dec!(1.25));
//! // Unknown pair falls back to the conservative default
//! assert_eq!(tables.min_engagement_ratio("8.8", "titanium"), dec!(2.0));
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{FitError, FitResult};

// serde stays on ToleranceClassFit only; the tables themselves are engine
// configuration, not a wire type (tuple-keyed maps do not serialize to JSON).

/// Conservative fallback when a (grade, base-material family) pair has no
/// entry in the minimum-engagement-ratio table.
pub const DEFAULT_MIN_ENGAGEMENT_RATIO: Decimal = dec!(2.0);

/// Classification of an (external class, internal class) tolerance pairing
/// per the ISO 965-1 preferred fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToleranceClassFit {
    /// Tight running fit (e.g. 4g6g / 5H)
    Close,
    /// General-purpose fit (e.g. 6g / 6H)
    Medium,
    /// Loose fit for plating or dirty environments (e.g. 8g / 7H)
    Loose,
    /// Pairing not in the preferred-fits table
    NonStandard,
}

impl std::fmt::Display for ToleranceClassFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToleranceClassFit::Close => write!(f, "close"),
            ToleranceClassFit::Medium => write!(f, "medium"),
            ToleranceClassFit::Loose => write!(f, "loose"),
            ToleranceClassFit::NonStandard => write!(f, "non-standard"),
        }
    }
}

/// Derive the base-material family from a material identifier:
/// the prefix before the first underscore.
///
/// "aluminum_6061" → "aluminum", "steel_mild" → "steel", "brass" → "brass".
pub fn material_family(material: &str) -> &str {
    material.split('_').next().unwrap_or(material)
}

/// Immutable material/engagement/fit lookup tables.
///
/// Construct with [`MaterialTables::standard`] and extend with the `with_*`
/// builders if the host has project-specific materials.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTables {
    /// Base-material tensile strength (MPa) by material identifier
    base_tensile_mpa: HashMap<String, Decimal>,

    /// Minimum engagement ratio by (screw grade, base-material family)
    min_engagement_ratio: HashMap<(String, String), Decimal>,

    /// Preferred fits by (external class, internal class)
    preferred_fits: HashMap<(String, String), ToleranceClassFit>,
}

impl MaterialTables {
    /// Empty tables. Every base-material lookup fails and every soft lookup
    /// returns its conservative default.
    pub fn empty() -> Self {
        MaterialTables {
            base_tensile_mpa: HashMap::new(),
            min_engagement_ratio: HashMap::new(),
            preferred_fits: HashMap::new(),
        }
    }

    /// Standard tables: common base materials, the ISO 898-1 engagement-ratio
    /// recommendations, and the ISO 965-1 preferred tolerance-class fits.
    pub fn standard() -> Self {
        let mut tables = MaterialTables::empty();

        // Typical ultimate tensile strengths (MPa)
        for (name, mpa) in [
            ("steel_mild", dec!(400)),
            ("steel_structural", dec!(510)),
            ("steel_alloy_4140", dec!(655)),
            ("stainless_304", dec!(505)),
            ("aluminum_6061", dec!(310)),
            ("aluminum_7075", dec!(572)),
            ("brass_360", dec!(345)),
            ("cast_iron_gray", dec!(220)),
            ("titanium_grade5", dec!(950)),
        ] {
            tables.base_tensile_mpa.insert(name.to_string(), mpa);
        }

        // ISO 898-1 minimum engagement-ratio recommendations
        for (grade, family, ratio) in [
            ("8.8", "steel", dec!(1.0)),
            ("10.9", "steel", dec!(1.25)),
            ("12.9", "steel", dec!(1.5)),
            ("8.8", "aluminum", dec!(2.0)),
            ("10.9", "aluminum", dec!(2.5)),
            ("A2-70", "steel", dec!(1.5)),
            ("A2-70", "aluminum", dec!(2.5)),
        ] {
            tables
                .min_engagement_ratio
                .insert((grade.to_string(), family.to_string()), ratio);
        }

        // ISO 965-1 preferred fits
        for (external, internal, fit) in [
            ("6g", "6H", ToleranceClassFit::Medium),
            ("6g", "6G", ToleranceClassFit::Medium),
            ("4g6g", "5H", ToleranceClassFit::Close),
            ("8g", "7H", ToleranceClassFit::Loose),
        ] {
            tables
                .preferred_fits
                .insert((external.to_string(), internal.to_string()), fit);
        }

        tables
    }

    /// Add or override a base-material tensile strength (MPa).
    pub fn with_base_material(mut self, material: impl Into<String>, tensile_mpa: Decimal) -> Self {
        self.base_tensile_mpa.insert(material.into(), tensile_mpa);
        self
    }

    /// Add or override a minimum engagement ratio for a
    /// (screw grade, base-material family) pair.
    pub fn with_engagement_ratio(
        mut self,
        grade: impl Into<String>,
        family: impl Into<String>,
        ratio: Decimal,
    ) -> Self {
        self.min_engagement_ratio
            .insert((grade.into(), family.into()), ratio);
        self
    }

    /// Add or override a preferred tolerance-class fit.
    pub fn with_preferred_fit(
        mut self,
        external_class: impl Into<String>,
        internal_class: impl Into<String>,
        fit: ToleranceClassFit,
    ) -> Self {
        self.preferred_fits
            .insert((external_class.into(), internal_class.into()), fit);
        self
    }

    /// Tensile strength (MPa) of a base material. Hard lookup: unknown
    /// materials are an error, because strength results depend entirely
    /// on this value.
    pub fn base_tensile_mpa(&self, material: &str) -> FitResult<Decimal> {
        self.base_tensile_mpa
            .get(material)
            .copied()
            .ok_or_else(|| FitError::material_not_found(material))
    }

    /// Minimum engagement ratio for a (screw grade, base-material family)
    /// pair. Soft lookup: unknown pairs return
    /// [`DEFAULT_MIN_ENGAGEMENT_RATIO`].
    pub fn min_engagement_ratio(&self, grade: &str, family: &str) -> Decimal {
        self.min_engagement_ratio
            .get(&(grade.to_string(), family.to_string()))
            .copied()
            .unwrap_or(DEFAULT_MIN_ENGAGEMENT_RATIO)
    }

    /// Fit classification for an (external class, internal class) pair.
    /// Soft lookup: unknown pairs return [`ToleranceClassFit::NonStandard`].
    pub fn tolerance_class_fit(&self, external_class: &str, internal_class: &str) -> ToleranceClassFit {
        self.preferred_fits
            .get(&(external_class.to_string(), internal_class.to_string()))
            .copied()
            .unwrap_or(ToleranceClassFit::NonStandard)
    }
}

impl Default for MaterialTables {
    fn default() -> Self {
        MaterialTables::standard()
    }
}
