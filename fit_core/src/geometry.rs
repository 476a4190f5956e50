//! # Geometry Model
//!
//! Immutable value types describing threads, fasteners, and the installation
//! they go into. These are the inputs to every analysis in this crate.
//!
//! All dimensions are millimeters, strengths are megapascals, loads are
//! kilonewtons, and angles are degrees. Dimensional values are
//! [`Decimal`] so that tolerance-stack arithmetic is exact; a clearance of
//! zero is exactly zero, not a float that landed near it.
//!
//! Only straight, single-start, 60°-type threads are modeled.
//!
//! ## Example
//!
//! ```rust
//! use fit_core::geometry::ThreadSpec;
//! use rust_decimal_macros::dec;
//!
//! // M5x0.8 external thread, class 6g
//! let thread = ThreadSpec {
//!     nominal_diameter_mm: dec!(5.0),
//!     pitch_mm: dec!(0.8),
//!     thread_class: "6g".to_string(),
//!     major_dia_min_mm: dec!(4.826),
//!     major_dia_max_mm: dec!(4.976),
//!     pitch_dia_min_mm: dec!(4.456),
//!     pitch_dia_max_mm: dec!(4.556),
//!     minor_dia_min_mm: dec!(4.134),
//!     minor_dia_max_mm: dec!(4.334),
//!     thread_angle_deg: dec!(60),
//! };
//! assert!(thread.validate().is_ok());
//! assert_eq!(thread.pitch_dia_basic_mm(), dec!(4.506));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{FitError, FitResult};

fn default_thread_angle() -> Decimal {
    dec!(60)
}

fn default_safety_factor() -> Decimal {
    dec!(2.5)
}

/// A thread's manufacturing geometry with tolerance bounds.
///
/// Diameter bounds come from the thread's tolerance class (e.g. ISO 965-1
/// tables). The pitch diameter bounds govern whether two threads mate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "nominal_diameter_mm": "5.0",
///   "pitch_mm": "0.8",
///   "thread_class": "6g",
///   "major_dia_min_mm": "4.826",
///   "major_dia_max_mm": "4.976",
///   "pitch_dia_min_mm": "4.456",
///   "pitch_dia_max_mm": "4.556",
///   "minor_dia_min_mm": "4.134",
///   "minor_dia_max_mm": "4.334",
///   "thread_angle_deg": "60"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSpec {
    /// Nominal diameter d (mm), e.g. 5.0 for M5
    pub nominal_diameter_mm: Decimal,

    /// Thread pitch P (mm)
    pub pitch_mm: Decimal,

    /// Tolerance class designation, free-form standard code (e.g. "6g", "6H")
    pub thread_class: String,

    /// Minimum major diameter (mm)
    pub major_dia_min_mm: Decimal,

    /// Maximum major diameter (mm)
    pub major_dia_max_mm: Decimal,

    /// Minimum pitch diameter (mm)
    pub pitch_dia_min_mm: Decimal,

    /// Maximum pitch diameter (mm)
    pub pitch_dia_max_mm: Decimal,

    /// Minimum minor diameter (mm)
    pub minor_dia_min_mm: Decimal,

    /// Maximum minor diameter (mm)
    pub minor_dia_max_mm: Decimal,

    /// Thread flank angle (degrees), 60 for ISO metric
    #[serde(default = "default_thread_angle")]
    pub thread_angle_deg: Decimal,
}

impl ThreadSpec {
    /// Validate geometric invariants.
    pub fn validate(&self) -> FitResult<()> {
        if self.nominal_diameter_mm <= dec!(0) {
            return Err(FitError::invalid_input(
                "nominal_diameter_mm",
                self.nominal_diameter_mm.to_string(),
                "Nominal diameter must be positive",
            ));
        }
        if self.pitch_mm <= dec!(0) {
            return Err(FitError::invalid_input(
                "pitch_mm",
                self.pitch_mm.to_string(),
                "Pitch must be positive",
            ));
        }
        if self.thread_angle_deg <= dec!(0) {
            return Err(FitError::invalid_input(
                "thread_angle_deg",
                self.thread_angle_deg.to_string(),
                "Thread angle must be positive",
            ));
        }
        let pairs = [
            ("major_dia", self.major_dia_min_mm, self.major_dia_max_mm),
            ("pitch_dia", self.pitch_dia_min_mm, self.pitch_dia_max_mm),
            ("minor_dia", self.minor_dia_min_mm, self.minor_dia_max_mm),
        ];
        for (name, min, max) in pairs {
            if min > max {
                return Err(FitError::invalid_input(
                    name,
                    format!("{} > {}", min, max),
                    "Minimum diameter exceeds maximum",
                ));
            }
        }
        Ok(())
    }

    /// Basic pitch diameter d2 = (pitch_dia_min + pitch_dia_max) / 2 (mm)
    pub fn pitch_dia_basic_mm(&self) -> Decimal {
        (self.pitch_dia_min_mm + self.pitch_dia_max_mm) / dec!(2)
    }
}

/// A manufactured fastener: thread geometry plus length, material, and
/// strength ratings.
///
/// Immutable value object. Created by catalog ingestion, consumed by value
/// by every analyzer, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    /// Catalog identifier (e.g. "DIN912-M5x16-8.8")
    pub part_id: String,

    /// Thread geometry
    pub thread: ThreadSpec,

    /// Nominal length (mm)
    pub length_mm: Decimal,

    /// Upper length tolerance (mm), >= 0
    pub length_tolerance_plus_mm: Decimal,

    /// Lower length tolerance (mm), <= 0
    pub length_tolerance_minus_mm: Decimal,

    /// Material grade code (e.g. "8.8", "A2-70")
    pub material_grade: String,

    /// Tensile strength (MPa)
    pub tensile_strength_mpa: Decimal,

    /// Rated proof load (kN)
    pub proof_load_kn: Decimal,

    /// Head height (mm), if headed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_height_mm: Option<Decimal>,

    /// Threaded length (mm). None means fully threaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_length_mm: Option<Decimal>,

    /// Drive type (e.g. "hex_socket", "torx"), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_type: Option<String>,
}

impl PartSpec {
    /// Validate part invariants, including the embedded thread geometry.
    pub fn validate(&self) -> FitResult<()> {
        self.thread.validate()?;
        if self.part_id.is_empty() {
            return Err(FitError::missing_field("part_id"));
        }
        if self.length_mm <= dec!(0) {
            return Err(FitError::invalid_input(
                "length_mm",
                self.length_mm.to_string(),
                "Length must be positive",
            ));
        }
        if self.length_tolerance_plus_mm < dec!(0) {
            return Err(FitError::invalid_input(
                "length_tolerance_plus_mm",
                self.length_tolerance_plus_mm.to_string(),
                "Plus tolerance cannot be negative",
            ));
        }
        if self.length_tolerance_minus_mm > dec!(0) {
            return Err(FitError::invalid_input(
                "length_tolerance_minus_mm",
                self.length_tolerance_minus_mm.to_string(),
                "Minus tolerance cannot be positive",
            ));
        }
        if self.tensile_strength_mpa <= dec!(0) {
            return Err(FitError::invalid_input(
                "tensile_strength_mpa",
                self.tensile_strength_mpa.to_string(),
                "Tensile strength must be positive",
            ));
        }
        if self.proof_load_kn <= dec!(0) {
            return Err(FitError::invalid_input(
                "proof_load_kn",
                self.proof_load_kn.to_string(),
                "Proof load must be positive",
            ));
        }
        if let Some(head) = self.head_height_mm {
            if head <= dec!(0) {
                return Err(FitError::invalid_input(
                    "head_height_mm",
                    head.to_string(),
                    "Head height must be positive",
                ));
            }
        }
        if let Some(tl) = self.thread_length_mm {
            if tl < dec!(0) || tl > self.length_mm {
                return Err(FitError::invalid_input(
                    "thread_length_mm",
                    tl.to_string(),
                    "Thread length must be between 0 and the part length",
                ));
            }
        }
        Ok(())
    }

    /// Shortest realized length: length + minus tolerance (mm)
    pub fn min_length_mm(&self) -> Decimal {
        self.length_mm + self.length_tolerance_minus_mm
    }

    /// Longest realized length: length + plus tolerance (mm)
    pub fn max_length_mm(&self) -> Decimal {
        self.length_mm + self.length_tolerance_plus_mm
    }

    /// Unthreaded grip length under the head (mm).
    ///
    /// Defined as exactly 0 for fully threaded fasteners
    /// (`thread_length_mm` is None), by convention.
    pub fn grip_length_mm(&self) -> Decimal {
        match self.thread_length_mm {
            Some(tl) => self.length_mm - tl,
            None => dec!(0),
        }
    }

    /// True if the fastener is threaded along its full length.
    pub fn is_fully_threaded(&self) -> bool {
        self.thread_length_mm.is_none()
    }
}

/// Installation context for a single joint: what the fastener goes into.
///
/// Supplied per call, never persisted. `nut_height_mm` distinguishes the two
/// installation types: Some means a through-bolt clamped by a nut, None means
/// a blind tapped hole in the base material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    /// Clamped material thickness (mm)
    pub material_thickness_mm: Decimal,

    /// Nut height (mm) for through-bolt installs; None for blind tapped holes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nut_height_mm: Option<Decimal>,

    /// Base material identifier (e.g. "aluminum_6061", "steel_mild")
    pub base_material: String,

    /// Safety factor applied to the limiting strength
    #[serde(default = "default_safety_factor")]
    pub safety_factor: Decimal,
}

impl Installation {
    /// Blind tapped-hole installation with the default safety factor.
    pub fn blind_hole(material_thickness_mm: Decimal, base_material: impl Into<String>) -> Self {
        Installation {
            material_thickness_mm,
            nut_height_mm: None,
            base_material: base_material.into(),
            safety_factor: default_safety_factor(),
        }
    }

    /// Through-bolt installation with the default safety factor.
    pub fn through_bolt(
        material_thickness_mm: Decimal,
        nut_height_mm: Decimal,
        base_material: impl Into<String>,
    ) -> Self {
        Installation {
            material_thickness_mm,
            nut_height_mm: Some(nut_height_mm),
            base_material: base_material.into(),
            safety_factor: default_safety_factor(),
        }
    }

    /// Override the safety factor.
    pub fn with_safety_factor(mut self, safety_factor: Decimal) -> Self {
        self.safety_factor = safety_factor;
        self
    }

    /// True when a mating nut is present.
    pub fn is_through_bolt(&self) -> bool {
        self.nut_height_mm.is_some()
    }

    /// Validate installation parameters.
    pub fn validate(&self) -> FitResult<()> {
        if self.material_thickness_mm <= dec!(0) {
            return Err(FitError::invalid_input(
                "material_thickness_mm",
                self.material_thickness_mm.to_string(),
                "Material thickness must be positive",
            ));
        }
        if let Some(nut) = self.nut_height_mm {
            if nut <= dec!(0) {
                return Err(FitError::invalid_input(
                    "nut_height_mm",
                    nut.to_string(),
                    "Nut height must be positive",
                ));
            }
        }
        if self.base_material.is_empty() {
            return Err(FitError::missing_field("base_material"));
        }
        if self.safety_factor <= dec!(0) {
            return Err(FitError::invalid_input(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor must be positive",
            ));
        }
        Ok(())
    }
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

    fn m5_screw() -> PartSpec {
        PartSpec {
            part_id: "DIN912-M5x16-8.8".to_string(),
            thread: m5_external_6g(),
            length_mm: dec!(16),
            length_tolerance_plus_mm: dec!(0),
            length_tolerance_minus_mm: dec!(-0.5),
            material_grade: "8.8".to_string(),
            tensile_strength_mpa: dec!(800),
            proof_load_kn: dec!(8.14),
            head_height_mm: Some(dec!(5)),
            thread_length_mm: None,
            drive_type: Some("hex_socket".to_string()),
        }
    }

    #[test]
    fn test_thread_validate_ok() {
        assert!(m5_external_6g().validate().is_ok());
    }

    #[test]
    fn test_thread_pitch_dia_basic() {
        assert_eq!(m5_external_6g().pitch_dia_basic_mm(), dec!(4.506));
    }

    #[test]
    fn test_thread_rejects_nonpositive_pitch() {
        let mut thread = m5_external_6g();
        thread.pitch_mm = dec!(0);
        let err = thread.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_thread_rejects_inverted_bounds() {
        let mut thread = m5_external_6g();
        thread.pitch_dia_min_mm = dec!(4.6);
        assert!(thread.validate().is_err());
    }

    #[test]
    fn test_part_length_range() {
        let screw = m5_screw();
        assert_eq!(screw.min_length_mm(), dec!(15.5));
        assert_eq!(screw.max_length_mm(), dec!(16));
    }

    #[test]
    fn test_grip_length_fully_threaded_is_zero() {
        let screw = m5_screw();
        assert!(screw.is_fully_threaded());
        assert_eq!(screw.grip_length_mm(), dec!(0));
    }

    #[test]
    fn test_grip_length_partial_thread() {
        let mut screw = m5_screw();
        screw.thread_length_mm = Some(dec!(12));
        assert_eq!(screw.grip_length_mm(), dec!(4));
    }

    #[test]
    fn test_part_rejects_thread_length_beyond_length() {
        let mut screw = m5_screw();
        screw.thread_length_mm = Some(dec!(20));
        assert!(screw.validate().is_err());
    }

    #[test]
    fn test_part_rejects_positive_minus_tolerance() {
        let mut screw = m5_screw();
        screw.length_tolerance_minus_mm = dec!(0.5);
        assert!(screw.validate().is_err());
    }

    #[test]
    fn test_installation_constructors() {
        let blind = Installation::blind_hole(dec!(10), "aluminum_6061");
        assert!(!blind.is_through_bolt());
        assert_eq!(blind.safety_factor, dec!(2.5));

        let bolted = Installation::through_bolt(dec!(10), dec!(4), "steel_mild")
            .with_safety_factor(dec!(3));
        assert!(bolted.is_through_bolt());
        assert_eq!(bolted.safety_factor, dec!(3));
    }

    #[test]
    fn test_installation_rejects_zero_thickness() {
        let install = Installation::blind_hole(dec!(0), "steel_mild");
        assert!(install.validate().is_err());
    }

    #[test]
    fn test_part_serialization_roundtrip() {
        let screw = m5_screw();
        let json = serde_json::to_string_pretty(&screw).unwrap();
        let roundtrip: PartSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(screw, roundtrip);
    }

    #[test]
    fn test_thread_angle_defaults_on_deserialize() {
        let json = r#"{
            "nominal_diameter_mm": "5.0",
            "pitch_mm": "0.8",
            "thread_class": "6g",
            "major_dia_min_mm": "4.826",
            "major_dia_max_mm": "4.976",
            "pitch_dia_min_mm": "4.456",
            "pitch_dia_max_mm": "4.556",
            "minor_dia_min_mm": "4.134",
            "minor_dia_max_mm": "4.334"
        }"#;
        let thread: ThreadSpec = serde_json::from_str(json).unwrap();
        assert_eq!(thread.thread_angle_deg, dec!(60));
    }
}
