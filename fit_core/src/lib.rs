//! # fit_core - Fastener Compatibility Calculation Engine
//!
//! `fit_core` answers three engineering questions about threaded fasteners:
//!
//! 1. Do an external and internal thread geometrically mate?
//! 2. Is a fastener's length sufficient and safely engaged in a joint?
//! 3. What load can the joint bear, and by which failure mode does it fail?
//!
//! It implements the ISO 965-1 tolerance-stack fit analysis and the
//! ISO 898-1/898-2 strength and engagement rules, plus a deterministic
//! scorer for ranking candidate fasteners against a requirement filter.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Exact arithmetic**: Dimensional and strength math runs on
//!   `rust_decimal` fixed-point values; floats appear only at the caller's
//!   boundary
//! - **Verdicts, not exceptions**: Expected engineering outcomes
//!   (interference, insufficient engagement) come back as data; errors are
//!   reserved for invalid inputs and missing strength data
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use fit_core::engine::CompatibilityEngine;
//! use fit_core::geometry::{Installation, PartSpec, ThreadSpec};
//! use rust_decimal_macros::dec;
//!
//! let engine = CompatibilityEngine::standard();
//!
//! let screw = PartSpec {
//!     part_id: "DIN912-M5x16-8.8".to_string(),
//!     thread: ThreadSpec {
//!         nominal_diameter_mm: dec!(5.0),
//!         pitch_mm: dec!(0.8),
//!         thread_class: "6g".to_string(),
//!         major_dia_min_mm: dec!(4.826),
//!         major_dia_max_mm: dec!(4.976),
//!         pitch_dia_min_mm: dec!(4.456),
//!         pitch_dia_max_mm: dec!(4.556),
//!         minor_dia_min_mm: dec!(4.134),
//!         minor_dia_max_mm: dec!(4.334),
//!         thread_angle_deg: dec!(60),
//!     },
//!     length_mm: dec!(16),
//!     length_tolerance_plus_mm: dec!(0),
//!     length_tolerance_minus_mm: dec!(-0.5),
//!     material_grade: "8.8".to_string(),
//!     tensile_strength_mpa: dec!(800),
//!     proof_load_kn: dec!(8.14),
//!     head_height_mm: None,
//!     thread_length_mm: None,
//!     drive_type: None,
//! };
//!
//! let install = Installation::blind_hole(dec!(10), "aluminum_6061");
//! let check = engine.check_length_compatibility(&screw, &install).unwrap();
//! let strength = engine
//!     .calculate_joint_strength(&screw, check.engagement_length_mm, &install)
//!     .unwrap();
//! println!("allowable load: {} N", strength.allowable_load_n);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Thread, part, and installation value types
//! - [`materials`] - Read-only material/engagement/fit lookup tables
//! - [`analysis`] - The three analyzers and the candidate scorer
//! - [`catalog`] - Parts catalog interface and requirement filter
//! - [`engine`] - Tables plus analyses behind one shareable API
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod catalog;
pub mod engine;
pub mod errors;
pub mod geometry;
pub mod materials;

// Re-export commonly used types at crate root for convenience
pub use analysis::{FailureMode, JointStrength, LengthCheck, ScoredCandidate, ThreadFit};
pub use catalog::{PartsCatalog, RequirementFilter};
pub use engine::CompatibilityEngine;
pub use errors::{FitError, FitResult};
pub use geometry::{Installation, PartSpec, ThreadSpec};
pub use materials::{MaterialTables, ToleranceClassFit};
