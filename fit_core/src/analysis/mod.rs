//! # Compatibility Analyses
//!
//! The three analyzers and the candidate scorer. Each analysis follows the
//! same pattern:
//!
//! - Pure function over immutable inputs, no hidden state
//! - Expected engineering outcomes (mismatch, interference, insufficient
//!   engagement) returned as data in the result type
//! - `Err` reserved for validation failures and hard lookup misses
//!
//! Identical inputs always produce bit-identical results; the only shared
//! state is the read-only [`MaterialTables`](crate::materials::MaterialTables)
//! passed by reference.
//!
//! ## Available Analyses
//!
//! - [`thread_fit`] - do an external and internal thread geometrically mate
//! - [`engagement`] - is a fastener's length adequate and safely engaged
//! - [`strength`] - what load can the joint bear, and which mode fails first
//! - [`scoring`] - rank fetched candidates against a requirement filter

pub mod engagement;
pub mod scoring;
pub mod strength;
pub mod thread_fit;

// Re-export commonly used types
pub use engagement::{check_length_compatibility, LengthCheck};
pub use scoring::{score_candidates, ScoredCandidate};
pub use strength::{calculate_joint_strength, thread_shear_area, FailureMode, JointStrength};
pub use thread_fit::{check_thread_compatibility, MismatchField, ThreadFit};
