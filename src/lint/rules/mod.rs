//! Built-in lint rules.
//!
//! This module contains the cross-reference rules R1 to R8 applied to
//! every normalized document.

pub mod alignment;
pub mod conformance_vectors;
pub mod constant_resolution;
pub mod duplicate_identifiers;
pub mod edge_case_coverage;
pub mod error_types;
pub mod register_closure;
pub mod structure_closure;

pub use alignment::AlignmentRule;
pub use conformance_vectors::ConformanceVectorRule;
pub use constant_resolution::ConstantResolutionRule;
pub use duplicate_identifiers::DuplicateIdentifierRule;
pub use edge_case_coverage::EdgeCaseCoverageRule;
pub use error_types::ErrorTypeConsistencyRule;
pub use register_closure::RegisterClosureRule;
pub use structure_closure::StructureClosureRule;
