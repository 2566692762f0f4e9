//! Subspace direction-of-arrival estimation core.
//!
//! The modules implement the classical MUSIC, Root-MUSIC, and ESPRIT
//! estimators over synthetically generated uniform-linear-array data, with
//! a trial-averaged comparison harness on top.

pub mod estimators;
pub mod harness;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod simulation;
pub mod telemetry;

pub use harness::DoaEngine;
pub use interface::{Algorithm, ComparisonRow, DoaParameters, DoaResult, SpectrumPoint};
