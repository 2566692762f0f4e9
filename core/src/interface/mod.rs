pub mod parameters;
pub mod result;

pub use parameters::{DoaParameters, SweepParameter};
pub use result::{Algorithm, ComparisonRow, DoaResult, SpectrumPoint};
