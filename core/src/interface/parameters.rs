use crate::prelude::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Scenario description for one estimation run.
///
/// Source bearings are in degrees, spacing in wavelengths. The seed makes
/// every synthetic dataset reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoaParameters {
    pub snapshots: usize,
    pub array_elements: usize,
    pub snr_db: f64,
    pub source_angles: Vec<f64>,
    pub carrier_freq_hz: f64,
    pub array_spacing: f64,
    pub seed: u64,
}

impl Default for DoaParameters {
    fn default() -> Self {
        Self {
            snapshots: 200,
            array_elements: 10,
            snr_db: 10.0,
            source_angles: vec![20.0, 40.0, 60.0],
            carrier_freq_hz: 2.4e9,
            array_spacing: 0.5,
            seed: 0,
        }
    }
}

impl DoaParameters {
    pub fn num_sources(&self) -> usize {
        self.source_angles.len()
    }

    /// Reject impossible scenarios before any computation starts.
    pub fn validate(&self) -> EngineResult<()> {
        if self.snapshots == 0 {
            return Err(EngineError::InvalidParameters(
                "snapshots must be positive".into(),
            ));
        }
        if self.array_elements < 2 {
            return Err(EngineError::InvalidParameters(
                "array needs at least two elements".into(),
            ));
        }
        if self.source_angles.is_empty() {
            return Err(EngineError::InvalidParameters(
                "at least one source angle is required".into(),
            ));
        }
        if self.source_angles.len() >= self.array_elements {
            return Err(EngineError::InvalidParameters(format!(
                "{} sources cannot be resolved with {} elements",
                self.source_angles.len(),
                self.array_elements
            )));
        }
        for &angle in &self.source_angles {
            if !angle.is_finite() || angle <= -90.0 || angle >= 90.0 {
                return Err(EngineError::InvalidParameters(format!(
                    "source angle {} outside (-90, 90) degrees",
                    angle
                )));
            }
        }
        if !(self.array_spacing > 0.0) {
            return Err(EngineError::InvalidParameters(
                "array spacing must be positive".into(),
            ));
        }
        if !(self.carrier_freq_hz > 0.0) {
            return Err(EngineError::InvalidParameters(
                "carrier frequency must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parameter axis accepted by the comparison sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepParameter {
    #[serde(rename = "snr")]
    Snr,
    #[serde(rename = "snapshots")]
    Snapshots,
    #[serde(rename = "arrayElements")]
    ArrayElements,
    #[serde(rename = "sourceSpacing")]
    SourceSpacing,
}

impl SweepParameter {
    pub fn parse(name: &str) -> EngineResult<Self> {
        match name {
            "snr" => Ok(Self::Snr),
            "snapshots" => Ok(Self::Snapshots),
            "arrayElements" => Ok(Self::ArrayElements),
            "sourceSpacing" => Ok(Self::SourceSpacing),
            other => Err(EngineError::InvalidParameters(format!(
                "unsupported sweep parameter {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snr => "snr",
            Self::Snapshots => "snapshots",
            Self::ArrayElements => "arrayElements",
            Self::SourceSpacing => "sourceSpacing",
        }
    }

    /// Override the swept field on a copy of the base scenario.
    ///
    /// `SourceSpacing` synthesizes a three-source layout with variable
    /// separation around the 30-degree base bearing.
    pub fn apply(&self, base: &DoaParameters, value: f64) -> DoaParameters {
        let mut params = base.clone();
        match self {
            Self::Snr => params.snr_db = value,
            Self::Snapshots => params.snapshots = value.round().max(0.0) as usize,
            Self::ArrayElements => params.array_elements = value.round().max(0.0) as usize,
            Self::SourceSpacing => {
                params.source_angles = vec![30.0 - value / 2.0, 30.0 + value / 2.0, 50.0];
            }
        }
        params
    }
}
