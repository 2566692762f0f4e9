use anyhow::Context;
use doacore::DoaParameters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub snapshots: usize,
    pub array_elements: usize,
    pub snr_db: f64,
    pub source_angles: Vec<f64>,
    #[serde(default = "default_carrier_freq_hz")]
    pub carrier_freq_hz: f64,
    pub array_spacing: f64,
    #[serde(default)]
    pub seed: u64,
}

fn default_carrier_freq_hz() -> f64 {
    2.4e9
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        snapshots: usize,
        array_elements: usize,
        snr_db: f64,
        source_angles: Vec<f64>,
        array_spacing: f64,
        seed: u64,
    ) -> Self {
        Self {
            snapshots,
            array_elements,
            snr_db,
            source_angles,
            carrier_freq_hz: default_carrier_freq_hz(),
            array_spacing,
            seed,
        }
    }

    pub fn to_parameters(&self) -> DoaParameters {
        DoaParameters {
            snapshots: self.snapshots,
            array_elements: self.array_elements,
            snr_db: self.snr_db,
            source_angles: self.source_angles.clone(),
            carrier_freq_hz: self.carrier_freq_hz,
            array_spacing: self.array_spacing,
            seed: self.seed,
        }
    }
}
