use super::parameters::SweepParameter;
use serde::{Deserialize, Serialize};

/// Closed set of estimation algorithms compared by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "MUSIC")]
    Music,
    #[serde(rename = "Root-MUSIC")]
    RootMusic,
    #[serde(rename = "ESPRIT")]
    Esprit,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Music, Algorithm::RootMusic, Algorithm::Esprit];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Music => "MUSIC",
            Algorithm::RootMusic => "Root-MUSIC",
            Algorithm::Esprit => "ESPRIT",
        }
    }
}

/// One point of the MUSIC pseudospectrum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpectrumPoint {
    pub angle_deg: f64,
    pub power: f64,
}

/// Outcome of a single algorithm on one simulated dataset.
///
/// `shortfall` is set when the estimator recovered from a root/eigenvalue
/// selection failure by returning fewer bearings than requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoaResult {
    pub algorithm: Algorithm,
    pub estimated_angles: Vec<f64>,
    pub rmse: f64,
    pub execution_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<Vec<SpectrumPoint>>,
    #[serde(default)]
    pub shortfall: bool,
}

/// Trial-averaged RMSE aggregate for one swept value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub parameter: SweepParameter,
    pub value: f64,
    pub music_rmse: f64,
    pub root_music_rmse: f64,
    pub esprit_rmse: f64,
}
