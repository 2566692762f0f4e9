use doacore::{ComparisonRow, DoaResult};
use serde::{Deserialize, Serialize};

/// Latest engine output published for the external UI collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub results: Vec<DoaResult>,
    pub comparison: Vec<ComparisonRow>,
    pub notes: Vec<String>,
}
