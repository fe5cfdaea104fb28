//! Request and response bodies
//!
//! Unit fields are closed enums from `common`, so an unknown unit code fails
//! JSON extraction and never reaches a service.

use common::{QuantityUnit, TimeUnit, YUnit};
use decay::NuclideDetails;
use indexmap::IndexMap;
use render::NodePosition;
use serde::{Deserialize, Serialize};

// ============================================================================
// Decay chain
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DecayChainRequest {
    /// `U-238`, `U238`, `238U`, `Tc-99m`, ...
    pub isotope: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecayChainResponse {
    /// Base64 PNG
    pub image: String,
    /// Keyed by canonical nuclide name, in decay order
    pub nodes: IndexMap<String, NodeEntry>,
    pub metadata: ImageMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeEntry {
    /// Box centre in image pixels, origin top-left; `null` when the node
    /// has no place in the layout
    pub position: Option<NodePosition>,
    pub data: NodeData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Details(NuclideDetails),
    /// Metadata lookup failed; only the name is known
    Label { label: String },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

// ============================================================================
// Evolution
// ============================================================================

/// One inventory entry; incomplete entries are skipped, not rejected
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NuclideEntry {
    #[serde(default)]
    pub isotope: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<QuantityUnit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvolutionRequest {
    #[serde(default)]
    pub nuclides: Vec<NuclideEntry>,
    #[serde(default)]
    pub time_period: Option<f64>,
    #[serde(default)]
    pub time_unit: Option<TimeUnit>,
    #[serde(default)]
    pub y_unit: Option<YUnit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvolutionResponse {
    pub image: String,
    pub plot_data: PlotData,
    pub metadata: EvolutionMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotData {
    /// Sample times in `metadata.time_unit`
    pub time: Vec<f64>,
    /// One series per nuclide in `metadata.y_unit`, aligned with `time`
    pub decay: IndexMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvolutionMetadata {
    pub time_unit: TimeUnit,
    pub y_unit: YUnit,
    /// Every nuclide in the evolved inventory, in decay order
    pub nuclides: Vec<String>,
}
