//! Decay-chain diagrams

use decay::{Dataset, DecayChain, NuclideDetails};
use indexmap::IndexMap;
use render::ChainLayout;
use tracing::{info, warn};

use crate::error::{ApiError, ServiceError};
use crate::models::{DecayChainResponse, ImageMetadata, NodeData, NodeEntry};
use crate::services::RenderSettings;

pub struct DecayChainService {
    dataset: &'static Dataset,
    settings: RenderSettings,
}

impl DecayChainService {
    pub fn new(dataset: &'static Dataset, settings: RenderSettings) -> Self {
        Self { dataset, settings }
    }

    /// Render the chain rooted at `isotope`, with per-node metadata
    pub fn generate(&self, isotope: &str) -> Result<DecayChainResponse, ApiError> {
        self.try_generate(isotope)
            .map_err(|e| ApiError::validation(format!("Failed to generate decay chain: {}", e)))
    }

    fn try_generate(&self, isotope: &str) -> Result<DecayChainResponse, ServiceError> {
        let chain = DecayChain::from_root(self.dataset, isotope)?;
        let (image, layout) = render::render_chain(
            &chain,
            self.dataset,
            self.settings.chain_figure,
            self.settings.dpi,
        )?;

        let nodes = self.node_entries(&chain, &layout);

        info!(
            root = chain.root(),
            nodes = nodes.len(),
            width = image.width,
            height = image.height,
            "Generated decay chain"
        );

        Ok(DecayChainResponse {
            image: image.to_base64(),
            nodes,
            metadata: ImageMetadata {
                width: image.width,
                height: image.height,
                dpi: image.dpi,
            },
        })
    }

    /// One entry per chain node, in decay order
    fn node_entries(
        &self,
        chain: &DecayChain,
        layout: &ChainLayout,
    ) -> IndexMap<String, NodeEntry> {
        let mut nodes = IndexMap::with_capacity(chain.nodes().len());
        for node in chain.nodes() {
            let position = layout.position(node.name);
            if position.is_none() {
                warn!(nuclide = node.name, "Node missing from layout");
            }
            let data = match NuclideDetails::lookup(self.dataset, node.name) {
                Some(details) => NodeData::Details(details),
                None => {
                    warn!(nuclide = node.name, "No metadata for node, using label only");
                    NodeData::Label {
                        label: node.name.to_string(),
                    }
                }
            };
            nodes.insert(node.name.to_string(), NodeEntry { position, data });
        }
        nodes
    }
}
