//! Chart rendering for DecayViz
//!
//! Built on `plotters` with an in-memory bitmap backend:
//!
//! - [`context`] - Per-render pixel buffer, PNG encoding, base64 transport
//! - [`backend`] - Backend wrapper with a bitmap-font fallback for text
//! - [`fonts`] - Process-wide TrueType font registration
//! - [`chain`] - Decay-chain diagrams
//! - [`evolution`] - Time-evolution line charts

pub mod backend;
pub mod chain;
pub mod context;
pub mod error;
pub mod evolution;
pub mod fonts;

pub use backend::FontSafeBackend;
pub use chain::{figure_size, render_chain, ChainDiagram, ChainLayout, NodePosition};
pub use context::{FigureSize, RenderContext, RenderedImage, Surface};
pub use error::{RenderError, Result};
pub use evolution::{render_evolution, EvolutionPlot, YScale, LOG_FLOOR};
pub use fonts::{install_fonts, installed_font};
