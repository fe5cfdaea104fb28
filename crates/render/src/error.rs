//! Render error types

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result type alias for rendering
pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid figure size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Drawing failed: {0}")]
    Drawing(String),

    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    #[error("Nothing to plot: {0}")]
    EmptyPlot(String),
}

impl RenderError {
    pub fn drawing(msg: impl Into<String>) -> Self {
        Self::Drawing(msg.into())
    }

    pub fn empty_plot(msg: impl Into<String>) -> Self {
        Self::EmptyPlot(msg.into())
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Drawing(err.to_string())
    }
}
