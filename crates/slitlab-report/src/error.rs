//! Error types for figure construction and presentation.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur while building or drawing a figure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A panel was given no outcome labels to plot.
    #[error("panel {panel} declares no outcome labels")]
    EmptyLabels {
        /// 1-based panel number.
        panel: usize,
    },

    /// The figure is scaled by the shot count, which must be positive.
    #[error("shots must be positive to scale the figure")]
    InvalidShots,

    /// The chart backend failed.
    #[error("chart backend error: {0}")]
    Backend(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Backend(err.to_string())
    }
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
