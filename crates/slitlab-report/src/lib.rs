//! slitlab Report Rendering
//!
//! Turns the outcome histograms of the two double-slit scenarios into a
//! two-panel comparison figure.
//!
//! Rendering happens in two steps:
//!
//! 1. [`render_comparison`] / [`render_scenarios`] build a [`Figure`], a
//!    plain, serializable description of bars, annotations and theme.
//! 2. [`SvgPresenter`] draws a figure to an SVG file or string.
//!
//! # Example
//!
//! ```ignore
//! use slitlab_report::{SvgPresenter, render_scenarios};
//!
//! let figure = render_scenarios(&outcomes[0], &outcomes[1], SHOTS)?;
//! SvgPresenter::new().present_to_file(&figure, Path::new("double_slit.svg"))?;
//! ```

pub mod error;
pub mod figure;
pub mod svg;
pub mod theme;

pub use error::{RenderError, RenderResult};
pub use figure::{
    Annotation, AnnotationKind, Bar, Figure, Panel, render_comparison, render_scenarios,
};
pub use svg::SvgPresenter;
pub use theme::{Color, Theme};
