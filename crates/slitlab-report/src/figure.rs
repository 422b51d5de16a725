//! Backend-independent figure model.
//!
//! [`render_comparison`] turns two outcome histograms into a [`Figure`]:
//! plain data describing bars, annotations and theme. Drawing it is the
//! job of a presenter such as [`SvgPresenter`](crate::SvgPresenter).

use serde::{Deserialize, Serialize};
use slitlab_experiment::{Scenario, ScenarioOutcome};
use slitlab_hal::Counts;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::theme::{Color, Theme};

/// Figure title.
pub const TITLE: &str = "QUANTUM DOUBLE-SLIT EXPERIMENT: WAVE VS. PARTICLE";
/// Figure subtitle.
pub const SUBTITLE: &str = "Visualizing how observation collapses the quantum wave function";
/// X axis label of every panel.
pub const X_LABEL: &str = "MEASURED OUTCOME";
/// Y axis label of every panel.
pub const Y_LABEL: &str = "Counts";

/// Bar width in category units.
const BAR_WIDTH: f64 = 0.6;
/// Upper y limit as a multiple of the shot count.
const Y_HEADROOM: f64 = 1.2;
/// Gap between a bar top and its value, as a fraction of the shot count.
const VALUE_OFFSET: f64 = 0.03;
/// Top caption height, as a fraction of the shot count.
const TOP_CAPTION_Y: f64 = 0.95;
/// Bottom caption height, as a fraction of the shot count.
const BOTTOM_CAPTION_Y: f64 = -0.2;
/// Padding around the outermost bars, in category units.
const X_PADDING: f64 = 0.6;

/// A complete two-panel comparison figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Main title.
    pub title: String,
    /// Line under the title.
    pub subtitle: String,
    /// Panels, left to right.
    pub panels: Vec<Panel>,
    /// Shared colors and sizes.
    pub theme: Theme,
}

/// One bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Panel title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Visible x range in category units.
    pub x_range: (f64, f64),
    /// Visible y range in counts.
    pub y_range: (f64, f64),
    /// One bar per declared label.
    pub bars: Vec<Bar>,
    /// Text placed in data coordinates.
    pub annotations: Vec<Annotation>,
}

/// A single histogram bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Outcome label under the bar.
    pub label: String,
    /// Center of the bar in category units.
    pub x: f64,
    /// Width in category units.
    pub width: f64,
    /// Observed count.
    pub height: u64,
    /// Fill color.
    pub color: Color,
}

/// What an annotation is for. Presenters style each kind differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// Count printed above a bar; anchored at its bottom edge.
    BarValue,
    /// Boxed caption inside the plot; anchored at its top edge.
    TopCaption,
    /// Boxed caption below the axis; anchored at its vertical center.
    BottomCaption,
}

/// Text at a position in data coordinates, horizontally centered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// The text; may span several lines.
    pub text: String,
    /// X position in category units.
    pub x: f64,
    /// Y position in counts.
    pub y: f64,
    /// Role of the annotation.
    pub kind: AnnotationKind,
}

impl Panel {
    /// Find a bar by its label.
    pub fn bar(&self, label: &str) -> Option<&Bar> {
        self.bars.iter().find(|bar| bar.label == label)
    }

    /// Annotations of one kind, in insertion order.
    pub fn annotations_of(&self, kind: AnnotationKind) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.kind == kind)
    }
}

/// Everything needed to lay out one panel.
struct PanelSource<'a> {
    title: &'a str,
    labels: &'a [&'a str],
    counts: &'a Counts,
    top_caption: &'a str,
    bottom_caption: &'a str,
}

impl<'a> PanelSource<'a> {
    fn from_outcome(outcome: &'a ScenarioOutcome) -> Self {
        let scenario = &outcome.scenario;
        Self {
            title: scenario.title,
            labels: scenario.labels,
            counts: &outcome.counts,
            top_caption: scenario.top_caption,
            bottom_caption: scenario.bottom_caption,
        }
    }
}

fn build_panel(
    index: usize,
    source: &PanelSource<'_>,
    shots: f64,
    theme: &Theme,
) -> RenderResult<Panel> {
    if source.labels.is_empty() {
        return Err(RenderError::EmptyLabels { panel: index + 1 });
    }

    let bars: Vec<Bar> = source
        .labels
        .iter()
        .enumerate()
        .map(|(i, &label)| Bar {
            label: label.to_string(),
            x: i as f64,
            width: BAR_WIDTH,
            height: source.counts.get(label),
            color: theme.accent(index, i),
        })
        .collect();

    let last = (bars.len() - 1) as f64;
    let center = last / 2.0;

    let mut annotations: Vec<Annotation> = bars
        .iter()
        .map(|bar| Annotation {
            text: bar.height.to_string(),
            x: bar.x,
            y: bar.height as f64 + shots * VALUE_OFFSET,
            kind: AnnotationKind::BarValue,
        })
        .collect();
    annotations.push(Annotation {
        text: source.top_caption.to_string(),
        x: center,
        y: shots * TOP_CAPTION_Y,
        kind: AnnotationKind::TopCaption,
    });
    annotations.push(Annotation {
        text: source.bottom_caption.to_string(),
        x: center,
        y: shots * BOTTOM_CAPTION_Y,
        kind: AnnotationKind::BottomCaption,
    });

    Ok(Panel {
        title: source.title.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        x_range: (-X_PADDING, last + X_PADDING),
        y_range: (0.0, shots * Y_HEADROOM),
        bars,
        annotations,
    })
}

fn build_figure(sources: [PanelSource<'_>; 2], shots: u32) -> RenderResult<Figure> {
    if shots == 0 {
        return Err(RenderError::InvalidShots);
    }
    let theme = Theme::default();
    let shots = f64::from(shots);

    let panels = sources
        .iter()
        .enumerate()
        .map(|(i, source)| build_panel(i, source, shots, &theme))
        .collect::<RenderResult<Vec<_>>>()?;

    debug!(
        "Built figure with {} panels and {} bars",
        panels.len(),
        panels.iter().map(|p| p.bars.len()).sum::<usize>()
    );

    Ok(Figure {
        title: TITLE.to_string(),
        subtitle: SUBTITLE.to_string(),
        panels,
        theme,
    })
}

/// Build the interference-vs-observer comparison figure.
///
/// Each panel gets one bar per declared label, in order; labels missing
/// from the counts get a zero-height bar. Both panels share the y range
/// `[0, shots × 1.2]`. Titles and captions are those of
/// [`Scenario::INTERFERENCE`] and [`Scenario::OBSERVER`].
///
/// # Errors
///
/// [`RenderError::EmptyLabels`] if a label list is empty,
/// [`RenderError::InvalidShots`] if `shots` is 0.
pub fn render_comparison(
    freq_a: &Counts,
    labels_a: &[&str],
    freq_b: &Counts,
    labels_b: &[&str],
    shots: u32,
) -> RenderResult<Figure> {
    let a = Scenario::INTERFERENCE;
    let b = Scenario::OBSERVER;
    build_figure(
        [
            PanelSource {
                title: a.title,
                labels: labels_a,
                counts: freq_a,
                top_caption: a.top_caption,
                bottom_caption: a.bottom_caption,
            },
            PanelSource {
                title: b.title,
                labels: labels_b,
                counts: freq_b,
                top_caption: b.top_caption,
                bottom_caption: b.bottom_caption,
            },
        ],
        shots,
    )
}

/// Build the comparison figure from two scenario outcomes, taking labels,
/// titles and captions from each outcome's [`Scenario`].
pub fn render_scenarios(
    first: &ScenarioOutcome,
    second: &ScenarioOutcome,
    shots: u32,
) -> RenderResult<Figure> {
    build_figure(
        [
            PanelSource::from_outcome(first),
            PanelSource::from_outcome(second),
        ],
        shots,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{BLUE, GREEN, ORANGE};

    fn counts(entries: &[(&str, u64)]) -> Counts {
        entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_layout_constants_scale_with_shots() {
        let a = counts(&[("0", 2048)]);
        let b = counts(&[("0", 1000), ("1", 1048)]);
        let figure = render_comparison(&a, &["0"], &b, &["0", "1"], 2048).unwrap();

        assert_eq!(figure.title, TITLE);
        assert_eq!(figure.subtitle, SUBTITLE);
        assert_eq!(figure.panels.len(), 2);

        for panel in &figure.panels {
            assert_eq!(panel.y_range, (0.0, 2048.0 * 1.2));
            assert_eq!(panel.x_label, X_LABEL);
            assert_eq!(panel.y_label, Y_LABEL);

            let top: Vec<_> = panel.annotations_of(AnnotationKind::TopCaption).collect();
            let bottom: Vec<_> = panel.annotations_of(AnnotationKind::BottomCaption).collect();
            assert_eq!(top.len(), 1);
            assert_eq!(bottom.len(), 1);
            assert!((top[0].y - 2048.0 * 0.95).abs() < 1e-9);
            assert!((bottom[0].y + 2048.0 * 0.2).abs() < 1e-9);
        }

        let values: Vec<f64> = figure.panels[1]
            .annotations_of(AnnotationKind::BarValue)
            .map(|a| a.y)
            .collect();
        assert!((values[0] - (1000.0 + 2048.0 * 0.03)).abs() < 1e-9);
        assert!((values[1] - (1048.0 + 2048.0 * 0.03)).abs() < 1e-9);
    }

    #[test]
    fn test_captions_centered_over_bars() {
        let a = counts(&[("0", 10)]);
        let b = counts(&[("0", 5), ("1", 5)]);
        let figure = render_comparison(&a, &["0"], &b, &["0", "1"], 10).unwrap();

        let first = figure.panels[0]
            .annotations_of(AnnotationKind::TopCaption)
            .next()
            .unwrap();
        assert_eq!(first.x, 0.0);
        assert_eq!(first.text, "CONSTRUCTIVE\nINTERFERENCE");

        let second = figure.panels[1]
            .annotations_of(AnnotationKind::BottomCaption)
            .next()
            .unwrap();
        assert_eq!(second.x, 0.5);
        assert_eq!(second.text, "PARTICLE-LIKE BEHAVIOR");
    }

    #[test]
    fn test_missing_label_gets_zero_bar() {
        let a = counts(&[("0", 2048)]);
        let b = counts(&[("1", 2048)]);
        let figure = render_comparison(&a, &["0"], &b, &["0", "1"], 2048).unwrap();

        let panel = &figure.panels[1];
        assert_eq!(panel.bar("0").map(|b| b.height), Some(0));
        assert_eq!(panel.bar("1").map(|b| b.height), Some(2048));
        assert_eq!(panel.bars.len(), 2);
    }

    #[test]
    fn test_unlisted_outcomes_are_not_drawn() {
        let a = counts(&[("0", 2000), ("1", 48)]);
        let b = counts(&[("0", 1024), ("1", 1024)]);
        let figure = render_comparison(&a, &["0"], &b, &["0", "1"], 2048).unwrap();

        assert_eq!(figure.panels[0].bars.len(), 1);
        assert!(figure.panels[0].bar("1").is_none());
    }

    #[test]
    fn test_bar_colors_follow_theme() {
        let a = counts(&[("0", 1)]);
        let b = counts(&[("0", 1)]);
        let figure = render_comparison(&a, &["0"], &b, &["0", "1"], 1).unwrap();

        assert_eq!(figure.panels[0].bars[0].color, BLUE);
        assert_eq!(figure.panels[1].bars[0].color, ORANGE);
        assert_eq!(figure.panels[1].bars[1].color, GREEN);
    }

    #[test]
    fn test_zero_shots_rejected() {
        let a = counts(&[]);
        let err = render_comparison(&a, &["0"], &a, &["0", "1"], 0).unwrap_err();
        assert_eq!(err, RenderError::InvalidShots);
    }

    #[test]
    fn test_empty_labels_rejected() {
        let a = counts(&[("0", 4)]);
        let err = render_comparison(&a, &["0"], &a, &[], 4).unwrap_err();
        assert_eq!(err, RenderError::EmptyLabels { panel: 2 });

        let err = render_comparison(&a, &[], &a, &["0"], 4).unwrap_err();
        assert_eq!(err, RenderError::EmptyLabels { panel: 1 });
    }

    #[test]
    fn test_inputs_untouched() {
        let a = counts(&[("0", 7)]);
        let before = a.clone();
        let _ = render_comparison(&a, &["0", "1"], &a, &["0"], 7).unwrap();
        assert_eq!(a, before);
    }
}
