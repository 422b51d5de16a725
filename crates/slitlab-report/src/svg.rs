//! SVG presentation of a [`Figure`] using `plotters`.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, TextStyle};
use tracing::{debug, info, instrument};

use crate::error::RenderResult;
use crate::figure::{Annotation, AnnotationKind, Figure, Panel};
use crate::theme::{Color as ThemeColor, Theme};

/// Fraction of the canvas height reserved for the title block.
const HEADER: f64 = 0.15;
/// Fraction of the canvas height kept free under the panels.
const FOOTER: f64 = 0.15;
/// Fraction of the canvas width kept free on each side.
const SIDE: f64 = 0.03;
/// Canvas height that theme font sizes are specified for.
const REFERENCE_HEIGHT: f64 = 1000.0;

/// Draws figures as SVG documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgPresenter {
    width: u32,
    height: u32,
}

impl SvgPresenter {
    /// Canvas size matching a 20×10 inch figure at 100 dpi.
    pub const DEFAULT_SIZE: (u32, u32) = (2000, 1000);

    /// Create a presenter with the default canvas size.
    pub fn new() -> Self {
        let (width, height) = Self::DEFAULT_SIZE;
        Self { width, height }
    }

    /// Create a presenter with a custom canvas size. Fonts scale with the
    /// height.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Write the figure to an SVG file.
    #[instrument(skip(self, figure, path), fields(path = %path.display()))]
    pub fn present_to_file(&self, figure: &Figure, path: &Path) -> RenderResult<()> {
        let root = SVGBackend::new(path, self.size()).into_drawing_area();
        self.draw(figure, &root)?;
        root.present()?;
        info!("Figure written");
        Ok(())
    }

    /// Render the figure to an SVG document in memory.
    pub fn present_to_string(&self, figure: &Figure) -> RenderResult<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size()).into_drawing_area();
            self.draw(figure, &root)?;
            root.present()?;
        }
        debug!("Rendered {} bytes of SVG", svg.len());
        Ok(svg)
    }

    fn draw<DB>(&self, figure: &Figure, root: &DrawingArea<DB, Shift>) -> RenderResult<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let theme = &figure.theme;
        let (w, h) = root.dim_in_pixel();
        let scale = f64::from(h) / REFERENCE_HEIGHT;
        let (w, h) = (f64::from(w), f64::from(h));

        root.fill(&rgb(theme.background))?;

        let center = (w / 2.0).round() as i32;
        root.draw(&Text::new(
            figure.title.clone(),
            (center, (h * 0.03).round() as i32),
            font(theme.title_size * scale, FontStyle::Bold, theme.text)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
        root.draw(&Text::new(
            figure.subtitle.clone(),
            (center, (h * 0.09).round() as i32),
            font(theme.subtitle_size * scale, FontStyle::Italic, theme.subtitle)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;

        let plot_area = root.margin(
            (h * HEADER).round() as i32,
            (h * FOOTER).round() as i32,
            (w * SIDE).round() as i32,
            (w * SIDE).round() as i32,
        );
        let areas = plot_area.split_evenly((1, figure.panels.len().max(1)));
        for (panel, area) in figure.panels.iter().zip(&areas) {
            draw_panel(root, area, panel, theme, scale)?;
        }
        Ok(())
    }
}

impl Default for SvgPresenter {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb(color: ThemeColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn font(size: f64, style: FontStyle, color: ThemeColor) -> TextStyle<'static> {
    FontDesc::new(FontFamily::SansSerif, size, style).color(&rgb(color))
}

fn draw_panel<DB>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    theme: &Theme,
    scale: f64,
) -> RenderResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let px = |v: f64| (v * scale).round() as i32;
    let grid = rgb(theme.grid);
    let label_font = font(theme.label_size * scale, FontStyle::Normal, theme.text);

    let mut chart = ChartBuilder::on(area)
        .caption(
            &panel.title,
            font(theme.panel_title_size * scale, FontStyle::Bold, theme.text),
        )
        .margin_top(px(20.0))
        .margin_bottom(px(10.0))
        .margin_left(px(30.0))
        .margin_right(px(60.0))
        .x_label_area_size(px(60.0))
        .y_label_area_size(px(90.0))
        .build_cartesian_2d(
            panel.x_range.0..panel.x_range.1,
            panel.y_range.0..panel.y_range.1,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels(7)
        .y_label_formatter(&|y: &f64| format!("{y:.0}"))
        .bold_line_style(grid.mix(0.7))
        .light_line_style(TRANSPARENT)
        .axis_style(grid)
        .label_style(label_font.clone())
        .axis_desc_style(label_font.clone())
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()?;

    chart.draw_series(panel.bars.iter().map(|bar| {
        let half = bar.width / 2.0;
        Rectangle::new(
            [(bar.x - half, 0.0), (bar.x + half, bar.height as f64)],
            rgb(bar.color).filled(),
        )
    }))?;

    let value_font = label_font.pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(
        panel
            .annotations_of(AnnotationKind::BarValue)
            .map(|a| Text::new(a.text.clone(), (a.x, a.y), value_font.clone())),
    )?;

    // Category labels and boxed captions sit outside the plotting area, so
    // they are placed in pixel space on the root canvas.
    let tick_font = label_font.pos(Pos::new(HPos::Center, VPos::Top));
    for bar in &panel.bars {
        let (x, y) = chart.backend_coord(&(bar.x, panel.y_range.0));
        root.draw(&Text::new(
            bar.label.clone(),
            (x, y + px(8.0)),
            tick_font.clone(),
        ))?;
    }

    for annotation in panel
        .annotations
        .iter()
        .filter(|a| a.kind != AnnotationKind::BarValue)
    {
        let anchor = chart.backend_coord(&(annotation.x, annotation.y));
        draw_caption(root, annotation, anchor, theme, scale)?;
    }

    debug!("Drew panel '{}' with {} bars", panel.title, panel.bars.len());
    Ok(())
}

/// Draw a boxed, possibly multi-line caption centered on `x`.
fn draw_caption<DB>(
    root: &DrawingArea<DB, Shift>,
    annotation: &Annotation,
    (x, y): (i32, i32),
    theme: &Theme,
    scale: f64,
) -> RenderResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let size = theme.label_size * scale;
    let lines: Vec<&str> = annotation.text.lines().collect();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    // Approximate glyph metrics; the SVG viewer does the real layout.
    let pad = (size * 0.5).round() as i32;
    let line_height = (size * 1.25).round() as i32;
    let box_width = (widest as f64 * size * 0.62).round() as i32 + 2 * pad;
    let box_height = line_height * lines.len() as i32 + 2 * pad;

    let top = match annotation.kind {
        AnnotationKind::TopCaption => y,
        _ => y - box_height / 2,
    };

    root.draw(&Rectangle::new(
        [(x - box_width / 2, top), (x + box_width / 2, top + box_height)],
        rgb(theme.caption_box).mix(0.9).filled(),
    ))?;

    let text_font = font(size, FontStyle::Bold, theme.background)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in lines.iter().enumerate() {
        root.draw(&Text::new(
            line.to_string(),
            (x, top + pad + i as i32 * line_height),
            text_font.clone(),
        ))?;
    }
    Ok(())
}
