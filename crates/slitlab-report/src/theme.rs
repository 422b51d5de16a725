//! Colors and type sizes shared by both panels.

use serde::{Deserialize, Serialize};

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Dark navy page background.
pub const BACKGROUND: Color = Color::rgb(0x1A, 0x23, 0x3B);
/// Primary text.
pub const TEXT: Color = Color::rgb(0xEA, 0xEA, 0xF2);
/// Axis lines and horizontal grid.
pub const GRID: Color = Color::rgb(0x4A, 0x55, 0x68);
/// Subtitle text.
pub const SUBTITLE: Color = Color::rgb(0xB0, 0xC4, 0xDE);
/// Interference bar.
pub const BLUE: Color = Color::rgb(0x00, 0xBF, 0xFF);
/// First observer bar.
pub const ORANGE: Color = Color::rgb(0xFF, 0x8C, 0x00);
/// Second observer bar.
pub const GREEN: Color = Color::rgb(0x32, 0xCD, 0x32);
/// Caption box fill.
pub const CAPTION_BOX: Color = Color::rgb(0xFF, 0xFF, 0xFF);

/// Visual settings for a [`Figure`](crate::Figure).
///
/// Font sizes are in pixels for a 2000×1000 canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Page and plot background.
    pub background: Color,
    /// Titles, axis labels and bar values.
    pub text: Color,
    /// Axis lines and grid.
    pub grid: Color,
    /// Subtitle.
    pub subtitle: Color,
    /// Caption box fill; caption text uses `background`.
    pub caption_box: Color,
    /// Bar colors per panel, cycled across that panel's bars.
    pub accents: Vec<Vec<Color>>,
    /// Figure title size.
    pub title_size: f64,
    /// Subtitle size.
    pub subtitle_size: f64,
    /// Panel title size.
    pub panel_title_size: f64,
    /// Axis labels, bar values and captions.
    pub label_size: f64,
}

impl Theme {
    /// Accent color for `bar` in `panel`.
    pub fn accent(&self, panel: usize, bar: usize) -> Color {
        self.accents
            .get(panel)
            .filter(|colors| !colors.is_empty())
            .map_or(self.text, |colors| colors[bar % colors.len()])
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            text: TEXT,
            grid: GRID,
            subtitle: SUBTITLE,
            caption_box: CAPTION_BOX,
            accents: vec![vec![BLUE], vec![ORANGE, GREEN]],
            title_size: 33.0,
            subtitle_size: 22.0,
            panel_title_size: 22.0,
            label_size: 17.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display_is_hex() {
        assert_eq!(BACKGROUND.to_string(), "#1A233B");
        assert_eq!(BLUE.to_string(), "#00BFFF");
    }

    #[test]
    fn test_accent_cycles() {
        let theme = Theme::default();
        assert_eq!(theme.accent(0, 0), BLUE);
        assert_eq!(theme.accent(0, 3), BLUE);
        assert_eq!(theme.accent(1, 0), ORANGE);
        assert_eq!(theme.accent(1, 1), GREEN);
        assert_eq!(theme.accent(1, 2), ORANGE);
        assert_eq!(theme.accent(5, 0), TEXT);
    }
}
