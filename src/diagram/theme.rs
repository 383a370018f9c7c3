//! Theme constants for the flow diagram
//!
//! Colors are CSS color strings so they can be dropped straight into SVG
//! attributes. Sizes are in typographic points; use [`pt`] to convert.

/// Output resolution used to convert points to pixels.
pub const DPI: f64 = 100.0;

/// Convert a size in points to pixels at [`DPI`].
pub fn pt(points: f64) -> f64 {
    points * DPI / 72.0
}

/// Background colors
pub mod background {
    /// Canvas background
    pub const CANVAS: &str = "#ffffff";
}

/// Box fill palette, one entry per grid row in reading order (top first)
pub const PALETTE: [&str; 3] = ["#FFE6D9", "#C7F0DB", "#E0F2FE"];

/// Box outline
pub mod outline {
    pub const COLOR: &str = "#0369A1";
    /// Stroke width in points
    pub const WIDTH_PT: f64 = 2.0;
}

/// Text styles
pub mod text {
    /// Step title color
    pub const TITLE: &str = "#0C4A6E";
    /// Step title size in points
    pub const TITLE_SIZE_PT: f64 = 20.0;
    /// Step description color
    pub const DESCRIPTION: &str = "#075985";
    /// Step description size in points
    pub const DESCRIPTION_SIZE_PT: f64 = 11.0;
    /// Figure heading color
    pub const HEADING: &str = "#075985";
    /// Figure heading size in points
    pub const HEADING_SIZE_PT: f64 = 26.0;
    /// Font stack; the emoji fonts cover the step icons
    pub const FONT_FAMILY: &str =
        "DejaVu Sans, Helvetica, Arial, Apple Color Emoji, Segoe UI Emoji, Noto Color Emoji, sans-serif";
}

/// Arrow styles
pub mod arrow {
    pub const COLOR: &str = "#2563EB";
    /// Shaft width in points
    pub const WIDTH_PT: f64 = 2.0;
    /// Arrowhead scale for arrows within a row
    pub const HORIZONTAL_HEAD_PT: f64 = 15.0;
    /// Arrowhead scale for arrows that drop to the next row
    pub const VERTICAL_HEAD_PT: f64 = 18.0;
}

/// Fill color for a palette index, wrapping past the end of the palette
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
