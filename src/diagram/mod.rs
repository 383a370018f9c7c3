//! Rendering of the chip design flow diagram.
//!
//! This module turns the fixed step table into a picture in three stages,
//! each of which is a plain function of the previous stage's output.
//!
//! # Modules
//!
//! - `layout`: Grid placement of boxes and routing of arrows (data units)
//! - `theme`: Palette, stroke and text styles as Rust constants
//! - `render`: Abstract rendering commands for boxes, labels and arrows
//! - `svg`: Backend that serializes a command batch to an SVG document

pub mod layout;
pub mod render;
pub mod svg;
pub mod theme;

pub use layout::*;
pub use render::*;
pub use svg::{SvgDocument, render_svg};
