//! Grid layout for the chip design flow diagram
//!
//! Steps are placed on a fixed 6 x 3 grid in reading order: left to right,
//! then top to bottom. Coordinates are in data units with the origin at the
//! bottom left and y growing upwards, so the first row read is numbered 2
//! and the last is numbered 0.
//!
//! Each step gets a box whose origin is its cell offset by a small margin.
//! Consecutive steps are joined by an arrow:
//! - Same row: horizontal, right edge to left edge at half height
//! - Row change: downward, bottom centre to top centre

use serde::Serialize;

use crate::models::Step;
use crate::{Error, Result};

/// Boxes per row.
pub const GRID_COLUMNS: usize = 6;
/// Number of rows.
pub const GRID_ROWS: usize = 3;
/// Maximum number of steps the grid can hold.
pub const GRID_CAPACITY: usize = GRID_COLUMNS * GRID_ROWS;

/// 2D position/vector in data units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another position
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Return this position shifted by the given offsets
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A (column, row) slot in the layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// Column, 0 (left) to 5 (right)
    pub column: usize,
    /// Row, 2 (top) to 0 (bottom)
    pub row: usize,
}

impl GridCell {
    /// Cell for the step at `index`, or `None` past the end of the grid.
    pub fn for_index(index: usize) -> Option<Self> {
        if index >= GRID_CAPACITY {
            return None;
        }
        Some(Self {
            column: index % GRID_COLUMNS,
            row: (GRID_ROWS - 1) - index / GRID_COLUMNS,
        })
    }

    /// Palette entry for this cell's row. The palette is kept in reading
    /// order, so the top row uses entry 0.
    pub fn palette_index(&self) -> usize {
        (GRID_ROWS - 1) - self.row
    }

    /// Whether two cells sit in the same row
    pub fn same_row(&self, other: &GridCell) -> bool {
        self.row == other.row
    }
}

/// Fixed geometry of the grid, in data units.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Box width
    pub box_width: f64,
    /// Box height
    pub box_height: f64,
    /// Horizontal offset of a box origin from its cell corner
    pub margin_x: f64,
    /// Vertical offset of a box origin from its cell corner
    pub margin_y: f64,
    /// Rounding pad, used as the corner radius of each box
    pub box_pad: f64,
    /// Distance of each label anchor from the box centre line
    pub label_offset: f64,
    /// Visible data range on the x axis, starting at 0
    pub x_extent: f64,
    /// Visible data range on the y axis, starting at 0
    pub y_extent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 0.95,
            box_height: 0.6,
            margin_x: 0.05,
            margin_y: 0.2,
            box_pad: 0.04,
            label_offset: 0.12,
            x_extent: 6.0,
            y_extent: 3.2,
        }
    }
}

/// Placement of one box (unpadded), origin at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxGeometry {
    pub origin: Position,
    pub width: f64,
    pub height: f64,
}

impl BoxGeometry {
    /// Box for a grid cell under the given config
    pub fn for_cell(cell: GridCell, config: &LayoutConfig) -> Self {
        Self {
            origin: Position::new(
                cell.column as f64 + config.margin_x,
                cell.row as f64 + config.margin_y,
            ),
            width: config.box_width,
            height: config.box_height,
        }
    }

    pub fn center(&self) -> Position {
        self.origin.offset(self.width / 2.0, self.height / 2.0)
    }

    /// Midpoint of the right edge
    pub fn right_mid(&self) -> Position {
        self.origin.offset(self.width, self.height / 2.0)
    }

    /// Midpoint of the left edge
    pub fn left_mid(&self) -> Position {
        self.origin.offset(0.0, self.height / 2.0)
    }

    /// Midpoint of the bottom edge
    pub fn bottom_center(&self) -> Position {
        self.origin.offset(self.width / 2.0, 0.0)
    }

    /// Midpoint of the top edge
    pub fn top_center(&self) -> Position {
        self.origin.offset(self.width / 2.0, self.height)
    }
}

/// Routing chosen for an arrow between consecutive steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowKind {
    /// Both steps share a row
    Horizontal,
    /// The next step starts a new row
    Vertical,
}

impl ArrowKind {
    /// Pick the routing for an arrow from `from` to `to`
    pub fn between(from: &GridCell, to: &GridCell) -> Self {
        if from.same_row(to) {
            ArrowKind::Horizontal
        } else {
            ArrowKind::Vertical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowKind::Horizontal => "horizontal",
            ArrowKind::Vertical => "vertical",
        }
    }
}

/// An arrow from one step's box to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowRoute {
    /// Index of the source step
    pub from: usize,
    /// Index of the target step
    pub to: usize,
    pub kind: ArrowKind,
    /// Tail of the arrow
    pub start: Position,
    /// Tip of the arrow
    pub end: Position,
}

impl ArrowRoute {
    /// Route an arrow between two placed boxes
    pub fn connect(from: &PlacedStep, to: &PlacedStep) -> Self {
        let kind = ArrowKind::between(&from.cell, &to.cell);
        let (start, end) = match kind {
            ArrowKind::Horizontal => (from.geometry.right_mid(), to.geometry.left_mid()),
            ArrowKind::Vertical => (from.geometry.bottom_center(), to.geometry.top_center()),
        };
        Self {
            from: from.index,
            to: to.index,
            kind,
            start,
            end,
        }
    }
}

/// A step together with its cell and box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedStep {
    pub index: usize,
    pub step: Step,
    pub cell: GridCell,
    pub geometry: BoxGeometry,
}

/// Complete layout of the flow: one box per step, one arrow per transition.
#[derive(Debug, Clone, Serialize)]
pub struct FlowLayout {
    pub steps: Vec<PlacedStep>,
    pub arrows: Vec<ArrowRoute>,
    #[serde(skip)]
    pub config: LayoutConfig,
}

impl FlowLayout {
    /// Lay out `steps` on the grid.
    ///
    /// Fails with [`Error::GridOverflow`] if there are more steps than cells.
    pub fn compute(steps: &[Step], config: &LayoutConfig) -> Result<Self> {
        if steps.len() > GRID_CAPACITY {
            return Err(Error::GridOverflow {
                steps: steps.len(),
                capacity: GRID_CAPACITY,
            });
        }

        let placed: Vec<PlacedStep> = steps
            .iter()
            .enumerate()
            .filter_map(|(index, step)| {
                GridCell::for_index(index).map(|cell| PlacedStep {
                    index,
                    step: *step,
                    cell,
                    geometry: BoxGeometry::for_cell(cell, config),
                })
            })
            .collect();

        // The last step has no outgoing arrow
        let arrows = placed
            .windows(2)
            .map(|pair| ArrowRoute::connect(&pair[0], &pair[1]))
            .collect();

        Ok(Self {
            steps: placed,
            arrows,
            config: config.clone(),
        })
    }

    /// Layout with the default geometry
    pub fn with_defaults(steps: &[Step]) -> Result<Self> {
        Self::compute(steps, &LayoutConfig::default())
    }

    /// Number of arrows of the given kind
    pub fn count_arrows(&self, kind: ArrowKind) -> usize {
        self.arrows.iter().filter(|a| a.kind == kind).count()
    }
}
