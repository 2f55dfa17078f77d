//! Grid geometry shared between the host game and the AI snake.
use super::config::{AiSnakeError, Result};

/// Integer grid coordinate `(x, y)`.
pub type Cell = (i32, i32);

/// Size of the playable grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub width: i32,
    pub height: i32,
}

impl GridBounds {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

/// Axis aligned blocked rectangle, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the unit cell at `(x, y)` overlaps this rectangle.
    #[must_use]
    pub fn overlaps_cell(&self, x: i32, y: i32) -> bool {
        x < self.x + self.width && x + 1 > self.x && y < self.y + self.height && y + 1 > self.y
    }
}

/// Pixel dimensions of the map and how many pixels make up one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    map_width: u32,
    map_height: u32,
    grid_size: u32,
}

impl MapConfig {
    /// # Errors
    ///
    /// Returns [`AiSnakeError::ZeroGridSize`] if `grid_size` is zero.
    pub fn new(map_width: u32, map_height: u32, grid_size: u32) -> Result<Self> {
        if grid_size == 0 {
            return Err(AiSnakeError::ZeroGridSize);
        }
        Ok(Self {
            map_width,
            map_height,
            grid_size,
        })
    }

    #[must_use]
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Whole cells that fit on the map. Partial cells at the edges are dropped.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        let to_cells = |pixels: u32| i32::try_from(pixels / self.grid_size).unwrap_or(i32::MAX);
        GridBounds::new(to_cells(self.map_width), to_cells(self.map_height))
    }
}
