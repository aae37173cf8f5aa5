//! Capacitive heatmaps decoded from touch payload frames.

/// Geometry of the heatmap that follows it in the same touch frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeatmapDimensions {
    pub height: u8,
    pub width: u8,
    pub y_min: u8,
    pub y_max: u8,
    pub x_min: u8,
    pub x_max: u8,
    pub z_min: u8,
    pub z_max: u8,
}

impl HeatmapDimensions {
    /// Number of cells (`height * width`).
    pub fn cell_count(&self) -> usize {
        self.height as usize * self.width as usize
    }
}

/// One frame of raw capacitance values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    pub dimensions: HeatmapDimensions,
    /// Row-major cell values, exactly `dimensions.cell_count()` long.
    pub data: Vec<u8>,
}

impl Heatmap {
    /// Returns the value at (`row`, `col`), or `None` outside the grid.
    pub fn value(&self, row: usize, col: usize) -> Option<u8> {
        let width = self.dimensions.width as usize;
        if col >= width || row >= self.dimensions.height as usize {
            return None;
        }
        self.data.get(row * width + col).copied()
    }
}
