//! Tap handling: the renderer records which terminal row maps to which key,
//! and the mouse handler converts a pixel position back into that key.
//!
//! Everything here is pure so it can be unit tested without a DOM.

#[derive(Debug, Clone, PartialEq)]
pub struct TapTarget {
    pub row: u16,
    pub key: char,
}

/// Rebuilt by every frame, read by the mouse handler.
#[derive(Debug, Default)]
pub struct TapMap {
    targets: Vec<TapTarget>,
    pub terminal_rows: u16,
}

impl TapMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's targets and record the new terminal height.
    pub fn reset(&mut self, terminal_rows: u16) {
        self.targets.clear();
        self.terminal_rows = terminal_rows;
    }

    pub fn add(&mut self, row: u16, key: char) {
        self.targets.push(TapTarget { row, key });
    }

    /// First key registered on `row`.
    pub fn key_at(&self, row: u16) -> Option<char> {
        self.targets.iter().find(|t| t.row == row).map(|t| t.key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.targets.len()
    }
}

/// Convert a pixel offset from the grid's top edge into a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let row = (click_y / (grid_height / terminal_rows as f64)) as u16;
    (row < terminal_rows).then_some(row)
}
