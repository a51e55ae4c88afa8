//! Grid: 2-D character buffer.

/// A cell position; may lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub row: i64,
    pub col: i64,
}

impl GridPoint {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// Fixed-size character grid, initialized to spaces.
///
/// Writes outside the grid are clipped per character.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: usize,
    rows: Vec<Vec<char>>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows: vec![vec![' '; cols]; rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: i64, col: i64) -> Option<char> {
        let (row, col) = (usize::try_from(row).ok()?, usize::try_from(col).ok()?);
        self.rows.get(row)?.get(col).copied()
    }

    /// Write `text` starting at `(row, col)`. Later writes overwrite earlier
    /// ones, so callers write in paint order.
    pub fn write(&mut self, row: i64, col: i64, text: &str) {
        let Some(cells) = usize::try_from(row).ok().and_then(|r| self.rows.get_mut(r)) else {
            return;
        };
        for (offset, ch) in text.chars().enumerate() {
            let x = col + offset as i64;
            if x < 0 {
                continue;
            }
            match cells.get_mut(x as usize) {
                Some(cell) => *cell = ch,
                None => break,
            }
        }
    }

    /// Draw a `+`, `-`, `|` outline. Width and height are at least 2.
    pub fn draw_box(&mut self, row: i64, col: i64, width: i64, height: i64) {
        let width = width.max(2);
        let height = height.max(2);
        let edge = format!("+{}+", "-".repeat((width - 2) as usize));
        self.write(row, col, &edge);
        for i in 1..height - 1 {
            self.write(row + i, col, "|");
            self.write(row + i, col + width - 1, "|");
        }
        self.write(row + height - 1, col, &edge);
    }

    /// Row contents as a string.
    pub fn row_string(&self, row: usize) -> Option<String> {
        self.rows.get(row).map(|cells| cells.iter().collect())
    }

    pub fn into_rows(self) -> Vec<Vec<char>> {
        self.rows
    }
}
