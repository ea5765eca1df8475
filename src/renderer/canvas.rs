//! Character canvas abstraction
//!
//! Behaviors draw through [`Canvas`] only. Writes outside the surface are
//! dropped silently, so a frame sliding off an edge is simply clipped.

/// Text attribute for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Normal,
    Dim,
    Bold,
}

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: Style::Normal,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A rectangular character surface
pub trait Canvas {
    /// Surface size as (rows, columns)
    fn size(&self) -> (i32, i32);

    /// Write one styled character. Out-of-range writes must be ignored.
    fn put(&mut self, row: i32, column: i32, ch: char, style: Style);

    /// Emit an audible alert
    fn beep(&mut self);
}

/// Whether (row, column) lies on the surface
#[inline]
pub fn contains<C: Canvas + ?Sized>(canvas: &C, row: i32, column: i32) -> bool {
    let (rows, columns) = canvas.size();
    (0..rows).contains(&row) && (0..columns).contains(&column)
}

/// Size of a multi-line frame as (rows, columns).
///
/// Columns are counted in chars; an empty frame is (0, 0).
pub fn frame_size(text: &str) -> (i32, i32) {
    let rows = text.lines().count() as i32;
    let columns = text
        .lines()
        .map(|line| line.chars().count() as i32)
        .max()
        .unwrap_or(0);
    if columns == 0 { (0, 0) } else { (rows, columns) }
}

/// Draw a multi-line frame with its top-left corner at (row, column).
///
/// Spaces are transparent. With `negative` every cell of the frame,
/// spaces included, is blanked instead, which erases a previous draw.
pub fn draw_frame<C: Canvas + ?Sized>(
    canvas: &mut C,
    row: f32,
    column: f32,
    text: &str,
    negative: bool,
) {
    let start_row = row.round() as i32;
    let start_column = column.round() as i32;

    for (row_offset, line) in text.lines().enumerate() {
        let r = start_row + row_offset as i32;
        for (column_offset, ch) in line.chars().enumerate() {
            if ch == ' ' && !negative {
                continue;
            }
            let c = start_column + column_offset as i32;
            if !contains(canvas, r, c) {
                continue;
            }
            let ch = if negative { ' ' } else { ch };
            canvas.put(r, c, ch, Style::Normal);
        }
    }
}

/// Write a single-line string starting at (row, column)
pub fn draw_text<C: Canvas + ?Sized>(canvas: &mut C, row: i32, column: i32, text: &str, style: Style) {
    for (offset, ch) in text.chars().enumerate() {
        let c = column + offset as i32;
        if contains(canvas, row, c) {
            canvas.put(row, c, ch, style);
        }
    }
}

/// Draw the playfield border along the outer edge
pub fn draw_border<C: Canvas + ?Sized>(canvas: &mut C) {
    let (rows, columns) = canvas.size();
    if rows < 2 || columns < 2 {
        return;
    }
    let (bottom, right) = (rows - 1, columns - 1);
    for c in 1..right {
        canvas.put(0, c, '─', Style::Normal);
        canvas.put(bottom, c, '─', Style::Normal);
    }
    for r in 1..bottom {
        canvas.put(r, 0, '│', Style::Normal);
        canvas.put(r, right, '│', Style::Normal);
    }
    canvas.put(0, 0, '┌', Style::Normal);
    canvas.put(0, right, '┐', Style::Normal);
    canvas.put(bottom, 0, '└', Style::Normal);
    canvas.put(bottom, right, '┘', Style::Normal);
}

/// In-memory canvas. Used as the terminal back buffer and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: i32,
    columns: i32,
    cells: Vec<Cell>,
    beeps: u32,
}

impl Grid {
    pub fn new(rows: i32, columns: i32) -> Self {
        let rows = rows.max(0);
        let columns = columns.max(0);
        Self {
            rows,
            columns,
            cells: vec![Cell::BLANK; (rows * columns) as usize],
            beeps: 0,
        }
    }

    #[inline]
    fn index(&self, row: i32, column: i32) -> Option<usize> {
        if (0..self.rows).contains(&row) && (0..self.columns).contains(&column) {
            Some((row * self.columns + column) as usize)
        } else {
            None
        }
    }

    /// Cell at (row, column), if on the surface
    pub fn get(&self, row: i32, column: i32) -> Option<Cell> {
        self.index(row, column).map(|i| self.cells[i])
    }

    /// Character at (row, column), blank when off the surface
    pub fn char_at(&self, row: i32, column: i32) -> char {
        self.get(row, column).map_or(' ', |cell| cell.ch)
    }

    /// One row as a string (trailing blanks kept)
    pub fn row_text(&self, row: i32) -> String {
        (0..self.columns).map(|c| self.char_at(row, c)).collect()
    }

    /// Number of cells currently showing `ch`
    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|cell| cell.ch == ch).count()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Alerts emitted since creation or the last [`Grid::take_beeps`]
    pub fn beeps(&self) -> u32 {
        self.beeps
    }

    pub fn take_beeps(&mut self) -> u32 {
        std::mem::take(&mut self.beeps)
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }
}

impl Canvas for Grid {
    fn size(&self) -> (i32, i32) {
        (self.rows, self.columns)
    }

    fn put(&mut self, row: i32, column: i32, ch: char, style: Style) {
        if let Some(i) = self.index(row, column) {
            self.cells[i] = Cell { ch, style };
        }
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: &str = "ab\n c\n";

    #[test]
    fn test_frame_size() {
        assert_eq!(frame_size(BOX), (2, 2));
        assert_eq!(frame_size("xyz\nq"), (2, 3));
        assert_eq!(frame_size(""), (0, 0));
        assert_eq!(frame_size("\n\n"), (0, 0));
    }

    #[test]
    fn test_draw_frame_skips_spaces() {
        let mut grid = Grid::new(4, 4);
        grid.put(2, 1, '*', Style::Dim);
        draw_frame(&mut grid, 1.0, 1.0, BOX, false);
        assert_eq!(grid.row_text(1), " ab ");
        // The space in " c" is transparent, so the star survives
        assert_eq!(grid.row_text(2), " *c ");
        assert_eq!(grid.get(2, 1).map(|cell| cell.style), Some(Style::Dim));
    }

    #[test]
    fn test_negative_blanks_whole_frame() {
        let mut grid = Grid::new(4, 4);
        grid.put(2, 1, '*', Style::Normal);
        draw_frame(&mut grid, 1.0, 1.0, BOX, false);
        draw_frame(&mut grid, 1.0, 1.0, BOX, true);
        assert_eq!(grid.count(' '), 16);
    }

    #[test]
    fn test_draw_frame_clips_at_edges() {
        let mut grid = Grid::new(3, 3);
        draw_frame(&mut grid, -1.0, 2.0, "xyz\nxyz\nxyz", false);
        assert_eq!(grid.row_text(0), "  x");
        assert_eq!(grid.row_text(1), "  x");
        assert_eq!(grid.row_text(2), "   ");
    }

    #[test]
    fn test_draw_frame_rounds_position() {
        let mut grid = Grid::new(3, 3);
        draw_frame(&mut grid, 0.6, 1.4, "o", false);
        assert_eq!(grid.char_at(1, 1), 'o');
    }

    #[test]
    fn test_border() {
        let mut grid = Grid::new(3, 4);
        draw_border(&mut grid);
        assert_eq!(grid.row_text(0), "┌──┐");
        assert_eq!(grid.row_text(1), "│  │");
        assert_eq!(grid.row_text(2), "└──┘");
    }
}
