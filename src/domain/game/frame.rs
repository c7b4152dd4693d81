/// How a cell should be colored when presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Snake,
    Food,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tone: Tone,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', tone: Tone::Plain };
}

/// A fixed-size character grid, independent of any terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::BLANK; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a cell. Writes outside the grid are dropped.
    pub fn put(&mut self, x: i32, y: i32, ch: char, tone: Tone) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = Cell { ch, tone };
        }
    }

    /// Write plain text starting at `(x, y)`, clipped to the grid.
    pub fn text(&mut self, x: i32, y: i32, text: &str) {
        for (offset, ch) in (0..).zip(text.chars()) {
            self.put(x + offset, y, ch, Tone::Plain);
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Characters of row `y`, without colors.
    pub fn row_text(&self, y: usize) -> String {
        self.rows().nth(y).map(|row| row.iter().map(|cell| cell.ch).collect()).unwrap_or_default()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}
