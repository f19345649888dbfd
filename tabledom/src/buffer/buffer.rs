use super::Cell;
use crate::layout::Rect;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|idx| &mut self.cells[idx])
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    /// Paint the background of every cell in `area`.
    pub fn fill(&mut self, area: Rect, bg: Rgb) {
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell { bg, ..Cell::default() };
                }
            }
        }
    }

    /// Write `text` starting at `(x, y)`, stopping at `max_x`.
    /// Keeps the existing background of the cells written over.
    pub fn put_str(&mut self, x: u16, y: u16, max_x: u16, text: &str, fg: Rgb, style: TextStyle) {
        let mut cx = x;
        for ch in text.chars() {
            let w = char_width(ch).max(1) as u16;
            if cx.saturating_add(w) > max_x.min(self.width) {
                break;
            }
            if let Some(cell) = self.get_mut(cx, y) {
                cell.char = ch;
                cell.fg = fg;
                cell.style = style;
                cell.wide_continuation = false;
            }
            if w == 2 {
                if let Some(cell) = self.get_mut(cx + 1, y) {
                    cell.char = ' ';
                    cell.wide_continuation = true;
                }
            }
            cx += w;
        }
    }

    /// Text of row `y`, without wide-character continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}
