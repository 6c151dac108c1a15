//! Framebuffer, cell styles and the `Surface` drawing seam.

use crate::types::Rgb;

/// Minimal drawing target for the game view.
///
/// Coordinates are in surface units (terminal cells for [`FrameBuffer`]).
/// Anything outside the surface is clipped.
pub trait Surface {
    /// Solid rectangle
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb);

    /// One-unit outline around the rectangle's edge
    fn stroke_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb);

    /// Single-line text starting at `(x, y)`
    fn text(&mut self, x: u16, y: u16, s: &str, color: Rgb);

    /// Translucent landing preview. Falls back to an outline.
    fn ghost_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        self.stroke_rect(x, y, w, h, color);
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn plain(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::plain(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize in place, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (cx, ch) in (x..self.width).zip(s.chars()) {
            self.put_char(cx, y, ch, style);
        }
    }

    /// Decimal number without allocating
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for (i, d) in digits[..len].iter().rev().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, *d as char, style);
        }
    }

    pub fn fill_chars(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Background color currently under `(x, y)`
    fn bg_at(&self, x: u16, y: u16) -> Rgb {
        self.get(x, y).unwrap_or_default().style.bg
    }
}

impl Surface for FrameBuffer {
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        self.fill_chars(x, y, w, h, '█', CellStyle::plain(color, color));
    }

    fn stroke_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        if w < 2 || h < 2 {
            return;
        }
        let style = |fb: &Self, px, py| CellStyle::plain(color, fb.bg_at(px, py));
        let (right, bottom) = (x + w - 1, y + h - 1);

        let corners = [
            (x, y, '┌'),
            (right, y, '┐'),
            (x, bottom, '└'),
            (right, bottom, '┘'),
        ];
        for (px, py, ch) in corners {
            self.put_char(px, py, ch, style(self, px, py));
        }
        for px in x + 1..right {
            self.put_char(px, y, '─', style(self, px, y));
            self.put_char(px, bottom, '─', style(self, px, bottom));
        }
        for py in y + 1..bottom {
            self.put_char(x, py, '│', style(self, x, py));
            self.put_char(right, py, '│', style(self, right, py));
        }
    }

    /// Text keeps whatever background is already painted underneath.
    fn text(&mut self, x: u16, y: u16, s: &str, color: Rgb) {
        for (cx, ch) in (x..self.width).zip(s.chars()) {
            let style = CellStyle {
                bold: true,
                ..CellStyle::plain(color, self.bg_at(cx, y))
            };
            self.put_char(cx, y, ch, style);
        }
    }

    fn ghost_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                let (px, py) = (x.saturating_add(dx), y.saturating_add(dy));
                let style = CellStyle {
                    dim: true,
                    ..CellStyle::plain(color, self.bg_at(px, py))
                };
                self.put_char(px, py, '░', style);
            }
        }
    }
}
