//! GameView: paints a `RenderSnapshot` onto any [`Surface`].
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ActiveSnapshot, RenderSnapshot};
use crate::fb::{Cell, FrameBuffer, Surface};
use crate::types::{ColorId, Phase, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const GRID_DOT: Rgb = Rgb::new(90, 90, 100);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const LABEL: Rgb = Rgb::new(220, 220, 220);
const VALUE: Rgb = Rgb::new(200, 200, 200);
const OVERLAY: Rgb = Rgb::new(255, 255, 255);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame sits on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// Board and side panel painter.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in surface units.
    cell_w: u16,
    /// Board cell height in surface units.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            frame_w,
            frame_h,
        }
    }

    /// Paint one frame.
    ///
    /// Draw order: board background and grid, locked cells, ghost, active piece,
    /// side panel, then the phase overlay.
    pub fn paint<S: Surface>(&self, snap: &RenderSnapshot, viewport: Viewport, surface: &mut S) {
        let layout = self.layout(viewport);
        let Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        } = layout;

        surface.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, BOARD_BG);
        surface.stroke_rect(start_x, start_y, frame_w, frame_h, BORDER);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                let (px, py) = self.cell_origin(layout, x as u16, y as u16);
                match ColorId::new(v) {
                    Some(color) => surface.fill_rect(px, py, self.cell_w, self.cell_h, color.rgb()),
                    None => surface.text(px, py, "·", GRID_DOT),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            if ghost_y != active.y {
                self.for_each_board_cell(layout, &active, ghost_y, |px, py| {
                    surface.ghost_rect(px, py, self.cell_w, self.cell_h, active.color.rgb());
                });
            }
        }

        if let Some(active) = snap.active {
            self.for_each_board_cell(layout, &active, active.y, |px, py| {
                surface.fill_rect(px, py, self.cell_w, self.cell_h, active.color.rgb());
            });
        }

        self.paint_side_panel(snap, viewport, layout, surface);

        let overlay = match snap.phase {
            Phase::Idle => Some(("PRESS START", "P / Enter")),
            Phase::Paused => Some(("PAUSED", "P to resume")),
            Phase::Over => Some(("GAME OVER", "P to restart")),
            Phase::Running => None,
        };
        if let Some((title, hint)) = overlay {
            self.paint_overlay(layout, title, hint, surface);
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Allocation-free once the buffer has reached the viewport size.
    pub fn render_into(&self, snap: &RenderSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());
        self.paint(snap, viewport, fb);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RenderSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, layout: Layout, cell_x: u16, cell_y: u16) -> (u16, u16) {
        (
            layout.start_x + 1 + cell_x * self.cell_w,
            layout.start_y + 1 + cell_y * self.cell_h,
        )
    }

    /// Visit the on-board cells of `piece` drawn at row `at_y`.
    fn for_each_board_cell(
        &self,
        layout: Layout,
        piece: &ActiveSnapshot,
        at_y: i8,
        mut f: impl FnMut(u16, u16),
    ) {
        for (dx, dy) in piece.shape.cells() {
            let x = piece.x + dx;
            let y = at_y + dy;
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                let (px, py) = self.cell_origin(layout, x as u16, y as u16);
                f(px, py);
            }
        }
    }

    fn paint_side_panel<S: Surface>(
        &self,
        snap: &RenderSnapshot,
        viewport: Viewport,
        layout: Layout,
        surface: &mut S,
    ) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = layout.start_y;
        let mut number = [0u8; 10];
        for (label, value) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("HIGH", snap.high_score),
        ] {
            surface.text(panel_x, y, label, LABEL);
            surface.text(panel_x, y.saturating_add(1), format_u32(value, &mut number), VALUE);
            y = y.saturating_add(3);
        }

        surface.text(panel_x, y, "NEXT", LABEL);
        y = y.saturating_add(2);
        if let Some(next) = snap.next {
            for (dx, dy) in next.shape.cells() {
                surface.fill_rect(
                    panel_x + (dx as u16) * self.cell_w,
                    y + (dy as u16) * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                    next.color.rgb(),
                );
            }
        } else {
            surface.text(panel_x, y, "-", VALUE);
        }
    }

    fn paint_overlay<S: Surface>(&self, layout: Layout, title: &str, hint: &str, surface: &mut S) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        for (dy, text) in [(0, title), (1, hint)] {
            let text_w = text.chars().count() as u16;
            let x = layout
                .start_x
                .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
            surface.text(x, mid_y.saturating_add(dy), text, OVERLAY);
        }
    }
}

/// Format into a stack buffer; returns the digits.
fn format_u32(value: u32, buf: &mut [u8; 10]) -> &str {
    let mut n = value;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    std::str::from_utf8(&buf[start..]).unwrap_or("0")
}
