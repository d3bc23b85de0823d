//! GameView: maps a `GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It owns the color-id lookup table and
//! paints the board, the shadow preview, the active piece, and the score
//! panel; locked and falling cells are filled, the shadow is outline-only.

use crate::core::GameSession;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{COLS, ROWS};

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

/// Display color for a locked or falling cell, by color-id.
///
/// The palette follows the original game: T pink, I cyan, S green,
/// Z magenta, L orange, J yellow, O blue.
fn cell_color(color_id: u8) -> Rgb {
    match color_id {
        1 => Rgb::new(255, 13, 114),
        2 => Rgb::new(13, 194, 255),
        3 => Rgb::new(13, 255, 114),
        4 => Rgb::new(245, 56, 255),
        5 => Rgb::new(255, 142, 13),
        6 => Rgb::new(255, 225, 56),
        7 => Rgb::new(56, 119, 255),
        _ => Rgb::new(128, 128, 128),
    }
}

/// Renders the game into a framebuffer, one board cell per `cell_w x cell_h`
/// block of terminal cells.
pub struct GameView {
    cell_w: u16,
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render the current session state into a fresh framebuffer.
    pub fn render(&self, session: &GameSession, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = (COLS as u16) * self.cell_w;
        let board_h = (ROWS as u16) * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(17, 17, 17),
            bold: false,
            dim: false,
        };
        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h);

        // Locked cells.
        for y in 0..ROWS {
            for x in 0..COLS {
                let v = session.board().get(x, y);
                if v != 0 {
                    self.draw_cell(&mut fb, start_x, start_y, x as i32, y as i32, v, false);
                }
            }
        }

        // Shadow preview: outline-only at the projected resting position.
        let (sx, sy) = session.shadow();
        for (mx, my, v) in session.active().matrix.occupied() {
            self.draw_cell(
                &mut fb,
                start_x,
                start_y,
                sx + mx as i32,
                sy + my as i32,
                v,
                true,
            );
        }

        // Active piece, drawn over its own shadow when they overlap.
        let piece = session.active();
        for (mx, my, v) in piece.matrix.occupied() {
            self.draw_cell(
                &mut fb,
                start_x,
                start_y,
                piece.x + mx as i32,
                piece.y + my as i32,
                v,
                false,
            );
        }

        self.draw_side_panel(&mut fb, session, viewport, start_x, start_y, frame_w);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i32,
        y: i32,
        color_id: u8,
        shadow: bool,
    ) {
        if x < 0 || x >= COLS as i32 || y < 0 || y >= ROWS as i32 {
            return;
        }
        let style = CellStyle {
            fg: cell_color(color_id),
            bg: Rgb::new(17, 17, 17),
            bold: !shadow,
            dim: shadow,
        };
        let ch = if shadow { '░' } else { '█' };
        let px = start_x + 1 + (x as u16) * self.cell_w;
        let py = start_y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::default();
        let hint = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", session.score()), value);
        y = y.saturating_add(2);

        for line in [
            "←/→  move",
            "↓    drop",
            "↑/w  rotate",
            "q    rotate ccw",
            "r    restart",
            "esc  quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }
}
