//! GameView: draws a [`GameSnapshot`] onto a [`Canvas`].
//!
//! No I/O happens here, so layout is unit-tested directly.

use crate::canvas::{Canvas, Glyph, Rgb, Style};
use crate::core::GameSnapshot;
use crate::types::{BlockColor, RunState, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb(24, 24, 32);
const PANEL_BG: Rgb = Rgb(0, 0, 0);

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

/// Board layout parameters.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    /// Draw into a reused canvas, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.reset(viewport.width, viewport.height, Glyph::new(' ', Style::new(Rgb(200, 200, 200), PANEL_BG)));

        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        canvas.fill(frame.x + 1, frame.y + 1, w - 2, h - 2, ' ', Style::new(WELL_BG, WELL_BG));
        self.draw_border(canvas, &frame);
        self.draw_frozen_markers(canvas, snap, &frame);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(canvas, &frame, x as i16, y as i16, 0, *color),
                    None => self.draw_cell(canvas, &frame, x as u16, y as u16, 0, '·', Style::new(Rgb(70, 70, 80), WELL_BG).dim()),
                }
            }
        }

        if let Some(active) = snap.active {
            // Sub-cell offset only shows when a cell spans several rows.
            let shift = (snap.fall_progress.clamp(0.0, 1.0) * self.cell_h as f32) as u16;
            let shift = shift.min(self.cell_h - 1);
            for (r, c) in active.shape.cells() {
                let x = active.x as i16 + c as i16;
                let y = active.y as i16 + r as i16;
                self.draw_block(canvas, &frame, x, y, shift, active.color);
            }
        }

        self.draw_panel(canvas, snap, &frame, viewport);

        match snap.state {
            RunState::Idle => self.draw_banner(canvas, &frame, &["FROSTFALL", "ENTER to start"]),
            RunState::Paused => self.draw_banner(canvas, &frame, &["PAUSED", "P to resume"]),
            RunState::GameOver => {
                let score = format!("SCORE {}", snap.score);
                let level = format!("LEVEL {}", snap.level);
                self.draw_banner(canvas, &frame, &["GAME OVER", &score, &level, "ENTER to retry"]);
            }
            RunState::Running => {}
        }
    }

    fn draw_border(&self, canvas: &mut Canvas, f: &Frame) {
        let style = Style::new(Rgb(180, 180, 190), PANEL_BG);
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);
        for x in f.x + 1..right {
            canvas.put(x, f.y, '─', style);
            canvas.put(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            canvas.put(f.x, y, '│', style);
            canvas.put(right, y, '│', style);
        }
        canvas.put(f.x, f.y, '┌', style);
        canvas.put(right, f.y, '┐', style);
        canvas.put(f.x, bottom, '└', style);
        canvas.put(right, bottom, '┘', style);
    }

    /// Mark frozen rows on the right border.
    fn draw_frozen_markers(&self, canvas: &mut Canvas, snap: &GameSnapshot, f: &Frame) {
        let style = Style::new(BlockColor::Frozen.rgb().into(), PANEL_BG).bold();
        for (row, frozen) in snap.frozen_rows.iter().enumerate() {
            if *frozen {
                let y = f.y + 1 + row as u16 * self.cell_h;
                canvas.fill(f.x + f.w - 1, y, 1, self.cell_h, '*', style);
            }
        }
    }

    fn draw_block(&self, canvas: &mut Canvas, f: &Frame, x: i16, y: i16, shift: u16, color: BlockColor) {
        if !(0..BOARD_WIDTH as i16).contains(&x) || !(0..BOARD_HEIGHT as i16).contains(&y) {
            return;
        }
        let ch = match color {
            BlockColor::Mystery => '?',
            BlockColor::Frozen => '▓',
            BlockColor::Piece(_) => '█',
        };
        let style = Style::new(color.rgb().into(), WELL_BG).bold();
        self.draw_cell(canvas, f, x as u16, y as u16, shift, ch, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(&self, canvas: &mut Canvas, f: &Frame, x: u16, y: u16, shift: u16, ch: char, style: Style) {
        let px = f.x + 1 + x * self.cell_w;
        let py = f.y + 1 + y * self.cell_h + shift;
        let bottom = f.y + f.h - 1;
        let h = self.cell_h.min(bottom.saturating_sub(py));
        canvas.fill(px, py, self.cell_w, h, ch, style);
    }

    fn draw_panel(&self, canvas: &mut Canvas, snap: &GameSnapshot, f: &Frame, viewport: Viewport) {
        let x = f.x.saturating_add(f.w).saturating_add(2);
        if x.saturating_add(12) > viewport.width {
            return;
        }
        let label = Style::new(Rgb(230, 230, 230), PANEL_BG).bold();
        let value = Style::new(Rgb(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let frozen = snap.frozen_rows.iter().filter(|f| **f).count() as u32;
        let fields = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("SPEED ms", snap.fall_interval_ms),
            ("PIECE", snap.piece_id),
            ("FROZEN", frozen),
        ];

        let mut y = f.y;
        for (name, v) in fields {
            canvas.text(x, y, name, label);
            canvas.number(x, y + 1, v, value);
            y += 3;
        }

        canvas.text(x, y, snap.state.as_str(), label);
        y += 2;
        for line in ["←→ move  ↓ drop", "↑/Z rotate", "SPACE hard drop", "P pause  R reset", "Q quit"] {
            canvas.text(x, y, line, hint);
            y += 1;
        }
    }

    fn draw_banner(&self, canvas: &mut Canvas, f: &Frame, lines: &[&str]) {
        let style = Style::new(Rgb(255, 255, 255), PANEL_BG).bold();
        let top = f.y + f.h / 2 - (lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let len = line.chars().count() as u16;
            let x = f.x + f.w.saturating_sub(len) / 2;
            canvas.text(x, top + i as u16, line, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, get_shape};
    use crate::types::{PieceKind, PieceVariant};

    fn view() -> (GameView, Viewport) {
        (GameView::default(), Viewport::new(60, 24))
    }

    #[test]
    fn idle_shows_start_banner() {
        let (v, vp) = view();
        let canvas = v.render(&GameSnapshot::default(), vp);
        assert!(canvas.contains_text("ENTER to start"));
        assert!(canvas.contains_text("SCORE"));
    }

    #[test]
    fn paused_and_game_over_banners() {
        let (v, vp) = view();
        let mut snap = GameSnapshot {
            state: RunState::Paused,
            ..GameSnapshot::default()
        };
        assert!(v.render(&snap, vp).contains_text("PAUSED"));
        snap.state = RunState::GameOver;
        snap.score = 4321;
        let over = v.render(&snap, vp);
        assert!(over.contains_text("GAME OVER"));
        assert!(over.contains_text("SCORE 4321"));
        snap.state = RunState::Running;
        let c = v.render(&snap, vp);
        assert!(!c.contains_text("PAUSED") && !c.contains_text("GAME OVER"));
    }

    #[test]
    fn mystery_piece_draws_question_marks() {
        let (v, vp) = view();
        let snap = GameSnapshot {
            state: RunState::Running,
            active: Some(ActiveSnapshot {
                kind: PieceKind::O,
                variant: PieceVariant::Mystery,
                color: BlockColor::Mystery,
                shape: get_shape(PieceKind::O),
                x: 4,
                y: 0,
            }),
            ..GameSnapshot::default()
        };
        let canvas = v.render(&snap, vp);
        assert!(canvas.contains_text("????"));
    }

    #[test]
    fn frozen_rows_are_marked() {
        let (v, vp) = view();
        let mut snap = GameSnapshot {
            state: RunState::Running,
            ..GameSnapshot::default()
        };
        snap.frozen_rows[19] = true;
        snap.board[19][0] = Some(BlockColor::Frozen);
        let canvas = v.render(&snap, vp);
        // Board frame is 22 wide and 22 tall, centered in 60x24.
        let row = canvas.row_text(1 + 1 + 19);
        assert!(row.contains('▓'));
        assert!(row.contains('*'));
        assert!(!canvas.row_text(1 + 1 + 18).contains('*'));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let v = GameView::default();
        let canvas = v.render(&GameSnapshot::default(), Viewport::new(5, 3));
        assert_eq!((canvas.width(), canvas.height()), (5, 3));
    }
}
