//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so every screen can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::notices::Notices;
use crate::types::{Phase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS};

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(12, 10, 28);
const NEON_BORDER: Rgb = Rgb::new(255, 0, 255);

const HELP_SCORING: [&str; 3] = [
    "LINES² × 2^(LEVEL-1) POINTS",
    "COMBO BONUS 2^(COMBO-1) × LEVEL²",
    "LEVEL UP EVERY 10 LINES",
];

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

/// Board frame placement computed for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
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

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// Callers reuse the framebuffer across frames; it is only resized when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        notices: &Notices,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).into_cell(' '));

        let layout = self.layout(viewport);
        let Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        } = layout;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(60, 60, 80), WELL_BG),
        );
        let border = CellStyle::new(NEON_BORDER, PANEL_BG).bold();
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.cell(x as usize, y as usize) {
                    Some(kind) => self.draw_board_cell(fb, layout, x, y, kind),
                    None => self.draw_empty_cell(fb, layout, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            let shape = get_shape(active.kind, active.rotation);

            if let Some(ghost_y) = snap.ghost_y {
                let color = Rgb::from(active.kind.color()).scaled(1, 2);
                let ghost = CellStyle::new(color, WELL_BG).dim();
                for &(dx, dy) in shape.iter() {
                    if let Some((x, y)) = visible(active.x + dx, ghost_y + dy) {
                        self.fill_cell_rect(fb, layout, x, y, '░', ghost);
                    }
                }
            }

            for &(dx, dy) in shape.iter() {
                let (x, y) = (active.x + dx, active.y + dy);
                match visible(x, y) {
                    Some((x, y)) => self.draw_board_cell(fb, layout, x, y, active.kind),
                    None => self.draw_buffer_cell(fb, layout, x, y, active.kind),
                }
            }
        }

        self.draw_side_panel(fb, snap, notices, viewport, layout);

        let overlay: &[&str] = match snap.phase {
            Phase::Start => &["NEON TETRIS", "", "ENTER TO START"],
            Phase::GameOver => &["GAME OVER", "", "R TO RESTART"],
            Phase::Playing if snap.paused => &["PAUSED", "", "P TO RESUME"],
            Phase::Playing => &[],
        };
        self.draw_overlay(fb, layout, overlay);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, &Notices::default(), viewport, &mut fb);
        fb
    }

    /// Help screen centred over the whole viewport.
    ///
    /// `bindings` pairs a key list with what it does; the host supplies them so
    /// this crate stays independent of the key map.
    pub fn draw_help(&self, fb: &mut FrameBuffer, viewport: Viewport, bindings: &[(&str, &str)]) {
        let width = |s: &str| s.chars().count() as u16;
        let keys_w = bindings.iter().map(|&(k, _)| width(k)).max().unwrap_or(0);
        let rows_w = bindings
            .iter()
            .map(|&(_, what)| keys_w + 2 + width(what))
            .chain(HELP_SCORING.iter().map(|&line| width(line)))
            .max()
            .unwrap_or(0);

        // Title, gap, bindings, gap, scoring, gap, close hint.
        let content_h = bindings.len() as u16 + HELP_SCORING.len() as u16 + 5;
        let box_w = (rows_w + 4).min(viewport.width);
        let box_h = (content_h + 2).min(viewport.height);
        let x0 = viewport.width.saturating_sub(box_w) / 2;
        let y0 = viewport.height.saturating_sub(box_h) / 2;

        fb.fill_rect(x0, y0, box_w, box_h, ' ', CellStyle::new(PANEL_BG, PANEL_BG));

        let title = CellStyle::new(Rgb::new(0, 255, 255), PANEL_BG).bold();
        let key = CellStyle::new(Rgb::new(255, 200, 100), PANEL_BG).bold();
        let text = CellStyle::new(Rgb::new(200, 200, 220), PANEL_BG);
        let bottom = y0.saturating_add(box_h.saturating_sub(1));

        'content: {
            let mut y = y0 + 1;
            fb.put_str_centered(x0, box_w, y, "HELP", title);
            y += 2;
            for &(keys, what) in bindings {
                if y >= bottom {
                    break 'content;
                }
                fb.put_str(x0 + 2, y, keys, key);
                fb.put_str(x0 + 2 + keys_w + 2, y, what, text);
                y += 1;
            }
            y += 1;
            for line in HELP_SCORING {
                if y >= bottom {
                    break 'content;
                }
                fb.put_str(x0 + 2, y, line, text);
                y += 1;
            }
            y += 1;
            if y < bottom {
                fb.put_str_centered(x0, box_w, y, "? TO CLOSE", title);
            }
        }

        // Border last so clipped text never eats into it.
        let border = CellStyle::new(NEON_BORDER, PANEL_BG).bold();
        self.draw_border(fb, x0, y0, box_w, box_h, border);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╔', style);
        fb.put_char(x + w - 1, y, '╗', style);
        fb.put_char(x, y + h - 1, '╚', style);
        fb.put_char(x + w - 1, y + h - 1, '╝', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '═', style);
            fb.put_char(x + dx, y + h - 1, '═', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '║', style);
            fb.put_char(x + w - 1, y + dy, '║', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(50, 40, 90), WELL_BG).dim();
        self.fill_cell_rect(fb, layout, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(Rgb::from(kind.color()), WELL_BG).bold();
        self.fill_cell_rect(fb, layout, x, y, '█', style);
    }

    /// Active-piece cell in a hidden row, drawn over the top border and above.
    fn draw_buffer_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        x: i8,
        y: i8,
        kind: PieceKind,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < -(BUFFER_ROWS as i8) || y >= 0 {
            return;
        }
        let py = layout.start_y as i32 + 1 + y as i32 * self.cell_h as i32;
        let Ok(py) = u16::try_from(py) else {
            return;
        };
        let px = layout.start_x + 1 + x as u16 * self.cell_w;
        let style = CellStyle::new(Rgb::from(kind.color()), PANEL_BG).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.start_x + 1 + cell_x * self.cell_w;
        let py = layout.start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        notices: &Notices,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(0, 255, 255), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);

        let mut y = layout.start_y;
        let stat = |fb: &mut FrameBuffer, y: &mut u16, name: &str, n: u64| {
            fb.put_str(panel_x, *y, name, label);
            fb.put_u64(panel_x, *y + 1, n, value);
            *y = y.saturating_add(3);
        };
        stat(fb, &mut y, "SCORE", snap.score);
        stat(fb, &mut y, "BEST", snap.best_score);
        stat(fb, &mut y, "LEVEL", snap.level as u64);
        stat(fb, &mut y, "LINES", snap.lines as u64);
        stat(fb, &mut y, "COMBO", snap.combo as u64);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if snap.phase != Phase::Start {
            self.draw_preview(fb, panel_x, y, snap.next);
        }
        y = y.saturating_add(3);

        for notice in notices.iter() {
            if y >= viewport.height {
                break;
            }
            let mut style = CellStyle::new(notice.color, PANEL_BG).bold();
            if notice.fading() {
                style = CellStyle::new(notice.color.scaled(1, 2), PANEL_BG);
            }
            fb.put_str(panel_x, y, &notice.text, style);
            y = y.saturating_add(1);
        }
    }

    /// Small next-piece preview, one column per mino (two for wide cells).
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(Rgb::from(kind.color()), PANEL_BG).bold();
        let shape = get_shape(kind, Rotation::North);
        // Shapes sit on box rows 0-1 except I, which sits on row 1.
        let top = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        for &(dx, dy) in shape.iter() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + (dy - top) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: Layout, lines: &[&str]) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let hint = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let first_y = layout
            .start_y
            .saturating_add(layout.frame_h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let style = if i == 0 { title } else { hint };
            fb.put_str_centered(
                layout.start_x,
                layout.frame_w,
                first_y + i as u16,
                line,
                style,
            );
        }
    }
}

/// Board cell to draw, if it lies in the visible rows.
fn visible(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;

    fn playing_snapshot() -> GameSnapshot {
        GameSnapshot {
            phase: Phase::Playing,
            active: Some(ActiveSnapshot {
                kind: PieceKind::T,
                rotation: Rotation::North,
                x: 3,
                y: 0,
            }),
            ghost_y: Some(18),
            next: PieceKind::I,
            ..Default::default()
        }
    }

    #[test]
    fn layout_centers_board() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(80, 30));
        assert_eq!(layout.frame_w, 22);
        assert_eq!(layout.frame_h, 22);
        assert_eq!(layout.start_x, 29);
        assert_eq!(layout.start_y, 4);
    }

    #[test]
    fn active_piece_and_ghost_are_drawn() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&playing_snapshot(), Viewport::new(80, 24));

        // Frame starts at column 29; T North at x=3 has its nub on board (4, 0).
        assert_eq!(fb.get(29 + 1 + 4 * 2, 1).map(|c| c.ch), Some('█'));
        // Ghost bottom row lands on board row 19.
        assert_eq!(fb.get(29 + 1 + 3 * 2, 20).map(|c| c.ch), Some('░'));
    }

    #[test]
    fn fresh_spawn_shows_above_the_well() {
        let mut snap = playing_snapshot();
        snap.active = snap.active.map(|a| ActiveSnapshot { y: -2, ..a });
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));

        // Frame top is row 4. Row -1 covers the border, row -2 sits just above.
        let col = |x: u16| 29 + 1 + x * 2;
        assert_eq!(fb.get(col(4), 3).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(col(3), 4).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(col(5), 4).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(col(3), 3).map(|c| c.ch), Some(' '));
        assert_eq!(fb.get(col(3), 5).map(|c| c.ch), Some('·'));

        // Anchored at the top there is no room for row -2.
        let top = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = top.render(&snap, Viewport::new(80, 24));
        assert_eq!(fb.get(col(3), 0).map(|c| c.ch), Some('█'));
    }

    #[test]
    fn side_panel_shows_stats() {
        let mut snap = playing_snapshot();
        snap.score = 82;
        snap.best_score = 1234;
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("82"));
        assert!(fb.contains_text("1234"));
        assert!(fb.contains_text("NEXT"));
    }

    #[test]
    fn overlays_follow_phase() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);

        let start = GameSnapshot::default();
        assert!(view.render(&start, vp).contains_text("ENTER TO START"));

        let mut paused = playing_snapshot();
        paused.paused = true;
        assert!(view.render(&paused, vp).contains_text("PAUSED"));

        let over = GameSnapshot {
            phase: Phase::GameOver,
            ..Default::default()
        };
        assert!(view.render(&over, vp).contains_text("GAME OVER"));

        assert!(!view.render(&playing_snapshot(), vp).contains_text("PAUSED"));
    }

    #[test]
    fn notices_render_in_panel() {
        let mut notices = Notices::new();
        notices.push("TETRIS!", Rgb::new(255, 50, 255));
        let mut fb = FrameBuffer::new(1, 1);
        let vp = Viewport::new(80, 30);
        GameView::default().render_into(&playing_snapshot(), &notices, vp, &mut fb);
        assert!(fb.contains_text("TETRIS!"));
    }

    #[test]
    fn help_lists_bindings_over_the_board() {
        let bindings = [("← →", "MOVE"), ("SPACE", "HARD DROP"), ("?", "HELP")];
        let mut fb = GameView::default().render(&playing_snapshot(), Viewport::new(80, 24));
        GameView::default().draw_help(&mut fb, Viewport::new(80, 24), &bindings);

        assert!(fb.contains_text("HELP"));
        assert!(fb.contains_text("SPACE  HARD DROP"));
        assert!(fb.contains_text("← →    MOVE"));
        assert!(fb.contains_text("LEVEL UP EVERY 10 LINES"));
        assert!(fb.contains_text("? TO CLOSE"));
    }

    #[test]
    fn help_clips_to_small_viewports() {
        let bindings = [("SPACE", "HARD DROP"); 30];
        let mut fb = FrameBuffer::new(12, 6);
        GameView::default().draw_help(&mut fb, Viewport::new(12, 6), &bindings);
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('╔'));
        assert_eq!(fb.get(11, 5).map(|c| c.ch), Some('╝'));
        assert_eq!(fb.get(11, 3).map(|c| c.ch), Some('║'));
        assert!(!fb.contains_text("? TO CLOSE"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&playing_snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
