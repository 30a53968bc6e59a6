//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, ShapeLibrary};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockType, GRID_HEIGHT, GRID_WIDTH, PREVIEW_GRID_SIZE};

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

/// Driver-side values shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudInfo {
    pub highscore: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Colour of a block kind on the board. `Empty` gets the board background.
pub fn block_color(kind: BlockType) -> Rgb {
    match kind {
        BlockType::Empty => BOARD_BG,
        BlockType::Block => Rgb::new(240, 220, 80),
        BlockType::Triangle => Rgb::new(200, 120, 220),
        BlockType::Line => Rgb::new(80, 220, 220),
        BlockType::RightT => Rgb::new(255, 165, 0),
        BlockType::LeftT => Rgb::new(80, 120, 220),
        BlockType::RightShape => Rgb::new(100, 220, 120),
        BlockType::LeftShape => Rgb::new(220, 80, 80),
    }
}

/// Terminal renderer for the board, side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell keeps cells roughly square.
        Self::new(2)
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_w
    }

    /// Outer size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (GRID_WIDTH as u16 * self.cell_w + 2, GRID_HEIGHT as u16 + 2)
    }

    /// Top-left corner of the board frame within `viewport`.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let panel_w = self.preview_box_width() + 2;
        let x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: HudInfo,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for y in 0..GRID_HEIGHT as usize {
            for x in 0..GRID_WIDTH as usize {
                let kind = snap.cell(x, y).unwrap_or(BlockType::Empty);
                let floating = snap.floating[y][x];
                let px = start_x + 1 + x as u16 * self.cell_w;
                let py = start_y + 1 + y as u16;
                self.draw_block(fb, px, py, kind, floating);
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            let mid_y = start_y + frame_h / 2;
            self.draw_centered(fb, start_x, frame_w, mid_y, "GAME OVER");
            self.draw_centered(fb, start_x, frame_w, mid_y + 2, "R TO RESTART");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: HudInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, px: u16, py: u16, kind: BlockType, floating: bool) {
        if kind.is_empty() {
            let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
            fb.fill_rect(px, py, self.cell_w, 1, '·', style);
            return;
        }

        let color = block_color(kind);
        let style = if floating {
            CellStyle::new(color, BOARD_BG).bold()
        } else {
            CellStyle::new(color.scaled(4, 5), BOARD_BG)
        };
        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
    }

    fn preview_box_width(&self) -> u16 {
        PREVIEW_GRID_SIZE as u16 * self.cell_w + 2
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: HudInfo,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < self.preview_box_width() {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        // Levels are counted from 1 on screen.
        let rows: [(&str, u32); 4] = [
            ("LEVEL", snap.level.saturating_add(1)),
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("HIGHSCORE", hud.highscore),
        ];

        let mut y = start_y;
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, snap.preview, panel_x, y + 1);
    }

    /// Unrotated next piece in a 5x5 box, offset one cell from its corner.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: BlockType, x: u16, y: u16) {
        let size = PREVIEW_GRID_SIZE as u16;
        let box_w = self.preview_box_width();
        fb.draw_box(x, y, box_w, size + 2, CellStyle::new(Rgb::new(120, 120, 130), PANEL_BG));
        fb.fill_rect(x + 1, y + 1, size * self.cell_w, size, ' ', CellStyle::new(BOARD_BG, BOARD_BG));

        if kind.is_empty() {
            return;
        }
        let style = CellStyle::new(block_color(kind), BOARD_BG).bold();
        for (lx, ly) in ShapeLibrary::base_shape(kind).occupied() {
            let cx = 1 + lx as u16;
            let cy = 1 + ly as u16;
            if cx < size && cy < size {
                fb.fill_rect(x + 1 + cx * self.cell_w, y + 1 + cy, self.cell_w, 1, '█', style);
            }
        }
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, start_x: u16, frame_w: u16, y: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = start_x + frame_w.saturating_sub(text_w) / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, y, text, style);
    }
}
