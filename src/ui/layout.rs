//! Board geometry. Rects are laid out in board space (y counted from the top
//! of the first line group) and mapped to the screen through the scroll offset.

use ratatui::layout::Rect;
use ratatui::text::Span;
use story_shuffle::game::{GameState, TokenId, Zone};

const CHIP_GAP: u16 = 1;
pub const CHECK_LABEL: &str = "[Check]";
pub const RESET_LABEL: &str = "[Reset]";
pub const CLOSE_LABEL: &str = " × ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Chip { zone: Zone, index: usize },
    Zone(Zone),
    Check(usize),
    Reset(usize),
    CloseNotice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipRect {
    pub zone: Zone,
    pub index: usize,
    pub token: TokenId,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct LineLayout {
    pub line: usize,
    pub header: Rect,
    pub check: Rect,
    pub reset: Rect,
    pub pool: Rect,
    pub arrangement: Rect,
    pub chips: Vec<ChipRect>,
    pub bottom: u16,
}

#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub viewport: Rect,
    pub scroll: u16,
    pub content_height: u16,
    pub lines: Vec<LineLayout>,
    pub notice_close: Option<Rect>,
    /// Screen rects drawn over the board; clicks inside them never reach it.
    pub overlays: Vec<Rect>,
}

pub fn chip_width(word: &str) -> u16 {
    (Span::raw(word).width() as u16).saturating_add(2)
}

/// Flows chips left to right, wrapping at `width`. Returns `(x, row, width)`
/// per chip and the number of rows used (at least one).
fn flow(widths: &[u16], width: u16) -> (Vec<(u16, u16, u16)>, u16) {
    let width = width.max(1);
    let mut placed = Vec::with_capacity(widths.len());
    let (mut x, mut row) = (0u16, 0u16);
    for &w in widths {
        let w = w.min(width);
        if x > 0 && x.saturating_add(w) > width {
            x = 0;
            row += 1;
        }
        placed.push((x, row, w));
        x = x.saturating_add(w + CHIP_GAP);
    }
    (placed, row + 1)
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

impl BoardLayout {
    pub fn compute(game: &GameState, viewport: Rect, scroll: u16) -> Self {
        let width = viewport.width;
        let left = viewport.x;
        let label = CHECK_LABEL.len() as u16;
        let mut y = 0u16;
        let mut lines = Vec::with_capacity(game.line_count());

        for line in 0..game.line_count() {
            let header = Rect::new(left, y, width, 1);
            let reset_x = left + width.saturating_sub(label);
            let reset = Rect::new(reset_x, y, label.min(width), 1);
            let check = Rect::new(reset_x.saturating_sub(label + 1).max(left), y, label.min(width), 1);
            y = y.saturating_add(1);

            let mut chips = Vec::new();

            let pool_tokens = game.pool(line);
            let widths: Vec<u16> = pool_tokens.iter().map(|t| chip_width(game.word(*t))).collect();
            let (placed, rows) = flow(&widths, width);
            for (index, (token, (x, row, w))) in pool_tokens.iter().zip(placed).enumerate() {
                chips.push(ChipRect {
                    zone: Zone::Pool(line),
                    index,
                    token: *token,
                    rect: Rect::new(left + x, y + row, w, 1),
                });
            }
            let pool = Rect::new(left, y, width, rows);
            y = y.saturating_add(rows);

            let arranged = game.arrangement(line);
            let widths: Vec<u16> = arranged.iter().map(|t| chip_width(game.word(*t))).collect();
            let (placed, rows) = flow(&widths, width.saturating_sub(2));
            for (index, (token, (x, row, w))) in arranged.iter().zip(placed).enumerate() {
                chips.push(ChipRect {
                    zone: Zone::Arrangement(line),
                    index,
                    token: *token,
                    rect: Rect::new(left + 1 + x, y + 1 + row, w, 1),
                });
            }
            let arrangement = Rect::new(left, y, width, rows + 2);
            y = y.saturating_add(rows + 2);

            lines.push(LineLayout {
                line,
                header,
                check,
                reset,
                pool,
                arrangement,
                chips,
                bottom: y,
            });
            y = y.saturating_add(1);
        }

        let mut layout = BoardLayout {
            viewport,
            scroll: 0,
            content_height: y,
            lines,
            notice_close: None,
            overlays: Vec::new(),
        };
        layout.scroll = scroll.min(layout.max_scroll());
        layout
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport.height)
    }

    /// Adjusts the scroll offset so that `line`'s group is on screen.
    pub fn reveal(&mut self, line: usize) {
        let Some(group) = self.lines.get(line) else {
            return;
        };
        let top = group.header.y;
        let bottom = group.bottom;
        if top < self.scroll {
            self.scroll = top;
        } else if bottom > self.scroll.saturating_add(self.viewport.height) {
            self.scroll = bottom.saturating_sub(self.viewport.height).min(top);
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Maps a board-space rect to the visible part of it on screen.
    pub fn to_screen(&self, rect: Rect) -> Option<Rect> {
        let view_top = self.scroll;
        let view_bottom = self.scroll.saturating_add(self.viewport.height);
        let top = rect.y.max(view_top);
        let bottom = rect.y.saturating_add(rect.height).min(view_bottom);
        if top >= bottom || rect.width == 0 {
            return None;
        }
        Some(Rect::new(
            rect.x,
            self.viewport.y + (top - view_top),
            rect.width,
            bottom - top,
        ))
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        if let Some(close) = self.notice_close {
            if contains(close, column, row) {
                return Some(HitTarget::CloseNotice);
            }
        }
        if self.overlays.iter().any(|&rect| contains(rect, column, row)) {
            return None;
        }
        if !contains(self.viewport, column, row) {
            return None;
        }
        let y = row - self.viewport.y + self.scroll;

        for group in &self.lines {
            if y < group.header.y || y >= group.bottom {
                continue;
            }
            if let Some(chip) = group.chips.iter().find(|c| contains(c.rect, column, y)) {
                return Some(HitTarget::Chip {
                    zone: chip.zone,
                    index: chip.index,
                });
            }
            if contains(group.check, column, y) {
                return Some(HitTarget::Check(group.line));
            }
            if contains(group.reset, column, y) {
                return Some(HitTarget::Reset(group.line));
            }
            if contains(group.pool, column, y) {
                return Some(HitTarget::Zone(Zone::Pool(group.line)));
            }
            if contains(group.arrangement, column, y) {
                return Some(HitTarget::Zone(Zone::Arrangement(group.line)));
            }
        }
        None
    }
}

/// Popup area for the notice, anchored to the bottom of the board.
pub fn notice_area(board: Rect) -> Rect {
    let width = board.width.min(60);
    let height = 3.min(board.height);
    Rect::new(
        board.x + (board.width - width) / 2,
        board.y + board.height.saturating_sub(height + 1),
        width,
        height,
    )
}

pub fn close_button(popup: Rect) -> Rect {
    let width = CLOSE_LABEL.chars().count() as u16;
    Rect::new(
        popup.x + popup.width.saturating_sub(width + 1),
        popup.y,
        width.min(popup.width),
        1.min(popup.height),
    )
}

/// Banner area for the celebration, a third of the way down the board.
pub fn celebration_area(board: Rect) -> Rect {
    let width = board.width.min(44);
    let height = 7.min(board.height);
    Rect::new(
        board.x + (board.width - width) / 2,
        board.y + board.height.saturating_sub(height) / 3,
        width,
        height,
    )
}
