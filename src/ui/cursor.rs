use story_shuffle::game::{GameState, TokenId, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Pool,
    Arrangement,
}

/// Keyboard selection on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub line: usize,
    pub focus: Focus,
    pub index: usize,
}

impl Cursor {
    pub fn zone(&self) -> Zone {
        match self.focus {
            Focus::Pool => Zone::Pool(self.line),
            Focus::Arrangement => Zone::Arrangement(self.line),
        }
    }

    pub fn selected(&self, game: &GameState) -> Option<TokenId> {
        game.zone(self.zone()).get(self.index).copied()
    }

    pub fn up(&mut self, game: &GameState) {
        self.line = self.line.saturating_sub(1);
        self.clamp(game);
    }

    pub fn down(&mut self, game: &GameState) {
        if self.line + 1 < game.line_count() {
            self.line += 1;
        }
        self.clamp(game);
    }

    pub fn left(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn right(&mut self, game: &GameState) {
        self.index += 1;
        self.clamp(game);
    }

    pub fn toggle_focus(&mut self, game: &GameState) {
        self.focus = match self.focus {
            Focus::Pool => Focus::Arrangement,
            Focus::Arrangement => Focus::Pool,
        };
        self.clamp(game);
    }

    pub fn select(&mut self, zone: Zone, index: usize) {
        let (line, focus) = match zone {
            Zone::Pool(line) => (line, Focus::Pool),
            Zone::Arrangement(line) => (line, Focus::Arrangement),
        };
        *self = Cursor { line, focus, index };
    }

    pub fn clamp(&mut self, game: &GameState) {
        self.line = self.line.min(game.line_count().saturating_sub(1));
        let len = game.zone(self.zone()).len();
        self.index = self.index.min(len.saturating_sub(1));
    }
}
