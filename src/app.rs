use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use story_shuffle::game::{Action, DragEvent, DragSurface, Effect, GameState, Scheduler, Zone};
use tracing::{debug, info};

use crate::ui::cursor::{Cursor, Focus};
use crate::ui::layout::{BoardLayout, HitTarget};

const SCROLL_STEP: u16 = 3;

pub enum Screen {
    TitleScreen,
    Playing,
}

pub enum MenuOption {
    Start,
    Quit,
}

impl MenuOption {
    fn next(&self) -> Self {
        match self {
            MenuOption::Start => MenuOption::Quit,
            MenuOption::Quit => MenuOption::Start,
        }
    }
}

pub struct App {
    pub game: GameState,
    pub drag: DragSurface,
    pub scheduler: Scheduler,
    pub cursor: Cursor,
    pub layout: Option<BoardLayout>,
    pub scroll: u16,
    /// Line to bring on screen at the next draw.
    pub reveal: Option<usize>,
    pub hover: Option<Zone>,
    pub screen: Screen,
    pub menu_selection: MenuOption,
    pub status: String,
    pub command_mode: bool,
    pub command_buffer: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(game: GameState) -> Self {
        App {
            game,
            drag: DragSurface::new(),
            scheduler: Scheduler::new(),
            cursor: Cursor::default(),
            layout: None,
            scroll: 0,
            reveal: None,
            hover: None,
            screen: Screen::TitleScreen,
            menu_selection: MenuOption::Start,
            status: String::new(),
            command_mode: false,
            command_buffer: String::new(),
            should_quit: false,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.dispatch_at(action, Instant::now());
    }

    fn dispatch_at(&mut self, action: Action, now: Instant) {
        if let Some(Effect::ScheduleCelebrationEnd { token, after }) = self.game.apply(action) {
            debug!(?token, ?after, "celebration scheduled");
            self.scheduler.schedule(token, now, after);
        }
        self.cursor.clamp(&self.game);
    }

    /// Feeds elapsed timers back into the game.
    pub fn tick(&mut self, now: Instant) {
        for token in self.scheduler.take_due(now) {
            self.game.apply(Action::CelebrationElapsed { token });
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(token) = self.game.celebration_token() {
            self.scheduler.cancel(token);
        }
        let (solved, total) = self.game.progress();
        info!(solved, total, "session ended");
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::TitleScreen => {
                match key.code {
                    KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                        self.menu_selection = self.menu_selection.next();
                    }
                    KeyCode::Enter => match self.menu_selection {
                        MenuOption::Start => self.screen = Screen::Playing,
                        MenuOption::Quit => self.should_quit = true,
                    },
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                }
                return;
            }
            Screen::Playing => {}
        }

        // Command mode handling (vim-style :q)
        if self.command_mode {
            match key.code {
                KeyCode::Esc => {
                    self.command_mode = false;
                    self.command_buffer.clear();
                }
                KeyCode::Enter => {
                    self.run_command();
                    self.command_mode = false;
                    self.command_buffer.clear();
                }
                KeyCode::Backspace => {
                    self.command_buffer.pop();
                    if self.command_buffer.is_empty() {
                        self.command_mode = false;
                    }
                }
                KeyCode::Char(c) => self.command_buffer.push(c),
                _ => {}
            }
            return;
        }

        let line = self.cursor.line;
        match (key.code, key.modifiers) {
            (KeyCode::Char(':'), _) => {
                self.command_mode = true;
                self.command_buffer.clear();
            }
            (KeyCode::Esc, _) => {
                if self.game.notice().is_some() {
                    self.dispatch(Action::DismissNotice);
                } else {
                    self.status = "Type :q to quit".to_string();
                }
            }
            (KeyCode::Up, _) => {
                self.cursor.up(&self.game);
                self.reveal = Some(self.cursor.line);
            }
            (KeyCode::Down, _) => {
                self.cursor.down(&self.game);
                self.reveal = Some(self.cursor.line);
            }
            (KeyCode::Left, _) => self.cursor.left(),
            (KeyCode::Right, _) => self.cursor.right(&self.game),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => self.cursor.toggle_focus(&self.game),
            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => {
                if self.cursor.focus == Focus::Pool {
                    if let Some(token) = self.cursor.selected(&self.game) {
                        self.dispatch(Action::PlaceWord { token, line });
                    }
                }
            }
            (KeyCode::Char('<'), _) => self.shift_selected(-1),
            (KeyCode::Char('>'), _) => self.shift_selected(1),
            (KeyCode::Backspace, _) | (KeyCode::Delete, _) => {
                if self.cursor.focus == Focus::Arrangement {
                    let index = self.cursor.index;
                    self.dispatch(Action::RemoveWord { line, index });
                }
            }
            (KeyCode::Char('c'), KeyModifiers::NONE) => self.dispatch(Action::CheckLine { line }),
            (KeyCode::Char('r'), KeyModifiers::NONE) => self.dispatch(Action::ResetLine { line }),
            (KeyCode::PageDown, _) => self.scroll = self.scroll.saturating_add(SCROLL_STEP),
            (KeyCode::PageUp, _) => self.scroll = self.scroll.saturating_sub(SCROLL_STEP),
            _ => {}
        }
    }

    fn shift_selected(&mut self, delta: isize) {
        if self.cursor.focus != Focus::Arrangement {
            return;
        }
        let line = self.cursor.line;
        let from = self.cursor.index;
        let Some(to) = from.checked_add_signed(delta) else {
            return;
        };
        if to >= self.game.arrangement(line).len() {
            return;
        }
        self.dispatch(Action::ReorderWithinLine { line, from, to });
        self.cursor.index = to;
    }

    fn run_command(&mut self) {
        match self.command_buffer.as_str() {
            "q" | "quit" => self.should_quit = true,
            "help" => {
                self.status =
                    "Commands: :q (quit). Keys: c check, r reset, Tab pool/line, </> move word"
                        .to_string();
            }
            "" => {}
            other => self.status = format!("Unknown command: {}", other),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(self.screen, Screen::Playing) {
            return;
        }
        let hit = self
            .layout
            .as_ref()
            .and_then(|layout| layout.hit(mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match hit {
                Some(HitTarget::CloseNotice) => self.dispatch(Action::DismissNotice),
                Some(HitTarget::Check(line)) => self.dispatch(Action::CheckLine { line }),
                Some(HitTarget::Reset(line)) => self.dispatch(Action::ResetLine { line }),
                Some(HitTarget::Chip { zone, index }) => {
                    self.cursor.select(zone, index);
                    if let Some(&token) = self.game.zone(zone).get(index) {
                        self.drag.handle(
                            &self.game,
                            DragEvent::Begin {
                                token,
                                origin: zone,
                                index,
                            },
                        );
                    }
                }
                _ => {}
            },
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.drag.is_dragging() {
                    return;
                }
                self.hover = match hit {
                    Some(HitTarget::Chip { zone, .. }) | Some(HitTarget::Zone(zone)) => Some(zone),
                    _ => None,
                };
                if let Some(HitTarget::Chip {
                    zone: Zone::Arrangement(line),
                    index,
                }) = hit
                {
                    if let Some(action) = self.drag.handle(&self.game, DragEvent::Hover { line, index }) {
                        self.dispatch(action);
                        self.cursor.select(Zone::Arrangement(line), index);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.hover = None;
                if !self.drag.is_dragging() {
                    return;
                }
                let event = match hit {
                    Some(HitTarget::Chip {
                        zone: Zone::Arrangement(line),
                        ..
                    })
                    | Some(HitTarget::Zone(Zone::Arrangement(line))) => DragEvent::Drop { line },
                    Some(HitTarget::Chip {
                        zone: Zone::Pool(line),
                        ..
                    })
                    | Some(HitTarget::Zone(Zone::Pool(line))) => DragEvent::DropOnPool { line },
                    _ => DragEvent::Cancel,
                };
                if let Some(action) = self.drag.handle(&self.game, event) {
                    self.dispatch(action);
                }
            }
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(SCROLL_STEP),
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(SCROLL_STEP),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::layout::Rect;
    use std::time::Duration;
    use story_shuffle::puzzle::Story;

    fn playing_app() -> App {
        let story = Story::new("t", [vec!["A", "B"]]);
        let game = GameState::new(story, &mut StdRng::seed_from_u64(8))
            .with_celebration_duration(Duration::from_secs(5));
        let mut app = App::new(game);
        app.screen = Screen::Playing;
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn solve_line_zero(app: &mut App, now: Instant) {
        for position in 0..2 {
            let token = story_shuffle::game::TokenId { line: 0, position };
            app.dispatch_at(Action::PlaceWord { token, line: 0 }, now);
        }
        app.dispatch_at(Action::CheckLine { line: 0 }, now);
    }

    #[test]
    fn celebration_clears_after_delay_despite_input() {
        let start = Instant::now();
        let mut app = playing_app();
        solve_line_zero(&mut app, start);
        assert!(app.game.is_celebrating());

        app.dispatch_at(Action::ResetLine { line: 0 }, start + Duration::from_secs(1));
        app.tick(start + Duration::from_secs(4));
        assert!(app.game.is_celebrating());

        app.tick(start + Duration::from_secs(5));
        assert!(!app.game.is_celebrating());
        assert!(app.scheduler.is_empty());
    }

    #[test]
    fn shutdown_cancels_pending_celebration() {
        let start = Instant::now();
        let mut app = playing_app();
        solve_line_zero(&mut app, start);
        app.shutdown();
        assert!(app.scheduler.is_empty());
    }

    #[test]
    fn keyboard_places_checks_and_dismisses() {
        let mut app = playing_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.game.arrangement(0).len(), 2);

        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.game.notice().is_some());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.game.notice().is_none());
    }

    #[test]
    fn keyboard_moves_and_removes_arranged_words() {
        let mut app = playing_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        let order = app.game.arrangement(0).to_vec();

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('>')));
        assert_eq!(app.game.arrangement(0), [order[1], order[0]]);
        assert_eq!(app.cursor.index, 1);

        app.handle_key(key(KeyCode::Delete));
        assert_eq!(app.game.arrangement(0), [order[1]]);
        assert_eq!(app.game.pool(0), [order[0]]);
    }

    #[test]
    fn quit_command() {
        let mut app = playing_app();
        for c in [':', 'q'] {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn mouse_drag_from_pool_into_line() {
        let mut app = playing_app();
        let viewport = Rect::new(0, 0, 40, 20);
        app.layout = Some(BoardLayout::compute(&app.game, viewport, 0));
        let token = app.game.pool(0)[0];

        // Pool row is y=1, arrangement box spans y=2..5.
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 3));
        assert_eq!(app.hover, Some(Zone::Arrangement(0)));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, 3));

        assert_eq!(app.game.arrangement(0), [token]);
        assert!(!app.drag.is_dragging());
        assert_eq!(app.hover, None);
    }

    #[test]
    fn mouse_release_outside_board_cancels() {
        let mut app = playing_app();
        app.layout = Some(BoardLayout::compute(&app.game, Rect::new(0, 0, 40, 20), 0));
        let before = app.game.clone();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 60, 30));
        assert_eq!(app.game, before);
        assert!(!app.drag.is_dragging());
    }
}
