use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::timer::TimerToken;
use crate::puzzle::Story;

pub const CELEBRATION_DURATION: Duration = Duration::from_secs(5);

/// A word instance, identified by where it sits in the story rather than by
/// its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TokenId {
    pub line: usize,
    pub position: usize,
}

/// Where a token can live: the line's shuffled pool or its arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    Pool(usize),
    Arrangement(usize),
}

impl Zone {
    pub fn line(self) -> usize {
        match self {
            Zone::Pool(line) | Zone::Arrangement(line) => line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PlaceWord { token: TokenId, line: usize },
    ReorderWithinLine { line: usize, from: usize, to: usize },
    RemoveWord { line: usize, index: usize },
    CheckLine { line: usize },
    ResetLine { line: usize },
    DismissNotice,
    CelebrationElapsed { token: TimerToken },
}

/// Side effects the runtime has to carry out on behalf of the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleCelebrationEnd { token: TimerToken, after: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    LineCorrect,
    LineIncorrect,
    AllCorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub line: Option<usize>,
    pub message: String,
    pub visible: bool,
}

impl Notice {
    fn line_correct(line: usize) -> Self {
        Notice {
            kind: NoticeKind::LineCorrect,
            line: Some(line),
            message: format!("Line {} is correct!", line + 1),
            visible: true,
        }
    }

    fn line_incorrect(line: usize) -> Self {
        Notice {
            kind: NoticeKind::LineIncorrect,
            line: Some(line),
            message: format!("Sentence {} is incorrect. Try again!", line + 1),
            visible: true,
        }
    }

    fn all_correct() -> Self {
        Notice {
            kind: NoticeKind::AllCorrect,
            line: None,
            message: "Congratulations! All lines are correct!".to_string(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct LineState {
    pool: Vec<TokenId>,
    arrangement: Vec<TokenId>,
    solved: bool,
}

/// Everything that changes during a session. Mutated only through
/// [`GameState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    story: Story,
    lines: Vec<LineState>,
    notice: Option<Notice>,
    celebration: Option<TimerToken>,
    celebration_duration: Duration,
    next_timer: u64,
}

impl GameState {
    /// Deals every line's words into its pool in uniformly random order.
    pub fn new<R: Rng + ?Sized>(story: Story, rng: &mut R) -> Self {
        let lines = story
            .lines
            .iter()
            .enumerate()
            .map(|(line, story_line)| {
                let mut pool: Vec<TokenId> = (0..story_line.words.len())
                    .map(|position| TokenId { line, position })
                    .collect();
                pool.shuffle(rng);
                LineState {
                    pool,
                    arrangement: Vec::new(),
                    solved: false,
                }
            })
            .collect();

        info!(title = %story.meta.title, lines = story.line_count(), "session initialized");

        GameState {
            story,
            lines,
            notice: None,
            celebration: None,
            celebration_duration: CELEBRATION_DURATION,
            next_timer: 0,
        }
    }

    pub fn with_celebration_duration(mut self, duration: Duration) -> Self {
        self.celebration_duration = duration;
        self
    }

    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        debug!(?action, "apply");
        match action {
            Action::PlaceWord { token, line } => {
                self.place_word(token, line);
                None
            }
            Action::ReorderWithinLine { line, from, to } => {
                self.reorder_within_line(line, from, to);
                None
            }
            Action::RemoveWord { line, index } => {
                self.remove_word(line, index);
                None
            }
            Action::CheckLine { line } => self.check_line(line),
            Action::ResetLine { line } => {
                self.reset_line(line);
                None
            }
            Action::DismissNotice => {
                if let Some(notice) = self.notice.as_mut() {
                    notice.visible = false;
                }
                None
            }
            Action::CelebrationElapsed { token } => {
                if self.celebration == Some(token) {
                    debug!(?token, "celebration over");
                    self.celebration = None;
                }
                None
            }
        }
    }

    fn place_word(&mut self, token: TokenId, line: usize) {
        if token.line != line {
            debug!(?token, line, "cross-line placement ignored");
            return;
        }
        let Some(state) = self.lines.get_mut(line) else {
            return;
        };
        if let Some(i) = state.pool.iter().position(|t| *t == token) {
            state.pool.remove(i);
        } else if let Some(i) = state.arrangement.iter().position(|t| *t == token) {
            state.arrangement.remove(i);
        } else {
            debug!(?token, "placement of absent token ignored");
            return;
        }
        state.arrangement.push(token);
    }

    fn reorder_within_line(&mut self, line: usize, from: usize, to: usize) {
        let Some(state) = self.lines.get_mut(line) else {
            return;
        };
        let len = state.arrangement.len();
        if from == to || from >= len || to >= len {
            return;
        }
        let token = state.arrangement.remove(from);
        state.arrangement.insert(to, token);
    }

    fn remove_word(&mut self, line: usize, index: usize) {
        let Some(state) = self.lines.get_mut(line) else {
            return;
        };
        if index >= state.arrangement.len() {
            return;
        }
        let token = state.arrangement.remove(index);
        state.pool.push(token);
    }

    fn check_line(&mut self, line: usize) -> Option<Effect> {
        if line >= self.lines.len() {
            return None;
        }
        let was_all_solved = self.all_solved();

        if !self.arrangement_matches(line) {
            info!(line = line + 1, "line incorrect");
            self.notice = Some(Notice::line_incorrect(line));
            return None;
        }

        info!(line = line + 1, "line correct");
        self.lines[line].solved = true;
        self.notice = Some(Notice::line_correct(line));

        if was_all_solved || !self.all_solved() {
            return None;
        }

        let token = TimerToken(self.next_timer);
        self.next_timer += 1;
        self.celebration = Some(token);
        self.notice = Some(Notice::all_correct());
        info!(?token, "all lines correct");
        Some(Effect::ScheduleCelebrationEnd {
            token,
            after: self.celebration_duration,
        })
    }

    fn reset_line(&mut self, line: usize) {
        let Some(state) = self.lines.get_mut(line) else {
            return;
        };
        let returned = std::mem::take(&mut state.arrangement);
        state.pool.extend(returned);
    }

    /// Ordered text comparison of the arrangement against the story line.
    pub fn arrangement_matches(&self, line: usize) -> bool {
        let (Some(state), Some(expected)) = (self.lines.get(line), self.story.line(line)) else {
            return false;
        };
        state.arrangement.len() == expected.len()
            && state
                .arrangement
                .iter()
                .zip(expected)
                .all(|(token, word)| self.word(*token) == word.as_str())
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn word(&self, token: TokenId) -> &str {
        self.story.word(token.line, token.position).unwrap_or_default()
    }

    pub fn pool(&self, line: usize) -> &[TokenId] {
        self.lines.get(line).map_or(&[][..], |s| s.pool.as_slice())
    }

    pub fn arrangement(&self, line: usize) -> &[TokenId] {
        self.lines.get(line).map_or(&[][..], |s| s.arrangement.as_slice())
    }

    pub fn zone(&self, zone: Zone) -> &[TokenId] {
        match zone {
            Zone::Pool(line) => self.pool(line),
            Zone::Arrangement(line) => self.arrangement(line),
        }
    }

    pub fn is_solved(&self, line: usize) -> bool {
        self.lines.get(line).is_some_and(|s| s.solved)
    }

    pub fn all_solved(&self) -> bool {
        self.lines.iter().all(|s| s.solved)
    }

    /// `(solved, total)` line counts.
    pub fn progress(&self) -> (usize, usize) {
        let solved = self.lines.iter().filter(|s| s.solved).count();
        (solved, self.lines.len())
    }

    /// The current notice, if it has not been dismissed.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.visible)
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_some()
    }

    pub fn celebration_token(&self) -> Option<TimerToken> {
        self.celebration
    }
}
