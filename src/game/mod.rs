pub mod drag;
pub mod state;
pub mod timer;

pub use drag::{DragEvent, DragPayload, DragSurface};
pub use state::{Action, Effect, GameState, Notice, NoticeKind, TokenId, Zone, CELEBRATION_DURATION};
pub use timer::{Scheduler, TimerToken};
