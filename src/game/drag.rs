//! Gesture routing between the pointer layer and [`GameState`].
//!
//! The surface only remembers what is being dragged and from where. Every
//! request it emits is an [`Action`]; the rules live in the reducer.

use tracing::trace;

use super::state::{Action, GameState, TokenId, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPayload {
    pub token: TokenId,
    pub origin: Zone,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Press on a word at `origin[index]`.
    Begin {
        token: TokenId,
        origin: Zone,
        index: usize,
    },
    /// Pointer moved over the placed word at `index` of `line`'s arrangement.
    Hover { line: usize, index: usize },
    /// Released over `line`'s arrangement.
    Drop { line: usize },
    /// Released over `line`'s pool.
    DropOnPool { line: usize },
    /// Released anywhere else.
    Cancel,
}

#[derive(Debug, Default)]
pub struct DragSurface {
    payload: Option<DragPayload>,
}

impl DragSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.payload.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.payload.is_some()
    }

    pub fn handle(&mut self, state: &GameState, event: DragEvent) -> Option<Action> {
        match event {
            DragEvent::Begin {
                token,
                origin,
                index,
            } => {
                if state.zone(origin).get(index) == Some(&token) {
                    trace!(?token, ?origin, index, "drag started");
                    self.payload = Some(DragPayload {
                        token,
                        origin,
                        index,
                    });
                } else {
                    self.payload = None;
                }
                None
            }
            DragEvent::Hover { line, index } => {
                let payload = self.payload.as_mut()?;
                if payload.origin != Zone::Arrangement(line) || payload.index == index {
                    return None;
                }
                let arrangement = state.arrangement(line);
                if index >= arrangement.len() || arrangement.get(payload.index) != Some(&payload.token)
                {
                    return None;
                }
                let from = payload.index;
                payload.index = index;
                Some(Action::ReorderWithinLine {
                    line,
                    from,
                    to: index,
                })
            }
            DragEvent::Drop { line } => {
                let payload = self.payload.take()?;
                if payload.origin.line() != line {
                    trace!(?payload, line, "drop on another line rejected");
                    return None;
                }
                match payload.origin {
                    Zone::Pool(_) if state.pool(line).contains(&payload.token) => {
                        Some(Action::PlaceWord {
                            token: payload.token,
                            line,
                        })
                    }
                    // Reordering already happened while hovering.
                    Zone::Arrangement(_) => None,
                    Zone::Pool(_) => {
                        trace!(?payload, "stale drop rejected");
                        None
                    }
                }
            }
            DragEvent::DropOnPool { line } => {
                let payload = self.payload.take()?;
                if payload.origin.line() != line {
                    return None;
                }
                match payload.origin {
                    Zone::Arrangement(_)
                        if state.arrangement(line).get(payload.index) == Some(&payload.token) =>
                    {
                        Some(Action::RemoveWord {
                            line,
                            index: payload.index,
                        })
                    }
                    _ => None,
                }
            }
            DragEvent::Cancel => {
                self.payload = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Story;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        let story = Story::new("t", [vec!["A", "B", "C"], vec!["x", "y"]]);
        GameState::new(story, &mut StdRng::seed_from_u64(11))
    }

    fn begin_from_pool(surface: &mut DragSurface, state: &GameState, line: usize, index: usize) {
        let token = state.pool(line)[index];
        surface.handle(
            state,
            DragEvent::Begin {
                token,
                origin: Zone::Pool(line),
                index,
            },
        );
    }

    fn drag_into_line(surface: &mut DragSurface, state: &mut GameState, line: usize) {
        begin_from_pool(surface, state, line, 0);
        let action = surface.handle(state, DragEvent::Drop { line }).unwrap();
        state.apply(action);
    }

    #[test]
    fn pool_to_own_line_places_word() {
        let mut state = state();
        let mut surface = DragSurface::new();
        let token = state.pool(0)[1];
        begin_from_pool(&mut surface, &state, 0, 1);

        let action = surface.handle(&state, DragEvent::Drop { line: 0 });
        assert_eq!(action, Some(Action::PlaceWord { token, line: 0 }));
        assert!(!surface.is_dragging());

        state.apply(action.unwrap());
        assert_eq!(state.arrangement(0), [token]);
    }

    #[test]
    fn begin_with_mismatched_token_is_ignored() {
        let state = state();
        let mut surface = DragSurface::new();
        let wrong = state.pool(0)[0];
        surface.handle(
            &state,
            DragEvent::Begin {
                token: wrong,
                origin: Zone::Pool(0),
                index: 2,
            },
        );
        assert!(!surface.is_dragging());
    }

    #[test]
    fn cross_line_drop_is_rejected() {
        let state = state();
        let mut surface = DragSurface::new();
        begin_from_pool(&mut surface, &state, 1, 0);
        assert_eq!(surface.handle(&state, DragEvent::Drop { line: 0 }), None);
        assert!(!surface.is_dragging());
    }

    #[test]
    fn arranged_word_released_over_other_pool_stays() {
        let mut state = state();
        let mut surface = DragSurface::new();
        drag_into_line(&mut surface, &mut state, 0);
        let token = state.arrangement(0)[0];

        surface.handle(
            &state,
            DragEvent::Begin {
                token,
                origin: Zone::Arrangement(0),
                index: 0,
            },
        );
        assert_eq!(surface.handle(&state, DragEvent::DropOnPool { line: 1 }), None);
        assert!(!surface.is_dragging());
        assert_eq!(state.arrangement(0), [token]);
    }

    #[test]
    fn hover_reorders_live_and_drop_adds_nothing() {
        let mut state = state();
        let mut surface = DragSurface::new();
        for _ in 0..3 {
            drag_into_line(&mut surface, &mut state, 0);
        }
        let order = state.arrangement(0).to_vec();

        surface.handle(
            &state,
            DragEvent::Begin {
                token: order[0],
                origin: Zone::Arrangement(0),
                index: 0,
            },
        );
        let action = surface.handle(&state, DragEvent::Hover { line: 0, index: 2 });
        assert_eq!(
            action,
            Some(Action::ReorderWithinLine {
                line: 0,
                from: 0,
                to: 2
            })
        );
        state.apply(action.unwrap());
        assert_eq!(surface.payload().unwrap().index, 2);

        // Hovering over itself after the move does nothing.
        assert_eq!(
            surface.handle(&state, DragEvent::Hover { line: 0, index: 2 }),
            None
        );
        assert_eq!(surface.handle(&state, DragEvent::Drop { line: 0 }), None);
        assert_eq!(state.arrangement(0), [order[1], order[2], order[0]]);
    }

    #[test]
    fn hover_over_other_line_is_noop() {
        let mut state = state();
        let mut surface = DragSurface::new();
        drag_into_line(&mut surface, &mut state, 0);
        drag_into_line(&mut surface, &mut state, 1);
        drag_into_line(&mut surface, &mut state, 1);

        let token = state.arrangement(0)[0];
        surface.handle(
            &state,
            DragEvent::Begin {
                token,
                origin: Zone::Arrangement(0),
                index: 0,
            },
        );
        assert_eq!(
            surface.handle(&state, DragEvent::Hover { line: 1, index: 1 }),
            None
        );
    }

    #[test]
    fn drop_on_pool_removes_word() {
        let mut state = state();
        let mut surface = DragSurface::new();
        drag_into_line(&mut surface, &mut state, 1);
        let token = state.arrangement(1)[0];

        surface.handle(
            &state,
            DragEvent::Begin {
                token,
                origin: Zone::Arrangement(1),
                index: 0,
            },
        );
        let action = surface.handle(&state, DragEvent::DropOnPool { line: 1 });
        assert_eq!(action, Some(Action::RemoveWord { line: 1, index: 0 }));
    }

    #[test]
    fn stale_payload_drop_changes_nothing() {
        let mut state = state();
        let mut surface = DragSurface::new();
        let token = state.pool(0)[0];
        begin_from_pool(&mut surface, &state, 0, 0);

        // The word is placed through another route while the drag is in flight.
        state.apply(Action::PlaceWord { token, line: 0 });
        state.apply(Action::RemoveWord { line: 0, index: 0 });
        state.apply(Action::PlaceWord { token, line: 0 });
        let before = state.clone();

        assert_eq!(surface.handle(&state, DragEvent::Drop { line: 0 }), None);
        assert_eq!(state, before);
    }

    #[test]
    fn cancel_clears_payload() {
        let state = state();
        let mut surface = DragSurface::new();
        begin_from_pool(&mut surface, &state, 0, 0);
        assert!(surface.is_dragging());
        surface.handle(&state, DragEvent::Cancel);
        assert!(!surface.is_dragging());
    }
}
