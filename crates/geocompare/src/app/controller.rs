//! Owner of the live `AppState`.

use super::command::{apply, command_for_key, Command, DragTarget, Outcome};
use super::frame::{render_frame, Frame};
use super::schedule::FrameScheduler;
use super::search::SearchBox;
use crate::geo::{MapId, Projector, WebMercator};
use crate::share::{self, EncodeError};
use crate::state::AppState;

/// Result of one `dispatch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub outcome: Outcome,
    /// True when the host should request a frame callback now.
    pub schedule_frame: bool,
}

pub struct Controller<P: Projector = WebMercator> {
    proj: P,
    state: AppState,
    scheduler: FrameScheduler,
    drag: Option<DragTarget>,
    search: [SearchBox; 2],
}

impl Default for Controller<WebMercator> {
    fn default() -> Self {
        Self::new(WebMercator, AppState::default())
    }
}

impl<P: Projector> Controller<P> {
    /// The first frame is already pending.
    pub fn new(proj: P, state: AppState) -> Self {
        let mut scheduler = FrameScheduler::default();
        scheduler.invalidate();
        Self {
            proj,
            state,
            scheduler,
            drag: None,
            search: Default::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[inline]
    pub fn projector(&self) -> &P {
        &self.proj
    }

    #[inline]
    pub fn drag(&self) -> Option<DragTarget> {
        self.drag
    }

    pub fn dispatch(&mut self, cmd: Command) -> Dispatch {
        let outcome = match cmd {
            Command::BeginDrag(target) => self.begin_drag(target),
            Command::EndDrag => match self.drag.take() {
                // the released element snaps back to the model's position
                Some(_) => Outcome::Changed,
                None => Outcome::Unchanged,
            },
            other => {
                let inserted_at = self.insert_position(&other);
                let outcome = apply(&mut self.state, &self.proj, other);
                if let (Outcome::Changed, Some(at)) = (outcome, inserted_at) {
                    self.shift_drag_after_insert(at);
                }
                outcome
            }
        };
        if outcome == Outcome::Changed && !self.drag_target_exists() {
            self.drag = None;
        }
        let schedule_frame = outcome == Outcome::Changed && self.scheduler.invalidate();
        Dispatch {
            outcome,
            schedule_frame,
        }
    }

    /// `None` for keys without a binding.
    pub fn handle_key(&mut self, key: &str) -> Option<Dispatch> {
        command_for_key(key).map(|cmd| self.dispatch(cmd))
    }

    /// Frame callback: a fresh frame if anything changed since the last one.
    pub fn poll_frame(&mut self) -> Option<Frame> {
        self.scheduler
            .begin_frame()
            .then(|| render_frame(&self.state, &self.proj, self.drag))
    }

    /// Frame for the current state, ignoring the dirty flag.
    pub fn frame(&self) -> Frame {
        render_frame(&self.state, &self.proj, self.drag)
    }

    pub fn share_link(&self) -> Result<String, EncodeError> {
        share::encode(&self.state)
    }

    /// Replace the state from a shared link. A rejected link is logged and
    /// leaves everything as it was.
    pub fn load_shared(&mut self, link: &str) -> Dispatch {
        match share::decode(link) {
            Ok(state) => {
                self.state = state;
                self.drag = None;
                tracing::debug!(has_shape = self.state.shape.is_some(), "loaded shared state");
                Dispatch {
                    outcome: Outcome::Changed,
                    schedule_frame: self.scheduler.invalidate(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring shared link");
                Dispatch {
                    outcome: Outcome::Rejected,
                    schedule_frame: false,
                }
            }
        }
    }

    pub fn search(&self, map: MapId) -> &SearchBox {
        &self.search[map.index()]
    }

    pub fn search_mut(&mut self, map: MapId) -> &mut SearchBox {
        &mut self.search[map.index()]
    }

    /// Recenter `map` on result `index` of its last search.
    pub fn select_place(&mut self, map: MapId, index: usize) -> Option<Dispatch> {
        let center = self.search[map.index()].place(index)?.coordinate;
        Some(self.dispatch(Command::Recenter { map, center }))
    }

    fn begin_drag(&mut self, target: DragTarget) -> Outcome {
        let prev = self.drag.replace(target);
        if !self.drag_target_exists() {
            self.drag = prev;
            return Outcome::Rejected;
        }
        if prev == Some(target) {
            Outcome::Unchanged
        } else {
            Outcome::Changed
        }
    }

    /// Index an explicitly positioned `AddPoint` lands at.
    fn insert_position(&self, cmd: &Command) -> Option<usize> {
        match (cmd, &self.state.shape) {
            (Command::AddPoint { index: Some(k), .. }, Some(shape)) => Some((*k).min(shape.len())),
            _ => None,
        }
    }

    /// Keep a vertex drag on the same vertex after an insert at `at`.
    fn shift_drag_after_insert(&mut self, at: usize) {
        if let Some(DragTarget::Vertex { index, .. }) = &mut self.drag {
            if at <= *index {
                *index += 1;
            }
        }
    }

    fn drag_target_exists(&self) -> bool {
        match (self.drag, &self.state.shape) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(DragTarget::Vertex { index, .. }), Some(shape)) => index < shape.len(),
            (Some(DragTarget::Overlay | DragTarget::RotationHandle), Some(_)) => true,
        }
    }
}
