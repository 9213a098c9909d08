//! Discrete user commands and the single reducer that applies them.

use crate::geo::{LatLng, MapId, Projector};
use crate::measure::{Mode, Units};
use crate::shape::{rotation_from_handle, Removal, Shape};
use crate::state::{AppState, Layer};

/// Element whose on-screen position the user currently owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    Vertex { map: MapId, index: usize },
    Overlay,
    RotationHandle,
}

/// Everything the UI can ask of the model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Click on `map`. Creates the shape when none exists; `index` inserts
    /// before that vertex instead of appending.
    AddPoint {
        map: MapId,
        at: LatLng,
        index: Option<usize>,
    },
    UpdatePoint {
        map: MapId,
        index: usize,
        at: LatLng,
    },
    RemoveLastPoint,
    Clear,
    MoveOverlay(LatLng),
    RotateOverlay(f64),
    /// Rotation handle dragged to `at` on the comparison map.
    PointRotationHandle(LatLng),
    SetView {
        map: MapId,
        center: LatLng,
        zoom: f64,
    },
    Recenter {
        map: MapId,
        center: LatLng,
    },
    SetMode(Mode),
    SetUnits(Units),
    SetLayer(Layer),
    SetVertexNumbers(bool),
    SetBoundingBox(bool),
    BeginDrag(DragTarget),
    EndDrag,
}

/// What a command did to the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    Rejected,
}

/// Keyboard shortcuts.
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "Backspace" | "Delete" => Some(Command::RemoveLastPoint),
        "Escape" => Some(Command::Clear),
        _ => None,
    }
}

/// Apply `cmd` to `state`. Drag bookkeeping lives in the controller, so
/// `BeginDrag`/`EndDrag` leave the state as is.
pub fn apply<P: Projector>(state: &mut AppState, proj: &P, cmd: Command) -> Outcome {
    match cmd {
        Command::AddPoint { map, at, index } => match state.shape.as_mut() {
            None => {
                if !at.is_finite() {
                    return Outcome::Rejected;
                }
                let comparison_anchor = state.viewport(map.other()).center();
                state.shape = Some(Shape::create(at, map, comparison_anchor));
                Outcome::Changed
            }
            Some(shape) => result_outcome(shape.add_point(proj, map, at, index).map(|_| ())),
        },
        Command::UpdatePoint { map, index, at } => match state.shape.as_mut() {
            None => Outcome::Unchanged,
            Some(shape) => result_outcome(shape.update_point(proj, map, index, at)),
        },
        Command::RemoveLastPoint => match state.shape.as_mut() {
            None => Outcome::Unchanged,
            Some(shape) => {
                if shape.remove_last_point(proj) == Removal::LastPoint {
                    state.shape = None;
                }
                Outcome::Changed
            }
        },
        Command::Clear => match state.shape.take() {
            None => Outcome::Unchanged,
            Some(_) => Outcome::Changed,
        },
        Command::MoveOverlay(at) => match state.shape.as_mut() {
            None => Outcome::Unchanged,
            Some(shape) => result_outcome(shape.set_overlay_position(at)),
        },
        Command::RotateOverlay(radians) => match state.shape.as_mut() {
            None => Outcome::Unchanged,
            Some(shape) => result_outcome(shape.set_overlay_rotation(radians)),
        },
        Command::PointRotationHandle(at) => {
            let Some(shape) = state.shape.as_mut() else {
                return Outcome::Unchanged;
            };
            let viewport = state.viewports[shape.comparison_map().index()];
            match rotation_from_handle(proj, &viewport, shape.comparison_anchor(), at) {
                Some(theta) => result_outcome(shape.set_overlay_rotation(theta)),
                None => Outcome::Unchanged,
            }
        }
        Command::SetView { map, center, zoom } => {
            if !center.is_finite() || !zoom.is_finite() {
                return Outcome::Rejected;
            }
            let vp = state.viewport_mut(map);
            if vp.center == center && vp.zoom == zoom {
                return Outcome::Unchanged;
            }
            vp.set_view(center, zoom);
            Outcome::Changed
        }
        Command::Recenter { map, center } => {
            let zoom = state.viewport(map).zoom();
            apply(state, proj, Command::SetView { map, center, zoom })
        }
        Command::SetMode(mode) => set_if_changed(&mut state.settings.mode, mode),
        Command::SetUnits(units) => set_if_changed(&mut state.settings.units, units),
        Command::SetLayer(layer) => set_if_changed(&mut state.settings.layer, layer),
        Command::SetVertexNumbers(on) => {
            set_if_changed(&mut state.settings.show_vertex_numbers, on)
        }
        Command::SetBoundingBox(on) => set_if_changed(&mut state.settings.show_bbox, on),
        Command::BeginDrag(_) | Command::EndDrag => Outcome::Unchanged,
    }
}

fn set_if_changed<T: PartialEq>(slot: &mut T, value: T) -> Outcome {
    if *slot == value {
        return Outcome::Unchanged;
    }
    *slot = value;
    Outcome::Changed
}

fn result_outcome<E: std::fmt::Display>(r: Result<(), E>) -> Outcome {
    match r {
        Ok(()) => Outcome::Changed,
        Err(e) => {
            tracing::debug!(error = %e, "command rejected");
            Outcome::Rejected
        }
    }
}
