//! Everything one redraw needs, derived from the latest state.
//!
//! The frame is rebuilt from scratch on every tick. The one exception to
//! "model wins" is the element being dragged: its handle carries no position,
//! so the view keeps whatever the pointer put on screen.

use super::command::DragTarget;
use crate::geo::{GeoBounds, LatLng, MapId, Projector};
use crate::measure::{self, format_percent, percent_difference};
use crate::state::AppState;

/// Draggable vertex marker.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexHandle {
    pub index: usize,
    /// `None` while the user drags this handle.
    pub position: Option<LatLng>,
    /// 1-based number when vertex numbers are enabled.
    pub label: Option<String>,
}

/// Render data for one viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct MapFrame {
    pub map: MapId,
    pub is_origin: bool,
    pub outline: Vec<LatLng>,
    pub closed: bool,
    pub vertices: Vec<VertexHandle>,
    /// Midpoint markers `(insert index, position)`, origin map only.
    pub insert_handles: Vec<(usize, LatLng)>,
    pub overlay_handle: Option<LatLng>,
    pub rotation_handle: Option<LatLng>,
    pub bbox: Option<GeoBounds>,
    pub value: f64,
    pub label: String,
    /// False when the area label is outside the planar approximation's range.
    pub planar_valid: bool,
}

impl MapFrame {
    fn empty(map: MapId) -> Self {
        Self {
            map,
            is_origin: false,
            outline: Vec::new(),
            closed: false,
            vertices: Vec::new(),
            insert_handles: Vec::new(),
            overlay_handle: None,
            rotation_handle: None,
            bbox: None,
            value: 0.0,
            label: "---".to_string(),
            planar_valid: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub maps: [MapFrame; 2],
    /// Comparison value relative to the origin value.
    pub difference: String,
}

impl Frame {
    #[inline]
    pub fn map(&self, map: MapId) -> &MapFrame {
        &self.maps[map.index()]
    }
}

pub fn render_frame<P: Projector>(
    state: &AppState,
    proj: &P,
    drag: Option<DragTarget>,
) -> Frame {
    let maps = MapId::ALL.map(|map| render_map(state, proj, drag, map));
    let difference = match &state.shape {
        None => format_percent(None),
        Some(shape) => {
            let origin = maps[shape.origin_map().index()].value;
            let comparison = maps[shape.comparison_map().index()].value;
            format_percent(percent_difference(origin, comparison))
        }
    };
    Frame { maps, difference }
}

fn render_map<P: Projector>(
    state: &AppState,
    proj: &P,
    drag: Option<DragTarget>,
    map: MapId,
) -> MapFrame {
    let Some(shape) = &state.shape else {
        return MapFrame::empty(map);
    };
    let settings = &state.settings;
    let viewport = state.viewport(map);
    let is_origin = map == shape.origin_map();
    let closed = settings.mode.is_closed();
    let outline = shape.render_points(proj, viewport, map);

    let vertices = outline
        .iter()
        .enumerate()
        .map(|(index, p)| VertexHandle {
            index,
            position: if drag == Some(DragTarget::Vertex { map, index }) {
                None
            } else {
                Some(*p)
            },
            label: settings
                .show_vertex_numbers
                .then(|| (index + 1).to_string()),
        })
        .collect();

    let (insert_handles, overlay_handle, rotation_handle) = if is_origin {
        (shape.insertion_handles(proj, viewport, closed), None, None)
    } else {
        let overlay = (drag != Some(DragTarget::Overlay)).then(|| shape.comparison_anchor());
        let rotation = (drag != Some(DragTarget::RotationHandle))
            .then(|| shape.rotation_handle(proj, viewport));
        (Vec::new(), overlay, rotation)
    };

    let value = measure::value(settings.mode, &outline);
    MapFrame {
        map,
        is_origin,
        closed,
        vertices,
        insert_handles,
        overlay_handle,
        rotation_handle,
        bbox: if settings.show_bbox {
            GeoBounds::from_points(&outline)
        } else {
            None
        },
        value,
        label: measure::format(value, settings.mode, settings.units),
        planar_valid: !closed || measure::is_planar_valid(&outline),
        outline,
    }
}
