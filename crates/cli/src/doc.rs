//! JSON documents read and written by the CLI.

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use geocompare::app::{Frame, MapFrame};
use geocompare::geo::{LatLng, MapId, Viewport};
use geocompare::measure::{Mode, Units};
use geocompare::shape::Shape;
use geocompare::state::{AppState, Layer, Settings};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeArg {
    Line,
    Area,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Line => Mode::Line,
            ModeArg::Area => Mode::Area,
        }
    }
}

impl From<Mode> for ModeArg {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Line => ModeArg::Line,
            Mode::Area => ModeArg::Area,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for Units {
    fn from(u: UnitsArg) -> Self {
        match u {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
        }
    }
}

impl From<Units> for UnitsArg {
    fn from(u: Units) -> Self {
        match u {
            Units::Metric => UnitsArg::Metric,
            Units::Imperial => UnitsArg::Imperial,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsDoc {
    #[serde(default = "default_layer")]
    pub layer: String,
    #[serde(default = "default_mode")]
    pub mode: ModeArg,
    #[serde(default = "default_units")]
    pub units: UnitsArg,
    #[serde(default)]
    pub vertex_numbers: bool,
    #[serde(default)]
    pub bbox: bool,
}

fn default_layer() -> String {
    Layer::default().name().to_string()
}

fn default_mode() -> ModeArg {
    Mode::default().into()
}

fn default_units() -> UnitsArg {
    Units::default().into()
}

impl Default for SettingsDoc {
    fn default() -> Self {
        Self {
            layer: default_layer(),
            mode: default_mode(),
            units: default_units(),
            vertex_numbers: false,
            bbox: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewportDoc {
    pub center: [f64; 2],
    pub zoom: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShapeDoc {
    /// 1 or 2.
    pub origin_map: u8,
    pub origin_anchor: [f64; 2],
    pub comparison_anchor: [f64; 2],
    #[serde(default)]
    pub rotation: f64,
    /// Pixel offsets from the origin anchor at the reference zoom.
    pub points: Vec<[f64; 2]>,
}

/// Full application state as JSON. Coordinates are `[lat, lng]`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StateDoc {
    #[serde(default)]
    pub settings: SettingsDoc,
    pub viewports: [ViewportDoc; 2],
    #[serde(default)]
    pub shape: Option<ShapeDoc>,
}

fn lat_lng([lat, lng]: [f64; 2]) -> LatLng {
    LatLng::new(lat, lng)
}

fn pair(p: LatLng) -> [f64; 2] {
    [p.lat, p.lng]
}

impl StateDoc {
    pub fn from_state(state: &AppState) -> Self {
        let s = &state.settings;
        Self {
            settings: SettingsDoc {
                layer: s.layer.name().to_string(),
                mode: s.mode.into(),
                units: s.units.into(),
                vertex_numbers: s.show_vertex_numbers,
                bbox: s.show_bbox,
            },
            viewports: state.viewports.map(|vp| ViewportDoc {
                center: pair(vp.center),
                zoom: vp.zoom,
            }),
            shape: state.shape.as_ref().map(|shape| ShapeDoc {
                origin_map: shape.origin_map().wire(),
                origin_anchor: pair(shape.origin_anchor()),
                comparison_anchor: pair(shape.comparison_anchor()),
                rotation: shape.rotation(),
                points: shape.local_points().iter().map(|p| [p.x, p.y]).collect(),
            }),
        }
    }

    pub fn to_state(&self) -> Result<AppState> {
        let s = &self.settings;
        let layer = Layer::from_name(&s.layer)
            .ok_or_else(|| anyhow!("unknown layer {:?}", s.layer))?;
        let settings = Settings {
            layer,
            mode: s.mode.into(),
            units: s.units.into(),
            show_vertex_numbers: s.vertex_numbers,
            show_bbox: s.bbox,
        };
        let [a, b] = &self.viewports;
        let mut state = AppState::new(
            settings,
            [
                Viewport::new(lat_lng(a.center), a.zoom),
                Viewport::new(lat_lng(b.center), b.zoom),
            ],
        );
        if let Some(doc) = &self.shape {
            let origin_map = MapId::from_wire(doc.origin_map)
                .ok_or_else(|| anyhow!("origin_map must be 1 or 2, got {}", doc.origin_map))?;
            let points = doc.points.iter().map(|[x, y]| Vector2::new(*x, *y)).collect();
            let shape = Shape::from_parts(
                origin_map,
                lat_lng(doc.origin_anchor),
                lat_lng(doc.comparison_anchor),
                doc.rotation,
                points,
            );
            match shape {
                Some(shape) => state.shape = Some(shape),
                None => bail!("shape needs at least one point"),
            }
        }
        Ok(state)
    }
}

#[derive(Debug, Serialize)]
pub struct MapFrameDoc {
    pub map: u8,
    pub is_origin: bool,
    pub closed: bool,
    pub outline: Vec<[f64; 2]>,
    pub value: f64,
    pub label: String,
    pub planar_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[[f64; 2]; 2]>,
}

/// Render output: what each map draws plus the comparison percentage.
#[derive(Debug, Serialize)]
pub struct FrameDoc {
    pub maps: [MapFrameDoc; 2],
    pub difference: String,
}

impl FrameDoc {
    pub fn from_frame(frame: &Frame) -> Self {
        let [a, b] = &frame.maps;
        Self {
            maps: [map_doc(a), map_doc(b)],
            difference: frame.difference.clone(),
        }
    }
}

fn map_doc(m: &MapFrame) -> MapFrameDoc {
    MapFrameDoc {
        map: m.map.wire(),
        is_origin: m.is_origin,
        closed: m.closed,
        outline: m.outline.iter().copied().map(pair).collect(),
        value: m.value,
        label: m.label.clone(),
        planar_valid: m.planar_valid,
        bbox: m.bbox.map(|b| [pair(b.south_west()), pair(b.north_east())]),
    }
}

/// Parse a `lat,lng` pair in degrees.
pub fn parse_lat_lng(s: &str) -> Result<LatLng, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected lat,lng but got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    let p = LatLng::new(lat, lng);
    if !p.is_finite() {
        return Err(format!("non-finite coordinate {s:?}"));
    }
    Ok(p)
}

pub fn read_state(path: &Path) -> Result<AppState> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: StateDoc = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing state JSON {}", path.display()))?;
    doc.to_state()
        .with_context(|| format!("invalid state in {}", path.display()))
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
