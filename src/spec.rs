//! Diagram specs and question items.
//!
//! Specs arrive as JSON from the question bank. Each diagram type is one
//! variant of [`DiagramSpec`], keyed by its `type` tag; fields are camelCase
//! and every optional field has a serde default so hand-written specs stay
//! short. Points are `[x, y]` arrays.

use std::fmt;
use std::marker::PhantomData;

use glam::DVec2;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{SourceContext, SpecError};
use crate::render::defaults;
use crate::types::{Bounds, Frame};

// ============================================================================
// Ordered name maps
// ============================================================================

/// Name → value map that keeps document order.
///
/// Vertex order matters (it defines polygon edges), so a JSON object is read
/// into a list of pairs rather than a hash map.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMap<T>(Vec<(String, T)>);

/// Named math-space points.
pub type NamedPoints = NamedMap<DVec2>;

impl<T> Default for NamedMap<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> NamedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl NamedPoints {
    /// Copy of a point by name.
    pub fn point(&self, name: &str) -> Option<DVec2> {
        self.get(name).copied()
    }
}

impl<N: Into<String>, T> FromIterator<(N, T)> for NamedMap<T> {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<T: Serialize> Serialize for NamedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct NamedMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for NamedMapVisitor<T> {
    type Value = NamedMap<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of named entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = NamedMap::new();
        while let Some((name, value)) = access.next_entry::<String, T>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NamedMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NamedMapVisitor(PhantomData))
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Which horizontal ray bounds an angle at a transversal crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Which half of the transversal bounds an angle at a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    #[default]
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSpec {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub dashed: bool,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSpec {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// A named hit-region anchored to a feature of the figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    /// Device pixels; defaults to [`defaults::TARGET_RADIUS`].
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(flatten)]
    pub anchor: Anchor,
}

impl TargetSpec {
    pub fn radius(&self) -> f64 {
        self.radius.unwrap_or(defaults::TARGET_RADIUS)
    }
}

/// Geometric feature a target sits on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Anchor {
    /// On a named point.
    Vertex { vertex: String },
    /// Midpoint of the segment between two named points.
    Edge { edge: [String; 2] },
    /// Midpoint of a vector.
    Vector { vector: [String; 2] },
    /// Inside the angle at `vertex` between rays to `rays[0]` and `rays[1]`,
    /// `offset` math units along the bisector.
    Angle {
        vertex: String,
        rays: [String; 2],
        #[serde(default = "angle_target_offset")]
        offset: f64,
    },
    /// One of the four angles at a transversal crossing.
    AngleRegion {
        at: String,
        side: Side,
        #[serde(default)]
        vertical: Vertical,
        #[serde(default = "angle_region_offset")]
        offset: f64,
    },
    /// A literal math-space position.
    Point { at: DVec2 },
}

fn angle_target_offset() -> f64 {
    defaults::ANGLE_TARGET_OFFSET
}

fn angle_region_offset() -> f64 {
    defaults::ANGLE_REGION_OFFSET
}

fn yes() -> bool {
    true
}

// ============================================================================
// Diagram specs
// ============================================================================

/// One diagram, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DiagramSpec {
    RightTriangle(RightTriangleSpec),
    ParallelLines(ParallelLinesSpec),
    Thales(ThalesSpec),
    Symmetry(SymmetrySpec),
    CoordinatePlane(CoordinatePlaneSpec),
    GridPlace(GridPlaceSpec),
    Volume(VolumeSpec),
    /// Any tag without a builder.
    #[serde(other)]
    Unknown,
}

impl DiagramSpec {
    /// The `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            DiagramSpec::RightTriangle(_) => "right-triangle",
            DiagramSpec::ParallelLines(_) => "parallel-lines",
            DiagramSpec::Thales(_) => "thales",
            DiagramSpec::Symmetry(_) => "symmetry",
            DiagramSpec::CoordinatePlane(_) => "coordinate-plane",
            DiagramSpec::GridPlace(_) => "grid-place",
            DiagramSpec::Volume(_) => "volume",
            DiagramSpec::Unknown => "unknown",
        }
    }

    /// Snapping declared by the spec; only grid-place declares one.
    pub fn snap(&self) -> Option<(bool, f64)> {
        match self {
            DiagramSpec::GridPlace(spec) => Some((spec.snap, spec.snap_step)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightTriangleSpec {
    pub vertices: NamedPoints,
    #[serde(default)]
    pub right_angle: Option<String>,
    #[serde(default)]
    pub highlight_angle: Option<String>,
    #[serde(default)]
    pub angle_label: Option<String>,
    /// Edge key (`"AB"`) → side label.
    #[serde(default)]
    pub labels: NamedMap<String>,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(flatten)]
    pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub y: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransversalSpec {
    #[serde(default = "default_slope")]
    pub slope: f64,
    /// x of the transversal at the height midway between the lines.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub label: Option<String>,
}

fn default_slope() -> f64 {
    2.0
}

impl Default for TransversalSpec {
    fn default() -> Self {
        Self {
            slope: default_slope(),
            x: 0.0,
            label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleSpec {
    /// Name of the crossing.
    pub at: String,
    pub side: Side,
    #[serde(default)]
    pub vertical: Vertical,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelLinesSpec {
    pub lines: Vec<LineSpec>,
    #[serde(default)]
    pub transversal: TransversalSpec,
    /// Names of the two crossings, first line first.
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub angles: Vec<AngleSpec>,
    #[serde(default)]
    pub show_parallel_marks: bool,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(flatten)]
    pub frame: Frame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThalesConfig {
    Butterfly,
    #[default]
    #[serde(other)]
    Triangle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutSpec {
    pub on: [String; 2],
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThalesSpec {
    #[serde(default)]
    pub config: ThalesConfig,
    #[serde(default)]
    pub vertices: NamedPoints,
    #[serde(default)]
    pub points: NamedPoints,
    #[serde(default)]
    pub cuts: NamedMap<CutSpec>,
    /// Name of the butterfly's crossing point.
    #[serde(default)]
    pub center: Option<String>,
    #[serde(default)]
    pub labels: NamedMap<String>,
    /// Defaults to on for the butterfly, off for the triangle cut.
    #[serde(default)]
    pub show_parallel: Option<bool>,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(flatten)]
    pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetrySpec {
    pub center: DVec2,
    #[serde(default = "default_center_label")]
    pub center_label: String,
    pub points: NamedPoints,
    #[serde(default = "yes")]
    pub show_image: bool,
    #[serde(default = "yes")]
    pub show_segment: bool,
    #[serde(default)]
    pub show_midpoint: bool,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(flatten)]
    pub frame: Frame,
}

fn default_center_label() -> String {
    "O".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEqSpec {
    pub slope: f64,
    pub intercept: f64,
    #[serde(default)]
    pub dashed: bool,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatePlaneSpec {
    #[serde(default)]
    pub points: NamedPoints,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub vectors: Vec<VectorSpec>,
    #[serde(default)]
    pub line_eqs: Vec<LineEqSpec>,
    #[serde(default = "yes")]
    pub show_grid: bool,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(flatten)]
    pub frame: Frame,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointStyleSpec {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub show_label: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlaceSpec {
    pub bounds: Bounds,
    #[serde(default)]
    pub points: NamedPoints,
    #[serde(default)]
    pub point_styles: NamedMap<PointStyleSpec>,
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub vectors: Vec<VectorSpec>,
    #[serde(default = "yes")]
    pub snap: bool,
    #[serde(default = "default_snap_step")]
    pub snap_step: f64,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(flatten)]
    pub frame: Frame,
}

fn default_snap_step() -> f64 {
    defaults::SNAP_STEP
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidKind {
    Cylinder,
    Cone,
    Sphere,
    Pyramid,
    Prism,
    #[serde(other)]
    Unknown,
}

/// Measured dimensions; shown as `"<value> <unit>"` when no label is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub h: Option<f64>,
    #[serde(default)]
    pub r: Option<f64>,
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionLabels {
    #[serde(default)]
    pub h: Option<String>,
    #[serde(default)]
    pub r: Option<String>,
    #[serde(default)]
    pub a: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpec {
    pub shape: SolidKind,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub labels: DimensionLabels,
    #[serde(flatten)]
    pub frame: Frame,
}

// ============================================================================
// Question items
// ============================================================================

/// An interactive question: a diagram and the expected answer.
///
/// `answer` is a target name for click questions and a literal `"x,y"` for
/// placement questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub diagram: Option<DiagramSpec>,
    pub answer: String,
    #[serde(default)]
    pub instruction: Option<String>,
}

/// Parse one diagram spec.
pub fn parse_spec(name: &str, source: &str) -> Result<DiagramSpec, SpecError> {
    let ctx = SourceContext::new(name, source);
    serde_json::from_str(source).map_err(|err| ctx.spec_error(err))
}

/// Parse one question item.
pub fn parse_item(name: &str, source: &str) -> Result<Item, SpecError> {
    let ctx = SourceContext::new(name, source);
    serde_json::from_str(source).map_err(|err| ctx.spec_error(err))
}
