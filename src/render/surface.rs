//! Drawing surface: the node list a figure is drawn into.
//!
//! Builders never see a concrete surface type. They go through
//! [`DrawingSurface`], where every drawing command appends one [`Node`] and
//! hands back a [`NodeId`] that can later be removed or updated. The only
//! implementation shipped here is [`SvgSurface`].

use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::rc::Rc;

use glam::DVec2;

use super::svg::{fmt_num, surface_to_svg};

/// Shared handle to a surface; the container and the figure's context both
/// hold one.
pub type SurfaceRef = Rc<RefCell<dyn DrawingSurface>>;

/// Handle returned by every drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Presentation attributes of a node. Unset fields are omitted from output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill: Option<String>,
    pub dash: Option<String>,
    pub opacity: Option<f64>,
    pub marker_end: Option<String>,
    pub font_size: Option<f64>,
    pub bold: bool,
    pub anchor: Option<TextAnchor>,
    pub class: Option<String>,
}

impl Style {
    /// Stroke only, no fill.
    pub fn stroked(color: &str, width: f64) -> Self {
        Self {
            stroke: Some(color.to_string()),
            stroke_width: Some(width),
            fill: Some("none".to_string()),
            ..Self::default()
        }
    }

    /// Fill only, no stroke.
    pub fn filled(color: &str) -> Self {
        Self {
            fill: Some(color.to_string()),
            ..Self::default()
        }
    }

    /// Text style: font size, colour and anchor.
    pub fn text(color: &str, font_size: f64, anchor: TextAnchor) -> Self {
        Self {
            fill: Some(color.to_string()),
            font_size: Some(font_size),
            anchor: Some(anchor),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, color: &str) -> Self {
        self.fill = Some(color.to_string());
        self
    }

    pub fn with_stroke(mut self, color: &str) -> Self {
        self.stroke = Some(color.to_string());
        self
    }

    pub fn with_dash(mut self, pattern: &str) -> Self {
        self.dash = Some(pattern.to_string());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_marker_end(mut self, marker_id: &str) -> Self {
        self.marker_end = Some(marker_id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// SVG path data, in device coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathCommand {
    Move(DVec2),
    Line(DVec2),
    Arc {
        radii: DVec2,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    Close,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: DVec2) -> Self {
        self.commands.push(PathCommand::Move(p));
        self
    }

    pub fn line_to(mut self, p: DVec2) -> Self {
        self.commands.push(PathCommand::Line(p));
        self
    }

    /// Elliptical arc with no x-axis rotation.
    pub fn arc_to(mut self, radii: DVec2, large_arc: bool, sweep: bool, to: DVec2) -> Self {
        self.commands.push(PathCommand::Arc {
            radii,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            match *cmd {
                PathCommand::Move(p) => write!(out, "M{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::Line(p) => write!(out, "L{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::Arc {
                    radii,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    out,
                    "A{},{} 0 {} {} {},{}",
                    fmt_num(radii.x),
                    fmt_num(radii.y),
                    u8::from(large_arc),
                    u8::from(sweep),
                    fmt_num(to.x),
                    fmt_num(to.y)
                )?,
                PathCommand::Close => out.push('Z'),
            }
        }
        f.write_str(&out)
    }
}

/// Interaction state of a hit region, reflected in how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitState {
    /// Invisible and clickable.
    #[default]
    Armed,
    /// Invisible, no longer reacts to input.
    Disabled,
    /// The student's choice, and it was right.
    Correct,
    /// The student's choice, and it was wrong.
    Wrong,
    /// The expected answer, shown after a wrong choice.
    Revealed,
}

/// A named circular click region, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub name: String,
    pub center: DVec2,
    pub radius: f64,
    pub state: HitState,
}

impl HitRegion {
    pub fn contains(&self, device: DVec2) -> bool {
        self.center.distance(device) <= self.radius
    }
}

/// One drawable element, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Circle {
        center: DVec2,
        r: f64,
        style: Style,
    },
    Ellipse {
        center: DVec2,
        radii: DVec2,
        style: Style,
    },
    Line {
        from: DVec2,
        to: DVec2,
        style: Style,
    },
    Polyline {
        points: Vec<DVec2>,
        style: Style,
    },
    Polygon {
        points: Vec<DVec2>,
        style: Style,
    },
    Path {
        data: PathData,
        style: Style,
    },
    Text {
        at: DVec2,
        content: String,
        style: Style,
    },
    Group {
        children: Vec<Node>,
        style: Style,
    },
    Hit(HitRegion),
}

impl Node {
    pub fn as_hit(&self) -> Option<&HitRegion> {
        match self {
            Node::Hit(region) => Some(region),
            _ => None,
        }
    }

    pub fn as_hit_mut(&mut self) -> Option<&mut HitRegion> {
        match self {
            Node::Hit(region) => Some(region),
            _ => None,
        }
    }
}

/// Shared definitions a surface may need once (currently arrowheads).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDef {
    pub id: String,
    pub length: f64,
    pub width: f64,
    pub color: String,
}

/// The drawing-command contract builders depend on.
pub trait DrawingSurface: fmt::Debug {
    /// Output size in device pixels.
    fn size(&self) -> DVec2;

    /// Append a node on top of everything drawn so far.
    fn append(&mut self, node: Node) -> NodeId;

    /// Remove a node; `None` if it was already gone.
    fn remove(&mut self, id: NodeId) -> Option<Node>;

    fn node(&self, id: NodeId) -> Option<&Node>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node>;

    /// Ids of all live nodes, in paint order.
    fn ids(&self) -> Vec<NodeId>;

    fn has_marker(&self, id: &str) -> bool;

    fn define_marker(&mut self, marker: MarkerDef);

    /// Serialize the surface to an SVG document.
    fn to_svg(&self) -> String;

    /// Insert a marker definition unless one with the same id exists.
    ///
    /// Markers are surface-scoped shared state: many arrows reference one
    /// definition, so insertion must check for presence first.
    fn ensure_marker(&mut self, marker: MarkerDef) -> String {
        let id = marker.id.clone();
        if !self.has_marker(&id) {
            self.define_marker(marker);
        }
        id
    }

    /// All hit regions currently on the surface.
    fn hit_regions(&self) -> Vec<(NodeId, HitRegion)> {
        self.ids()
            .into_iter()
            .filter_map(|id| {
                self.node(id)
                    .and_then(Node::as_hit)
                    .map(|region| (id, region.clone()))
            })
            .collect()
    }
}

/// In-memory SVG surface.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: DVec2,
    nodes: Vec<(NodeId, Node)>,
    markers: Vec<MarkerDef>,
    next_id: u32,
}

impl SvgSurface {
    pub fn new(size: DVec2) -> Self {
        Self {
            size,
            nodes: Vec::new(),
            markers: Vec::new(),
            next_id: 0,
        }
    }

    /// A fresh surface behind a shared handle.
    pub fn shared(size: DVec2) -> SurfaceRef {
        Rc::new(RefCell::new(Self::new(size)))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(_, node)| node)
    }

    pub fn markers(&self) -> &[MarkerDef] {
        &self.markers
    }
}

impl DrawingSurface for SvgSurface {
    fn size(&self) -> DVec2 {
        self.size
    }

    fn append(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    fn remove(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|(nid, _)| *nid == id)?;
        Some(self.nodes.remove(index).1)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|(nid, _)| *nid == id)
            .map(|(_, node)| node)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|(nid, _)| *nid == id)
            .map(|(_, node)| node)
    }

    fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|(id, _)| *id).collect()
    }

    fn has_marker(&self, id: &str) -> bool {
        self.markers.iter().any(|m| m.id == id)
    }

    fn define_marker(&mut self, marker: MarkerDef) {
        self.markers.push(marker);
    }

    fn to_svg(&self) -> String {
        surface_to_svg(self.size, &self.markers, self.nodes())
    }
}
