//! Coordinate Context: the math-space drawing API builders use.
//!
//! A context pairs a [`Viewport`] with the surface it appended to the
//! container. Every drawing method takes math-space input, maps it through
//! the viewport, appends one node and returns its handle.

use glam::{DVec2, dvec2};

use crate::container::Container;
use crate::types::{Bounds, ContextOptions};

use super::defaults;
use super::geometry::{midpoint, minor_sweep, outward_normal, unit};
use super::surface::{
    HitRegion, HitState, MarkerDef, Node, NodeId, PathData, Style, SurfaceRef, TextAnchor,
};
use super::viewport::Viewport;

/// How a point is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PointStyle {
    pub color: String,
    pub radius: f64,
    /// Label position relative to the dot, in device pixels.
    pub label_offset: DVec2,
    pub label_anchor: TextAnchor,
    pub font_size: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: defaults::POINT_COLOR.to_string(),
            radius: defaults::POINT_RADIUS,
            label_offset: dvec2(defaults::LABEL_OFFSET.0, defaults::LABEL_OFFSET.1),
            label_anchor: TextAnchor::Start,
            font_size: defaults::FONT_SIZE,
        }
    }
}

impl PointStyle {
    pub fn colored(color: &str) -> Self {
        Self {
            color: color.to_string(),
            ..Self::default()
        }
    }

    /// Centre the label at `offset` from the dot.
    pub fn with_centered_label(mut self, offset: DVec2) -> Self {
        self.label_offset = offset;
        self.label_anchor = TextAnchor::Middle;
        self
    }
}

/// What the grid primitive draws besides the unit lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub axes: bool,
    pub labels: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            axes: true,
            labels: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Context {
    viewport: Viewport,
    surface: SurfaceRef,
}

impl Context {
    /// Fit `bounds` into a new surface appended to `container`.
    pub fn create(container: &mut Container, bounds: Bounds, options: ContextOptions) -> Self {
        let viewport = Viewport::new(bounds, options);
        let surface = container.append_surface(viewport.size());
        Self { viewport, surface }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bounds(&self) -> Bounds {
        self.viewport.bounds()
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    /// Shared handle to the surface this context draws on.
    pub fn surface(&self) -> SurfaceRef {
        self.surface.clone()
    }

    pub fn to_device(&self, m: DVec2) -> DVec2 {
        self.viewport.to_device(m)
    }

    pub fn to_math(&self, d: DVec2) -> DVec2 {
        self.viewport.to_math(d)
    }

    fn append(&mut self, node: Node) -> NodeId {
        self.surface.borrow_mut().append(node)
    }

    /// Remove a previously drawn node.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.surface.borrow_mut().remove(id).is_some()
    }

    fn text_node(at: DVec2, text: &str, style: Style) -> Node {
        Node::Text {
            at,
            content: text.to_string(),
            style,
        }
    }

    /// Filled dot with an optional label.
    pub fn point(&mut self, p: DVec2, label: Option<&str>, style: &PointStyle) -> NodeId {
        let d = self.to_device(p);
        let mut children = vec![Node::Circle {
            center: d,
            r: style.radius,
            style: Style::filled(&style.color),
        }];
        if let Some(text) = label.filter(|t| !t.is_empty()) {
            children.push(Self::text_node(
                d + style.label_offset,
                text,
                Style::text(defaults::LABEL_COLOR, style.font_size, style.label_anchor).bold(),
            ));
        }
        self.append(Node::Group {
            children,
            style: Style::default().with_class("geo-point"),
        })
    }

    pub fn segment(&mut self, a: DVec2, b: DVec2, style: &Style) -> NodeId {
        let (from, to) = (self.to_device(a), self.to_device(b));
        self.append(Node::Line {
            from,
            to,
            style: style.clone(),
        })
    }

    /// Segment with the default dash pattern unless the style sets one.
    pub fn dashed_line(&mut self, a: DVec2, b: DVec2, style: &Style) -> NodeId {
        let mut style = style.clone();
        if style.dash.is_none() {
            style.dash = Some(defaults::DASH.to_string());
        }
        self.segment(a, b, &style)
    }

    pub fn polygon(&mut self, points: &[DVec2], style: &Style) -> NodeId {
        let points = points.iter().map(|&p| self.to_device(p)).collect();
        self.append(Node::Polygon {
            points,
            style: style.clone(),
        })
    }

    /// Segment ending in an arrowhead coloured like its stroke.
    pub fn arrow(&mut self, a: DVec2, b: DVec2, style: &Style) -> NodeId {
        let color = style
            .stroke
            .clone()
            .unwrap_or_else(|| defaults::STROKE.to_string());
        let marker_id = arrow_marker_id(&color);
        let marker_id = self.surface.borrow_mut().ensure_marker(MarkerDef {
            id: marker_id,
            length: defaults::ARROW_LENGTH,
            width: defaults::ARROW_WIDTH,
            color,
        });
        let style = style.clone().with_marker_end(&marker_id);
        self.segment(a, b, &style)
    }

    /// Free text at a math position, shifted by a device offset.
    pub fn label(&mut self, p: DVec2, text: &str, offset: DVec2, style: &Style) -> NodeId {
        let at = self.to_device(p) + offset;
        self.append(Self::text_node(at, text, style.clone()))
    }

    /// Label beside segment `ab`, on the side away from `reference`.
    pub fn side_label(&mut self, a: DVec2, b: DVec2, text: &str, reference: DVec2) -> NodeId {
        let (da, db, dref) = (self.to_device(a), self.to_device(b), self.to_device(reference));
        let normal = outward_normal(da, db, dref).unwrap_or(DVec2::NEG_Y);
        let at = midpoint(da, db) + normal * defaults::SIDE_LABEL_DISTANCE;
        self.append(Self::text_node(
            at,
            text,
            Style::text(defaults::LABEL_COLOR, defaults::FONT_SIZE, TextAnchor::Middle),
        ))
    }

    /// L-shaped mark in the corner at `vertex` between edges to `p1` and `p2`.
    pub fn right_angle_mark(&mut self, vertex: DVec2, p1: DVec2, p2: DVec2) -> Option<NodeId> {
        let v = self.to_device(vertex);
        let u1 = unit(self.to_device(p1) - v)?;
        let u2 = unit(self.to_device(p2) - v)?;
        let s = defaults::RIGHT_ANGLE_SIZE;
        let points = vec![v + u1 * s, v + (u1 + u2) * s, v + u2 * s];
        Some(self.append(Node::Polyline {
            points,
            style: Style::stroked(defaults::STROKE, defaults::THIN_STROKE_WIDTH),
        }))
    }

    /// Minor arc at `vertex` between the rays towards `p1` and `p2`, with an
    /// optional label at the arc's angular midpoint.
    pub fn angle_mark(
        &mut self,
        vertex: DVec2,
        p1: DVec2,
        p2: DVec2,
        radius: f64,
        label: Option<&str>,
        color: &str,
    ) -> Option<NodeId> {
        let v = self.to_device(vertex);
        let r1 = unit(self.to_device(p1) - v)?;
        let r2 = unit(self.to_device(p2) - v)?;
        let a1 = r1.y.atan2(r1.x);
        let sweep = minor_sweep(a1, r2.y.atan2(r2.x));
        let start = v + r1 * radius;
        let end = v + DVec2::from_angle(a1 + sweep) * radius;
        let data = PathData::new()
            .move_to(start)
            .arc_to(dvec2(radius, radius), false, sweep > 0.0, end);

        let mut children = vec![Node::Path {
            data,
            style: Style::stroked(color, defaults::STROKE_WIDTH * 0.75),
        }];
        if let Some(text) = label.filter(|t| !t.is_empty()) {
            let mid = DVec2::from_angle(a1 + sweep / 2.0);
            children.push(Self::text_node(
                v + mid * (radius + defaults::ANGLE_LABEL_GAP),
                text,
                Style::text(color, defaults::FONT_SIZE, TextAnchor::Middle),
            ));
        }
        Some(self.append(Node::Group {
            children,
            style: Style::default().with_class("geo-angle"),
        }))
    }

    /// Unit grid over the visible bounds, with axes and integer tick labels.
    pub fn grid(&mut self, options: &GridOptions) -> NodeId {
        let b = self.bounds();
        let xs = (b.x_min.ceil() as i64)..=(b.x_max.floor() as i64);
        let ys = (b.y_min.ceil() as i64)..=(b.y_max.floor() as i64);
        let grid_style = Style::stroked(defaults::GRID_COLOR, defaults::THIN_STROKE_WIDTH);
        let axis_style = Style::stroked(defaults::AXIS_COLOR, defaults::THIN_STROKE_WIDTH * 1.5);
        let mut children = Vec::new();

        for x in xs.clone() {
            let x = x as f64;
            let style = if options.axes && x == 0.0 { &axis_style } else { &grid_style };
            children.push(Node::Line {
                from: self.to_device(dvec2(x, b.y_min)),
                to: self.to_device(dvec2(x, b.y_max)),
                style: style.clone(),
            });
        }
        for y in ys.clone() {
            let y = y as f64;
            let style = if options.axes && y == 0.0 { &axis_style } else { &grid_style };
            children.push(Node::Line {
                from: self.to_device(dvec2(b.x_min, y)),
                to: self.to_device(dvec2(b.x_max, y)),
                style: style.clone(),
            });
        }

        if options.labels {
            // labels ride on the axes when visible, else on the lower/left edge
            let axis_y = if b.y_min <= 0.0 && b.y_max >= 0.0 { 0.0 } else { b.y_min };
            let axis_x = if b.x_min <= 0.0 && b.x_max >= 0.0 { 0.0 } else { b.x_min };
            let tick_style = Style::text(
                defaults::TICK_LABEL_COLOR,
                defaults::SMALL_FONT_SIZE,
                TextAnchor::Middle,
            );
            for x in xs.filter(|&x| x != 0) {
                children.push(Self::text_node(
                    self.to_device(dvec2(x as f64, axis_y)) + dvec2(0.0, 12.0),
                    &x.to_string(),
                    tick_style.clone(),
                ));
            }
            let tick_style = Style {
                anchor: Some(TextAnchor::End),
                ..tick_style
            };
            for y in ys.filter(|&y| y != 0) {
                children.push(Self::text_node(
                    self.to_device(dvec2(axis_x, y as f64)) + dvec2(-6.0, 0.0),
                    &y.to_string(),
                    tick_style.clone(),
                ));
            }
        }

        self.append(Node::Group {
            children,
            style: Style::default().with_class("geo-grid"),
        })
    }

    /// `count` ticks across segment `ab`, centred on its midpoint.
    pub fn parallel_marks(&mut self, a: DVec2, b: DVec2, count: usize) -> Option<NodeId> {
        let (da, db) = (self.to_device(a), self.to_device(b));
        let along = unit(db - da)?;
        let across = along.perp() * (defaults::TICK_LENGTH / 2.0);
        let mid = midpoint(da, db);
        let first = -(count.saturating_sub(1) as f64) / 2.0;
        let style = Style::stroked(defaults::STROKE, defaults::STROKE_WIDTH * 0.75);
        let children = (0..count)
            .map(|i| {
                let c = mid + along * ((first + i as f64) * defaults::TICK_SPACING);
                Node::Line {
                    from: c - across,
                    to: c + across,
                    style: style.clone(),
                }
            })
            .collect();
        Some(self.append(Node::Group {
            children,
            style: Style::default().with_class("geo-parallel"),
        }))
    }

    /// Invisible named click region centred on a math point.
    pub fn hit_target(&mut self, name: &str, center: DVec2, radius: f64) -> NodeId {
        let center = self.to_device(center);
        self.append(Node::Hit(HitRegion {
            name: name.to_string(),
            center,
            radius,
            state: HitState::Armed,
        }))
    }
}

/// Marker id for an arrowhead of `color`; one definition per colour.
fn arrow_marker_id(color: &str) -> String {
    if color == defaults::STROKE {
        return defaults::ARROW_MARKER_ID.to_string();
    }
    let suffix: String = color.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("{}-{}", defaults::ARROW_MARKER_ID, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> (Container, Context) {
        let mut container = Container::new();
        let ctx = Context::create(
            &mut container,
            Bounds::new(0.0, 10.0, 0.0, 10.0),
            ContextOptions::default(),
        );
        (container, ctx)
    }

    fn node(ctx: &Context, id: NodeId) -> Node {
        ctx.surface().borrow().node(id).cloned().expect("node exists")
    }

    #[test]
    fn create_appends_one_surface() {
        let (container, ctx) = ctx();
        assert_eq!(container.len(), 1);
        assert_eq!(ctx.surface().borrow().size(), dvec2(300.0, 250.0));
    }

    #[test]
    fn arrows_share_one_marker_per_colour() {
        let (_container, mut ctx) = ctx();
        let style = Style::stroked(defaults::STROKE, 2.0);
        ctx.arrow(dvec2(1.0, 1.0), dvec2(2.0, 2.0), &style);
        ctx.arrow(dvec2(3.0, 1.0), dvec2(4.0, 2.0), &style);
        ctx.arrow(dvec2(3.0, 1.0), dvec2(4.0, 2.0), &style.clone().with_stroke("#2a6fdb"));
        let svg = ctx.surface().borrow().to_svg();
        assert_eq!(svg.matches("<marker").count(), 2);
        assert!(svg.contains("url(#geofig-arrow)"));
        assert!(svg.contains("url(#geofig-arrow-2a6fdb)"));
    }

    #[test]
    fn angle_mark_takes_the_minor_arc() {
        let (_container, mut ctx) = ctx();
        // rays east and north from (5,5): a quarter turn, counter-clockwise in math space
        let id = ctx
            .angle_mark(dvec2(5.0, 5.0), dvec2(8.0, 5.0), dvec2(5.0, 8.0), 20.0, Some("α"), "#d00")
            .expect("non-degenerate");
        let Node::Group { children, .. } = node(&ctx, id) else {
            panic!("angle mark is a group");
        };
        let Node::Path { data, .. } = &children[0] else {
            panic!("first child is the arc");
        };
        let d = data.to_string();
        // y-down device space: east → north is a negative sweep, so sweep flag 0
        assert!(d.contains(" 0 0 0 "), "{d}");
        let Node::Text { at, .. } = &children[1] else {
            panic!("second child is the label");
        };
        let v = ctx.to_device(dvec2(5.0, 5.0));
        assert!(at.x > v.x && at.y < v.y);
    }

    #[test]
    fn degenerate_marks_are_skipped() {
        let (_container, mut ctx) = ctx();
        let p = dvec2(2.0, 2.0);
        assert!(ctx.right_angle_mark(p, p, dvec2(3.0, 3.0)).is_none());
        assert!(ctx.parallel_marks(p, p, 2).is_none());
    }

    #[test]
    fn side_label_avoids_reference() {
        let (_container, mut ctx) = ctx();
        let id = ctx.side_label(dvec2(2.0, 2.0), dvec2(8.0, 2.0), "6", dvec2(5.0, 6.0));
        let Node::Text { at, .. } = node(&ctx, id) else {
            panic!("side label is text");
        };
        // reference is above the segment, so the label goes below (larger device y)
        assert!(at.y > ctx.to_device(dvec2(5.0, 2.0)).y);
    }

    #[test]
    fn grid_skips_zero_labels() {
        let mut container = Container::new();
        let mut ctx = Context::create(
            &mut container,
            Bounds::new(-2.0, 2.0, -1.0, 1.0),
            ContextOptions::default(),
        );
        let id = ctx.grid(&GridOptions::default());
        let Node::Group { children, .. } = node(&ctx, id) else {
            panic!("grid is a group");
        };
        let labels: Vec<String> = children
            .iter()
            .filter_map(|n| match n {
                Node::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["-2", "-1", "1", "2", "-1", "1"]);
        // 5 vertical + 3 horizontal lines
        assert_eq!(children.len() - labels.len(), 8);
    }

    #[test]
    fn points_group_dot_and_label() {
        let (_container, mut ctx) = ctx();
        let id = ctx.point(dvec2(1.0, 1.0), Some("A"), &PointStyle::default());
        assert!(ctx.remove(id));
        assert!(!ctx.remove(id));
        assert!(ctx.surface().borrow().ids().is_empty());
    }
}
