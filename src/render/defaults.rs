//! Default sizes and colours (device pixels unless noted)

// Output frame
pub const WIDTH: f64 = 300.0;
pub const HEIGHT: f64 = 250.0;
pub const PADDING: f64 = 30.0;

/// Margin added around fitted bounds, in math units.
pub const FIT_MARGIN: f64 = 1.0;

// Strokes
pub const STROKE: &str = "#333";
pub const STROKE_WIDTH: f64 = 2.0;
pub const THIN_STROKE_WIDTH: f64 = 1.0;
pub const DASH: &str = "6,4";
pub const FILL: &str = "rgba(74,144,226,0.12)";

// Points and labels
pub const POINT_RADIUS: f64 = 4.0;
pub const POINT_COLOR: &str = "#222";
pub const LABEL_OFFSET: (f64, f64) = (8.0, -8.0);
pub const FONT_SIZE: f64 = 14.0;
pub const SMALL_FONT_SIZE: f64 = 11.0;
pub const LABEL_COLOR: &str = "#111";
/// Distance of a vertex label from its vertex, pushed away from the centroid.
pub const VERTEX_LABEL_DISTANCE: f64 = 16.0;
/// Distance of a side label from its segment.
pub const SIDE_LABEL_DISTANCE: f64 = 14.0;

// Marks
pub const RIGHT_ANGLE_SIZE: f64 = 12.0;
pub const ANGLE_RADIUS: f64 = 22.0;
pub const ANGLE_COLOR: &str = "#d9534f";
pub const ANGLE_LABEL_GAP: f64 = 12.0;
pub const TICK_LENGTH: f64 = 8.0;
pub const TICK_SPACING: f64 = 5.0;
pub const MIDPOINT_CROSS: f64 = 5.0;

// Arrows
pub const ARROW_MARKER_ID: &str = "geofig-arrow";
pub const ARROW_LENGTH: f64 = 10.0;
pub const ARROW_WIDTH: f64 = 7.0;
pub const VECTOR_COLOR: &str = "#2a6fdb";

// Grid
pub const GRID_COLOR: &str = "#ddd";
pub const AXIS_COLOR: &str = "#888";
pub const TICK_LABEL_COLOR: &str = "#666";

// Hit regions and feedback
pub const TARGET_RADIUS: f64 = 16.0;
pub const CORRECT_COLOR: &str = "#2e9e44";
pub const WRONG_COLOR: &str = "#d9534f";
pub const REVEAL_COLOR: &str = "#2e9e44";
pub const MARKER_COLOR: &str = "#f0a020";
pub const MARKER_RADIUS: f64 = 6.0;

// Anchor offsets, in math units
pub const ANGLE_TARGET_OFFSET: f64 = 0.6;
pub const ANGLE_REGION_OFFSET: f64 = 0.8;

// Placement
pub const SNAP_STEP: f64 = 1.0;
pub const INSTRUCTION: &str = "Click on the grid to place the point, then confirm.";
pub const CONFIRM_LABEL: &str = "Confirm";
