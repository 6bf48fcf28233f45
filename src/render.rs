//! Wheel drawing.
//!
//! `render` turns the roster into a flat list of drawing commands for the
//! rotating layer. Rotation is not an input: hosts apply it as a transform on
//! top of the drawn wheel and animate it with [`RotationTransition`], so the
//! sectors are only redrawn when the roster changes. The pointer lives on a
//! separate, fixed layer (see [`render_pointer`]).
//!
//! Angles are in degrees, measured clockwise from 3 o'clock.

use crate::error::{WheelError, WheelResult};
use crate::types::Participant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Side length of the square drawing surface
pub const CANVAS_SIZE: f64 = 600.0;

/// Names longer than this are truncated
pub const MAX_LABEL_CHARS: usize = 12;
const TRUNCATED_LABEL_CHARS: usize = 10;
const LABEL_ELLIPSIS: &str = "..";

const SECTOR_BORDER: &str = "rgba(255,255,255,0.4)";
const SHADOW_FILL: &str = "rgba(0,0,0,0.2)";
const LABEL_FILL: &str = "#fff";
const LABEL_SHADOW: &str = "rgba(0,0,0,0.5)";
const RING_COLOR: &str = "#fff";
const HUB_FILL: &str = "#fff";
const HUB_BORDER: &str = "#333";
const POINTER_COLOR: &str = "#FACC15";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        size: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Sector {
        index: usize,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: String,
        stroke: Stroke,
    },
    /// Text drawn in a frame rotated to `angle` around `center`; `offset` is
    /// the distance along the rotated x axis where the text ends
    Label {
        index: usize,
        center: Point,
        angle: f64,
        offset: f64,
        baseline: f64,
        text: String,
        font_px: u32,
        bold: bool,
        align: TextAlign,
        fill: String,
        shadow_blur: f64,
        shadow_color: String,
    },
}

/// Fixed indicator drawn outside the rotating layer, pointing at the center
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pointer {
    pub tip: Point,
    pub base_top: Point,
    pub base_bottom: Point,
    pub color: String,
}

/// Dimensions derived from the canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub size: f64,
    pub center: Point,
    pub radius: f64,
    pub shadow_radius: f64,
    pub hub_radius: f64,
    pub label_offset: f64,
}

impl WheelGeometry {
    pub fn new(size: f64) -> Self {
        let half = size / 2.0;
        let radius = half - 10.0;
        Self {
            size,
            center: Point { x: half, y: half },
            radius,
            shadow_radius: radius + 5.0,
            hub_radius: 20.0,
            label_offset: radius - 20.0,
        }
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(CANVAS_SIZE)
    }
}

/// Label font size, shrinking as the wheel gets crowded
pub fn label_font_px(count: usize) -> u32 {
    if count > 15 {
        10
    } else if count > 10 {
        12
    } else {
        16
    }
}

/// Sector label text, cut to 10 characters plus ".." when the name is too long
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let mut text: String = name.chars().take(TRUNCATED_LABEL_CHARS).collect();
        text.push_str(LABEL_ELLIPSIS);
        text
    } else {
        name.to_string()
    }
}

/// Draw the rotating layer on the default canvas
pub fn render(participants: &[Participant]) -> WheelResult<Vec<DrawCommand>> {
    render_with(&WheelGeometry::default(), participants)
}

/// Draw the rotating layer: shadow, sectors with labels, outer ring, hub
pub fn render_with(
    geometry: &WheelGeometry,
    participants: &[Participant],
) -> WheelResult<Vec<DrawCommand>> {
    let total = participants.len();
    if total == 0 {
        return Err(WheelError::EmptyWheel);
    }

    let arc = 360.0 / total as f64;
    let font_px = label_font_px(total);
    let center = geometry.center;
    let mut commands = Vec::with_capacity(2 * total + 4);

    commands.push(DrawCommand::Clear {
        size: geometry.size,
    });
    commands.push(DrawCommand::Circle {
        center,
        radius: geometry.shadow_radius,
        fill: Some(SHADOW_FILL.to_string()),
        stroke: None,
    });

    for (i, p) in participants.iter().enumerate() {
        let start_angle = i as f64 * arc;

        commands.push(DrawCommand::Sector {
            index: i,
            center,
            radius: geometry.radius,
            start_angle,
            end_angle: start_angle + arc,
            fill: p.color.clone(),
            stroke: Stroke::new(SECTOR_BORDER, 1.0),
        });

        commands.push(DrawCommand::Label {
            index: i,
            center,
            angle: start_angle + arc / 2.0,
            offset: geometry.label_offset,
            baseline: 6.0,
            text: truncate_label(&p.name),
            font_px,
            bold: true,
            align: TextAlign::Right,
            fill: LABEL_FILL.to_string(),
            shadow_blur: 4.0,
            shadow_color: LABEL_SHADOW.to_string(),
        });
    }

    commands.push(DrawCommand::Circle {
        center,
        radius: geometry.radius,
        fill: None,
        stroke: Some(Stroke::new(RING_COLOR, 4.0)),
    });
    commands.push(DrawCommand::Circle {
        center,
        radius: geometry.hub_radius,
        fill: Some(HUB_FILL.to_string()),
        stroke: Some(Stroke::new(HUB_BORDER, 3.0)),
    });

    Ok(commands)
}

/// Pointer triangle at 3 o'clock, tip facing the hub
pub fn render_pointer(geometry: &WheelGeometry) -> Pointer {
    let length = geometry.size * 0.08;
    let half_height = length / 2.0;
    let base_x = geometry.size;
    let y = geometry.center.y;

    Pointer {
        tip: Point {
            x: base_x - length,
            y,
        },
        base_top: Point {
            x: base_x,
            y: y - half_height,
        },
        base_bottom: Point {
            x: base_x,
            y: y + half_height,
        },
        color: POINTER_COLOR.to_string(),
    }
}

/// CSS-style cubic Bézier timing curve through (0,0) and (1,1)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// Fast start, long glide to a stop
    pub const SPIN_EASE_OUT: Self = Self {
        x1: 0.15,
        y1: 0.0,
        x2: 0.15,
        y2: 1.0,
    };

    fn component(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    /// Eased progress for linear progress `x` in [0, 1]
    pub fn ease(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }

        // x(t) is monotonic for control points inside [0, 1]
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..60 {
            let mid = (lo + hi) / 2.0;
            if Self::component(mid, self.x1, self.x2) < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Self::component((lo + hi) / 2.0, self.y1, self.y2)
    }
}

/// Visual rotation animation applied by the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RotationTransition {
    pub duration_ms: u64,
    pub easing: CubicBezier,
}

impl RotationTransition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration_ms: duration.as_millis() as u64,
            easing: CubicBezier::SPIN_EASE_OUT,
        }
    }

    /// Angle shown `elapsed` into an animation from `from` to `to`
    pub fn angle_at(&self, from: f64, to: f64, elapsed: Duration) -> f64 {
        if self.duration_ms == 0 {
            return to;
        }
        let progress = elapsed.as_millis() as f64 / self.duration_ms as f64;
        from + (to - from) * self.easing.ease(progress)
    }
}

/// Everything the rendering surface needs for one frame of state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelView {
    pub participants: Vec<Participant>,
    pub rotation_degrees: f64,
    pub is_spinning: bool,
    pub transition: RotationTransition,
}
