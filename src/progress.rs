use crate::color::Color;
use crate::tree::{Curve, Node, ProgressRing, Transition};

pub const RING_DIAMETER: f32 = 40.0;
pub const RING_LINE_WIDTH: f32 = 4.0;
pub const RING_TRIM: (f32, f32) = (0.08, 1.0);

/// Fade and scale applied when the indicator mounts or unmounts
pub const LOADING_TRANSITION: Transition = Transition {
    fade: true,
    scale: true,
    duration: 0.3,
    curve: Curve::EaseInOut,
};

impl ProgressRing {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            diameter: RING_DIAMETER,
            line_width: RING_LINE_WIDTH,
            trim: RING_TRIM,
            round_caps: true,
            sweep: 360.0,
            period: 1.0,
        }
    }

    /// Rotation in degrees after `elapsed` seconds, in `0.0..360.0`
    pub fn angle_at(&self, elapsed: f32) -> f32 {
        if self.period <= 0.0 {
            return 0.0;
        }
        let turns = (elapsed / self.period).rem_euclid(1.0);
        (turns * self.sweep).rem_euclid(360.0)
    }

    /// Fraction of the circle actually stroked
    pub fn arc_fraction(&self) -> f32 {
        self.trim.1 - self.trim.0
    }
}

/// The spinner node, wrapped in its mount transition
pub fn indicator(color: Color) -> Node {
    Node::Transition {
        transition: LOADING_TRANSITION,
        child: Box::new(Node::Progress(ProgressRing::new(color))),
    }
}
