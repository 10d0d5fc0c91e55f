//! Visual tree emitted by the button components.
//!
//! Nodes describe what to draw, never how: gradients, shadows and the
//! spinner's rotation are left to whichever toolkit consumes the tree.

use crate::color::Color;
use crate::config::{EdgeInsets, FontDescriptor};
use crate::icons::IconRef;
use std::fmt;

/// Main axis of a [`Node::Stack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// Size along one dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Fixed(f32),
    /// Take all space offered by the parent
    Fill,
}

/// Outline shared by background, clip and border of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonShape {
    RoundedRect(f32),
    Circle,
}

/// Paint for a frame's background
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// Left-to-right gradient with evenly spaced stops
    LinearGradient(Vec<Color>),
}

impl Fill {
    /// Builds a fill from gradient stops; a single stop is a flat fill
    pub fn from_colors(colors: &[Color]) -> Self {
        match colors {
            [] => Fill::Solid(Color::CLEAR),
            [only] => Fill::Solid(*only),
            stops => Fill::LinearGradient(stops.to_vec()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    pub color: Color,
    pub radius: f32,
    pub offset: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseInOut,
}

/// Appear/disappear animation attached to a subtree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub fade: bool,
    pub scale: bool,
    pub duration: f32,
    pub curve: Curve,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: Length,
    pub height: Length,
    pub background: Fill,
    pub shape: ButtonShape,
    pub border: Border,
    pub shadow: DropShadow,
    pub child: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
    pub font: FontDescriptor,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconNode {
    pub icon: IconRef,
    pub size: f32,
    pub tint: Color,
}

/// Indeterminate circular spinner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    pub color: Color,
    pub diameter: f32,
    pub line_width: f32,
    pub trim: (f32, f32),
    pub round_caps: bool,
    /// Degrees turned per period
    pub sweep: f32,
    /// Seconds per full sweep; repeats while mounted
    pub period: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Frame(Frame),
    /// `overlay` is drawn centered on top of `base`
    Overlay {
        base: Box<Node>,
        overlay: Box<Node>,
    },
    Stack {
        axis: Axis,
        children: Vec<Node>,
    },
    Padded {
        insets: EdgeInsets,
        child: Box<Node>,
    },
    Text(TextNode),
    Icon(IconNode),
    /// Flexible empty region
    Spacer,
    /// Invisible box that keeps its footprint
    Placeholder {
        width: f32,
        height: f32,
    },
    Progress(ProgressRing),
    Transition {
        transition: Transition,
        child: Box<Node>,
    },
}

impl Node {
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Frame(frame) => vec![frame.child.as_ref()],
            Node::Overlay { base, overlay } => vec![base.as_ref(), overlay.as_ref()],
            Node::Stack { children, .. } => children.iter().collect(),
            Node::Padded { child, .. } | Node::Transition { child, .. } => vec![child.as_ref()],
            Node::Text(_)
            | Node::Icon(_)
            | Node::Spacer
            | Node::Placeholder { .. }
            | Node::Progress(_) => Vec::new(),
        }
    }

    /// Visits this node and all descendants in pre-order
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Strips `Padded` and `Transition` wrappers
    pub fn unwrapped(&self) -> &Node {
        match self {
            Node::Padded { child, .. } | Node::Transition { child, .. } => child.unwrapped(),
            node => node,
        }
    }

    fn label(&self) -> String {
        match self {
            Node::Frame(frame) => format!(
                "frame {} x {} {:?} bg={} border={}@{}",
                length_label(frame.width),
                length_label(frame.height),
                frame.shape,
                fill_label(&frame.background),
                frame.border.color,
                frame.border.width
            ),
            Node::Overlay { .. } => "overlay".to_string(),
            Node::Stack { axis, .. } => format!("{:?}", axis).to_lowercase(),
            Node::Padded { insets, .. } => format!(
                "padding t={} l={} b={} r={}",
                insets.top, insets.leading, insets.bottom, insets.trailing
            ),
            Node::Text(text) => format!("text {:?} {}", text.content, text.color),
            Node::Icon(icon) => format!("icon {} {}px {}", icon.icon, icon.size, icon.tint),
            Node::Spacer => "spacer".to_string(),
            Node::Placeholder { width, height } => format!("placeholder {} x {}", width, height),
            Node::Progress(ring) => format!("progress ring {}px {}", ring.diameter, ring.color),
            Node::Transition { transition, .. } => {
                format!("transition {}s {:?}", transition.duration, transition.curve)
            }
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}{}", "  ".repeat(depth), self.label())?;
        for child in self.children() {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

fn length_label(length: Length) -> String {
    match length {
        Length::Fixed(value) => value.to_string(),
        Length::Fill => "fill".to_string(),
    }
}

fn fill_label(fill: &Fill) -> String {
    match fill {
        Fill::Solid(color) => color.to_string(),
        Fill::LinearGradient(stops) => {
            let stops: Vec<String> = stops.iter().map(|c| c.to_string()).collect();
            format!("gradient[{}]", stops.join(", "))
        }
    }
}

/// Element the stack of a content layout holds, after unwrapping padding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Icon,
    Title,
}

/// Output of a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub root: Node,
}

impl VisualTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn find_all(&self, predicate: impl Fn(&Node) -> bool) -> Vec<&Node> {
        let mut found = Vec::new();
        self.root.walk(&mut |node| {
            if predicate(node) {
                found.push(node);
            }
        });
        found
    }

    pub fn texts(&self) -> Vec<&TextNode> {
        self.find_all(|node| matches!(node, Node::Text(_)))
            .into_iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn icons(&self) -> Vec<&IconNode> {
        self.find_all(|node| matches!(node, Node::Icon(_)))
            .into_iter()
            .filter_map(|node| match node {
                Node::Icon(icon) => Some(icon),
                _ => None,
            })
            .collect()
    }

    pub fn contains_progress(&self) -> bool {
        !self.find_all(|node| matches!(node, Node::Progress(_))).is_empty()
    }

    /// Footprint of the first placeholder, if any
    pub fn placeholder(&self) -> Option<(f32, f32)> {
        self.find_all(|node| matches!(node, Node::Placeholder { .. }))
            .first()
            .and_then(|node| match node {
                Node::Placeholder { width, height } => Some((*width, *height)),
                _ => None,
            })
    }

    /// Outermost frame
    pub fn frame(&self) -> Option<&Frame> {
        self.find_all(|node| matches!(node, Node::Frame(_)))
            .first()
            .and_then(|node| match node {
                Node::Frame(frame) => Some(frame),
                _ => None,
            })
    }

    pub fn transition(&self) -> Option<Transition> {
        self.find_all(|node| matches!(node, Node::Transition { .. }))
            .first()
            .and_then(|node| match node {
                Node::Transition { transition, .. } => Some(*transition),
                _ => None,
            })
    }

    /// Axis and element order of the first stack in the tree
    pub fn stack_axis_and_order(&self) -> Option<(Axis, Vec<Slot>)> {
        self.find_all(|node| matches!(node, Node::Stack { .. }))
            .first()
            .and_then(|node| match node {
                Node::Stack { axis, children } => {
                    let order = children
                        .iter()
                        .filter_map(|child| match child.unwrapped() {
                            Node::Icon(_) => Some(Slot::Icon),
                            Node::Text(_) => Some(Slot::Title),
                            _ => None,
                        })
                        .collect();
                    Some((*axis, order))
                }
                _ => None,
            })
    }
}

impl fmt::Display for VisualTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_outline(f, 0)
    }
}
