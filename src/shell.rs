//! The button shell: picks a rendering branch from the loading flag and
//! reports taps back to the host.

use crate::color::Color;
use crate::config::{ButtonConfig, DEFAULT_HEIGHT};
use crate::layout::content_for;
use crate::loading_state::LoadingState;
use crate::progress;
use crate::tree::{Border, ButtonShape, DropShadow, Fill, Frame, Length, Node, VisualTree};
use std::sync::Arc;
use tracing::debug;

/// Host callback receiving the loading value seen at tap time
pub type Action = Arc<dyn Fn(bool) + Send + Sync>;

impl ButtonShape {
    /// Outline for the given loading state
    pub fn select(wrap_on_loading: bool, loading: bool, corner_radius: f32, collapsed_size: f32) -> Self {
        match (loading, wrap_on_loading) {
            (false, _) => ButtonShape::RoundedRect(corner_radius),
            (true, false) => ButtonShape::RoundedRect(collapsed_size / 2.0),
            (true, true) => ButtonShape::Circle,
        }
    }
}

/// Renders the button for a snapshot of the loading flag.
///
/// Pure: the same inputs always produce the same tree. Out-of-range
/// values are clamped first, as [`ButtonConfig::sanitized`] does.
pub fn render(config: &ButtonConfig, loading: bool) -> VisualTree {
    let config = &config.clone().sanitized();
    let shape = ButtonShape::select(
        config.wrap_on_loading,
        loading,
        config.corner_radius,
        config.collapsed_size,
    );

    let root = match (loading, config.wrap_on_loading) {
        (false, _) => Node::Frame(frame(
            config,
            shape,
            config.width.map(Length::Fixed).unwrap_or(Length::Fill),
            Length::Fixed(config.height.unwrap_or(DEFAULT_HEIGHT)),
            content_for(config),
        )),
        (true, false) => {
            let (width, height) = config.placeholder_size();
            let collapsed = Length::Fixed(config.collapsed_size);
            Node::Overlay {
                base: Box::new(Node::Frame(frame(
                    config,
                    shape,
                    collapsed,
                    collapsed,
                    Node::Placeholder { width, height },
                ))),
                overlay: Box::new(progress::indicator(config.loading_color)),
            }
        }
        (true, true) => {
            let diameter = Length::Fixed(config.collapsed_size);
            Node::Frame(frame(
                config,
                shape,
                diameter,
                diameter,
                progress::indicator(config.loading_color),
            ))
        }
    };

    VisualTree::new(root)
}

fn frame(config: &ButtonConfig, shape: ButtonShape, width: Length, height: Length, child: Node) -> Frame {
    Frame {
        width,
        height,
        background: Fill::from_colors(&config.background_stops()),
        shape,
        border: Border {
            color: config.border_color.unwrap_or(Color::CLEAR),
            width: config.border_width,
        },
        shadow: DropShadow {
            color: config
                .shadow
                .color
                .map(|color| color.with_opacity(config.shadow.opacity))
                .unwrap_or(Color::CLEAR),
            radius: config.shadow.radius,
            offset: config.shadow.offset,
        },
        child: Box::new(child),
    }
}

/// A button bound to a host-owned loading flag and action
#[derive(Clone)]
pub struct FlexButton {
    config: ButtonConfig,
    loading: LoadingState,
    action: Action,
}

impl FlexButton {
    pub fn new(config: ButtonConfig, loading: LoadingState, action: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self {
            config: config.sanitized(),
            loading,
            action: Arc::new(action),
        }
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Replaces the configuration; takes effect on the next render
    pub fn set_config(&mut self, config: ButtonConfig) {
        self.config = config.sanitized();
    }

    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    /// Reads the flag once and renders for that value
    pub fn render(&self) -> RenderedButton {
        let loading = self.loading.get();
        debug!(
            "Rendering button {:?} ({})",
            self.config.title.as_deref().unwrap_or("<untitled>"),
            if loading { "loading" } else { "idle" }
        );
        RenderedButton {
            tree: render(&self.config, loading),
            loading,
            action: Arc::clone(&self.action),
        }
    }
}

impl std::fmt::Debug for FlexButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlexButton")
            .field("config", &self.config)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

/// Result of one render pass; taps on it report that pass's flag value
#[derive(Clone)]
pub struct RenderedButton {
    pub tree: VisualTree,
    loading: bool,
    action: Action,
}

impl RenderedButton {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Delivers one activation to the host. Never touches the flag.
    pub fn activate(&self) {
        debug!("Button activated while {}", if self.loading { "loading" } else { "idle" });
        (self.action)(self.loading);
    }
}

impl std::fmt::Debug for RenderedButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedButton")
            .field("tree", &self.tree)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Curve;
    use std::sync::Mutex;

    #[test]
    fn test_shape_selection() {
        assert_eq!(ButtonShape::select(false, false, 10.0, 60.0), ButtonShape::RoundedRect(10.0));
        assert_eq!(ButtonShape::select(true, false, 10.0, 60.0), ButtonShape::RoundedRect(10.0));
        assert_eq!(ButtonShape::select(false, true, 10.0, 60.0), ButtonShape::RoundedRect(30.0));
        assert_eq!(ButtonShape::select(true, true, 10.0, 60.0), ButtonShape::Circle);
    }

    #[test]
    fn test_idle_render_frame() {
        let mut config = ButtonConfig::titled("Submit").gradient(vec![Color::RED, Color::ORANGE]);
        config.border_color = Some(Color::WHITE);
        config.border_width = 2.0;
        config.shadow.color = Some(Color::BLACK);

        let tree = render(&config, false);
        let frame = tree.frame().unwrap();
        assert_eq!(frame.width, Length::Fill);
        assert_eq!(frame.height, Length::Fixed(50.0));
        assert_eq!(frame.shape, ButtonShape::RoundedRect(10.0));
        assert_eq!(frame.background, Fill::LinearGradient(vec![Color::RED, Color::ORANGE]));
        assert_eq!(frame.border, Border { color: Color::WHITE, width: 2.0 });
        assert_eq!(frame.shadow.color, Color::BLACK.with_opacity(0.5));
        assert_eq!(frame.shadow.radius, 5.0);
        assert!(!tree.contains_progress());
    }

    #[test]
    fn test_idle_render_without_border_or_shadow_color() {
        let tree = render(&ButtonConfig::titled("Plain"), false);
        let frame = tree.frame().unwrap();
        assert_eq!(frame.border.color, Color::CLEAR);
        assert!(frame.shadow.color.is_transparent());
        assert_eq!(frame.background, Fill::Solid(Color::BLUE));
    }

    #[test]
    fn test_loading_collapse_keeps_placeholder() {
        let config = ButtonConfig::titled("Submit").size(200.0, 44.0);
        let tree = render(&config, true);

        assert!(tree.contains_progress());
        assert!(tree.texts().is_empty());
        assert_eq!(tree.placeholder(), Some((200.0, 44.0)));

        let frame = tree.frame().unwrap();
        assert_eq!(frame.width, Length::Fixed(60.0));
        assert_eq!(frame.height, Length::Fixed(60.0));
        assert_eq!(frame.shape, ButtonShape::RoundedRect(30.0));
        assert!(matches!(tree.root, Node::Overlay { .. }));
    }

    #[test]
    fn test_loading_wrap_becomes_circle() {
        let config = ButtonConfig::titled("Sync").wrap_on_loading(true);
        let tree = render(&config, true);

        let frame = tree.frame().unwrap();
        assert_eq!(frame.shape, ButtonShape::Circle);
        assert!(tree.placeholder().is_none());
        assert!(tree.texts().is_empty());
        assert!(tree.contains_progress());
        assert_eq!(frame.child.unwrapped(), &Node::Progress(crate::tree::ProgressRing::new(Color::WHITE)));
    }

    #[test]
    fn test_loading_wrap_circle_uses_collapsed_diameter() {
        let mut config = ButtonConfig::titled("Sync").size(220.0, 44.0).wrap_on_loading(true);
        config.collapsed_size = 48.0;

        let frame = render(&config, true).frame().cloned().unwrap();
        assert_eq!(frame.width, Length::Fixed(48.0));
        assert_eq!(frame.height, Length::Fixed(48.0));
        assert_eq!(frame.shape, ButtonShape::Circle);
    }

    #[test]
    fn test_loading_collapse_square_follows_collapsed_size() {
        let mut config = ButtonConfig::titled("Submit");
        config.collapsed_size = 80.0;
        config.corner_radius = 4.0;

        let tree = render(&config, true);
        let frame = tree.frame().unwrap();
        assert_eq!(frame.width, Length::Fixed(80.0));
        assert_eq!(frame.height, Length::Fixed(80.0));
        assert_eq!(frame.shape, ButtonShape::RoundedRect(40.0));
        // Idle footprint is unaffected by the collapsed size
        assert_eq!(tree.placeholder(), Some((60.0, 50.0)));
    }

    #[test]
    fn test_render_clamps_unsanitized_config() {
        let mut config = ButtonConfig::titled("Submit");
        config.collapsed_size = -60.0;
        config.shadow.color = Some(Color::BLACK);
        config.shadow.opacity = f32::NAN;

        let tree = render(&config, true);
        let frame = tree.frame().unwrap();
        assert_eq!(frame.width, Length::Fixed(0.0));
        assert_eq!(frame.height, Length::Fixed(0.0));
        assert_eq!(frame.shape, ButtonShape::RoundedRect(0.0));
        assert_eq!(frame.shadow.color, Color::BLACK.with_opacity(0.5));
    }

    #[test]
    fn test_loading_overlay_transition() {
        let tree = render(&ButtonConfig::default(), true);
        let transition = tree.transition().unwrap();
        assert_eq!(transition.duration, 0.3);
        assert_eq!(transition.curve, Curve::EaseInOut);
    }

    #[test]
    fn test_activation_reports_snapshot() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&calls);
        let loading = LoadingState::new(false);
        let button = FlexButton::new(ButtonConfig::titled("Go"), loading.clone(), move |state| {
            recorder.lock().unwrap().push(state);
        });

        let idle = button.render();
        loading.set(true);
        // A tap on the stale render still reports the value it was drawn with
        idle.activate();

        let busy = button.render();
        busy.activate();
        busy.activate();

        assert_eq!(*calls.lock().unwrap(), vec![false, true, true]);
        // The shell never writes the flag
        assert!(loading.get());
    }

    #[test]
    fn test_new_sanitizes_config() {
        let mut config = ButtonConfig::default();
        config.shadow.opacity = -0.5;
        let button = FlexButton::new(config, LoadingState::default(), |_| {});
        assert_eq!(button.config().shadow.opacity, 0.0);
    }
}
