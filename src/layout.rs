//! Icon and title arrangement inside the button.

use crate::config::{Alignment, ButtonConfig, EdgeInsets};
use crate::tree::{Axis, IconNode, Node, TextNode};

impl Alignment {
    /// Stack axis and whether the icon comes first
    pub fn arrangement(self) -> (Axis, bool) {
        match self {
            Alignment::Left => (Axis::Row, true),
            Alignment::Right => (Axis::Row, false),
            Alignment::Top => (Axis::Column, true),
            Alignment::Bottom => (Axis::Column, false),
        }
    }
}

/// Arranges an optional icon and title according to `alignment`.
///
/// Each present element is wrapped in its own padding. With neither
/// element the result is a flexible [`Node::Spacer`] so the surrounding
/// frame keeps its size.
pub fn layout(
    icon: Option<IconNode>,
    title: Option<TextNode>,
    alignment: Alignment,
    icon_padding: EdgeInsets,
    title_padding: EdgeInsets,
) -> Node {
    if icon.is_none() && title.is_none() {
        return Node::Spacer;
    }

    let icon = icon.map(|icon| Node::Padded {
        insets: icon_padding,
        child: Box::new(Node::Icon(icon)),
    });
    let title = title.map(|title| Node::Padded {
        insets: title_padding,
        child: Box::new(Node::Text(title)),
    });

    let (axis, icon_first) = alignment.arrangement();
    let children: Vec<Node> = if icon_first {
        icon.into_iter().chain(title).collect()
    } else {
        title.into_iter().chain(icon).collect()
    };

    Node::Stack { axis, children }
}

/// Builds the content layout for a button's idle state
pub fn content_for(config: &ButtonConfig) -> Node {
    let icon = config.icon.clone().map(|icon| IconNode {
        icon,
        size: config.icon_size,
        tint: config.icon_color,
    });
    let title = config.title.clone().map(|content| TextNode {
        content,
        font: config.font,
        color: config.title_color,
    });

    layout(icon, title, config.alignment, config.icon_padding, config.title_padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::FontDescriptor;
    use crate::icons::IconRef;
    use crate::tree::{Slot, VisualTree};

    fn icon() -> IconNode {
        IconNode {
            icon: IconRef::parse("send"),
            size: 24.0,
            tint: Color::WHITE,
        }
    }

    fn title() -> TextNode {
        TextNode {
            content: "Submit".to_string(),
            font: FontDescriptor::default(),
            color: Color::WHITE,
        }
    }

    fn arrange(alignment: Alignment) -> (Axis, Vec<Slot>) {
        let node = layout(
            Some(icon()),
            Some(title()),
            alignment,
            EdgeInsets::default(),
            EdgeInsets::default(),
        );
        VisualTree::new(node).stack_axis_and_order().unwrap()
    }

    #[test]
    fn test_alignment_truth_table() {
        assert_eq!(arrange(Alignment::Left), (Axis::Row, vec![Slot::Icon, Slot::Title]));
        assert_eq!(arrange(Alignment::Right), (Axis::Row, vec![Slot::Title, Slot::Icon]));
        assert_eq!(arrange(Alignment::Top), (Axis::Column, vec![Slot::Icon, Slot::Title]));
        assert_eq!(arrange(Alignment::Bottom), (Axis::Column, vec![Slot::Title, Slot::Icon]));
    }

    #[test]
    fn test_empty_content_is_spacer() {
        for alignment in [Alignment::Left, Alignment::Right, Alignment::Top, Alignment::Bottom] {
            let node = layout(None, None, alignment, EdgeInsets::all(4.0), EdgeInsets::all(4.0));
            assert_eq!(node, Node::Spacer);

            let tree = VisualTree::new(node);
            assert!(tree.texts().is_empty());
            assert!(tree.icons().is_empty());
        }
    }

    #[test]
    fn test_single_element_keeps_axis() {
        let node = layout(
            None,
            Some(title()),
            Alignment::Top,
            EdgeInsets::default(),
            EdgeInsets::default(),
        );
        assert_eq!(
            VisualTree::new(node).stack_axis_and_order(),
            Some((Axis::Column, vec![Slot::Title]))
        );
    }

    #[test]
    fn test_padding_is_applied_per_element() {
        let node = layout(
            Some(icon()),
            Some(title()),
            Alignment::Left,
            EdgeInsets::all(2.0),
            EdgeInsets::all(6.0),
        );
        let Node::Stack { children, .. } = node else {
            panic!("Expected stack");
        };
        match (&children[0], &children[1]) {
            (Node::Padded { insets: a, .. }, Node::Padded { insets: b, .. }) => {
                assert_eq!(*a, EdgeInsets::all(2.0));
                assert_eq!(*b, EdgeInsets::all(6.0));
            }
            _ => panic!("Expected padded children"),
        }
    }

    #[test]
    fn test_content_for_uses_config() {
        let config = ButtonConfig::titled("Pay")
            .icon(IconRef::parse("credit_card"))
            .alignment(Alignment::Bottom);
        let tree = VisualTree::new(content_for(&config));

        assert_eq!(tree.texts()[0].content, "Pay");
        assert_eq!(tree.icons()[0].size, 24.0);
        assert_eq!(tree.icons()[0].tint, config.icon_color);
        assert_eq!(
            tree.stack_axis_and_order(),
            Some((Axis::Column, vec![Slot::Title, Slot::Icon]))
        );
    }
}
