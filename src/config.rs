use crate::color::Color;
use crate::icons::IconRef;
use crate::work::Work;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

// Gallery used by the demo host when FLEX_BUTTON_CONFIG is not set
const EMBEDDED_CONFIG: &str = include_str!("../gallery.yaml");

pub const DEFAULT_HEIGHT: f32 = 50.0;
pub const DEFAULT_PLACEHOLDER_WIDTH: f32 = 60.0;

/// Placement of the icon relative to the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Row, icon first
    #[default]
    Left,
    /// Row, title first
    Right,
    /// Column, icon first
    Top,
    /// Column, title first
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f32,
    pub leading: f32,
    pub bottom: f32,
    pub trailing: f32,
}

impl EdgeInsets {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            leading: value,
            bottom: value,
            trailing: value,
        }
    }

    fn sanitized(self, field: &str) -> Self {
        Self {
            top: non_negative(self.top, field),
            leading: non_negative(self.leading, field),
            bottom: non_negative(self.bottom, field),
            trailing: non_negative(self.trailing, field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Medium,
    Semibold,
    #[default]
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontDesign {
    Default,
    #[default]
    Rounded,
    Monospaced,
    Serif,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FontDescriptor {
    pub size: f32,
    pub weight: FontWeight,
    pub design: FontDesign,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            size: 16.0,
            weight: FontWeight::Bold,
            design: FontDesign::Rounded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Shadow {
    /// No shadow is drawn when absent
    pub color: Option<Color>,
    pub radius: f32,
    pub offset: (f32, f32),
    pub opacity: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: None,
            radius: 5.0,
            offset: (0.0, 2.0),
            opacity: 0.5,
        }
    }
}

/// Static visual configuration of a flex button
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub gradient_colors: Option<Vec<Color>>,
    pub icon: Option<IconRef>,
    pub icon_color: Color,
    pub icon_size: f32,
    pub title: Option<String>,
    pub font: FontDescriptor,
    pub title_color: Color,
    pub background_color: Color,
    pub border_color: Option<Color>,
    pub border_width: f32,
    pub corner_radius: f32,
    pub shadow: Shadow,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub icon_padding: EdgeInsets,
    pub title_padding: EdgeInsets,
    pub alignment: Alignment,
    pub wrap_on_loading: bool,
    pub loading_color: Color,
    /// Side of the square (or diameter of the circle) while loading
    pub collapsed_size: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            gradient_colors: None,
            icon: None,
            icon_color: Color::WHITE,
            icon_size: 24.0,
            title: None,
            font: FontDescriptor::default(),
            title_color: Color::WHITE,
            background_color: Color::BLUE,
            border_color: None,
            border_width: 0.0,
            corner_radius: 10.0,
            shadow: Shadow::default(),
            width: None,
            height: None,
            icon_padding: EdgeInsets::default(),
            title_padding: EdgeInsets::default(),
            alignment: Alignment::Left,
            wrap_on_loading: false,
            loading_color: Color::WHITE,
            collapsed_size: 60.0,
        }
    }
}

impl ButtonConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn gradient(mut self, colors: Vec<Color>) -> Self {
        self.gradient_colors = Some(colors);
        self
    }

    pub fn wrap_on_loading(mut self, wrap: bool) -> Self {
        self.wrap_on_loading = wrap;
        self
    }

    /// Gradient stops, falling back to the flat background color
    pub fn background_stops(&self) -> Vec<Color> {
        match &self.gradient_colors {
            Some(colors) if !colors.is_empty() => colors.clone(),
            _ => vec![self.background_color],
        }
    }

    /// Idle footprint reserved by the loading placeholder
    pub fn placeholder_size(&self) -> (f32, f32) {
        (
            self.width.unwrap_or(DEFAULT_PLACEHOLDER_WIDTH),
            self.height.unwrap_or(DEFAULT_HEIGHT),
        )
    }

    /// Clamps sizes to be non-negative and shadow opacity into [0, 1]
    pub fn sanitized(mut self) -> Self {
        self.icon_size = non_negative(self.icon_size, "icon_size");
        self.font.size = non_negative(self.font.size, "font.size");
        self.border_width = non_negative(self.border_width, "border_width");
        self.corner_radius = non_negative(self.corner_radius, "corner_radius");
        self.collapsed_size = non_negative(self.collapsed_size, "collapsed_size");
        self.shadow.radius = non_negative(self.shadow.radius, "shadow.radius");
        self.width = self.width.map(|w| non_negative(w, "width"));
        self.height = self.height.map(|h| non_negative(h, "height"));
        self.icon_padding = self.icon_padding.sanitized("icon_padding");
        self.title_padding = self.title_padding.sanitized("title_padding");

        self.shadow.offset = (
            finite_or_zero(self.shadow.offset.0, "shadow.offset.x"),
            finite_or_zero(self.shadow.offset.1, "shadow.offset.y"),
        );

        if self.shadow.opacity.is_nan() {
            let fallback = Shadow::default().opacity;
            warn!("shadow.opacity is NaN, using {}", fallback);
            self.shadow.opacity = fallback;
        } else if !(0.0..=1.0).contains(&self.shadow.opacity) {
            warn!("shadow.opacity {} out of range, clamping to [0, 1]", self.shadow.opacity);
            self.shadow.opacity = self.shadow.opacity.clamp(0.0, 1.0);
        }
        self
    }
}

fn non_negative(value: f32, field: &str) -> f32 {
    if !value.is_finite() {
        warn!("{} is not finite ({}), using 0", field, value);
        0.0
    } else if value < 0.0 {
        warn!("{} is negative ({}), clamping to 0", field, value);
        0.0
    } else {
        value
    }
}

fn finite_or_zero(value: f32, field: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        warn!("{} is not finite ({}), using 0", field, value);
        0.0
    }
}

/// Button definition in a gallery file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ButtonEntry {
    pub name: String,
    #[serde(default)]
    pub work: Work,
    #[serde(flatten)]
    pub style: ButtonConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GalleryConfig {
    pub name: String,
    pub buttons: Vec<ButtonEntry>,
}

pub fn parse_config(yaml: &str) -> Result<GalleryConfig> {
    let mut config: GalleryConfig = serde_yaml::from_str(yaml)?;
    for entry in &mut config.buttons {
        entry.style = std::mem::take(&mut entry.style).sanitized();
    }
    Ok(config)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<GalleryConfig> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read gallery config {}", path.display()))?;
    tracing::info!("Using configuration from {}", path.display());
    parse_config(&yaml).with_context(|| format!("Failed to parse gallery config {}", path.display()))
}

/// Loads the file named by `FLEX_BUTTON_CONFIG`, or the embedded gallery
pub fn load_config() -> Result<GalleryConfig> {
    match std::env::var("FLEX_BUTTON_CONFIG") {
        Ok(path) => load_config_from(path),
        Err(_) => {
            tracing::info!("Using embedded configuration");
            parse_config(EMBEDDED_CONFIG).context("Failed to parse embedded gallery config")
        }
    }
}
