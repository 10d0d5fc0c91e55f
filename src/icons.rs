use serde::{Deserialize, Serialize};
use tracing::warn;

/// Material icon style used when resolving an icon handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    #[default]
    Filled,
    Outlined,
    Sharp,
    TwoTone,
}

impl IconStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            IconStyle::Filled => "filled",
            IconStyle::Outlined => "outlined",
            IconStyle::Sharp => "sharp",
            IconStyle::TwoTone => "two_tone",
        }
    }
}

/// Named icon handle; the host toolkit turns it into pixels
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub struct IconRef {
    pub style: IconStyle,
    pub name: String,
}

impl IconRef {
    pub fn new(style: IconStyle, name: impl Into<String>) -> Self {
        Self {
            style,
            name: name.into(),
        }
    }

    /// Parses an icon specification: "style:name" or just "name" (defaults to filled)
    pub fn parse(spec: &str) -> Self {
        let (style, name) = match spec.find(':') {
            Some(colon_pos) => (&spec[..colon_pos], &spec[colon_pos + 1..]),
            None => ("filled", spec),
        };

        let style = match style {
            "filled" => IconStyle::Filled,
            "outlined" => IconStyle::Outlined,
            "sharp" => IconStyle::Sharp,
            "two_tone" => IconStyle::TwoTone,
            other => {
                warn!("Unknown icon style: {}, using filled:{}", other, name);
                IconStyle::Filled
            }
        };

        Self::new(style, name.to_lowercase())
    }
}

impl From<String> for IconRef {
    fn from(spec: String) -> Self {
        IconRef::parse(&spec)
    }
}

impl From<IconRef> for String {
    fn from(icon: IconRef) -> Self {
        icon.to_string()
    }
}

impl std::fmt::Display for IconRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.style.as_str(), self.name)
    }
}
