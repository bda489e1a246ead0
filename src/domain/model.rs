use serde::{Deserialize, Serialize};

/// Root of a deck configuration file: `{"presentation": [ ... ]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub presentation: Vec<SlideDescriptor>,
}

/// One entry of the `presentation` array.
///
/// Only `type` is required here. `title` and `content` are checked once the
/// type is known, so entries of unknown types may carry any other keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
}

/// Recognized slide type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Text,
    List,
    Picture,
    Plot,
}

impl SlideKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "title" => Some(SlideKind::Title),
            "text" => Some(SlideKind::Text),
            "list" => Some(SlideKind::List),
            "picture" => Some(SlideKind::Picture),
            "plot" => Some(SlideKind::Plot),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Text => "text",
            SlideKind::List => "list",
            SlideKind::Picture => "picture",
            SlideKind::Plot => "plot",
        }
    }
}

/// A bullet of a `list` slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    pub level: u8,
}

/// Axis labels of a `plot` slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotConfiguration {
    #[serde(rename = "x-label")]
    pub x_label: String,
    #[serde(rename = "y-label")]
    pub y_label: String,
}
