//! Declarative email document: sections, block rows and columns.
//!
//! Section and column kinds are closed sets selected by the `type` field.
//! Anything unrecognised (including a missing `type`) deserialises into the
//! `Unknown` variant instead of failing, and renders to nothing.

use serde::Deserialize;
use serde_yaml::Value;

use super::styles::{StyleMap, optional_text, or_default, text, text_list, value_text};

/// Section kinds the renderer understands, in documentation order.
pub const SECTION_KINDS: [&str; 6] = ["header", "paragraph", "footer", "list", "image", "block"];

/// Column kinds allowed inside a block row.
pub const COLUMN_KINDS: [&str; 4] = ["icon", "text", "link", "image"];

const DEFAULT_IMAGE_WIDTH: &str = "100%";
const DEFAULT_IMAGE_HEIGHT: &str = "auto";

/// Root of a rendered email.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "optional_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub layout: Layout,
    #[serde(deserialize_with = "or_default")]
    pub sections: Vec<Section>,
}

impl Document {
    pub fn layout_width(&self) -> Option<&str> {
        self.layout.width.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Layout {
    #[serde(deserialize_with = "optional_text")]
    pub width: Option<String>,
}

/// A top-level content block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Section {
    Header(TextSection),
    Paragraph(TextSection),
    Footer(TextSection),
    List(ListSection),
    Image(ImageSection),
    Block(BlockSection),
    /// Unrecognised or missing `type`; carries the raw name when present.
    Unknown { kind: Option<String> },
}

impl Section {
    /// The `type` tag this section was declared with.
    pub fn kind(&self) -> &str {
        match self {
            Section::Header(_) => "header",
            Section::Paragraph(_) => "paragraph",
            Section::Footer(_) => "footer",
            Section::List(_) => "list",
            Section::Image(_) => "image",
            Section::Block(_) => "block",
            Section::Unknown { kind } => kind.as_deref().unwrap_or(""),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Section::Unknown { .. })
    }
}

impl TryFrom<Value> for Section {
    type Error = serde_yaml::Error;

    /// Only recognised kinds have their fields read; anything else becomes
    /// `Unknown` whatever shape its fields take.
    fn try_from(node: Value) -> Result<Self, Self::Error> {
        let kind = type_tag(&node);
        let section = match kind.as_deref() {
            Some("header") => Section::Header(serde_yaml::from_value(node)?),
            Some("paragraph") => Section::Paragraph(serde_yaml::from_value(node)?),
            Some("footer") => Section::Footer(serde_yaml::from_value(node)?),
            Some("list") => Section::List(serde_yaml::from_value(node)?),
            Some("image") => Section::Image(serde_yaml::from_value(node)?),
            Some("block") => Section::Block(serde_yaml::from_value(node)?),
            _ => Section::Unknown { kind },
        };
        Ok(section)
    }
}

fn type_tag(node: &Value) -> Option<String> {
    node.get("type").cloned().and_then(value_text)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextSection {
    #[serde(deserialize_with = "text")]
    pub content: String,
    pub styles: StyleMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListSection {
    #[serde(deserialize_with = "text_list")]
    pub items: Vec<String>,
    pub styles: StyleMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageSection {
    #[serde(flatten)]
    pub image: ImageSource,
    #[serde(default)]
    pub styles: StyleMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockSection {
    #[serde(deserialize_with = "or_default")]
    pub rows: Vec<Row>,
    pub styles: StyleMap,
}

/// File reference shared by image sections, icon columns and image columns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageSource {
    #[serde(deserialize_with = "text")]
    pub src: String,
    #[serde(deserialize_with = "text")]
    pub alt: String,
    #[serde(deserialize_with = "optional_text")]
    pub width: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub height: Option<String>,
}

impl ImageSource {
    pub fn width(&self) -> &str {
        self.width.as_deref().unwrap_or(DEFAULT_IMAGE_WIDTH)
    }

    pub fn height(&self) -> &str {
        self.height.as_deref().unwrap_or(DEFAULT_IMAGE_HEIGHT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Row {
    pub styles: StyleMap,
    #[serde(deserialize_with = "or_default")]
    pub columns: Vec<Column>,
}

/// One cell within a block row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Column {
    Icon(ImageColumn),
    Text(TextColumn),
    Link(LinkColumn),
    Image(ImageColumn),
    Unknown {
        kind: Option<String>,
        styles: StyleMap,
    },
}

impl Column {
    pub fn kind(&self) -> &str {
        match self {
            Column::Icon(_) => "icon",
            Column::Text(_) => "text",
            Column::Link(_) => "link",
            Column::Image(_) => "image",
            Column::Unknown { kind, .. } => kind.as_deref().unwrap_or(""),
        }
    }

    pub fn styles(&self) -> &StyleMap {
        match self {
            Column::Icon(column) | Column::Image(column) => &column.styles,
            Column::Text(column) => &column.styles,
            Column::Link(column) => &column.styles,
            Column::Unknown { styles, .. } => styles,
        }
    }
}

impl TryFrom<Value> for Column {
    type Error = serde_yaml::Error;

    fn try_from(node: Value) -> Result<Self, Self::Error> {
        let kind = type_tag(&node);
        let column = match kind.as_deref() {
            Some("icon") => Column::Icon(serde_yaml::from_value(node)?),
            Some("text") => Column::Text(serde_yaml::from_value(node)?),
            Some("link") => Column::Link(serde_yaml::from_value(node)?),
            Some("image") => Column::Image(serde_yaml::from_value(node)?),
            _ => Column::Unknown {
                styles: node
                    .get("styles")
                    .cloned()
                    .and_then(|styles| serde_yaml::from_value(styles).ok())
                    .unwrap_or_default(),
                kind,
            },
        };
        Ok(column)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageColumn {
    #[serde(flatten)]
    pub image: ImageSource,
    #[serde(default)]
    pub styles: StyleMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextColumn {
    #[serde(deserialize_with = "text")]
    pub content: String,
    pub styles: StyleMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkColumn {
    #[serde(deserialize_with = "optional_text")]
    pub href: Option<String>,
    #[serde(deserialize_with = "text")]
    pub content: String,
    pub styles: StyleMap,
}
