//! Domain layer: the declarative email document and its style maps.

pub mod document;
pub mod styles;

pub use document::{
    BlockSection, COLUMN_KINDS, Column, Document, ImageColumn, ImageSection, ImageSource, Layout,
    LinkColumn, ListSection, Row, SECTION_KINDS, Section, TextColumn, TextSection,
};
pub use styles::{StyleMap, WIDTH_KEY};
