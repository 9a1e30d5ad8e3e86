use std::fmt::Write;

use tracing::warn;

use crate::application::render::types::RenderError;
use crate::domain::{ImageSection, ImageSource, ListSection, SECTION_KINDS, Section, TextSection};

use super::blocks::render_block;
use super::embed::RenderContext;
use super::styles::format_styles;

/// Content width of a top-level section row when its styles leave it unset.
pub(super) const DEFAULT_SECTION_WIDTH: &str = "100%";

/// Appends the table-row fragment for one top-level section to `out`.
/// Unknown sections contribute nothing.
pub(super) fn render_section(
    out: &mut String,
    section: &Section,
    context: &mut RenderContext,
) -> Result<(), RenderError> {
    match section {
        Section::Header(text) | Section::Paragraph(text) | Section::Footer(text) => {
            render_text(out, section.kind(), text)
        }
        Section::List(list) => render_list(out, list),
        Section::Image(image) => render_image(out, image, context),
        Section::Block(block) => render_block(out, block, context),
        Section::Unknown { kind } => {
            warn!(
                target = "application::render::sections",
                section_type = kind.as_deref().unwrap_or("<missing>"),
                expected = ?SECTION_KINDS,
                "Invalid section type; skipping section"
            );
            Ok(())
        }
    }
}

fn render_text(out: &mut String, class: &str, text: &TextSection) -> Result<(), RenderError> {
    let css = format_styles(&text.styles);
    let width = text.styles.width_or(DEFAULT_SECTION_WIDTH);
    let content = text.content.replace('\n', "<br>");
    write!(
        out,
        r#"<tr><td class="{class}" style="{css}" width="{width}">{content}</td></tr>"#
    )?;
    Ok(())
}

fn render_list(out: &mut String, list: &ListSection) -> Result<(), RenderError> {
    let css = format_styles(&list.styles);
    let width = list.styles.width_or(DEFAULT_SECTION_WIDTH);
    write!(
        out,
        r#"<tr><td class="content" style="{css}" width="{width}"><ul style="padding-left: 20px;">"#
    )?;
    for item in &list.items {
        write!(out, r#"<li style="margin-bottom: 10px;">{item}</li>"#)?;
    }
    out.push_str("</ul></td></tr>");
    Ok(())
}

fn render_image(
    out: &mut String,
    section: &ImageSection,
    context: &RenderContext,
) -> Result<(), RenderError> {
    let css = format_styles(&section.styles);
    let width = section.styles.width_or(DEFAULT_SECTION_WIDTH);
    write!(out, r#"<tr><td class="content" style="{css}" width="{width}">"#)?;
    match context.data_uri(&section.image)? {
        Some(uri) => write_image_tag(out, &uri, &section.image)?,
        None => write_missing_image(out, &section.image)?,
    }
    out.push_str("</td></tr>");
    Ok(())
}

/// `<img>` with dimensions mirrored in both attributes and inline style.
pub(super) fn write_image_tag(
    out: &mut String,
    src: &str,
    image: &ImageSource,
) -> Result<(), RenderError> {
    let (alt, width, height) = (&image.alt, image.width(), image.height());
    write!(
        out,
        r#"<img src="{src}" alt="{alt}" width="{width}" height="{height}" style="width: {width}; height: {height};">"#
    )?;
    Ok(())
}

pub(super) fn write_missing_image(
    out: &mut String,
    image: &ImageSource,
) -> Result<(), RenderError> {
    write!(out, "<p>Image not found: {}</p>", image.alt)?;
    Ok(())
}
