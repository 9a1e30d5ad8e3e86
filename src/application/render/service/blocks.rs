use std::fmt::Write;

use tracing::warn;

use crate::application::render::types::RenderError;
use crate::domain::{BlockSection, COLUMN_KINDS, Column, LinkColumn};

use super::embed::RenderContext;
use super::sections::{DEFAULT_SECTION_WIDTH, write_image_tag, write_missing_image};
use super::styles::format_styles;

const DEFAULT_COLUMN_WIDTH: &str = "auto";

const LINK_DEFAULT_HREF: &str = "#";
const LINK_BACKGROUND_KEY: &str = "background-color-link";
const LINK_BACKGROUND_DEFAULT: &str = "none";
const LINK_COLOR_DEFAULT: &str = "#ffffff";
const LINK_FONT_SIZE_DEFAULT: &str = "16px";
const LINK_BORDER_RADIUS_DEFAULT: &str = "16px";
const LINK_HEIGHT_KEY: &str = "button-height";
const LINK_HEIGHT_DEFAULT: &str = "auto";

/// Renders a block section: a nested table with one `<tr>` per row and one
/// cell per recognised column.
pub(super) fn render_block(
    out: &mut String,
    block: &BlockSection,
    context: &mut RenderContext,
) -> Result<(), RenderError> {
    let css = format_styles(&block.styles);
    let width = block.styles.width_or(DEFAULT_SECTION_WIDTH);
    write!(
        out,
        r#"<tr><td class="content" style="{css}" width="{width}"><table width="100%" cellpadding="0" cellspacing="0" border="0">"#
    )?;

    for row in &block.rows {
        write!(out, r#"<tr style="{}">"#, format_styles(&row.styles))?;
        for column in &row.columns {
            render_column(out, column, context)?;
        }
        out.push_str("</tr>");
    }

    out.push_str("</table></td></tr>");
    Ok(())
}

fn render_column(
    out: &mut String,
    column: &Column,
    context: &mut RenderContext,
) -> Result<(), RenderError> {
    let styles = column.styles();
    let css = format_styles(styles);
    let width = styles.width_or(DEFAULT_COLUMN_WIDTH);

    match column {
        Column::Icon(icon) => {
            write!(out, r#"<td class="icon" style="{css}" width="{width}">"#)?;
            match context.data_uri(&icon.image)? {
                Some(uri) => write_image_tag(out, &uri, &icon.image)?,
                None => write_missing_image(out, &icon.image)?,
            }
            out.push_str("</td>");
        }
        Column::Text(text) => {
            write!(
                out,
                r#"<td style="{css}" width="{width}">{}</td>"#,
                text.content
            )?;
        }
        Column::Link(link) => render_link(out, link, &css, width)?,
        Column::Image(image) => {
            write!(out, r#"<td class="image" style="{css}" width="{width}">"#)?;
            match context.cid_reference(&image.image)? {
                Some(reference) => write_image_tag(out, &reference, &image.image)?,
                None => write_missing_image(out, &image.image)?,
            }
            out.push_str("</td>");
        }
        Column::Unknown { kind, .. } => {
            warn!(
                target = "application::render::blocks",
                column_type = kind.as_deref().unwrap_or("<missing>"),
                expected = ?COLUMN_KINDS,
                "Invalid column type; skipping column"
            );
        }
    }
    Ok(())
}

/// A one-cell "button" table wrapping the anchor, styled from the column's
/// style map with fixed fallbacks.
fn render_link(
    out: &mut String,
    link: &LinkColumn,
    css: &str,
    width: &str,
) -> Result<(), RenderError> {
    let styles = &link.styles;
    let background = styles.get_or(LINK_BACKGROUND_KEY, LINK_BACKGROUND_DEFAULT);
    let color = styles.get_or("color", LINK_COLOR_DEFAULT);
    let font_size = styles.get_or("font-size", LINK_FONT_SIZE_DEFAULT);
    let border_radius = styles.get_or("border-radius", LINK_BORDER_RADIUS_DEFAULT);
    let height = styles.get_or(LINK_HEIGHT_KEY, LINK_HEIGHT_DEFAULT);
    let href = link.href.as_deref().unwrap_or(LINK_DEFAULT_HREF);
    let label = &link.content;

    write!(
        out,
        concat!(
            r#"<td class="button-container" style="{css}" width="{width}">"#,
            r#"<table align="center" cellpadding="0" cellspacing="0" border="0"><tr>"#,
            r#"<td class="button" style="background-color: {background}; border-radius: {border_radius}; text-align: center; font-size: {font_size}; height: {height}">"#,
            r#"<a href="{href}" style="color: {color}; display: inline-block; padding: 10px 20px; text-decoration: none;">{label}</a>"#,
            r#"</td></tr></table></td>"#,
        ),
        css = css,
        width = width,
        background = background,
        border_radius = border_radius,
        font_size = font_size,
        height = height,
        href = href,
        color = color,
        label = label,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::service::embed::MimePolicy;
    use crate::domain::{ImageColumn, ImageSource, Row, StyleMap, TextColumn};

    fn render(block: &BlockSection) -> (String, RenderContext) {
        let mut context = RenderContext::new(MimePolicy::Jpeg);
        let mut out = String::new();
        render_block(&mut out, block, &mut context).expect("render block");
        (out, context)
    }

    fn block(columns: Vec<Column>) -> BlockSection {
        BlockSection {
            rows: vec![Row {
                styles: StyleMap::new(),
                columns,
            }],
            styles: StyleMap::new(),
        }
    }

    #[test]
    fn link_column_uses_button_defaults() {
        let (html, _) = render(&block(vec![Column::Link(LinkColumn {
            href: Some("https://x".into()),
            content: "Go".into(),
            styles: StyleMap::new(),
        })]));

        assert!(html.contains(r#"<a href="https://x" style="color: #ffffff;"#));
        assert!(html.contains(">Go</a>"));
        assert!(html.contains("font-size: 16px"));
        assert!(html.contains("border-radius: 16px"));
        assert!(html.contains("background-color: none"));
        assert!(html.contains("height: auto"));
        assert!(html.contains(r#"class="button-container" style="" width="auto""#));
    }

    #[test]
    fn link_column_reads_overrides_from_styles() {
        let (html, _) = render(&block(vec![Column::Link(LinkColumn {
            href: None,
            content: "Shop".into(),
            styles: StyleMap::new()
                .with("background-color-link", "#007BFF")
                .with("color", "#000")
                .with("button-height", "40px")
                .with("width", "30%"),
        })]));

        assert!(html.contains(r##"<a href="#""##));
        assert!(html.contains("background-color: #007BFF"));
        assert!(html.contains("height: 40px"));
        assert!(html.contains("color: #000; display: inline-block"));
        assert!(html.contains(r#"width="30%""#));
    }

    #[test]
    fn text_column_and_row_styles() {
        let section = BlockSection {
            rows: vec![Row {
                styles: StyleMap::new().with("background-color", "#eee"),
                columns: vec![Column::Text(TextColumn {
                    content: "<em>hi</em>".into(),
                    styles: StyleMap::new().with("padding", "4px"),
                })],
            }],
            styles: StyleMap::new().with("padding", "8px"),
        };

        let (html, _) = render(&section);
        assert_eq!(
            html,
            concat!(
                r#"<tr><td class="content" style="padding: 8px" width="100%">"#,
                r#"<table width="100%" cellpadding="0" cellspacing="0" border="0">"#,
                r#"<tr style="background-color: #eee">"#,
                r#"<td style="padding: 4px" width="auto"><em>hi</em></td>"#,
                r#"</tr></table></td></tr>"#,
            )
        );
    }

    #[test]
    fn missing_images_in_columns_fall_back_without_references() {
        let missing = ImageSource {
            src: "nowhere/pic.png".into(),
            alt: "Pic".into(),
            ..ImageSource::default()
        };
        let (html, context) = render(&block(vec![
            Column::Icon(ImageColumn {
                image: missing.clone(),
                styles: StyleMap::new(),
            }),
            Column::Image(ImageColumn {
                image: missing,
                styles: StyleMap::new(),
            }),
        ]));

        assert_eq!(html.matches("<p>Image not found: Pic</p>").count(), 2);
        assert!(!html.contains("cid:"));
        assert!(!html.contains("data:"));
        assert!(context.into_inline_images().is_empty());
    }

    #[test]
    fn unknown_columns_are_skipped() {
        let (html, _) = render(&block(vec![Column::Unknown {
            kind: Some("video".into()),
            styles: StyleMap::new(),
        }]));

        assert!(html.contains(r#"<tr style=""></tr>"#));
        assert!(!html.contains("<td style"));
    }
}
