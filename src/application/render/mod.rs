//! Email rendering pipeline.
//!
//! The pipeline is pure apart from reading image files: it accepts a parsed
//! [`Document`](crate::domain::Document), produces deterministic HTML and
//! returns the inline-image manifest alongside it. Writing files and MIME
//! assembly happen in the caller.

mod service;
mod types;

pub use service::{
    EmailRenderService, MimePolicy, RenderConfigError, RenderPipelineConfig,
    configure_render_service, content_id, encode_data_uri, format_styles, render_service,
};
pub use types::{InlineImages, RenderError, RenderService, RenderedEmail};
