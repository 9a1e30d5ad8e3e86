mod blocks;
mod embed;
mod sections;
mod shell;
mod styles;

use std::{sync::Arc, time::Instant};

use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;
use tracing::info;

use crate::application::render::types::{RenderError, RenderService, RenderedEmail};
use crate::config::{DEFAULT_LAYOUT_WIDTH, DEFAULT_TITLE};
use crate::domain::Document;

use self::embed::RenderContext;
use self::sections::render_section;

pub use embed::{MimePolicy, content_id, encode_data_uri};
pub use styles::format_styles;

/// Table-based email renderer. Holds only immutable options; the inline-image
/// manifest is created inside each `render` call and returned with the HTML.
#[derive(Debug, Clone)]
pub struct EmailRenderService {
    config: RenderPipelineConfig,
}

impl EmailRenderService {
    pub fn new(config: RenderPipelineConfig) -> Self {
        Self { config }
    }
}

static RENDER_SERVICE: Lazy<Arc<EmailRenderService>> =
    Lazy::new(|| Arc::new(EmailRenderService::new(active_render_config())));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<EmailRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl Default for EmailRenderService {
    fn default() -> Self {
        Self::new(RenderPipelineConfig::default())
    }
}

impl RenderService for EmailRenderService {
    fn render(&self, document: &Document) -> Result<RenderedEmail, RenderError> {
        let started_at = Instant::now();
        let mut context = RenderContext::new(self.config.mime_policy);

        let mut body = String::new();
        for section in &document.sections {
            render_section(&mut body, section, &mut context)?;
        }

        let title = document
            .title
            .as_deref()
            .unwrap_or(&self.config.default_title);
        let layout_width = document
            .layout_width()
            .unwrap_or(&self.config.default_layout_width);
        let html = shell::assemble(title, layout_width, &body)?;
        let inline_images = context.into_inline_images();

        info!(
            target = "application::render",
            op = "render::email",
            sections = document.sections.len(),
            skipped_sections = document
                .sections
                .iter()
                .filter(|section| !section.is_recognized())
                .count(),
            inline_images = inline_images.len(),
            html_bytes = html.len(),
            elapsed = ?started_at.elapsed(),
            "Email rendered"
        );

        Ok(RenderedEmail {
            html,
            inline_images,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPipelineConfig {
    pub default_title: String,
    pub default_layout_width: String,
    pub mime_policy: MimePolicy,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            default_layout_width: DEFAULT_LAYOUT_WIDTH.to_string(),
            mime_policy: MimePolicy::default(),
        }
    }
}

impl From<&crate::config::RenderSettings> for RenderPipelineConfig {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            default_title: settings.default_title.clone(),
            default_layout_width: settings.default_layout_width.clone(),
            mime_policy: if settings.guess_mime_type {
                MimePolicy::GuessFromExtension
            } else {
                MimePolicy::Jpeg
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render service already configured")]
    AlreadyConfigured,
}

static RENDER_PIPELINE_CONFIG: OnceCell<RenderPipelineConfig> = OnceCell::new();

pub fn configure_render_service(config: RenderPipelineConfig) -> Result<(), RenderConfigError> {
    RENDER_PIPELINE_CONFIG
        .set(config)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

fn active_render_config() -> RenderPipelineConfig {
    RENDER_PIPELINE_CONFIG.get().cloned().unwrap_or_default()
}
