use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::domain::Document;

/// Content-ID → source path for images referenced as `cid:` from the HTML.
///
/// Built fresh for every render call and handed back with the markup so the
/// MIME layer can attach each file as an inline part. Never shared between
/// renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InlineImages(IndexMap<String, PathBuf>);

impl InlineImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `cid → path`, returning the path previously registered under
    /// the same content-id, if any.
    pub fn register(
        &mut self,
        cid: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Option<PathBuf> {
        self.0.insert(cid.into(), path.into())
    }

    pub fn get(&self, cid: &str) -> Option<&Path> {
        self.0.get(cid).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.0.iter().map(|(cid, path)| (cid.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a successful render: the complete HTML document plus the
/// manifest of images that must travel as MIME inline parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub html: String,
    pub inline_images: InlineImages,
}

/// Failures that abort a render. Missing image files are not errors; they
/// degrade to a fallback fragment instead.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read image `{}`: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write markup: {0}")]
    Format(#[from] fmt::Error),
}

impl RenderError {
    pub(crate) fn image(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

/// Trait exposed by the rendering pipeline. Implementations hold no per-call
/// state: every render builds its own inline-image manifest.
pub trait RenderService: Send + Sync {
    fn render(&self, document: &Document) -> Result<RenderedEmail, RenderError>;
}
