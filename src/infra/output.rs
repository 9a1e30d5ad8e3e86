//! Writes rendered emails and their inline-image manifests.

use std::{fs, path::Path};

use tracing::info;

use crate::application::render::InlineImages;

use super::error::InfraError;

pub fn write_html(path: &Path, html: &str) -> Result<(), InfraError> {
    ensure_parent(path)?;
    fs::write(path, html)?;
    info!(
        target = "infra::output",
        path = %path.display(),
        bytes = html.len(),
        "HTML file generated"
    );
    Ok(())
}

/// Writes the manifest as a JSON object of `cid → path`, in registration order.
pub fn write_manifest(path: &Path, images: &InlineImages) -> Result<(), InfraError> {
    let json = serde_json::to_string_pretty(images)
        .map_err(|err| InfraError::manifest(err.to_string()))?;
    ensure_parent(path)?;
    fs::write(path, json)?;
    info!(
        target = "infra::output",
        path = %path.display(),
        inline_images = images.len(),
        "Inline image manifest written"
    );
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), InfraError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
