//! Loads email documents from disk.

use std::{fs, path::Path};

use tracing::info;

use crate::domain::Document;

use super::error::InfraError;

/// Reads and parses the document at `path`. YAML and JSON are both accepted.
pub fn load(path: &Path) -> Result<Document, InfraError> {
    let source = fs::read_to_string(path)
        .map_err(|err| InfraError::document(path, format!("failed to read document: {err}")))?;
    let document = parse(&source)
        .map_err(|err| InfraError::document(path, format!("failed to parse document: {err}")))?;

    info!(
        target = "infra::document",
        path = %path.display(),
        sections = document.sections.len(),
        "Document loaded"
    );
    Ok(document)
}

pub fn parse(source: &str) -> Result<Document, serde_yaml::Error> {
    serde_yaml::from_str(source)
}
