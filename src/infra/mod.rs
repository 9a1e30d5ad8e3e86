//! Infrastructure adapters: document loading, output files and telemetry.

pub mod document;
pub mod error;
pub mod output;
pub mod telemetry;
