//! Renders declarative email documents into self-contained HTML emails.
//!
//! A [`Document`](domain::Document) is an ordered list of sections (headers,
//! paragraphs, lists, images and multi-column blocks). The render service
//! turns it into table-based HTML with images either inlined as base64 data
//! URIs or referenced by Content-ID, and returns the manifest of Content-ID
//! images that the mail transport must attach.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
