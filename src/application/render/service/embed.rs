//! Image embedding: inline base64 data URIs and Content-ID references.
//!
//! The two modes are chosen by the call site, never by a shared switch:
//! image sections and icon columns inline the bytes, image columns inside a
//! block are referenced by content-id and attached by the MIME layer.

use std::{fs, io, path::Path};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::{debug, warn};

use crate::application::render::types::{InlineImages, RenderError};
use crate::domain::ImageSource;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// How the media type of an inlined image is declared in its data URI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MimePolicy {
    /// Always declare `image/jpeg`, whatever the file actually holds.
    #[default]
    Jpeg,
    /// Guess from the file extension, falling back to `image/jpeg`.
    GuessFromExtension,
}

impl MimePolicy {
    fn mime_for(self, path: &Path) -> &'static str {
        match self {
            MimePolicy::Jpeg => DEFAULT_IMAGE_MIME,
            MimePolicy::GuessFromExtension => mime_guess::from_path(path)
                .first_raw()
                .filter(|mime| mime.starts_with("image/"))
                .unwrap_or(DEFAULT_IMAGE_MIME),
        }
    }
}

/// Reads `path` and encodes it as a `data:<mime>;base64,<payload>` URI.
pub fn encode_data_uri(path: &Path, policy: MimePolicy) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let mime = policy.mime_for(path);
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Derives the content-id for `path`: its base name with every `.` replaced
/// by `_` (`images/logo.png` → `logo_png`).
pub fn content_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    name.replace('.', "_")
}

/// Per-render state: the embedding policy and the manifest being built.
pub(crate) struct RenderContext {
    mime_policy: MimePolicy,
    inline_images: InlineImages,
}

impl RenderContext {
    pub(crate) fn new(mime_policy: MimePolicy) -> Self {
        Self {
            mime_policy,
            inline_images: InlineImages::new(),
        }
    }

    /// Inline base64 mode. Returns `None` when the file does not exist.
    pub(crate) fn data_uri(&self, image: &ImageSource) -> Result<Option<String>, RenderError> {
        let Some(path) = locate(image)? else {
            return Ok(None);
        };
        let uri = encode_data_uri(path, self.mime_policy)
            .map_err(|err| RenderError::image(path, err))?;
        debug!(
            target = "application::render::embed",
            src = %path.display(),
            encoded_bytes = uri.len(),
            "Image inlined as data URI"
        );
        Ok(Some(uri))
    }

    /// Content-ID mode. Registers the file and returns its `cid:` reference,
    /// or `None` when the file does not exist.
    pub(crate) fn cid_reference(
        &mut self,
        image: &ImageSource,
    ) -> Result<Option<String>, RenderError> {
        let Some(path) = locate(image)? else {
            return Ok(None);
        };
        let cid = content_id(path);
        if let Some(previous) = self.inline_images.register(cid.clone(), path) {
            if previous != path {
                warn!(
                    target = "application::render::embed",
                    cid = %cid,
                    previous = %previous.display(),
                    src = %path.display(),
                    "Content-ID already registered; replacing attachment"
                );
            }
        }
        Ok(Some(format!("cid:{cid}")))
    }

    pub(crate) fn into_inline_images(self) -> InlineImages {
        self.inline_images
    }
}

/// Only "does not exist" is soft; any other probe failure aborts the render.
fn locate(image: &ImageSource) -> Result<Option<&Path>, RenderError> {
    let path = Path::new(&image.src);
    match path.try_exists() {
        Ok(true) => Ok(Some(path)),
        Ok(false) => {
            warn!(
                target = "application::render::embed",
                src = %image.src,
                alt = %image.alt,
                "Image file not found; rendering fallback text"
            );
            Ok(None)
        }
        Err(err) => Err(RenderError::image(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn image(src: &Path) -> ImageSource {
        ImageSource {
            src: src.to_string_lossy().into_owned(),
            alt: "Alt".into(),
            ..ImageSource::default()
        }
    }

    #[test]
    fn data_uri_round_trips_file_bytes() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("photo.png");
        let bytes: Vec<u8> = (0..=255).collect();
        fs::write(&path, &bytes).expect("write image");

        let uri = encode_data_uri(&path, MimePolicy::Jpeg).expect("encode");
        let payload = uri
            .strip_prefix("data:image/jpeg;base64,")
            .expect("jpeg data uri even for png files");
        assert_eq!(STANDARD.decode(payload).expect("valid base64"), bytes);
    }

    #[test]
    fn extension_policy_guesses_image_types() {
        assert_eq!(
            MimePolicy::GuessFromExtension.mime_for(Path::new("a/logo.png")),
            "image/png"
        );
        assert_eq!(
            MimePolicy::GuessFromExtension.mime_for(Path::new("notes.txt")),
            "image/jpeg"
        );
        assert_eq!(
            MimePolicy::GuessFromExtension.mime_for(Path::new("no-extension")),
            "image/jpeg"
        );
        assert_eq!(MimePolicy::Jpeg.mime_for(Path::new("logo.gif")), "image/jpeg");
    }

    #[test]
    fn content_id_replaces_dots_in_base_name() {
        assert_eq!(content_id(Path::new("assets/img/logo.v2.png")), "logo_v2_png");
        assert_eq!(content_id(Path::new("banner.jpg")), "banner_jpg");
    }

    #[test]
    fn missing_file_yields_none_without_registration() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("missing.png");
        let mut context = RenderContext::new(MimePolicy::Jpeg);

        assert!(context.data_uri(&image(&missing)).expect("soft miss").is_none());
        assert!(
            context
                .cid_reference(&image(&missing))
                .expect("soft miss")
                .is_none()
        );
        assert!(context.into_inline_images().is_empty());
    }

    #[test]
    fn cid_reference_registers_source_path() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("hero.jpg");
        fs::write(&path, b"jpeg").expect("write image");
        let mut context = RenderContext::new(MimePolicy::Jpeg);

        let reference = context.cid_reference(&image(&path)).expect("registered");
        assert_eq!(reference.as_deref(), Some("cid:hero_jpg"));

        let images = context.into_inline_images();
        assert_eq!(images.get("hero_jpg"), Some(path.as_path()));
    }

    #[test]
    fn same_base_name_keeps_last_path() {
        let dir = TempDir::new().expect("temp dir");
        let first: PathBuf = dir.path().join("a");
        let second: PathBuf = dir.path().join("b");
        fs::create_dir_all(&first).expect("dir a");
        fs::create_dir_all(&second).expect("dir b");
        fs::write(first.join("logo.png"), b"1").expect("write a");
        fs::write(second.join("logo.png"), b"2").expect("write b");
        let mut context = RenderContext::new(MimePolicy::Jpeg);

        context
            .cid_reference(&image(&first.join("logo.png")))
            .expect("first");
        context
            .cid_reference(&image(&second.join("logo.png")))
            .expect("second");

        let images = context.into_inline_images();
        assert_eq!(images.len(), 1);
        assert_eq!(images.get("logo_png"), Some(second.join("logo.png").as_path()));
    }

    #[test]
    fn unreadable_existing_path_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let context = RenderContext::new(MimePolicy::Jpeg);

        let err = context
            .data_uri(&image(dir.path()))
            .expect_err("directories cannot be read as images");
        assert!(matches!(err, RenderError::Image { .. }));
    }
}
