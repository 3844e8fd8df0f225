// Webinar submission form: draft, attachment checks and validation

use std::path::{Path, PathBuf};

use mime::Mime;
use thiserror::Error;

/// Categories offered by the submission form
pub const CATEGORIES: [&str; 7] = [
    "Développement Web",
    "Design Front-end",
    "Programmation",
    "Backend",
    "API",
    "Qualité logicielle",
    "DevOps",
];

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Description is required")]
    MissingDescription,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Please select an image file ({0} is {1})")]
    NotAnImage(String, String),

    #[error("Please select a video file ({0} is {1})")]
    NotAVideo(String, String),

    #[error("File is too large: {name} ({size} bytes, max {max_mb}MB)")]
    TooLarge { name: String, size: u64, max_mb: u64 },

    #[error("Cannot read {0}: {1}")]
    Unreadable(String, String),
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: PathBuf,
    pub mime: Mime,
    pub size: u64,
}

impl Attachment {
    /// Inspect a file on disk; the content type comes from its extension
    pub fn from_path(path: &Path) -> Result<Self, FormError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| FormError::Unreadable(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            mime: guess_mime(path),
            size: metadata.len(),
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn check(&self, kind: mime::Name<'_>, max: u64) -> Result<(), FormError> {
        if self.mime.type_() != kind {
            let name = self.file_name();
            let essence = self.mime.essence_str().to_string();
            return Err(if kind == mime::IMAGE {
                FormError::NotAnImage(name, essence)
            } else {
                FormError::NotAVideo(name, essence)
            });
        }

        if self.size > max {
            return Err(FormError::TooLarge {
                name: self.file_name(),
                size: self.size,
                max_mb: max / (1024 * 1024),
            });
        }

        Ok(())
    }
}

pub fn guess_mime(path: &Path) -> Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}

/// Resolve a category typed by the user against the fixed list
pub fn resolve_category(input: &str) -> Result<&'static str, FormError> {
    let wanted = input.trim().to_lowercase();
    CATEGORIES
        .iter()
        .find(|c| c.to_lowercase() == wanted)
        .copied()
        .ok_or_else(|| FormError::UnknownCategory(input.trim().to_string()))
}

/// Webinar submission being filled in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebinarDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: Option<Attachment>,
    pub video: Option<Attachment>,
}

impl WebinarDraft {
    /// Attach an image, rejecting anything that is not image/* under 5MB
    pub fn set_image(&mut self, path: &Path) -> Result<(), FormError> {
        let attachment = Attachment::from_path(path)?;
        attachment.check(mime::IMAGE, MAX_IMAGE_BYTES)?;
        self.image = Some(attachment);
        Ok(())
    }

    /// Attach a video, rejecting anything that is not video/* under 50MB
    pub fn set_video(&mut self, path: &Path) -> Result<(), FormError> {
        let attachment = Attachment::from_path(path)?;
        attachment.check(mime::VIDEO, MAX_VIDEO_BYTES)?;
        self.video = Some(attachment);
        Ok(())
    }

    /// First failing field, in form order
    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(FormError::MissingDescription);
        }
        resolve_category(&self.category)?;

        if let Some(image) = &self.image {
            image.check(mime::IMAGE, MAX_IMAGE_BYTES)?;
        }
        if let Some(video) = &self.video {
            video.check(mime::VIDEO, MAX_VIDEO_BYTES)?;
        }

        Ok(())
    }
}
