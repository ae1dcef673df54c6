use std::io::{Cursor, Read, Seek, SeekFrom};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum accepted report size in bytes (16 MiB).
pub const MAX_REPORT_SIZE: u64 = 16 * 1024 * 1024;

/// Extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "txt", "png", "jpg", "jpeg"];

/// Synthetic file name used for pasted report text.
pub const MANUAL_INPUT_NAME: &str = "manual_input.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Pdf,
    Text,
    Image,
}

impl MediaKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(MediaKind::Pdf),
            "txt" => Some(MediaKind::Text),
            "png" | "jpg" | "jpeg" => Some(MediaKind::Image),
            _ => None,
        }
    }
}

/// Lowercased extension of `name`, or an empty string when there is none.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// MIME type for a validated file name.
fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// The medical report attached to a session.
///
/// Content sits behind a cursor; [`UploadedReportReference::read_payload`]
/// rewinds before and after reading so the reference stays re-readable for
/// every transmission attempt.
#[derive(Debug, Clone)]
pub struct UploadedReportReference {
    name: String,
    media_kind: MediaKind,
    content_type: &'static str,
    content: Cursor<Vec<u8>>,
}

impl UploadedReportReference {
    /// Validate an uploaded file by name and size, then take ownership of
    /// its bytes.
    pub fn from_upload(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let name = name.into();
        validate_upload(&name, bytes.len() as u64)?;

        let ext = extension_of(&name);
        let media_kind = MediaKind::from_extension(&ext).ok_or_else(|| unsupported(&ext))?;

        Ok(Self {
            content_type: content_type_for(&ext),
            name,
            media_kind,
            content: Cursor::new(bytes),
        })
    }

    /// Wrap manually pasted report text as a `.txt` attachment.
    pub fn from_manual_text(text: &str) -> Result<Self, CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::EmptyReport);
        }
        Self::from_upload(MANUAL_INPUT_NAME, text.as_bytes().to_vec())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_kind(&self) -> MediaKind {
        self.media_kind
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn size(&self) -> u64 {
        self.content.get_ref().len() as u64
    }

    /// Read the whole payload from the start, leaving the cursor rewound.
    pub fn read_payload(&mut self) -> Result<Vec<u8>, CoreError> {
        self.content.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::with_capacity(self.content.get_ref().len());
        self.content.read_to_end(&mut buf)?;
        self.content.seek(SeekFrom::Start(0))?;
        Ok(buf)
    }

    /// Current read position of the underlying cursor.
    pub fn position(&self) -> u64 {
        self.content.position()
    }

    /// Move the cursor without reading, e.g. after a partial consumer.
    pub fn seek_to(&mut self, pos: u64) {
        self.content.set_position(pos);
    }
}

/// Check a file name and size against the upload rules without touching
/// its content.
pub fn validate_upload(name: &str, size: u64) -> Result<(), CoreError> {
    if size > MAX_REPORT_SIZE {
        return Err(CoreError::FileTooLarge {
            size_mb: size as f64 / 1024.0 / 1024.0,
        });
    }

    let ext = extension_of(name);
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(unsupported(&ext));
    }
    Ok(())
}

fn unsupported(ext: &str) -> CoreError {
    CoreError::UnsupportedFileType {
        extension: ext.to_string(),
        allowed: ALLOWED_EXTENSIONS.join(", "),
    }
}
