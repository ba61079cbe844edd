//! File-system store for avatar images
//!
//! Files are written as `<uuid><ext>` under `<upload_dir>/avatars` and
//! referenced by the public path `/uploads/avatars/<name>`, which is what the
//! static file route serves and what the users table stores.

use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{BuzzerError, Result};

/// Largest accepted avatar, in bytes.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

const AVATAR_SUBDIR: &str = "avatars";

/// An uploaded image as received from a multipart form
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: bytes::Bytes,
}

pub fn is_allowed_content_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&content_type.as_str())
}

#[derive(Debug, Clone)]
pub struct AvatarStore {
    root: PathBuf,
}

impl AvatarStore {
    /// `upload_dir` is the directory served under [`PUBLIC_PREFIX`].
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.root
    }

    /// Check size and content type without touching the disk.
    pub fn validate(&self, upload: &AvatarUpload) -> Result<()> {
        if upload.data.len() > MAX_AVATAR_BYTES {
            return Err(BuzzerError::InvalidUpload {
                message: "avatar must be at most 5MB".to_string(),
            });
        }
        if upload.data.is_empty() {
            return Err(BuzzerError::InvalidUpload {
                message: "avatar file is empty".to_string(),
            });
        }
        match upload.content_type.as_deref() {
            Some(ct) if is_allowed_content_type(ct) => Ok(()),
            _ => Err(BuzzerError::InvalidUpload {
                message: "only JPG, PNG and WEBP images are supported".to_string(),
            }),
        }
    }

    /// Validate and write the image; returns its public reference path.
    pub async fn save(&self, upload: &AvatarUpload) -> Result<String> {
        self.validate(upload)?;

        let dir = self.root.join(AVATAR_SUBDIR);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!(
            "{}{}",
            Uuid::new_v4(),
            extension_of(upload.file_name.as_deref())
        );
        tokio::fs::write(dir.join(&file_name), &upload.data).await?;
        debug!(file = %file_name, bytes = upload.data.len(), "avatar stored");

        Ok(format!("{PUBLIC_PREFIX}/{AVATAR_SUBDIR}/{file_name}"))
    }

    /// Delete a previously saved avatar by reference. Missing files and
    /// references outside the avatar directory are ignored.
    pub async fn delete(&self, reference: &str) -> Result<()> {
        let Some(path) = self.resolve(reference) else {
            if !reference.is_empty() {
                warn!(reference, "refusing to delete avatar outside upload dir");
            }
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Map `/uploads/avatars/<name>` to a file path, rejecting traversal.
    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let name = reference
            .strip_prefix(PUBLIC_PREFIX)?
            .strip_prefix('/')?
            .strip_prefix(AVATAR_SUBDIR)?
            .strip_prefix('/')?;

        let is_plain_name = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        is_plain_name.then(|| self.root.join(AVATAR_SUBDIR).join(name))
    }
}

/// Extension of the client file name including the dot, or "" when absent.
fn extension_of(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
