//! Object storage client
//!
//! Image uploads for post headers and client logos. Photos land under a
//! `YYYY/MM/DD/` date prefix with a ULID filename; logos use a flat ULID
//! key. Buckets are public-read, so an upload yields a stable public URL
//! that goes straight into the content row.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;
use thiserror::Error;
use ulid::Ulid;

use crate::core::config::Backend;

/// Upload ceiling for post photos
pub const MAX_PHOTO_BYTES: u64 = 8 * 1024 * 1024;

/// Upload ceiling for client logos
pub const MAX_LOGO_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions accepted for logo uploads
pub const LOGO_EXTENSIONS: &[&str] = &["png", "svg", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file is too large (limit {limit_mib} MB)")]
    TooLarge { limit_mib: u64 },

    #[error("unsupported file type '.{0}'")]
    UnsupportedType(String),

    #[error("upload to bucket '{bucket}' failed: {reason}")]
    Upload { bucket: String, reason: String },

    #[error("removing '{key}' from bucket '{bucket}' failed: {reason}")]
    Remove {
        bucket: String,
        key: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl StorageClient {
    pub fn new(backend: &Backend) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: backend.url.trim_end_matches('/').to_string(),
            service_key: backend.service_key.clone(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            encode_key(key)
        )
    }

    /// Public URL for a stored object
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            encode_key(key)
        )
    }

    /// Upload raw bytes and return the object's public URL
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .request(Method::POST, self.object_url(bucket, key))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Content-Type", content_type)
            .header("Cache-Control", "max-age=3600")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                bucket: bucket.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload {
                bucket: bucket.to_string(),
                reason: format!("{status}: {}", body.trim()),
            });
        }

        Ok(self.public_url(bucket, key))
    }

    /// Delete a stored object
    pub async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .request(Method::DELETE, self.object_url(bucket, key))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| StorageError::Remove {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(StorageError::Remove {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: response.status().to_string(),
            });
        }
        Ok(())
    }
}

/// Characters that must not appear raw in an object-URL path segment
const KEY_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Percent-encode a key, keeping `/` separators intact
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| utf8_percent_encode(segment, KEY_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Lowercased extension of a filename, if it has one
pub fn extension_of(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    let ext = &name[dot + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// MIME type for the image extensions the site uses
pub fn content_type_for(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Date-prefixed key for a photo upload: `YYYY/MM/DD/<ulid>.<ext>`
pub fn photo_key(now: DateTime<Utc>, ext: &str) -> String {
    format!("{}/{}.{}", now.format("%Y/%m/%d"), Ulid::new(), ext)
}

/// Flat key for a logo upload: `<ulid>.<ext>`
pub fn logo_key(ext: &str) -> String {
    format!("{}.{}", Ulid::new(), ext)
}

/// Check photo upload constraints: any image type, at most 8 MB
pub fn validate_photo(len: u64, ext: &str) -> Result<(), StorageError> {
    if content_type_for(ext).is_none() {
        return Err(StorageError::UnsupportedType(ext.to_string()));
    }
    if len > MAX_PHOTO_BYTES {
        return Err(StorageError::TooLarge {
            limit_mib: MAX_PHOTO_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

/// Check logo upload constraints: PNG/SVG/JPEG only, at most 5 MB
pub fn validate_logo(len: u64, ext: &str) -> Result<(), StorageError> {
    if !LOGO_EXTENSIONS.contains(&ext) {
        return Err(StorageError::UnsupportedType(ext.to_string()));
    }
    if len > MAX_LOGO_BYTES {
        return Err(StorageError::TooLarge {
            limit_mib: MAX_LOGO_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

/// Recover the object key from a public URL in the given bucket.
///
/// Stored logo URLs are our own public URLs, so the key is whatever
/// follows the bucket marker; a URL that does not look like one of ours
/// yields `None` and the caller skips object removal.
pub fn key_from_public_url(url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/storage/v1/object/public/{bucket}/");
    let start = url.find(&marker)? + marker.len();
    let key = &url[start..];
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("logo.PNG").as_deref(), Some("png"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_photo_key_shape() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap();
        let key = photo_key(now, "jpg");
        assert!(key.starts_with("2025/03/07/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_validate_photo() {
        assert!(validate_photo(1024, "png").is_ok());
        assert!(matches!(
            validate_photo(1024, "pdf"),
            Err(StorageError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_photo(MAX_PHOTO_BYTES + 1, "png"),
            Err(StorageError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_logo() {
        assert!(validate_logo(1024, "svg").is_ok());
        assert!(validate_logo(1024, "webp").is_err());
        assert!(validate_logo(MAX_LOGO_BYTES + 1, "png").is_err());
    }

    #[test]
    fn test_public_url_and_key_roundtrip() {
        let client = StorageClient::new(&crate::core::config::Backend {
            url: "https://proj.example".to_string(),
            service_key: "sk".to_string(),
        });
        let url = client.public_url("client_logos", "abc.png");
        assert_eq!(
            url,
            "https://proj.example/storage/v1/object/public/client_logos/abc.png"
        );
        assert_eq!(
            key_from_public_url(&url, "client_logos").as_deref(),
            Some("abc.png")
        );
        assert_eq!(key_from_public_url("https://elsewhere.example/x.png", "client_logos"), None);
    }

    #[test]
    fn test_encode_key_keeps_slashes() {
        assert_eq!(encode_key("2025/03/07/a b.png"), "2025/03/07/a%20b.png");
    }
}
