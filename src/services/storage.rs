//! Blob storage client for uploaded images and files.
//!
//! Objects live under an entity-scoped folder, named after the base64 of
//! the owning record id, so a re-upload for the same record lands on a
//! predictable path and the previous object can be deleted first.

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

/// Object folders, one per entity image/file family
pub mod folders {
    pub const EVENT_IMAGES: &str = "kultura/images/events";
    pub const MEDIA_IMAGES: &str = "kultura/images/media";
    pub const MEDIA_PHOTOS: &str = "kultura/images/media/photos";
    pub const MEDIA_FILES: &str = "kultura/media";
    pub const HALL_IMAGES: &str = "kultura/images/museum/halls";
    pub const SECTION_IMAGES: &str = "kultura/images/museum/sections";
}

/// Narrow upload contract the services depend on
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `content` for the record `id` under `folder`, deleting the
    /// prior object referenced by `old_url` if present. Returns the public
    /// URL of the new object.
    async fn upload(
        &self,
        folder: &str,
        id: i32,
        old_url: Option<&str>,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<String>;
}

/// Firebase storage bucket accessed through the Cloud Storage JSON API
pub struct FirebaseStorage {
    client: reqwest::Client,
    bucket: String,
    api_base: String,
    api_token: Option<String>,
}

impl FirebaseStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            bucket: config.bucket.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }

    fn public_url(&self, object: &str) -> String {
        format!("{}/{}/{}", self.api_base, self.bucket, object)
    }

    /// Recover the object path from a public URL of this bucket
    fn object_from_public_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&format!("{}/{}/", self.api_base, self.bucket))
            .map(str::to_string)
    }

    async fn delete_object(&self, object: &str) -> AppResult<()> {
        let url = format!(
            "{}/storage/v1/b/{}/o/{}",
            self.api_base,
            self.bucket,
            urlencoding::encode(object)
        );
        let mut request = self.client.delete(&url);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "delete of {} returned {}",
                object,
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FirebaseStorage {
    async fn upload(
        &self,
        folder: &str,
        id: i32,
        old_url: Option<&str>,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<String> {
        if let Some(old_url) = old_url {
            match self.object_from_public_url(old_url) {
                Some(object) => {
                    if let Err(e) = self.delete_object(&object).await {
                        tracing::warn!("Failed to delete previous blob {}: {}", object, e);
                    }
                }
                None => {
                    tracing::warn!("Previous blob URL {} is not in bucket {}", old_url, self.bucket)
                }
            }
        }

        let object = object_name(folder, id, filename);
        let url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.api_base,
            self.bucket,
            urlencoding::encode(&object)
        );

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "upload of {} returned {}",
                object,
                response.status()
            )));
        }

        tracing::debug!("Uploaded blob {}", object);
        Ok(self.public_url(&object))
    }
}

/// `{folder}/{base64(id)}.{extension}`
fn object_name(folder: &str, id: i32, filename: &str) -> String {
    let uid = base64::engine::general_purpose::STANDARD.encode(id.to_string());
    let ext = filename.rsplit('.').next().unwrap_or("bin");
    format!("{}/{}.{}", folder, uid, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> FirebaseStorage {
        FirebaseStorage::new(&StorageConfig {
            bucket: "kultura-test".to_string(),
            api_base: "https://storage.googleapis.com".to_string(),
            api_token: None,
        })
    }

    #[test]
    fn object_name_is_keyed_by_id_and_extension() {
        // base64("12") == "MTI="
        assert_eq!(
            object_name(folders::EVENT_IMAGES, 12, "poster.png"),
            "kultura/images/events/MTI=.png"
        );
        // extension survives dotted filenames
        assert_eq!(
            object_name(folders::MEDIA_FILES, 12, "annual.report.pdf"),
            "kultura/media/MTI=.pdf"
        );
    }

    #[test]
    fn same_id_maps_to_same_object() {
        let first = object_name(folders::MEDIA_IMAGES, 7, "a.jpg");
        let second = object_name(folders::MEDIA_IMAGES, 7, "b.jpg");
        assert_eq!(first, second);
    }

    #[test]
    fn object_path_recovered_from_public_url() {
        let storage = storage();
        let url = storage.public_url("kultura/images/events/MTI=.png");
        assert_eq!(
            storage.object_from_public_url(&url).as_deref(),
            Some("kultura/images/events/MTI=.png")
        );
    }

    #[test]
    fn foreign_urls_are_rejected() {
        let storage = storage();
        assert_eq!(
            storage.object_from_public_url("https://example.com/other/thing.png"),
            None
        );
    }
}
