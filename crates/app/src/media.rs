//! Media host client for dish and storefront images.

use async_trait::async_trait;
use clap::Args;
use mockall::automock;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use thiserror::Error;

/// A successfully hosted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Canonical HTTPS URL of the hosted image.
    pub secure_url: String,
}

/// Errors that can occur when talking to the media host.
#[derive(Debug, Error)]
pub enum MediaError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The media host returned a non-2xx response or unexpected body.
    #[error("unexpected response from media host: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload an image and return its hosted location.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadedImage, MediaError>;
}

/// Configuration for the Cloudinary unsigned-upload endpoint.
#[derive(Debug, Clone, Args)]
pub struct MediaConfig {
    /// Cloudinary cloud name.
    #[arg(long = "media-cloud-name", env = "CLOUDINARY_CLOUD_NAME", default_value = "demo")]
    pub cloud_name: String,

    /// Unsigned upload preset name.
    #[arg(
        long = "media-upload-preset",
        env = "CLOUDINARY_UPLOAD_PRESET",
        default_value = "unsigned"
    )]
    pub upload_preset: String,

    /// Upload endpoint; derived from the cloud name when omitted.
    #[arg(long = "media-api-url", env = "CLOUDINARY_API_URL")]
    pub api_url: Option<String>,
}

impl MediaConfig {
    /// The endpoint uploads are posted to.
    #[must_use]
    pub fn upload_url(&self) -> String {
        self.api_url.clone().unwrap_or_else(|| {
            format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.cloud_name
            )
        })
    }
}

/// HTTP client for Cloudinary unsigned uploads.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    config: MediaConfig,
    http: Client,
}

impl CloudinaryClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: MediaConfig) -> Self {
        CloudinaryClient {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadedImage, MediaError> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename.to_owned()))
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .http
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaError::UnexpectedResponse(format!(
                "upload failed with status {status}: {text}"
            )));
        }

        let parsed: UploadResponse = response.json().await?;

        Ok(UploadedImage {
            secure_url: parsed.secure_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}
