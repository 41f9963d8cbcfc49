use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{domain::DocumentRecord, protocol::Endpoints};
use tracing::debug;
use url::Url;

use crate::error::{GalleryError, GalleryResult};

/// Backend collaborator for the gallery.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    async fn list_documents(&self) -> GalleryResult<Vec<DocumentRecord>>;

    /// Non-success statuses are reported in the response, not as errors.
    async fn delete_document(&self, name: &str) -> GalleryResult<DeleteResponse>;

    /// Reads the bytes behind one of the `endpoints()` document urls.
    async fn fetch_document(&self, url: &Url) -> GalleryResult<Vec<u8>>;

    fn endpoints(&self) -> &Endpoints;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResponse {
    pub status: u16,
    pub body: String,
}

impl DeleteResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct HttpGalleryClient {
    http: Client,
    endpoints: Endpoints,
}

impl HttpGalleryClient {
    pub fn with_timeout(endpoints: Endpoints, timeout: Duration) -> GalleryResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| GalleryError::Transport {
                url: endpoints.base().to_string(),
                source,
            })?;
        Ok(Self { http, endpoints })
    }

    async fn get(&self, url: Url) -> GalleryResult<Response> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| GalleryError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(response)
    }
}

fn ensure_success(url: &Url, response: Response) -> GalleryResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GalleryError::Status {
            url: url.to_string(),
            status,
        })
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryClient {
    async fn list_documents(&self) -> GalleryResult<Vec<DocumentRecord>> {
        let url = self.endpoints.list_url();
        let response = ensure_success(&url, self.get(url.clone()).await?)?;
        let body = response
            .bytes()
            .await
            .map_err(|source| GalleryError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| GalleryError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn delete_document(&self, name: &str) -> GalleryResult<DeleteResponse> {
        let url = self.endpoints.delete_url(name)?;
        let response = self.get(url.clone()).await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| GalleryError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(DeleteResponse { status, body })
    }

    async fn fetch_document(&self, url: &Url) -> GalleryResult<Vec<u8>> {
        let response = ensure_success(url, self.get(url.clone()).await?)?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| GalleryError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
