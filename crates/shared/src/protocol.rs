//! Backend resource layout: every route is a GET relative to one base url.

use url::Url;

use crate::error::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://damlfvkdmp.cfolks.pl/myscans/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRoute {
    View,
    Download,
    Delete,
}

impl DocumentRoute {
    pub fn segment(self) -> &'static str {
        match self {
            DocumentRoute::View => "view",
            DocumentRoute::Download => "download",
            DocumentRoute::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parses `raw` as the backend base. A missing trailing slash is added so
    /// that routes are resolved beneath the base path instead of replacing its
    /// last segment.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let invalid = |reason: String| ValidationError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason,
        };

        let mut base = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("url cannot be used as a base".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn list_url(&self) -> Url {
        self.base.clone()
    }

    pub fn view_url(&self, name: &str) -> Result<Url, ValidationError> {
        self.document_url(DocumentRoute::View, name)
    }

    pub fn download_url(&self, name: &str) -> Result<Url, ValidationError> {
        self.document_url(DocumentRoute::Download, name)
    }

    pub fn delete_url(&self, name: &str) -> Result<Url, ValidationError> {
        self.document_url(DocumentRoute::Delete, name)
    }

    /// `{base}/{route}/{name}` with `name` encoded as a single path segment.
    pub fn document_url(&self, route: DocumentRoute, name: &str) -> Result<Url, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyDocumentName);
        }

        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(route.segment()).push(name);
        }
        Ok(url)
    }
}
