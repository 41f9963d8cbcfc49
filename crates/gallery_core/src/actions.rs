//! Per-item actions handed off to the host environment.

use async_trait::async_trait;
use shared::domain::DocumentRecord;
use url::Url;

use crate::error::GalleryResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Open,
    Download,
    Print,
    Delete,
}

impl ItemAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemAction::Open => "open",
            ItemAction::Download => "download",
            ItemAction::Print => "print",
            ItemAction::Delete => "delete",
        }
    }
}

/// Facilities the surrounding platform provides for a document url.
#[async_trait]
pub trait HostPlatform: Send + Sync {
    /// Show the document in a new browsing context.
    async fn open_in_new_context(&self, item: &DocumentRecord, url: &Url) -> GalleryResult<()>;

    async fn download(
        &self,
        item: &DocumentRecord,
        url: &Url,
        file_name: &str,
    ) -> GalleryResult<()>;

    async fn print(&self, item: &DocumentRecord, url: &Url) -> GalleryResult<()>;
}

/// File name offered to the platform when saving `item`.
pub fn suggested_file_name(item: &DocumentRecord) -> String {
    let base = item
        .name
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.trim().is_empty())
        .unwrap_or("file");

    if base.to_ascii_lowercase().ends_with(".pdf") {
        base.to_string()
    } else {
        format!("{base}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn named(name: &str) -> DocumentRecord {
        DocumentRecord::new(name, Utc::now(), 0)
    }

    #[test]
    fn suggested_names_are_plain_pdf_files() {
        assert_eq!(suggested_file_name(&named("scan.pdf")), "scan.pdf");
        assert_eq!(suggested_file_name(&named("SCAN.PDF")), "SCAN.PDF");
        assert_eq!(suggested_file_name(&named("scan_0042")), "scan_0042.pdf");
        assert_eq!(suggested_file_name(&named("2021/tax.pdf")), "tax.pdf");
        assert_eq!(suggested_file_name(&named("..\\evil")), "evil.pdf");
        assert_eq!(suggested_file_name(&named("dir/")), "file.pdf");
    }
}
