//! Desktop implementation of the gallery's host facilities.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use gallery_core::{GalleryApi, GalleryError, GalleryResult, HostPlatform};
use shared::domain::DocumentRecord;
use tokio::process::Command;
use tracing::info;
use url::Url;

pub struct SystemPlatform {
    api: Arc<dyn GalleryApi>,
    download_dir: PathBuf,
    print_command: String,
}

impl SystemPlatform {
    pub fn new(api: Arc<dyn GalleryApi>, download_dir: PathBuf, print_command: String) -> Self {
        Self {
            api,
            download_dir,
            print_command,
        }
    }
}

fn platform_error(
    action: &'static str,
    item: &DocumentRecord,
    reason: impl ToString,
) -> GalleryError {
    GalleryError::Platform {
        action,
        name: item.name.clone(),
        reason: reason.to_string(),
    }
}

/// Splits a configured command line such as `lp -d office` into program and
/// leading arguments.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

#[async_trait]
impl HostPlatform for SystemPlatform {
    async fn open_in_new_context(&self, item: &DocumentRecord, url: &Url) -> GalleryResult<()> {
        open::that_detached(url.as_str()).map_err(|err| platform_error("open", item, err))
    }

    async fn download(
        &self,
        item: &DocumentRecord,
        url: &Url,
        file_name: &str,
    ) -> GalleryResult<()> {
        let bytes = self.api.fetch_document(url).await?;
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|err| platform_error("download", item, err))?;

        let target = self.download_dir.join(file_name);
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|err| platform_error("download", item, err))?;
        info!(name = %item.name, path = %target.display(), bytes = bytes.len(), "document saved");
        println!("saved {}", target.display());
        Ok(())
    }

    async fn print(&self, item: &DocumentRecord, url: &Url) -> GalleryResult<()> {
        let (program, args) = split_command(&self.print_command)
            .ok_or_else(|| platform_error("print", item, "no print command configured"))?;
        let bytes = self.api.fetch_document(url).await?;

        let spool = tempfile::Builder::new()
            .prefix("gallery-print-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|err| platform_error("print", item, err))?;
        tokio::fs::write(spool.path(), &bytes)
            .await
            .map_err(|err| platform_error("print", item, err))?;

        run_print_command(program, &args, spool.path())
            .await
            .map_err(|reason| platform_error("print", item, reason))?;
        info!(name = %item.name, program, "document sent to printer");
        Ok(())
    }
}

async fn run_print_command(program: &str, args: &[&str], file: &Path) -> Result<(), String> {
    let status = Command::new(program)
        .args(args)
        .arg(file)
        .status()
        .await
        .map_err(|err| format!("failed to run '{program}': {err}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("'{program}' exited with {status}"))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{extract::Path as UrlPath, routing::get, Router};
    use chrono::Utc;
    use gallery_core::HttpGalleryClient;
    use shared::protocol::Endpoints;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve_document(UrlPath(name): UrlPath<String>) -> Vec<u8> {
        format!("%PDF-1.4 {name}").into_bytes()
    }

    async fn spawn_backend() -> Result<String, std::io::Error> {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = Router::new()
            .route("/scans/view/:name", get(serve_document))
            .route("/scans/download/:name", get(serve_document));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{addr}/scans/"))
    }

    fn platform_for(base: &str, download_dir: PathBuf, print_command: &str) -> SystemPlatform {
        let api = HttpGalleryClient::with_timeout(
            Endpoints::parse(base).expect("endpoints"),
            Duration::from_secs(5),
        )
        .expect("client");
        SystemPlatform::new(Arc::new(api), download_dir, print_command.to_string())
    }

    fn scan(name: &str) -> DocumentRecord {
        DocumentRecord::new(name, Utc::now(), 0)
    }

    #[test]
    fn splits_print_command_into_program_and_args() {
        assert_eq!(split_command("lp"), Some(("lp", vec![])));
        assert_eq!(
            split_command("  lp -d office  "),
            Some(("lp", vec!["-d", "office"]))
        );
        assert_eq!(split_command("   "), None);
    }

    #[tokio::test]
    async fn download_saves_served_bytes_into_download_dir() {
        let base = spawn_backend().await.expect("spawn backend");
        let dir = tempfile::tempdir().expect("temp dir");
        let target_dir = dir.path().join("scans");
        let platform = platform_for(&base, target_dir.clone(), "lp");

        let item = scan("march report.pdf");
        let url = platform
            .api
            .endpoints()
            .download_url(&item.name)
            .expect("url");
        platform
            .download(&item, &url, "march report.pdf")
            .await
            .expect("download");

        let saved = std::fs::read(target_dir.join("march report.pdf")).expect("saved file");
        assert_eq!(saved, b"%PDF-1.4 march report.pdf".to_vec());
    }

    #[tokio::test]
    async fn download_reports_backend_failures() {
        let base = spawn_backend().await.expect("spawn backend");
        let dir = tempfile::tempdir().expect("temp dir");
        let platform = platform_for(&base, dir.path().to_path_buf(), "lp");

        let item = scan("a.pdf");
        let url = platform.api.endpoints().base().join("gone/a.pdf").expect("url");
        let err = platform
            .download(&item, &url, "a.pdf")
            .await
            .expect_err("404 must fail");
        assert!(matches!(err, GalleryError::Status { .. }), "got {err}");
        assert!(!dir.path().join("a.pdf").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn print_spools_document_through_the_configured_command() {
        let base = spawn_backend().await.expect("spawn backend");
        let dir = tempfile::tempdir().expect("temp dir");
        let item = scan("a.pdf");

        let printing = platform_for(&base, dir.path().to_path_buf(), "true");
        let url = printing.api.endpoints().view_url(&item.name).expect("url");
        printing.print(&item, &url).await.expect("print");

        let failing = platform_for(&base, dir.path().to_path_buf(), "false");
        let err = failing.print(&item, &url).await.expect_err("non-zero exit");
        assert!(
            matches!(&err, GalleryError::Platform { action: "print", name, .. } if name == "a.pdf"),
            "got {err}"
        );

        let unset = platform_for(&base, dir.path().to_path_buf(), "  ");
        let err = unset.print(&item, &url).await.expect_err("no command");
        assert!(matches!(err, GalleryError::Platform { .. }), "got {err}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn print_command_failures_are_reported() {
        let tmp = tempfile::NamedTempFile::new().expect("temp file");
        assert!(run_print_command("true", &[], tmp.path()).await.is_ok());

        let err = run_print_command("false", &[], tmp.path())
            .await
            .expect_err("non-zero exit");
        assert!(err.contains("'false' exited"), "{err}");

        let err = run_print_command("definitely-not-a-print-command", &[], tmp.path())
            .await
            .expect_err("missing program");
        assert!(err.starts_with("failed to run"), "{err}");
    }
}
