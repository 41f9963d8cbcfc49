//! Gallery controller: owns the state, runs loads and per-item actions, and
//! publishes a snapshot after every transition.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::{DocumentRecord, SortKey};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{error, info, warn};

use crate::{
    actions::{suggested_file_name, HostPlatform, ItemAction},
    client::{DeleteResponse, GalleryApi},
    error::{GalleryError, GalleryResult},
    pagination::PageNav,
    reducer::{reduce, GalleryAction},
    state::GalleryState,
};

const UPDATE_CHANNEL_CAPACITY: usize = 64;

pub struct GalleryController {
    api: Arc<dyn GalleryApi>,
    platform: Arc<dyn HostPlatform>,
    state: Mutex<GalleryState>,
    next_load_seq: AtomicU64,
    updates: broadcast::Sender<Arc<GalleryState>>,
}

impl GalleryController {
    pub fn new(
        api: Arc<dyn GalleryApi>,
        platform: Arc<dyn HostPlatform>,
        items_per_row: usize,
    ) -> Arc<Self> {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            platform,
            state: Mutex::new(GalleryState::new(items_per_row)),
            next_load_seq: AtomicU64::new(0),
            updates,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<GalleryState>> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> GalleryState {
        self.state.lock().await.clone()
    }

    /// Applies one reducer step under the state lock and publishes the result.
    pub async fn dispatch(&self, action: GalleryAction) -> Arc<GalleryState> {
        let snapshot = {
            let mut guard = self.state.lock().await;
            let current = std::mem::take(&mut *guard);
            *guard = reduce(current, action);
            Arc::new(guard.clone())
        };
        let _ = self.updates.send(snapshot.clone());
        snapshot
    }

    /// Initial load; the state stays in its loading phase until this completes.
    pub async fn start(&self) -> Arc<GalleryState> {
        self.load().await
    }

    pub async fn refresh(&self) -> Arc<GalleryState> {
        self.load().await
    }

    /// Fetches the full collection. Failures are logged and recorded in the
    /// state; they never propagate.
    pub async fn load(&self) -> Arc<GalleryState> {
        let seq = self.next_load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        info!(seq, url = %self.api.endpoints().list_url(), "loading documents");

        let action = match self.api.list_documents().await {
            Ok(items) => {
                info!(seq, count = items.len(), "documents loaded");
                GalleryAction::LoadSucceeded { seq, items }
            }
            Err(err) => {
                error!(seq, error = %err, "failed to load documents");
                GalleryAction::LoadFailed {
                    seq,
                    message: err.to_string(),
                }
            }
        };
        self.dispatch(action).await
    }

    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.refresh().await;
        })
    }

    pub async fn sort_by(&self, key: SortKey) -> Arc<GalleryState> {
        self.dispatch(GalleryAction::SortBy(key)).await
    }

    pub async fn filter_by_name(&self, pattern: impl Into<String>) -> Arc<GalleryState> {
        self.dispatch(GalleryAction::FilterByName(pattern.into())).await
    }

    pub async fn set_page(&self, page: usize) -> Arc<GalleryState> {
        self.navigate(PageNav::To(page)).await
    }

    pub async fn navigate(&self, nav: PageNav) -> Arc<GalleryState> {
        self.dispatch(GalleryAction::Navigate(nav)).await
    }

    async fn find(&self, name: &str) -> GalleryResult<DocumentRecord> {
        self.state
            .lock()
            .await
            .find(name)
            .cloned()
            .ok_or_else(|| GalleryError::UnknownDocument(name.to_string()))
    }

    pub async fn open(&self, name: &str) -> GalleryResult<()> {
        let item = self.find(name).await?;
        let url = self.api.endpoints().view_url(&item.name)?;
        info!(name = %item.name, %url, "opening document");
        self.platform.open_in_new_context(&item, &url).await
    }

    pub async fn download(&self, name: &str) -> GalleryResult<()> {
        let item = self.find(name).await?;
        let url = self.api.endpoints().download_url(&item.name)?;
        let file_name = suggested_file_name(&item);
        info!(name = %item.name, %url, file_name, "downloading document");
        self.platform.download(&item, &url, &file_name).await
    }

    pub async fn print(&self, name: &str) -> GalleryResult<()> {
        let item = self.find(name).await?;
        let url = self.api.endpoints().view_url(&item.name)?;
        info!(name = %item.name, %url, "printing document");
        self.platform.print(&item, &url).await
    }

    /// Issues the delete and then reloads exactly once, whatever the outcome.
    pub async fn delete(&self, name: &str) -> GalleryResult<DeleteResponse> {
        let item = self.find(name).await?;
        let outcome = self.api.delete_document(&item.name).await;

        match &outcome {
            Ok(response) if response.is_success() => {
                info!(
                    name = %item.name,
                    status = response.status,
                    body = %response.body,
                    "delete answered"
                );
            }
            Ok(response) => {
                warn!(
                    name = %item.name,
                    status = response.status,
                    body = %response.body,
                    "delete rejected by backend"
                );
            }
            Err(err) => {
                warn!(name = %item.name, error = %err, "delete request failed");
            }
        }

        self.load().await;
        outcome
    }

    pub fn spawn_delete(
        self: &Arc<Self>,
        name: String,
    ) -> JoinHandle<GalleryResult<DeleteResponse>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.delete(&name).await })
    }

    pub async fn perform(&self, action: ItemAction, name: &str) -> GalleryResult<()> {
        match action {
            ItemAction::Open => self.open(name).await,
            ItemAction::Download => self.download(name).await,
            ItemAction::Print => self.print(name).await,
            ItemAction::Delete => self.delete(name).await.map(|_| ()),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
