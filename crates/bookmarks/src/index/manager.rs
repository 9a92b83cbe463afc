//! BookmarkIndex - main API for the bookmark record set.

use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::atomic::AtomicU8;
use std::sync::Arc;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tokio::task::JoinHandle;

use super::flatten::flatten_tree;
use super::state::IndexState;
use crate::config::IndexConfig;
use crate::error::{BookmarksError, Result};
use crate::overlay::CustomTagOverlay;
use crate::query::filter_bookmarks;
use crate::storage::{SharedOverlayStore, StorageChange};
use crate::tree::SharedBookmarkTree;
use crate::types::{BookmarkRecord, SortOrder};

/// Edits applied by [`BookmarkIndex::update_tags`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkChanges {
    pub title: String,
    pub custom_tags: Vec<String>,
}

/// Index status information.
#[derive(Debug, Clone)]
pub struct IndexStatus {
    pub state: IndexState,
    /// Number of records in the index.
    pub records: usize,
    /// Number of URLs with custom tags in the cached overlay.
    pub overlay_entries: usize,
    /// Last load error message if state is `Error`.
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct IndexData {
    records: Vec<BookmarkRecord>,
    overlay: CustomTagOverlay,
}

struct SharedIndex {
    config: IndexConfig,
    tree: SharedBookmarkTree,
    store: SharedOverlayStore,
    state: AtomicU8,
    last_error: Mutex<Option<String>>,
    data: RwLock<IndexData>,
    /// Store subscription, taken by the listener task once spawned.
    changes: Mutex<Option<broadcast::Receiver<StorageChange>>>,
}

/// Flat, tag-annotated view over a bookmark tree.
///
/// Handles are cheap to clone and share state. Locks are never held across
/// an `.await`: each operation's in-memory step completes before any other
/// handler observes the state.
#[derive(Clone)]
pub struct BookmarkIndex {
    shared: Arc<SharedIndex>,
}

impl std::fmt::Debug for BookmarkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkIndex")
            .field("config", &self.shared.config)
            .field("status", &self.status())
            .finish()
    }
}

impl BookmarkIndex {
    pub fn new(tree: SharedBookmarkTree, store: SharedOverlayStore) -> Self {
        Self::with_config(tree, store, IndexConfig::default())
    }

    /// Creates an index and subscribes to the store immediately, so that no
    /// change published after construction is missed.
    pub fn with_config(
        tree: SharedBookmarkTree,
        store: SharedOverlayStore,
        config: IndexConfig,
    ) -> Self {
        let changes = store.subscribe();
        Self {
            shared: Arc::new(SharedIndex {
                config,
                tree,
                store,
                state: AtomicU8::new(IndexState::Uninitialized as u8),
                last_error: Mutex::new(None),
                data: RwLock::new(IndexData::default()),
                changes: Mutex::new(Some(changes)),
            }),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.shared.config
    }

    pub fn state(&self) -> IndexState {
        IndexState::load(&self.shared.state)
    }

    pub fn status(&self) -> IndexStatus {
        let data = self.shared.data.read();
        IndexStatus {
            state: self.state(),
            records: data.records.len(),
            overlay_entries: data.overlay.len(),
            last_error: self.shared.last_error.lock().clone(),
        }
    }

    /// Returns a snapshot of all records in tree order.
    pub fn records(&self) -> Vec<BookmarkRecord> {
        self.shared.data.read().records.clone()
    }

    pub fn record(&self, id: &str) -> Option<BookmarkRecord> {
        self.shared
            .data
            .read()
            .records
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Returns a snapshot of the cached overlay.
    pub fn overlay(&self) -> CustomTagOverlay {
        self.shared.data.read().overlay.clone()
    }

    /// Filters the record set with a raw search string. Without an explicit
    /// order the configured default applies.
    pub fn search(&self, search: &str, order: Option<SortOrder>) -> Vec<BookmarkRecord> {
        let config = &self.shared.config;
        let data = self.shared.data.read();
        filter_bookmarks(
            &data.records,
            search,
            order.unwrap_or(config.default_order),
            config.case_sensitive,
        )
    }

    /// Reads the overlay, then the tree, and builds the record set.
    ///
    /// Calling this again on a ready index rebuilds the record set.
    pub async fn initialize(&self) -> Result<Vec<BookmarkRecord>> {
        if !IndexState::begin_loading(&self.shared.state) {
            return Err(BookmarksError::NotReady("index is already loading"));
        }

        match self.load().await {
            Ok(records) => {
                *self.shared.last_error.lock() = None;
                IndexState::Ready.store(&self.shared.state);
                Ok(records)
            }
            Err(error) => {
                log::warn!("bookmark index load failed: {error}");
                *self.shared.last_error.lock() = Some(error.to_string());
                IndexState::Error.store(&self.shared.state);
                Err(error)
            }
        }
    }

    async fn load(&self) -> Result<Vec<BookmarkRecord>> {
        let value = self
            .shared
            .store
            .get(&self.shared.config.overlay_key)
            .await?;
        let overlay = CustomTagOverlay::from_value(value)?;
        self.shared.data.write().overlay = overlay;

        let root = self.shared.tree.get_tree().await?;

        let mut data = self.shared.data.write();
        // Uses the cached overlay, which a change notification may have
        // replaced while the tree was being read.
        let records = flatten_tree(&root, &data.overlay);
        data.records = records;
        log::info!(
            "bookmark index ready: {} records, {} overlay entries",
            data.records.len(),
            data.overlay.len()
        );
        Ok(data.records.clone())
    }

    /// Replaces the cached overlay and rebuilds every record's custom tags.
    ///
    /// Overlay entries for URLs with no record are kept in the cache but
    /// produce no tags.
    pub fn on_overlay_changed(&self, overlay: CustomTagOverlay) {
        let mut data = self.shared.data.write();
        reconcile(&mut data, overlay);
    }

    /// Applies a store change notification. Returns whether the overlay was
    /// reconciled.
    ///
    /// Self-originated and external changes are handled alike. A cleared key
    /// reconciles against an empty overlay.
    pub fn apply_storage_change(&self, change: &StorageChange) -> bool {
        if change.key != self.shared.config.overlay_key {
            return false;
        }
        match CustomTagOverlay::from_value(change.new_value.clone()) {
            Ok(overlay) => {
                self.on_overlay_changed(overlay);
                true
            }
            Err(error) => {
                log::warn!("ignoring overlay change: {error}");
                false
            }
        }
    }

    /// Applies every queued store notification, in order.
    ///
    /// Returns the number of overlay reconciliations. Does nothing once the
    /// listener task owns the subscription.
    pub fn drain_overlay_changes(&self) -> usize {
        let mut guard = self.shared.changes.lock();
        let Some(receiver) = guard.as_mut() else {
            return 0;
        };

        let mut applied = 0;
        loop {
            match receiver.try_recv() {
                Ok(change) => {
                    if self.apply_storage_change(&change) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("overlay subscription lagged, {skipped} changes skipped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        applied
    }

    /// Spawns a task that applies store notifications for the lifetime of
    /// the store.
    pub fn spawn_overlay_listener(&self) -> Result<JoinHandle<()>> {
        let receiver = self.shared.changes.lock().take().ok_or_else(|| {
            BookmarksError::InvalidInput("overlay listener already running".to_string())
        })?;
        let index = self.clone();
        Ok(tokio::spawn(index.listen(receiver)))
    }

    async fn listen(self, mut receiver: broadcast::Receiver<StorageChange>) {
        loop {
            match receiver.recv().await {
                Ok(change) => {
                    self.apply_storage_change(&change);
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("overlay listener lagged by {skipped} changes, resyncing");
                    if let Err(error) = self.resync_overlay().await {
                        log::warn!("overlay resync failed: {error}");
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
        log::debug!("overlay listener stopped");
    }

    /// Re-reads the overlay from the store and reconciles against it.
    pub async fn resync_overlay(&self) -> Result<()> {
        let value = self
            .shared
            .store
            .get(&self.shared.config.overlay_key)
            .await?;
        self.on_overlay_changed(CustomTagOverlay::from_value(value)?);
        Ok(())
    }

    /// Renames the bookmark if its title changed, replaces the custom tags of
    /// its URL and writes the whole overlay back to the store.
    ///
    /// The write replaces the full mapping. Another instance that read the
    /// overlay before this write and writes after it drops this change.
    pub async fn update_tags(&self, id: &str, changes: BookmarkChanges) -> Result<BookmarkRecord> {
        self.ensure_ready("update_tags requires a ready index")?;

        let current_title = self
            .record(id)
            .map(|record| record.title)
            .ok_or_else(|| BookmarksError::BookmarkNotFound(id.to_string()))?;
        if current_title != changes.title {
            self.shared.tree.rename(id, &changes.title).await?;
        }

        let (updated, value) = {
            let mut data = self.shared.data.write();
            let IndexData { records, overlay } = &mut *data;
            let record = records
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| BookmarksError::BookmarkNotFound(id.to_string()))?;
            record.title = changes.title;
            let url = record.url.clone();

            overlay.remove(&url);
            overlay.set(&url, changes.custom_tags);
            let tags = overlay.tags_for(&url);

            let mut updated = None;
            for record in records.iter_mut().filter(|record| record.url == url) {
                record.replace_custom_tags(tags);
                if record.id == id {
                    updated = Some(record.clone());
                }
            }
            let updated = updated.ok_or_else(|| {
                BookmarksError::Internal(format!("bookmark {id} vanished during update"))
            })?;
            (updated, overlay.to_value())
        };

        self.write_overlay(value).await?;
        Ok(updated)
    }

    /// Deletes the custom tags of the bookmark's URL and writes the overlay
    /// back. The bookmark itself is kept.
    pub async fn remove_tags(&self, id: &str) -> Result<()> {
        self.ensure_ready("remove_tags requires a ready index")?;
        let value = {
            let mut data = self.shared.data.write();
            forget_custom_tags(&mut data, id)?;
            data.overlay.to_value()
        };
        self.write_overlay(value).await
    }

    /// Removes the bookmark from the tree, then deletes the custom tags of
    /// its URL from the cached overlay.
    ///
    /// A failed tree removal leaves the records and the overlay untouched.
    /// The overlay is only persisted when `write_back_on_remove` is set;
    /// otherwise the stored entry stays until the next full overlay write.
    pub async fn remove(&self, id: &str) -> Result<()> {
        self.ensure_ready("remove requires a ready index")?;
        if self.record(id).is_none() {
            return Err(BookmarksError::BookmarkNotFound(id.to_string()));
        }

        self.shared.tree.remove_leaf(id).await?;

        let value = {
            let mut data = self.shared.data.write();
            forget_custom_tags(&mut data, id)?;
            data.records.retain(|record| record.id != id);
            self.shared
                .config
                .write_back_on_remove
                .then(|| data.overlay.to_value())
        };
        if let Some(value) = value {
            self.write_overlay(value).await?;
        }
        Ok(())
    }

    async fn write_overlay(&self, value: serde_json::Value) -> Result<()> {
        self.shared
            .store
            .set(&self.shared.config.overlay_key, value)
            .await
    }

    fn ensure_ready(&self, message: &'static str) -> Result<()> {
        if self.state() == IndexState::Ready {
            Ok(())
        } else {
            Err(BookmarksError::NotReady(message))
        }
    }
}

fn reconcile(data: &mut IndexData, overlay: CustomTagOverlay) {
    for record in data.records.iter_mut() {
        record.replace_custom_tags(overlay.tags_for(&record.url));
    }

    let known = data
        .records
        .iter()
        .map(|record| record.url.as_str())
        .collect::<HashSet<_>>();
    let unknown = overlay.urls().filter(|url| !known.contains(url)).count();
    if unknown > 0 {
        log::debug!("overlay has custom tags for {unknown} urls without bookmarks");
    }
    log::debug!(
        "reconciled {} records against {} overlay entries",
        data.records.len(),
        overlay.len()
    );

    data.overlay = overlay;
}

/// Removes the overlay entry for the bookmark's URL and strips custom tags
/// from every record sharing that URL.
fn forget_custom_tags(data: &mut IndexData, id: &str) -> Result<()> {
    let url = data
        .records
        .iter()
        .find(|record| record.id == id)
        .map(|record| record.url.clone())
        .ok_or_else(|| BookmarksError::BookmarkNotFound(id.to_string()))?;

    data.overlay.remove(&url);
    for record in data.records.iter_mut().filter(|record| record.url == url) {
        record.retain_folder_tags();
    }
    Ok(())
}
