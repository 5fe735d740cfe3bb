//! Editing session: snapshot store, debounce gate, live preview, export
//! trigger.
//!
//! Every store update pushes the fresh snapshot into the debounce gate. A
//! background task consumes debounced snapshots, rebuilds the paginated
//! preview, and publishes it through a watch channel, so a burst of edits
//! costs at most one recompute per quiet window. Must be created inside a
//! tokio runtime.

use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::error::ExportError;
use crate::export::{export_pdf_to_dir, paginate_preview};
use crate::layout::{Column, SectionKey};
use crate::model::{CvData, LayoutUpdate, PersonalInfoUpdate, SectionsUpdate};
use crate::paginate::Page;
use crate::store::DocumentStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

pub struct EditorSession {
    store: DocumentStore,
    debouncer: Debouncer<Arc<CvData>>,
    preview_rx: watch::Receiver<Arc<Vec<Page>>>,
    open_items: HashMap<String, bool>,
    exporting: Arc<AtomicBool>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_data(CvData::default())
    }

    pub fn with_data(data: CvData) -> Self {
        let initial = paginate_preview(&data).map(Arc::new).unwrap_or_default();
        let store = DocumentStore::with_data(data);
        let (debouncer, mut snapshots) = Debouncer::<Arc<CvData>>::new(DEFAULT_DEBOUNCE);
        let (preview_tx, preview_rx) = watch::channel(initial);
        tokio::spawn(async move {
            while let Some(snapshot) = snapshots.recv().await {
                match paginate_preview(&snapshot) {
                    Ok(pages) => {
                        if preview_tx.send(Arc::new(pages)).is_err() {
                            break;
                        }
                    }
                    Err(err) => log::warn!("Preview rebuild failed: {err}"),
                }
            }
        });
        EditorSession {
            store,
            debouncer,
            preview_rx,
            open_items: HashMap::new(),
            exporting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn snapshot(&self) -> Arc<CvData> {
        self.store.snapshot()
    }

    /// The last published preview. May lag the store by up to the quiet
    /// window.
    pub fn preview(&self) -> Arc<Vec<Page>> {
        self.preview_rx.borrow().clone()
    }

    pub fn subscribe_preview(&self) -> watch::Receiver<Arc<Vec<Page>>> {
        self.preview_rx.clone()
    }

    pub fn edit_personal_info(&mut self, patch: PersonalInfoUpdate) {
        self.store.update_personal_info(patch);
        self.publish();
    }

    pub fn edit_sections(&mut self, patch: SectionsUpdate) {
        self.store.update_sections(patch);
        self.publish();
    }

    pub fn edit_layout(&mut self, patch: LayoutUpdate) {
        self.store.update_layout(patch);
        self.publish();
    }

    pub fn reorder_sections(&mut self, active: SectionKey, over: SectionKey) {
        self.store
            .update_layout_with(|layout| layout.reorder_sections(active, over));
        self.publish();
    }

    pub fn toggle_columns(&mut self) {
        self.store.update_layout_with(|layout| layout.toggle_columns());
        self.publish();
    }

    pub fn move_section_to_column(&mut self, key: SectionKey, column: Column) {
        self.store
            .update_layout_with(|layout| layout.move_section_to_column(key, column));
        self.publish();
    }

    /// Flips the expanded/collapsed state of one item editor. Items start
    /// expanded.
    pub fn toggle_item(&mut self, id: &str) {
        let open = self.open_items.entry(id.to_string()).or_insert(true);
        *open = !*open;
    }

    pub fn is_item_open(&self, id: &str) -> bool {
        self.open_items.get(id).copied().unwrap_or(true)
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst)
    }

    /// Exports the latest snapshot into `dir`. Returns `ExportError::Busy`
    /// while a previous export is still in flight; generation runs on the
    /// blocking pool after an initial yield so callers can surface a
    /// "generating" indication first.
    pub async fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        if self.exporting.swap(true, Ordering::SeqCst) {
            return Err(ExportError::Busy);
        }
        let snapshot = self.store.snapshot();
        let dir = dir.as_ref().to_path_buf();
        tokio::task::yield_now().await;
        let joined =
            tokio::task::spawn_blocking(move || export_pdf_to_dir(&snapshot, &dir)).await;
        self.exporting.store(false, Ordering::SeqCst);
        match joined {
            Ok(result) => result,
            Err(err) => Err(ExportError::Capture(format!("Export task failed: {err}"))),
        }
    }

    fn publish(&mut self) {
        self.debouncer.push(self.store.snapshot());
    }
}
