//! Snapshot store for the document model.
//!
//! All mutation is wholesale replacement: an update clones the latest
//! snapshot, merges the patch into the targeted sub-object, and swaps in a
//! new `Arc`. Readers therefore always observe a complete, consistent
//! document, and concurrent widgets merging different sub-objects can
//! never lose each other's fields (last writer wins per field, whole
//! sub-object granularity). Updates are total functions; they never fail.

use crate::layout::CvLayout;
use crate::model::{CvData, LayoutUpdate, PersonalInfoUpdate, SectionsUpdate};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct DocumentStore {
    current: Arc<CvData>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: CvData) -> Self {
        DocumentStore {
            current: Arc::new(data),
        }
    }

    /// The latest snapshot. Cheap to clone and safe to hold across
    /// subsequent updates.
    pub fn snapshot(&self) -> Arc<CvData> {
        Arc::clone(&self.current)
    }

    pub fn update_personal_info(&mut self, patch: PersonalInfoUpdate) {
        let mut next = (*self.current).clone();
        patch.apply(&mut next.personal_info);
        self.current = Arc::new(next);
    }

    pub fn update_sections(&mut self, patch: SectionsUpdate) {
        let mut next = (*self.current).clone();
        patch.apply(&mut next.sections);
        self.current = Arc::new(next);
    }

    pub fn update_layout(&mut self, patch: LayoutUpdate) {
        let mut next = (*self.current).clone();
        patch.apply(&mut next.layout);
        self.current = Arc::new(next);
    }

    /// Applies a layout engine operation (reorder, column toggle, bucket
    /// move) against the latest snapshot.
    pub fn update_layout_with(&mut self, f: impl FnOnce(&mut CvLayout)) {
        let mut next = (*self.current).clone();
        f(&mut next.layout);
        self.current = Arc::new(next);
    }
}
