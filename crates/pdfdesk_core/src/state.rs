use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::view_model::{AppViewModel, FileRowView, SlotView};
use crate::{
    DownloadTask, DragDropAdapter, FileSelectionStore, OperationForms, OperationKind,
    ProgressPhase, ProgressSimulator, RequestId, ResultPanel, Slot,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Pending,
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRow {
    pub filename: String,
    pub status: DownloadStatus,
}

/// Single owned UI state: selections, forms, the shared progress indicator
/// and the shared result panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) selections: FileSelectionStore,
    pub(crate) drop_adapter: DragDropAdapter,
    pub(crate) forms: OperationForms,
    pub(crate) progress: ProgressSimulator,
    pub(crate) panel: ResultPanel,
    last_request_id: RequestId,
    latest: BTreeMap<OperationKind, RequestId>,
    outstanding: BTreeSet<RequestId>,
    downloads: Vec<DownloadRow>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selections(&self) -> &FileSelectionStore {
        &self.selections
    }

    pub fn forms(&self) -> &OperationForms {
        &self.forms
    }

    pub fn progress(&self) -> &ProgressSimulator {
        &self.progress
    }

    pub fn view(&self) -> AppViewModel {
        let slots = Slot::ALL
            .into_iter()
            .map(|slot| SlotView {
                slot,
                affordance: self.drop_adapter.affordance(slot),
                files: self
                    .selections
                    .selection(slot)
                    .handles()
                    .iter()
                    .enumerate()
                    .map(|(index, handle)| FileRowView {
                        index,
                        name: handle.name().to_string(),
                        size: handle.size(),
                    })
                    .collect(),
            })
            .collect();

        AppViewModel {
            slots,
            progress: self.progress.state(),
            progress_visible: self.progress.is_visible(),
            panel: self.panel.clone(),
            downloads: self.downloads.clone(),
            busy: self.is_busy(),
            dirty: self.dirty,
        }
    }

    /// Outstanding requests, an indicator still on screen, or pending
    /// downloads.
    pub fn is_busy(&self) -> bool {
        !self.outstanding.is_empty()
            || self.progress.state().phase != ProgressPhase::Idle
            || self
                .downloads
                .iter()
                .any(|row| row.status == DownloadStatus::Pending)
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_request(&mut self, kind: OperationKind) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.latest.insert(kind, request_id);
        self.outstanding.insert(request_id);
        request_id
    }

    /// Marks the request resolved and reports whether it is still the latest
    /// submission for its kind.
    pub(crate) fn resolve_request(&mut self, kind: OperationKind, request_id: RequestId) -> bool {
        self.outstanding.remove(&request_id);
        self.latest.get(&kind) == Some(&request_id)
    }

    pub(crate) fn track_downloads(&mut self, tasks: &[DownloadTask]) {
        self.downloads.extend(tasks.iter().map(|task| DownloadRow {
            filename: task.filename.clone(),
            status: DownloadStatus::Pending,
        }));
    }

    /// Returns `true` when a pending row was updated.
    pub(crate) fn finish_download(&mut self, filename: &str, status: DownloadStatus) -> bool {
        match self
            .downloads
            .iter_mut()
            .find(|row| row.filename == filename && row.status == DownloadStatus::Pending)
        {
            Some(row) => {
                row.status = status;
                true
            }
            None => false,
        }
    }
}
