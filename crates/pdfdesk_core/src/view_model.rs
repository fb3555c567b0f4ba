use crate::{Affordance, DownloadRow, ProgressState, ResultPanel, Slot};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub slots: Vec<SlotView>,
    pub progress: ProgressState,
    pub progress_visible: bool,
    pub panel: ResultPanel,
    pub downloads: Vec<DownloadRow>,
    pub busy: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub slot: Slot,
    pub affordance: Affordance,
    pub files: Vec<FileRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub index: usize,
    pub name: String,
    pub size: u64,
}
