use std::time::Duration;

use crate::Artifacts;

/// Gap between successive automatic retrievals.
pub const DOWNLOAD_STAGGER: Duration = Duration::from_millis(500);

/// One retrieval, fired once at `offset` after scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub filename: String,
    pub offset: Duration,
}

impl DownloadTask {
    pub fn offset_millis(&self) -> u64 {
        self.offset.as_millis() as u64
    }
}

pub fn schedule_one(filename: impl Into<String>) -> Vec<DownloadTask> {
    vec![DownloadTask {
        filename: filename.into(),
        offset: Duration::ZERO,
    }]
}

/// Task `i` fires at `i * DOWNLOAD_STAGGER`.
pub fn schedule_many(filenames: impl IntoIterator<Item = String>) -> Vec<DownloadTask> {
    filenames
        .into_iter()
        .enumerate()
        .map(|(index, filename)| DownloadTask {
            filename,
            offset: DOWNLOAD_STAGGER * index as u32,
        })
        .collect()
}

pub fn plan_downloads(artifacts: &Artifacts) -> Vec<DownloadTask> {
    match artifacts {
        Artifacts::None => Vec::new(),
        Artifacts::One(filename) => schedule_one(filename.clone()),
        Artifacts::Many(filenames) => schedule_many(filenames.iter().cloned()),
    }
}
