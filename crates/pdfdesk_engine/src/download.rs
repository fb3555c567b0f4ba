use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use pdfdesk_core::DownloadTask;
use pdfdesk_logging::{desk_debug, desk_info};

use crate::persist::artifact_file_name;
use crate::{AtomicFileWriter, DownloadError, EngineEvent, EventSink, ProcessingService};

/// Registry of in-flight retrievals.
#[derive(Debug, Clone, Default)]
pub struct ActiveRetrievals {
    leases: Arc<Mutex<BTreeMap<u64, String>>>,
    next_id: Arc<AtomicU64>,
}

impl ActiveRetrievals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, filename: &str) -> RetrievalLease {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, filename.to_string());
        RetrievalLease {
            id,
            registry: self.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, id: u64) {
        self.lock().remove(&id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<u64, String>> {
        self.leases.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Transient handle scoped to one retrieval. Released on drop, whichever way
/// the retrieval ends.
#[derive(Debug)]
pub struct RetrievalLease {
    id: u64,
    registry: ActiveRetrievals,
}

impl Drop for RetrievalLease {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

/// Fires each task once at its offset, then forgets it.
#[derive(Clone)]
pub struct DownloadScheduler {
    service: Arc<dyn ProcessingService>,
    writer: AtomicFileWriter,
    active: ActiveRetrievals,
}

impl DownloadScheduler {
    pub fn new(service: Arc<dyn ProcessingService>, writer: AtomicFileWriter) -> Self {
        Self {
            service,
            writer,
            active: ActiveRetrievals::new(),
        }
    }

    pub fn active(&self) -> &ActiveRetrievals {
        &self.active
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, tasks: Vec<DownloadTask>, sink: Arc<dyn EventSink>) {
        for task in tasks {
            let scheduler = self.clone();
            let sink = sink.clone();
            tokio::spawn(async move {
                tokio::time::sleep(task.offset).await;
                let result = scheduler.retrieve_once(&task.filename).await;
                sink.emit(EngineEvent::DownloadFinished {
                    filename: task.filename,
                    result,
                });
            });
        }
    }

    pub async fn retrieve_once(&self, filename: &str) -> Result<PathBuf, DownloadError> {
        let _lease = self.active.acquire(filename);
        desk_debug!("Retrieving {}", filename);
        let bytes = self.service.retrieve(filename).await?;
        let path = self
            .writer
            .write(&artifact_file_name(filename), &bytes)
            .map_err(|err| DownloadError::Persist(err.to_string()))?;
        desk_info!("Retrieved {} ({} bytes)", filename, bytes.len());
        Ok(path)
    }
}
