use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pdfdesk_core::{DownloadTask, OperationRequest, RequestId};
use pdfdesk_logging::{desk_debug, desk_warn};
use tokio::sync::mpsc as tokio_mpsc;

use crate::{
    run_after, AtomicFileWriter, DownloadScheduler, EngineError, EngineEvent, EventSink,
    PeriodicTimer, ProcessingService, ReqwestService, ServiceSettings,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub service: ServiceSettings,
    pub output_dir: PathBuf,
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: OperationRequest,
    },
    StartProgressTimer {
        generation: u64,
        period: Duration,
    },
    StopProgressTimer,
    ScheduleSettle {
        generation: u64,
        delay: Duration,
    },
    ScheduleDownloads(Vec<DownloadTask>),
}

/// Handle to the engine thread. All IO runs cooperatively on one
/// current-thread runtime; results are reported to the `EventSink` given at
/// construction.
pub struct EngineHandle {
    cmd_tx: tokio_mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let service = Arc::new(ReqwestService::new(config.service)?);
        Self::with_service(service, config.output_dir, sink)
    }

    pub fn with_service(
        service: Arc<dyn ProcessingService>,
        output_dir: PathBuf,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = tokio_mpsc::unbounded_channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let downloads = DownloadScheduler::new(service.clone(), AtomicFileWriter::new(output_dir));

        thread::Builder::new()
            .name("pdfdesk-engine".to_string())
            .spawn(move || {
                runtime.block_on(run_commands(cmd_rx, service, downloads, sink));
                desk_debug!("Engine thread stopped");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, request: OperationRequest) {
        self.send(EngineCommand::Submit {
            request_id,
            request,
        });
    }

    pub fn start_progress_timer(&self, generation: u64, period: Duration) {
        self.send(EngineCommand::StartProgressTimer { generation, period });
    }

    pub fn stop_progress_timer(&self) {
        self.send(EngineCommand::StopProgressTimer);
    }

    pub fn schedule_settle(&self, generation: u64, delay: Duration) {
        self.send(EngineCommand::ScheduleSettle { generation, delay });
    }

    pub fn schedule_downloads(&self, tasks: Vec<DownloadTask>) {
        self.send(EngineCommand::ScheduleDownloads(tasks));
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            desk_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn run_commands(
    mut cmd_rx: tokio_mpsc::UnboundedReceiver<EngineCommand>,
    service: Arc<dyn ProcessingService>,
    downloads: DownloadScheduler,
    sink: Arc<dyn EventSink>,
) {
    let mut timer = PeriodicTimer::new();
    while let Some(command) = cmd_rx.recv().await {
        match command {
            EngineCommand::Submit {
                request_id,
                request,
            } => {
                let service = service.clone();
                let sink = sink.clone();
                tokio::spawn(async move {
                    let outcome = service.submit(&request).await;
                    sink.emit(EngineEvent::Response {
                        request_id,
                        kind: request.kind(),
                        outcome,
                    });
                });
            }
            EngineCommand::StartProgressTimer { generation, period } => {
                let sink = sink.clone();
                timer.start(period, move || {
                    sink.emit(EngineEvent::ProgressTick { generation });
                });
            }
            EngineCommand::StopProgressTimer => timer.cancel(),
            EngineCommand::ScheduleSettle { generation, delay } => {
                let sink = sink.clone();
                run_after(delay, async move {
                    sink.emit(EngineEvent::ProgressSettled { generation });
                });
            }
            EngineCommand::ScheduleDownloads(tasks) => {
                desk_debug!("Scheduling {} download(s)", tasks.len());
                downloads.schedule(tasks, sink.clone());
            }
        }
    }
}
