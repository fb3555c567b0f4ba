use std::sync::{mpsc, Arc};

use pdfdesk_core::Effect;
use pdfdesk_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle, EventSink};
use pdfdesk_logging::desk_debug;

use super::app::AppEvent;

/// Executes core effects on the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, app_tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { app_tx });
        let engine = EngineHandle::new(config, sink)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit {
                    request_id,
                    request,
                } => {
                    desk_debug!("Submit request_id={} endpoint={}", request_id, request.endpoint());
                    self.engine.submit(request_id, request);
                }
                Effect::StartProgressTimer { generation, period } => {
                    self.engine.start_progress_timer(generation, period);
                }
                Effect::StopProgressTimer => self.engine.stop_progress_timer(),
                Effect::ScheduleProgressSettle { generation, delay } => {
                    self.engine.schedule_settle(generation, delay);
                }
                Effect::ScheduleDownloads(tasks) => self.engine.schedule_downloads(tasks),
            }
        }
    }
}

/// Feeds engine events back into the app loop as core messages.
struct MsgSink {
    app_tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.app_tx.send(AppEvent::Engine(event.into_msg()));
    }
}
