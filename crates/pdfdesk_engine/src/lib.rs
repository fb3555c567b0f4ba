//! PdfDesk engine: talks to the processing service, drives timers and
//! retrieves artifacts on behalf of the pure core.
mod download;
mod engine;
mod persist;
mod service;
mod sink;
mod timer;
mod types;
mod wire;

pub use download::{ActiveRetrievals, DownloadScheduler, RetrievalLease};
pub use engine::{EngineConfig, EngineHandle};
pub use persist::{artifact_file_name, ensure_output_dir, AtomicFileWriter, PersistError};
pub use service::{ProcessingService, ReqwestService, ServiceSettings};
pub use sink::{ChannelEventSink, EventSink};
pub use timer::{run_after, PeriodicTimer};
pub use types::{DownloadError, EngineError, EngineEvent, FailureKind, TransportError};
pub use wire::parse_operation_response;
