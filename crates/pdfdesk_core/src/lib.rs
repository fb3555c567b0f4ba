//! PdfDesk core: pure state machine for selecting files, submitting
//! document operations and presenting their results.
mod download;
mod drop;
mod effect;
mod file;
mod form;
mod msg;
mod operation;
mod presenter;
mod progress;
mod result;
mod selection;
mod state;
mod update;
mod validate;
mod view_model;

pub use download::{plan_downloads, schedule_many, schedule_one, DownloadTask, DOWNLOAD_STAGGER};
pub use drop::{Affordance, DragDropAdapter, DropOutcome};
pub use effect::Effect;
pub use file::FileHandle;
pub use form::{FormField, OperationForms};
pub use msg::Msg;
pub use operation::{CoverLetterFields, OperationKind, OperationRequest, RequestId, RotationAngle};
pub use presenter::{
    present_result, present_transport_failure, present_validation_error, ErrorCategory,
    PreviewPane, ResultPanel, GENERIC_REQUEST_ERROR, PREVIEW_VISIBLE_LINES, TRANSPORT_ERROR_PREFIX,
};
pub use progress::{
    ProgressPhase, ProgressSimulator, ProgressState, FILL_CAP, FILL_COMPLETE, SETTLE_DELAY,
    TICK_PERIOD, TICK_STEP,
};
pub use result::{Artifacts, OperationResult, SubmissionOutcome, TransportFailure};
pub use selection::{
    FileSelection, FileSelectionStore, Multiplicity, SelectionChanged, SelectionError, Slot,
};
pub use state::{AppState, DownloadRow, DownloadStatus};
pub use update::update;
pub use validate::{gather_request, ValidationError, MAX_UPLOAD_BYTES, MIN_MERGE_FILES};
pub use view_model::{AppViewModel, FileRowView, SlotView};
