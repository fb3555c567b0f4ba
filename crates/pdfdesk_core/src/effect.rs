use std::time::Duration;

use crate::{DownloadTask, OperationRequest, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the request to the processing service.
    Submit {
        request_id: RequestId,
        request: OperationRequest,
    },
    /// Begin periodic progress ticks tagged with `generation`.
    StartProgressTimer { generation: u64, period: Duration },
    /// Cancel the active progress timer, if any.
    StopProgressTimer,
    /// Report `ProgressSettled` once `delay` has passed.
    ScheduleProgressSettle { generation: u64, delay: Duration },
    /// Retrieve artifacts at their offsets.
    ScheduleDownloads(Vec<DownloadTask>),
}
