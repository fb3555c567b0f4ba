use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked files for a slot through the file chooser.
    FilesSelected {
        slot: crate::Slot,
        files: Vec<crate::FileHandle>,
    },
    /// User removed one file from a slot's list.
    RemoveFileClicked { slot: crate::Slot, index: usize },
    /// A drag carrying files entered a slot's drop zone.
    DragEntered { slot: crate::Slot },
    /// The drag left the drop zone without dropping.
    DragLeft { slot: crate::Slot },
    /// Files were dropped onto a slot.
    FilesDropped {
        slot: crate::Slot,
        files: Vec<crate::FileHandle>,
    },
    /// User edited a form field.
    FieldChanged {
        field: crate::FormField,
        value: String,
    },
    /// User picked a rotation angle.
    AngleSelected(crate::RotationAngle),
    /// User triggered an operation.
    SubmitClicked(crate::OperationKind),
    /// Progress timer fired.
    ProgressTick { generation: u64 },
    /// Settle delay after completion elapsed.
    ProgressSettled { generation: u64 },
    /// The service answered, or the transport failed.
    ResponseArrived {
        request_id: crate::RequestId,
        kind: crate::OperationKind,
        outcome: crate::SubmissionOutcome,
    },
    /// A scheduled retrieval finished.
    DownloadFinished {
        filename: String,
        result: Result<PathBuf, String>,
    },
    /// User scrolled the text preview.
    PreviewScrolled(isize),
    /// Fallback for placeholder wiring.
    NoOp,
}
