use pdfdesk_logging::{desk_debug, desk_info, desk_warn};

use crate::state::DownloadStatus;
use crate::{
    gather_request, plan_downloads, present_result, present_transport_failure,
    present_validation_error, AppState, Effect, Msg, OperationKind, RequestId, ResultPanel,
    SelectionChanged, SubmissionOutcome,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected { slot, files } => {
            let change = state.selections.set_all(slot, files);
            selection_changed(&mut state, change);
            Vec::new()
        }
        Msg::RemoveFileClicked { slot, index } => {
            match state.selections.remove_at(slot, index) {
                Ok(change) => selection_changed(&mut state, change),
                Err(err) => desk_warn!("Ignoring removal: {}", err),
            }
            Vec::new()
        }
        Msg::DragEntered { slot } => {
            if state.drop_adapter.drag_entered(slot) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DragLeft { slot } => {
            if state.drop_adapter.drag_left(slot) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FilesDropped { slot, files } => {
            let outcome = state
                .drop_adapter
                .drop_files(&mut state.selections, slot, files);
            // Affordance is reset regardless of whether anything was kept.
            state.mark_dirty();
            if let Some(change) = outcome.change {
                selection_changed(&mut state, change);
            }
            Vec::new()
        }
        Msg::FieldChanged { field, value } => {
            if state.forms.get(field) != value {
                state.forms.set(field, value);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AngleSelected(angle) => {
            if state.forms.rotate_angle != angle {
                state.forms.rotate_angle = angle;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked(kind) => submit(&mut state, kind),
        Msg::ProgressTick { generation } => {
            if state.progress.tick(generation) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ProgressSettled { generation } => {
            if state.progress.settle(generation) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResponseArrived {
            request_id,
            kind,
            outcome,
        } => interpret(&mut state, kind, request_id, outcome),
        Msg::DownloadFinished { filename, result } => {
            let status = match result {
                Ok(path) => {
                    desk_info!("Saved {} to {:?}", filename, path);
                    DownloadStatus::Saved(path)
                }
                Err(reason) => {
                    desk_warn!("Download of {} failed: {}", filename, reason);
                    DownloadStatus::Failed(reason)
                }
            };
            if state.finish_download(&filename, status) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PreviewScrolled(delta) => {
            if let ResultPanel::Success {
                preview: Some(pane),
                ..
            } = &mut state.panel
            {
                if pane.scroll_by(delta) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

// Manual selection and drops both end here, so downstream consumers cannot
// tell them apart.
fn selection_changed(state: &mut AppState, change: SelectionChanged) {
    desk_debug!(
        "Selection for {} now holds {} file(s) (revision {})",
        change.slot,
        change.selection.len(),
        change.revision
    );
    state.mark_dirty();
}

fn submit(state: &mut AppState, kind: OperationKind) -> Vec<Effect> {
    state.mark_dirty();
    let request = match gather_request(kind, &state.selections, &state.forms) {
        Ok(request) => request,
        Err(err) => {
            desk_info!("Validation failed for {}: {}", kind, err);
            state.panel = present_validation_error(kind, &err);
            return Vec::new();
        }
    };

    let request_id = state.begin_request(kind);
    desk_info!(
        "Submitting {} request_id={} files={}",
        kind,
        request_id,
        request.file_parts().len()
    );
    state.panel = ResultPanel::Hidden;
    let mut effects = state.progress.start();
    effects.push(Effect::Submit {
        request_id,
        request,
    });
    effects
}

fn interpret(
    state: &mut AppState,
    kind: OperationKind,
    request_id: RequestId,
    outcome: SubmissionOutcome,
) -> Vec<Effect> {
    if !state.resolve_request(kind, request_id) {
        desk_warn!(
            "Dropping stale {} response for request_id={}",
            kind,
            request_id
        );
        return Vec::new();
    }

    state.mark_dirty();
    let mut effects = state.progress.complete();
    match outcome {
        Ok(result) => {
            if result.success {
                desk_info!("{} request_id={} succeeded", kind, request_id);
                let tasks = plan_downloads(&result.artifacts());
                if !tasks.is_empty() {
                    state.track_downloads(&tasks);
                    effects.push(Effect::ScheduleDownloads(tasks));
                }
            } else {
                desk_warn!(
                    "{} request_id={} failed: {}",
                    kind,
                    request_id,
                    result.error.as_deref().unwrap_or("<no error text>")
                );
            }
            state.panel = present_result(kind, &result);
        }
        Err(failure) => {
            desk_warn!(
                "{} request_id={} transport failure: {}",
                kind,
                request_id,
                failure.description
            );
            state.panel = present_transport_failure(kind, &failure);
        }
    }
    effects
}
