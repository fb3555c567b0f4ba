use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use pdfdesk_core::{
    update, AppState, DownloadStatus, DownloadTask, Effect, ErrorCategory, FileHandle, FormField,
    Msg, OperationKind, OperationRequest, OperationResult, ProgressPhase, ResultPanel, Slot,
    TransportFailure, FILL_CAP, SETTLE_DELAY, TICK_PERIOD,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pdfdesk_logging::initialize_for_tests);
}

fn select(state: AppState, slot: Slot, files: Vec<FileHandle>) -> AppState {
    update(state, Msg::FilesSelected { slot, files }).0
}

fn set(state: AppState, field: FormField, value: &str) -> AppState {
    update(
        state,
        Msg::FieldChanged {
            field,
            value: value.to_string(),
        },
    )
    .0
}

fn submitted(effects: &[Effect]) -> Option<(u64, OperationRequest)> {
    effects.iter().find_map(|effect| match effect {
        Effect::Submit {
            request_id,
            request,
        } => Some((*request_id, request.clone())),
        _ => None,
    })
}

fn scheduled(effects: &[Effect]) -> Vec<DownloadTask> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ScheduleDownloads(tasks) => Some(tasks.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}

fn settle_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleProgressSettle { generation, delay } => {
                assert_eq!(*delay, SETTLE_DELAY);
                Some(*generation)
            }
            _ => None,
        })
        .expect("settle effect")
}

#[test]
fn merge_validation_depends_only_on_file_count() {
    init_logging();
    for n in 0..6usize {
        let files = (0..n)
            .map(|i| FileHandle::new(format!("{i}.pdf"), 10))
            .collect();
        let state = select(AppState::new(), Slot::MergeFiles, files);
        let (state, effects) = update(state, Msg::SubmitClicked(OperationKind::Merge));

        if n < 2 {
            assert!(effects.is_empty(), "n={n} must not submit");
            assert!(matches!(
                state.view().panel,
                ResultPanel::Error {
                    category: ErrorCategory::Validation,
                    ..
                }
            ));
            assert_eq!(state.progress().state().phase, ProgressPhase::Idle);
        } else {
            let (_, request) = submitted(&effects).expect("submit effect");
            assert_eq!(request.file_parts().len(), n);
            assert_eq!(state.progress().state().phase, ProgressPhase::Running);
        }
    }
}

#[test]
fn progress_starts_before_submission() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::ExtractFile,
        vec![FileHandle::new("doc.pdf", 10)],
    );
    let (_, effects) = update(state, Msg::SubmitClicked(OperationKind::Extract));
    assert_eq!(
        effects[0],
        Effect::StartProgressTimer {
            generation: 1,
            period: TICK_PERIOD
        }
    );
    assert!(matches!(effects[1], Effect::Submit { request_id: 1, .. }));
}

#[test]
fn merge_success_schedules_single_download_and_shows_message() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::MergeFiles,
        vec![FileHandle::new("A.pdf", 1200), FileHandle::new("B.pdf", 3400)],
    );
    let state = set(state, FormField::MergeOutputName, "merged.pdf");
    let (state, effects) = update(state, Msg::SubmitClicked(OperationKind::Merge));
    let (request_id, request) = submitted(&effects).expect("submit effect");
    assert_eq!(
        request,
        OperationRequest::Merge {
            files: vec![FileHandle::new("A.pdf", 1200), FileHandle::new("B.pdf", 3400)],
            output_name: "merged.pdf".to_string(),
        }
    );

    let (state, effects) = update(
        state,
        Msg::ResponseArrived {
            request_id,
            kind: OperationKind::Merge,
            outcome: Ok(OperationResult::succeeded("Merged 2 files").with_filename("merged.pdf")),
        },
    );

    assert_eq!(
        scheduled(&effects),
        vec![DownloadTask {
            filename: "merged.pdf".to_string(),
            offset: Duration::ZERO
        }]
    );
    let view = state.view();
    assert!(view.panel.message().unwrap().contains("Merged 2 files"));
    assert_eq!(view.downloads.len(), 1);
    assert_eq!(view.downloads[0].status, DownloadStatus::Pending);
    assert!(view.busy);

    let generation = settle_generation(&effects);
    let (state, _) = update(state, Msg::ProgressSettled { generation });
    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            filename: "merged.pdf".to_string(),
            result: Ok(PathBuf::from("downloads/merged.pdf")),
        },
    );
    assert!(!state.is_busy());
    assert_eq!(
        state.view().downloads[0].status,
        DownloadStatus::Saved(PathBuf::from("downloads/merged.pdf"))
    );
}

#[test]
fn empty_watermark_text_never_submits() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::WatermarkFile,
        vec![FileHandle::new("doc.pdf", 10)],
    );
    let state = set(state, FormField::WatermarkText, "   ");
    let (state, effects) = update(state, Msg::SubmitClicked(OperationKind::Watermark));

    assert!(submitted(&effects).is_none());
    assert!(effects.is_empty());
    match state.view().panel {
        ResultPanel::Error {
            category, message, ..
        } => {
            assert_eq!(category, ErrorCategory::Validation);
            assert!(message.contains("watermark text"));
        }
        other => panic!("unexpected panel {other:?}"),
    }
}

#[test]
fn server_error_is_rendered_and_progress_returns_to_idle() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::RotateFile,
        vec![FileHandle::new("doc.pdf", 10)],
    );
    let (state, effects) = update(state, Msg::SubmitClicked(OperationKind::Rotate));
    let (request_id, _) = submitted(&effects).unwrap();

    let (state, effects) = update(
        state,
        Msg::ResponseArrived {
            request_id,
            kind: OperationKind::Rotate,
            outcome: Ok(OperationResult::failed(Some("corrupt file".to_string()))),
        },
    );
    assert!(scheduled(&effects).is_empty());
    assert!(effects.contains(&Effect::StopProgressTimer));
    match &state.view().panel {
        ResultPanel::Error {
            category, message, ..
        } => {
            assert_eq!(*category, ErrorCategory::Request);
            assert!(message.contains("corrupt file"));
        }
        other => panic!("unexpected panel {other:?}"),
    }

    let generation = settle_generation(&effects);
    let (state, _) = update(state, Msg::ProgressSettled { generation });
    assert_eq!(state.progress().state().phase, ProgressPhase::Idle);
    assert_eq!(state.progress().state().fill, 0);
}

#[test]
fn transport_failure_completes_progress() {
    init_logging();
    let state = set(AppState::new(), FormField::CoverName, "Ada");
    let state = set(state, FormField::CoverPosition, "Engineer");
    let state = set(state, FormField::CoverCompany, "Acme");
    let (state, effects) = update(state, Msg::SubmitClicked(OperationKind::CoverLetter));
    let (request_id, _) = submitted(&effects).unwrap();

    let (state, effects) = update(
        state,
        Msg::ResponseArrived {
            request_id,
            kind: OperationKind::CoverLetter,
            outcome: Err(TransportFailure::new("connection refused")),
        },
    );
    assert_eq!(state.progress().state().phase, ProgressPhase::Settling);
    assert_eq!(
        state.view().panel.message(),
        Some("Request failed: connection refused")
    );
    settle_generation(&effects);
}

#[test]
fn progress_ticks_are_capped_until_completion() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::ExtractFile,
        vec![FileHandle::new("doc.pdf", 10)],
    );
    let (mut state, effects) = update(state, Msg::SubmitClicked(OperationKind::Extract));
    let (request_id, _) = submitted(&effects).unwrap();

    let mut last = 0;
    for _ in 0..20 {
        state = update(state, Msg::ProgressTick { generation: 1 }).0;
        let fill = state.progress().state().fill;
        assert!(fill >= last && fill <= FILL_CAP);
        last = fill;
    }
    assert_eq!(last, FILL_CAP);

    let (state, effects) = update(
        state,
        Msg::ResponseArrived {
            request_id,
            kind: OperationKind::Extract,
            outcome: Ok(OperationResult::succeeded("Text extracted successfully")
                .with_filename("extracted_text.txt")
                .with_preview("--- Page 1 ---\nhello")),
        },
    );
    let (state, _) = update(
        state,
        Msg::ProgressSettled {
            generation: settle_generation(&effects),
        },
    );
    assert_eq!(state.progress().state().phase, ProgressPhase::Idle);
    assert_eq!(state.progress().state().fill, 0);
    match state.view().panel {
        ResultPanel::Success {
            preview: Some(pane),
            ..
        } => assert_eq!(pane.total_lines(), 2),
        other => panic!("unexpected panel {other:?}"),
    }
}

#[test]
fn split_success_staggers_every_artifact() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::SplitFile,
        vec![FileHandle::new("doc.pdf", 10)],
    );
    let state = set(state, FormField::PagesPerFile, "2");
    let (state, effects) = update(state, Msg::SubmitClicked(OperationKind::Split));
    let (request_id, request) = submitted(&effects).unwrap();
    assert_eq!(
        request.text_fields(),
        vec![("pages_per_file", "2".to_string())]
    );

    let names: Vec<String> = ["p1-2.pdf", "p3-4.pdf", "p5-5.pdf"]
        .map(String::from)
        .to_vec();
    let (_, effects) = update(
        state,
        Msg::ResponseArrived {
            request_id,
            kind: OperationKind::Split,
            outcome: Ok(OperationResult::succeeded("PDF split into 3 files")
                .with_filenames(names.clone())),
        },
    );
    let tasks = scheduled(&effects);
    let offsets: Vec<u64> = tasks.iter().map(DownloadTask::offset_millis).collect();
    assert_eq!(offsets, vec![0, 500, 1000]);
    let filenames: Vec<String> = tasks.into_iter().map(|task| task.filename).collect();
    assert_eq!(filenames, names);
}

#[test]
fn stale_response_for_same_kind_is_ignored() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::ExtractFile,
        vec![FileHandle::new("doc.pdf", 10)],
    );
    let (state, first) = update(state, Msg::SubmitClicked(OperationKind::Extract));
    let (first_id, _) = submitted(&first).unwrap();
    let (state, second) = update(state, Msg::SubmitClicked(OperationKind::Extract));
    let (second_id, _) = submitted(&second).unwrap();
    assert!(second_id > first_id);
    assert_eq!(second[0], Effect::StopProgressTimer);

    let (state, effects) = update(
        state,
        Msg::ResponseArrived {
            request_id: first_id,
            kind: OperationKind::Extract,
            outcome: Ok(OperationResult::succeeded("old").with_filename("old.txt")),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().panel, ResultPanel::Hidden);
    assert_eq!(state.progress().state().phase, ProgressPhase::Running);

    let (state, effects) = update(
        state,
        Msg::ResponseArrived {
            request_id: second_id,
            kind: OperationKind::Extract,
            outcome: Ok(OperationResult::succeeded("new").with_filename("new.txt")),
        },
    );
    assert_eq!(scheduled(&effects)[0].filename, "new.txt");
    assert_eq!(state.view().panel.message(), Some("new"));
}

#[test]
fn preview_scroll_marks_dirty_only_when_moved() {
    init_logging();
    let state = select(
        AppState::new(),
        Slot::ExtractFile,
        vec![FileHandle::new("doc.pdf", 10)],
    );
    let (state, effects) = update(state, Msg::SubmitClicked(OperationKind::Extract));
    let (request_id, _) = submitted(&effects).unwrap();
    let text: String = (0..30).map(|i| format!("line {i}\n")).collect();
    let (mut state, _) = update(
        state,
        Msg::ResponseArrived {
            request_id,
            kind: OperationKind::Extract,
            outcome: Ok(OperationResult::succeeded("ok").with_preview(text)),
        },
    );
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::PreviewScrolled(-1));
    assert!(!state.consume_dirty());
    let (mut state, _) = update(state, Msg::PreviewScrolled(4));
    assert!(state.consume_dirty());
    match state.view().panel {
        ResultPanel::Success {
            preview: Some(pane),
            ..
        } => assert_eq!(pane.visible_lines()[0], "line 4"),
        other => panic!("unexpected panel {other:?}"),
    }
}
