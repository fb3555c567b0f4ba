use std::sync::Once;

use pdfdesk_core::{update, Affordance, AppState, FileHandle, Msg, Slot};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pdfdesk_logging::initialize_for_tests);
}

fn files(names: &[&str]) -> Vec<FileHandle> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| FileHandle::new(*name, 100 * (i as u64 + 1)))
        .collect()
}

fn slot_names(state: &AppState, slot: Slot) -> Vec<String> {
    state
        .selections()
        .selection(slot)
        .handles()
        .iter()
        .map(|handle| handle.name().to_string())
        .collect()
}

#[test]
fn drop_and_manual_selection_produce_identical_state() {
    init_logging();
    let dropped = files(&["a.pdf", "b.pdf", "c.pdf"]);

    let (mut via_select, select_effects) = update(
        AppState::new(),
        Msg::FilesSelected {
            slot: Slot::MergeFiles,
            files: dropped.clone(),
        },
    );
    let (via_drop, _) = update(AppState::new(), Msg::DragEntered { slot: Slot::MergeFiles });
    let (mut via_drop, drop_effects) = update(
        via_drop,
        Msg::FilesDropped {
            slot: Slot::MergeFiles,
            files: dropped,
        },
    );

    assert!(select_effects.is_empty());
    assert!(drop_effects.is_empty());
    assert!(via_select.consume_dirty());
    assert!(via_drop.consume_dirty());
    assert_eq!(via_select, via_drop);
}

#[test]
fn dropping_onto_single_slot_keeps_first_file() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesDropped {
            slot: Slot::WatermarkFile,
            files: files(&["first.pdf", "second.pdf"]),
        },
    );
    assert_eq!(slot_names(&state, Slot::WatermarkFile), vec!["first.pdf"]);
}

#[test]
fn empty_drop_resets_affordance_without_mutation() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesSelected {
            slot: Slot::ExtractFile,
            files: files(&["keep.pdf"]),
        },
    );
    let (state, _) = update(state, Msg::DragEntered { slot: Slot::ExtractFile });
    let revision = state.selections().revision();
    assert_eq!(state.view().slots[2].affordance, Affordance::Highlighted);

    let (state, _) = update(
        state,
        Msg::FilesDropped {
            slot: Slot::ExtractFile,
            files: Vec::new(),
        },
    );
    let view = state.view();
    let extract = view
        .slots
        .iter()
        .find(|slot| slot.slot == Slot::ExtractFile)
        .unwrap();
    assert_eq!(extract.affordance, Affordance::Resting);
    assert_eq!(state.selections().revision(), revision);
    assert_eq!(slot_names(&state, Slot::ExtractFile), vec!["keep.pdf"]);
}

#[test]
fn remove_file_rebuilds_list_and_renumbers_rows() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesSelected {
            slot: Slot::MergeFiles,
            files: files(&["a.pdf", "b.pdf", "c.pdf"]),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::RemoveFileClicked {
            slot: Slot::MergeFiles,
            index: 1,
        },
    );
    assert!(state.consume_dirty());

    let view = state.view();
    let rows: Vec<_> = view.slots[0]
        .files
        .iter()
        .map(|row| (row.index, row.name.as_str(), row.size))
        .collect();
    assert_eq!(rows, vec![(0, "a.pdf", 100), (1, "c.pdf", 300)]);
}

#[test]
fn out_of_range_removal_leaves_state_untouched() {
    init_logging();
    let (mut state, _) = update(
        AppState::new(),
        Msg::FilesSelected {
            slot: Slot::MergeFiles,
            files: files(&["a.pdf"]),
        },
    );
    state.consume_dirty();
    let before = state.clone();

    let (mut next, effects) = update(
        state,
        Msg::RemoveFileClicked {
            slot: Slot::MergeFiles,
            index: 5,
        },
    );
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, before);
}
