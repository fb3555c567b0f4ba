use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::FileHandle;

/// Named input location for user files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    MergeFiles,
    WatermarkFile,
    ExtractFile,
    SplitFile,
    RotateFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// At most one handle.
    Single,
    /// Any number of handles.
    Multi,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::MergeFiles,
        Slot::WatermarkFile,
        Slot::ExtractFile,
        Slot::SplitFile,
        Slot::RotateFile,
    ];

    pub fn multiplicity(self) -> Multiplicity {
        match self {
            Slot::MergeFiles => Multiplicity::Multi,
            Slot::WatermarkFile | Slot::ExtractFile | Slot::SplitFile | Slot::RotateFile => {
                Multiplicity::Single
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::MergeFiles => "merge",
            Slot::WatermarkFile => "watermark",
            Slot::ExtractFile => "extract",
            Slot::SplitFile => "split",
            Slot::RotateFile => "rotate",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered, immutable sequence of handles held by one slot.
///
/// A selection is never edited in place: every mutation of the store builds
/// a fresh sequence and assigns it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    handles: Arc<[FileHandle]>,
}

impl Default for FileSelection {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl FileSelection {
    fn from_vec(handles: Vec<FileHandle>) -> Self {
        Self {
            handles: Arc::from(handles),
        }
    }

    pub fn handles(&self) -> &[FileHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn first(&self) -> Option<&FileHandle> {
        self.handles.first()
    }

    pub fn total_size(&self) -> u64 {
        self.handles.iter().map(FileHandle::size).sum()
    }

    fn without(&self, index: usize) -> Self {
        let rebuilt = self
            .handles
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != index)
            .map(|(_, handle)| handle.clone())
            .collect();
        Self::from_vec(rebuilt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("index {index} is out of bounds for the {slot} selection of {len} file(s)")]
    IndexOutOfBounds { slot: Slot, index: usize, len: usize },
}

/// Published after every successful mutation of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub slot: Slot,
    pub selection: FileSelection,
    pub revision: u64,
}

/// Current file handles for each slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSelectionStore {
    slots: BTreeMap<Slot, FileSelection>,
    revision: u64,
}

impl FileSelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, slot: Slot) -> FileSelection {
        self.slots.get(&slot).cloned().unwrap_or_default()
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the slot's entire sequence. A `Single` slot keeps only the
    /// first handle; extras are discarded.
    pub fn set_all(
        &mut self,
        slot: Slot,
        handles: impl IntoIterator<Item = FileHandle>,
    ) -> SelectionChanged {
        let handles: Vec<FileHandle> = match slot.multiplicity() {
            Multiplicity::Single => handles.into_iter().take(1).collect(),
            Multiplicity::Multi => handles.into_iter().collect(),
        };
        self.publish(slot, FileSelection::from_vec(handles))
    }

    /// Rebuild the slot's sequence without the element at `index`.
    pub fn remove_at(&mut self, slot: Slot, index: usize) -> Result<SelectionChanged, SelectionError> {
        let current = self.selection(slot);
        if index >= current.len() {
            return Err(SelectionError::IndexOutOfBounds {
                slot,
                index,
                len: current.len(),
            });
        }
        Ok(self.publish(slot, current.without(index)))
    }

    fn publish(&mut self, slot: Slot, selection: FileSelection) -> SelectionChanged {
        self.revision += 1;
        self.slots.insert(slot, selection.clone());
        SelectionChanged {
            slot,
            selection,
            revision: self.revision,
        }
    }
}
