use std::collections::BTreeMap;

use crate::{FileHandle, FileSelectionStore, Multiplicity, SelectionChanged, Slot};

/// Visual state of a slot's drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    #[default]
    Resting,
    Highlighted,
}

/// Result of handling one drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    /// Drops are always consumed so the host never navigates to the file.
    pub default_prevented: bool,
    /// Present when the store was mutated; identical to the notification a
    /// manual selection produces.
    pub change: Option<SelectionChanged>,
}

/// Turns external file drops into `FileSelectionStore` mutations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragDropAdapter {
    affordances: BTreeMap<Slot, Affordance>,
}

impl DragDropAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn affordance(&self, slot: Slot) -> Affordance {
        self.affordances.get(&slot).copied().unwrap_or_default()
    }

    /// Returns `true` when the affordance changed.
    pub fn drag_entered(&mut self, slot: Slot) -> bool {
        self.set_affordance(slot, Affordance::Highlighted)
    }

    /// Returns `true` when the affordance changed.
    pub fn drag_left(&mut self, slot: Slot) -> bool {
        self.set_affordance(slot, Affordance::Resting)
    }

    pub fn drop_files(
        &mut self,
        store: &mut FileSelectionStore,
        slot: Slot,
        files: Vec<FileHandle>,
    ) -> DropOutcome {
        self.set_affordance(slot, Affordance::Resting);

        let change = match slot.multiplicity() {
            Multiplicity::Multi => Some(store.set_all(slot, files)),
            Multiplicity::Single => files
                .into_iter()
                .next()
                .map(|first| store.set_all(slot, [first])),
        };

        DropOutcome {
            default_prevented: true,
            change,
        }
    }

    fn set_affordance(&mut self, slot: Slot, affordance: Affordance) -> bool {
        // Resting is the absent state, so a reset leaves no trace behind.
        let previous = match affordance {
            Affordance::Resting => self.affordances.remove(&slot),
            Affordance::Highlighted => self.affordances.insert(slot, affordance),
        }
        .unwrap_or_default();
        previous != affordance
    }
}
