//! Carousel slot registry.
//!
//! The [`SlotRegistry`] holds the ordered list of selectable slots and the
//! current selection index.  Slots are stored in the order the workspaces
//! were enumerated and are never reordered; the registry only moves the
//! selection.
//!
//! When no eligible workspace exists (or the compositor query failed
//! upstream), the registry holds exactly one placeholder slot so the
//! navigation arithmetic never divides by zero.

use crate::command::WorkspaceInfo;

/// One carousel position.
///
/// `workspace` is `None` for the placeholder slot that stands in when no
/// eligible workspace exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Snapshot of the workspace this slot represents, if any.
    pub workspace: Option<WorkspaceInfo>,
}

impl Slot {
    /// Whether this is the stand-in slot for an empty workspace list.
    pub fn is_placeholder(&self) -> bool {
        self.workspace.is_none()
    }
}

/// Ordered collection of slots plus the current selection.
///
/// Invariant: `selected < len()` and `len() >= 1` at all times.
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
    selected: usize,
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotRegistry {
    /// Create a registry holding the single placeholder slot.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot { workspace: None }],
            selected: 0,
        }
    }

    /// Replace the slot list with a snapshot of `workspaces`, keeping only
    /// the eligible ones.  Returns the resulting slot count.
    ///
    /// An empty (or fully ineligible) input degrades to the placeholder
    /// slot; this is not an error.  The selection resets to 0.
    pub fn load(&mut self, workspaces: Vec<WorkspaceInfo>) -> usize {
        self.slots = workspaces
            .into_iter()
            .filter(WorkspaceInfo::is_eligible)
            .map(|ws| Slot { workspace: Some(ws) })
            .collect();
        if self.slots.is_empty() {
            self.slots.push(Slot { workspace: None });
        }
        self.selected = 0;
        self.slots.len()
    }

    //  Accessors

    /// Number of slots (always at least 1).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the registry holds only the placeholder slot.
    pub fn is_placeholder(&self) -> bool {
        self.slots.len() == 1 && self.slots[0].is_placeholder()
    }

    /// Index of the currently selected slot.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The currently selected slot.
    pub fn selected_slot(&self) -> &Slot {
        &self.slots[self.selected]
    }

    /// Iterate over all slots in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    //  Navigation

    /// Advance the selection by one, wrapping past the end.
    pub fn select_next(&mut self) -> usize {
        self.selected = (self.selected + 1) % self.slots.len();
        self.selected
    }

    /// Retreat the selection by one, wrapping past the start.
    pub fn select_prev(&mut self) -> usize {
        self.selected = (self.selected + self.slots.len() - 1) % self.slots.len();
        self.selected
    }

    /// Set the selection to `index` if it is in range; out-of-range indices
    /// are silently ignored.
    pub fn select_index(&mut self, index: usize) -> usize {
        if index < self.slots.len() {
            self.selected = index;
        }
        self.selected
    }

    /// Select the slot holding the workspace with the given id, if present.
    ///
    /// Used on activation to position the ring on the compositor's active
    /// workspace.  Unknown ids leave the selection unchanged.
    pub fn select_workspace(&mut self, id: i32) -> usize {
        if let Some(index) = self
            .slots
            .iter()
            .position(|s| s.workspace.as_ref().is_some_and(|ws| ws.id == id))
        {
            self.selected = index;
        }
        self.selected
    }
}

//  Tests
