use crate::model::GraphState;

/// Manages the Undo/Redo history of the GraphState.
///
/// This implementation uses a simple Full State Snapshot approach.
/// While less memory efficient than Command Pattern, it is robust against
/// complex state drift and guarantees correct restoration of all IDs.
pub struct HistoryManager {
    undo_stack: Vec<GraphState>,
    redo_stack: Vec<GraphState>,
    pub max_history: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history: 50,
        }
    }
}

impl HistoryManager {
    /// Creates a new HistoryManager with a specified limit.
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_history),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Helper to check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Helper to check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Saving a snapshot BEFORE a destructive action.
    ///
    /// Call this *before* you mutate the graph.
    pub fn commit(&mut self, state: &GraphState) {
        if self.undo_stack.len() >= self.max_history {
            self.undo_stack.remove(0); // Drop oldest
        }
        self.undo_stack.push(state.clone());
        self.redo_stack.clear(); // New timeline branch
    }

    // A restored snapshot carries the revision counters it was taken at, which
    // may collide with counters derived caches saw since. Advance them past
    // the outgoing state so every cache rebuilds.
    fn bump_revisions(restored: &mut GraphState, outgoing: &GraphState) {
        restored.revision = restored.revision.max(outgoing.revision).wrapping_add(1);
        restored.topology_revision = restored
            .topology_revision
            .max(outgoing.topology_revision)
            .wrapping_add(1);
    }

    /// Performs Undo.
    ///
    /// Returns true if successful (state updated), false if nothing to undo.
    pub fn undo(&mut self, state: &mut GraphState) -> bool {
        if let Some(mut prev_state) = self.undo_stack.pop() {
            Self::bump_revisions(&mut prev_state, state);
            // Push CURRENT state to redo stack before overwriting
            self.redo_stack.push(state.clone());
            *state = prev_state;
            true
        } else {
            false
        }
    }

    /// Performs Redo.
    ///
    /// Returns true if successful (state updated), false if nothing to redo.
    pub fn redo(&mut self, state: &mut GraphState) -> bool {
        if let Some(mut next_state) = self.redo_stack.pop() {
            Self::bump_revisions(&mut next_state, state);
            // Push CURRENT state to undo stack before overwriting
            self.undo_stack.push(state.clone());
            *state = next_state;
            true
        } else {
            false
        }
    }
}
