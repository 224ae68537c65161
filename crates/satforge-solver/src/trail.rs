//! Partial assignment plus the chronological record needed to undo it.

use satforge_core::{Value, VariableId};

/// One decision level: the branch taken and where its trail segment starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Level {
    /// Trail length when the level was opened.
    pub start: usize,
    pub decision: VariableId,
    pub value: bool,
    /// True once both branches of `decision` have been tried.
    pub flipped: bool,
}

/// Assignment array, trail of assigned variables and decision levels.
///
/// Entries before the first level are root inferences and are never undone
/// during a search.
#[derive(Debug, Clone)]
pub(crate) struct Trail {
    values: Vec<Value>,
    entries: Vec<VariableId>,
    levels: Vec<Level>,
    propagated: usize,
}

impl Trail {
    pub fn new(variable_count: usize) -> Self {
        Self {
            values: vec![Value::Unassigned; variable_count],
            entries: Vec::with_capacity(variable_count),
            levels: Vec::new(),
            propagated: 0,
        }
    }

    /// Clears every assignment, including root inferences.
    pub fn reset(&mut self) {
        self.values.fill(Value::Unassigned);
        self.entries.clear();
        self.levels.clear();
        self.propagated = 0;
    }

    #[inline]
    pub fn value(&self, var: VariableId) -> Value {
        self.values[var.index()]
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Records `var = value`. The variable must be unassigned.
    #[inline]
    pub fn push(&mut self, var: VariableId, value: bool) {
        debug_assert!(!self.values[var.index()].is_assigned());
        self.values[var.index()] = Value::from_bool(value);
        self.entries.push(var);
    }

    /// Opens a new decision level. The caller assigns the decision next.
    pub fn open_level(&mut self, decision: VariableId, value: bool, flipped: bool) {
        self.levels.push(Level {
            start: self.entries.len(),
            decision,
            value,
            flipped,
        });
    }

    /// Removes the deepest level and unassigns its trail segment.
    ///
    /// `on_undo` is called for every unassigned variable with the value it
    /// held, newest first.
    pub fn pop_level(&mut self, mut on_undo: impl FnMut(VariableId, bool)) -> Option<Level> {
        let level = self.levels.pop()?;
        while self.entries.len() > level.start {
            if let Some(var) = self.entries.pop() {
                let held = self.values[var.index()] == Value::True;
                self.values[var.index()] = Value::Unassigned;
                on_undo(var, held);
            }
        }
        self.propagated = self.propagated.min(level.start);
        Some(level)
    }

    /// Returns the next assigned variable whose consequences are pending.
    #[inline]
    pub fn next_to_propagate(&mut self) -> Option<VariableId> {
        let var = self.entries.get(self.propagated).copied()?;
        self.propagated += 1;
        Some(var)
    }

    /// Lowest unassigned variable.
    ///
    /// Every variable below the current decision is assigned, so the scan
    /// starts just past it.
    pub fn next_unassigned(&self) -> Option<VariableId> {
        let start = self
            .levels
            .last()
            .map(|level| level.decision.index() + 1)
            .unwrap_or(0);
        self.values[start..]
            .iter()
            .position(|v| !v.is_assigned())
            .map(|offset| VariableId::new(start + offset))
    }

    pub fn decision_level(&self) -> usize {
        self.levels.len()
    }

    #[cfg(test)]
    pub fn assigned_count(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.values.len()
    }
}
