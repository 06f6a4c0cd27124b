//! Trail of applied edits

use super::Workspace;

/// Ordered stack of the edits applied since the search started.
///
/// Only the search engine pushes and pops entries. Replaying the trail from
/// the initial workspace reproduces the current workspace exactly.
#[derive(Debug, Clone)]
pub struct Trail<E> {
    entries: Vec<E>,
}

impl<E> Trail<E> {
    /// Create an empty trail
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub(crate) fn push(&mut self, edit: E) {
        self.entries.push(edit);
    }

    pub(crate) fn pop(&mut self) -> Option<E> {
        self.entries.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of edits currently applied
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Edits in application order
    pub fn as_slice(&self) -> &[E] {
        &self.entries
    }
}

impl<E> Default for Trail<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `edits` in order, snapshot the result, then undo them in reverse.
///
/// The workspace is left exactly as it was on entry.
pub fn replay<W: Workspace>(workspace: &mut W, edits: &[W::Edit]) -> W {
    for edit in edits {
        workspace.apply(edit);
    }
    let snapshot = workspace.clone();
    for edit in edits.iter().rev() {
        workspace.undo(edit);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Counter(Vec<u32>);

    impl Workspace for Counter {
        type Edit = u32;

        fn apply(&mut self, edit: &u32) {
            self.0.push(*edit);
        }

        fn undo(&mut self, edit: &u32) {
            assert_eq!(self.0.pop(), Some(*edit));
        }
    }

    #[test]
    fn test_push_pop_order() {
        let mut trail = Trail::new();
        trail.push(1);
        trail.push(2);
        assert_eq!(trail.as_slice(), &[1, 2]);
        assert_eq!(trail.pop(), Some(2));
        assert_eq!(trail.len(), 1);
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.pop(), None);
    }

    #[test]
    fn test_replay_restores_workspace() {
        let mut workspace = Counter(vec![7]);
        let snapshot = replay(&mut workspace, &[1, 2, 3]);

        assert_eq!(snapshot, Counter(vec![7, 1, 2, 3]));
        assert_eq!(workspace, Counter(vec![7]));
    }
}
