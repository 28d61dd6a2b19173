//! Clipboard write bookkeeping.
//!
//! Each copy the reducer asks for gets a `TaskId`. Only the latest one is
//! awaited; a completion carrying any other id arrived after the user moved
//! on (new copy, new menu, menu closed) and is ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Monotonic id source, owned by `AppState`.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// The copy whose result the open menu is waiting for.
#[derive(Debug, Default, Clone)]
pub struct PendingCopy {
    awaiting: Option<TaskId>,
}

impl PendingCopy {
    /// Awaits `id`, superseding any earlier copy.
    pub fn start(&mut self, id: TaskId) {
        self.awaiting = Some(id);
    }

    pub fn is_pending(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Consumes the completion of `id`; false when it is stale.
    pub fn settle(&mut self, id: TaskId) -> bool {
        if self.awaiting != Some(id) {
            return false;
        }
        self.awaiting = None;
        true
    }

    /// Stops waiting; whatever is in flight will be dropped on arrival.
    pub fn forget(&mut self) {
        self.awaiting = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_copy_supersedes_older() {
        let mut seq = TaskSeq::default();
        let mut pending = PendingCopy::default();
        let first = seq.next_id();
        let second = seq.next_id();
        pending.start(first);
        pending.start(second);

        assert!(!pending.settle(first));
        assert!(pending.is_pending());
        assert!(pending.settle(second));
        assert!(!pending.is_pending());
    }

    #[test]
    fn test_forgotten_copy_completion_is_stale() {
        let mut seq = TaskSeq::default();
        let mut pending = PendingCopy::default();
        let id = seq.next_id();
        pending.start(id);

        pending.forget();
        assert!(!pending.settle(id));
    }

    #[test]
    fn test_ids_are_distinct() {
        let mut seq = TaskSeq::default();
        assert_ne!(seq.next_id(), seq.next_id());
    }
}
