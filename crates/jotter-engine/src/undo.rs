use jotter_core::Snapshot;

/// Stack of pre-mutation snapshots, newest last. There is no redo.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    snapshots: Vec<Snapshot>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `before` only if the command actually changed something.
    pub fn record(&mut self, before: Snapshot, after: &Snapshot) -> bool {
        if before == *after {
            return false;
        }
        self.snapshots.push(before);
        true
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(lines: &[&str]) -> Snapshot {
        Snapshot::from(lines.iter().map(|l| l.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn unchanged_state_is_not_recorded() {
        let mut history = UndoHistory::new();
        assert!(!history.record(snap(&["T | 0 | a"]), &snap(&["T | 0 | a"])));
        assert!(history.is_empty());
    }

    #[test]
    fn pops_newest_first() {
        let mut history = UndoHistory::new();
        assert!(history.record(snap(&[]), &snap(&["T | 0 | a"])));
        assert!(history.record(snap(&["T | 0 | a"]), &snap(&["T | 1 | a"])));
        assert_eq!(history.len(), 2);

        assert_eq!(history.pop(), Some(snap(&["T | 0 | a"])));
        assert_eq!(history.pop(), Some(snap(&[])));
        assert_eq!(history.pop(), None);
    }
}
