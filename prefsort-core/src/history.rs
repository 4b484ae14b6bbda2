/// Undo stack of fully settled engine states.
///
/// An entry is pushed before every choice or skip and holds owned copies of
/// all items and session counters, so nothing in the stack aliases live state.
use crate::registry::ItemRegistry;
use crate::session::SessionState;
use crate::types::Item;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub items: Vec<Item>,
    pub session: SessionState,
}

#[derive(Debug, Default)]
pub struct HistoryManager {
    stack: Vec<HistoryEntry>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&mut self, registry: &ItemRegistry, session: &SessionState) {
        self.stack.push(HistoryEntry {
            items: registry.snapshot(),
            session: session.clone(),
        });
    }

    /// Pop the newest entry and write it back into `registry` and `session`.
    /// Returns false, touching nothing, when the stack is empty.
    pub fn undo(&mut self, registry: &mut ItemRegistry, session: &mut SessionState) -> bool {
        match self.stack.pop() {
            Some(entry) => {
                registry.restore(entry.items);
                *session = entry.session;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
