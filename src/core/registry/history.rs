//=========================================================================
// Navigation History
//=========================================================================
//
// Ordered stack of Standard windows, most recent last.
//
// At most one entry per window; pushing a window already present moves
// it to the top. The top entry is the only one considered visible.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::window::WindowKey;

//=== NavigationHistory ===================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct NavigationHistory {
    stack: Vec<WindowKey>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `key`, removing any earlier entry for it first.
    pub fn push(&mut self, key: WindowKey) {
        self.remove(key);
        self.stack.push(key);
    }

    pub fn pop(&mut self) -> Option<WindowKey> {
        self.stack.pop()
    }

    /// Removes `key` wherever it sits. Returns `false` if absent.
    pub fn remove(&mut self, key: WindowKey) -> bool {
        match self.stack.iter().position(|&k| k == key) {
            Some(pos) => {
                self.stack.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn top(&self) -> Option<WindowKey> {
        self.stack.last().copied()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Bottom to top.
    pub fn as_slice(&self) -> &[WindowKey] {
        &self.stack
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<WindowKey> {
        let mut slots = SlotMap::<WindowKey, ()>::with_key();
        (0..n).map(|_| slots.insert(())).collect()
    }

    #[test]
    fn push_moves_existing_entry_to_top() {
        let k = keys(3);
        let mut history = NavigationHistory::new();
        history.push(k[0]);
        history.push(k[1]);
        history.push(k[2]);

        history.push(k[0]);

        assert_eq!(history.as_slice(), &[k[1], k[2], k[0]]);
        assert_eq!(history.top(), Some(k[0]));
    }

    #[test]
    fn remove_from_middle() {
        let k = keys(3);
        let mut history = NavigationHistory::new();
        for &key in &k {
            history.push(key);
        }

        assert!(history.remove(k[1]));
        assert!(!history.remove(k[1]));
        assert_eq!(history.as_slice(), &[k[0], k[2]]);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut history = NavigationHistory::new();
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }
}
