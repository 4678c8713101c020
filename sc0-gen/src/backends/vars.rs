use std::collections::HashMap;

use crate::ir::Slot;

/// Variable name to slot mapping for one generation run.
///
/// Slots are handed out in first-assignment order starting at 0 and are
/// never moved or reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarTable {
    names: Vec<String>,
    slots: HashMap<String, Slot>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn slot(&self, name: &str) -> Option<Slot> {
        self.slots.get(name).copied()
    }

    /// Slot of `name`, allocating the next free one on first sight.
    pub fn slot_or_insert(&mut self, name: &str) -> Slot {
        if let Some(slot) = self.slot(name) {
            return slot;
        }
        let slot = self.names.len();
        self.names.push(name.to_string());
        self.slots.insert(name.to_string(), slot);
        tracing::trace!(name, slot, "allocated variable slot");
        slot
    }

    /// Names in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_first_insertion() {
        let mut vars = VarTable::new();
        assert_eq!(vars.slot_or_insert("x"), 0);
        assert_eq!(vars.slot_or_insert("y"), 1);
        assert_eq!(vars.slot_or_insert("x"), 0);
        assert_eq!(vars.slot_or_insert("z"), 2);

        assert_eq!(vars.len(), 3);
        assert_eq!(vars.names().collect::<Vec<_>>(), ["x", "y", "z"]);
    }

    #[test]
    fn lookup_does_not_insert() {
        let vars = VarTable::new();
        assert_eq!(vars.slot("missing"), None);
        assert!(vars.is_empty());
    }
}
