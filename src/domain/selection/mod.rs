// src/domain/selection/mod.rs
//
// Selection state for one pricing session.
//
// In-memory only. The caller creates one SelectionState per interactive
// session and discards it to reset; there is no clear operation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::Category;

/// The accessory and packaging names currently chosen for a pricing run.
///
/// Membership toggles: selecting an already-selected name removes it,
/// selecting an absent name adds it. The two categories are independent.
/// The material choice is a single value and lives with the caller, not
/// here; toggling the Material category is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionState {
    accessories: BTreeSet<String>,
    packaging: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `name` in the given category's set.
    pub fn toggle(&mut self, category: Category, name: &str) {
        let Some(set) = self.set_mut(category) else {
            log::debug!("Ignoring selection toggle for material '{}'", name);
            return;
        };
        if !set.remove(name) {
            set.insert(name.to_string());
        }
    }

    /// The chosen names for a category as a deterministic ordered sequence.
    ///
    /// A set has no intrinsic order; this iterates lexicographically so
    /// repeated calls agree with each other regardless of toggle order.
    pub fn current(&self, category: Category) -> Vec<String> {
        self.set(category)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_selected(&self, category: Category, name: &str) -> bool {
        self.set(category).is_some_and(|set| set.contains(name))
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.set(category).map_or(true, |set| set.is_empty())
    }

    fn set(&self, category: Category) -> Option<&BTreeSet<String>> {
        match category {
            Category::Accessory => Some(&self.accessories),
            Category::Packaging => Some(&self.packaging),
            Category::Material => None,
        }
    }

    fn set_mut(&mut self, category: Category) -> Option<&mut BTreeSet<String>> {
        match category {
            Category::Accessory => Some(&mut self.accessories),
            Category::Packaging => Some(&mut self.packaging),
            Category::Material => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut state = SelectionState::new();
        state.toggle(Category::Accessory, "Screw");
        assert!(state.is_selected(Category::Accessory, "Screw"));
        state.toggle(Category::Accessory, "Screw");
        assert!(!state.is_selected(Category::Accessory, "Screw"));
    }

    #[test]
    fn test_toggle_pair_restores_prior_state() {
        let mut state = SelectionState::new();
        state.toggle(Category::Accessory, "Magnet");
        let before = state.current(Category::Accessory);

        state.toggle(Category::Accessory, "Screw");
        state.toggle(Category::Accessory, "Screw");

        assert_eq!(state.current(Category::Accessory), before);
    }

    #[test]
    fn test_categories_are_independent() {
        let mut state = SelectionState::new();
        state.toggle(Category::Accessory, "Box");
        assert!(!state.is_selected(Category::Packaging, "Box"));
        state.toggle(Category::Packaging, "Box");
        state.toggle(Category::Accessory, "Box");
        assert!(state.is_selected(Category::Packaging, "Box"));
        assert!(!state.is_selected(Category::Accessory, "Box"));
    }

    #[test]
    fn test_material_toggle_is_noop() {
        let mut state = SelectionState::new();
        state.toggle(Category::Material, "PLA");
        assert!(state.is_empty(Category::Accessory));
        assert!(state.is_empty(Category::Packaging));
    }

    #[test]
    fn test_current_is_deterministically_ordered() {
        let mut state = SelectionState::new();
        state.toggle(Category::Packaging, "Wrap");
        state.toggle(Category::Packaging, "Bag");
        state.toggle(Category::Packaging, "Label");
        assert_eq!(
            state.current(Category::Packaging),
            vec!["Bag", "Label", "Wrap"]
        );
    }
}
