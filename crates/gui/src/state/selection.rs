use shared::ObjectId;

/// Which level of the selection machine is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Unselected,
    ObjectSelected,
    PartSelected,
}

/// Selection state: Unselected → ObjectSelected → PartSelected.
///
/// Clicking an object selects it; clicking a part while its object is
/// selected drills into the part; clicking empty space or closing the
/// properties card clears everything. Selecting a different object
/// always resets the part level.
#[derive(Default)]
pub struct SelectionState {
    selected_object: Option<ObjectId>,
    selected_part: Option<usize>,
    /// Version counter for highlight cache invalidation
    pub version: u64,
}

impl SelectionState {
    /// Currently selected object, if any
    pub fn object(&self) -> Option<&ObjectId> {
        self.selected_object.as_ref()
    }

    /// Selected part index within the selected object
    pub fn part(&self) -> Option<usize> {
        self.selected_part
    }

    pub fn phase(&self) -> SelectionPhase {
        match (&self.selected_object, self.selected_part) {
            (None, _) => SelectionPhase::Unselected,
            (Some(_), None) => SelectionPhase::ObjectSelected,
            (Some(_), Some(_)) => SelectionPhase::PartSelected,
        }
    }

    pub fn is_object_selected(&self, id: &str) -> bool {
        self.selected_object.as_deref() == Some(id)
    }

    pub fn is_part_selected(&self, id: &str, part_index: usize) -> bool {
        self.is_object_selected(id) && self.selected_part == Some(part_index)
    }

    /// Select an object (clears any part selection, including when the
    /// same object is re-selected)
    pub fn select_object(&mut self, id: ObjectId) {
        self.selected_object = Some(id);
        self.selected_part = None;
        self.version += 1;
    }

    /// Drill into a part of the already-selected object. Ignored when
    /// that object is not the selected one.
    pub fn select_part(&mut self, object_id: &str, part_index: usize) {
        if self.is_object_selected(object_id) {
            self.selected_part = Some(part_index);
            self.version += 1;
        }
    }

    /// Toggle a part: selecting the active part again returns to the
    /// object level (the properties card behavior)
    pub fn toggle_part(&mut self, object_id: &str, part_index: usize) {
        if !self.is_object_selected(object_id) {
            return;
        }
        if self.selected_part == Some(part_index) {
            self.selected_part = None;
        } else {
            self.selected_part = Some(part_index);
        }
        self.version += 1;
    }

    /// Back from PartSelected to ObjectSelected
    pub fn clear_part(&mut self) {
        if self.selected_part.is_some() {
            self.selected_part = None;
            self.version += 1;
        }
    }

    /// Back to Unselected
    pub fn clear(&mut self) {
        if self.selected_object.is_some() || self.selected_part.is_some() {
            self.selected_object = None;
            self.selected_part = None;
            self.version += 1;
        }
    }

    /// Drop the selection if it points at an object that no longer exists
    pub fn prune(&mut self, exists: impl Fn(&str) -> bool) {
        if let Some(id) = &self.selected_object {
            if !exists(id) {
                self.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_unselected() {
        let s = SelectionState::default();
        assert_eq!(s.phase(), SelectionPhase::Unselected);
        assert!(s.object().is_none());
        assert!(s.part().is_none());
    }

    #[test]
    fn test_click_object_enters_object_selected() {
        let mut s = SelectionState::default();
        s.select_object("a".to_string());
        assert_eq!(s.phase(), SelectionPhase::ObjectSelected);
        assert!(s.is_object_selected("a"));
        assert!(!s.is_object_selected("b"));
    }

    #[test]
    fn test_click_part_enters_part_selected() {
        let mut s = SelectionState::default();
        s.select_object("a".to_string());
        s.select_part("a", 2);
        assert_eq!(s.phase(), SelectionPhase::PartSelected);
        assert_eq!(s.part(), Some(2));
        assert!(s.is_part_selected("a", 2));
        assert!(!s.is_part_selected("a", 1));
    }

    #[test]
    fn test_part_selection_requires_selected_object() {
        let mut s = SelectionState::default();
        s.select_part("a", 0);
        assert_eq!(s.phase(), SelectionPhase::Unselected);

        s.select_object("a".to_string());
        s.select_part("b", 0);
        assert_eq!(s.phase(), SelectionPhase::ObjectSelected);
    }

    #[test]
    fn test_selecting_other_object_resets_part() {
        let mut s = SelectionState::default();
        s.select_object("a".to_string());
        s.select_part("a", 1);
        s.select_object("b".to_string());
        assert_eq!(s.phase(), SelectionPhase::ObjectSelected);
        assert!(s.part().is_none());
    }

    #[test]
    fn test_toggle_part_returns_to_object_level() {
        let mut s = SelectionState::default();
        s.select_object("a".to_string());
        s.toggle_part("a", 0);
        assert_eq!(s.phase(), SelectionPhase::PartSelected);
        s.toggle_part("a", 0);
        assert_eq!(s.phase(), SelectionPhase::ObjectSelected);
        s.toggle_part("a", 1);
        assert_eq!(s.part(), Some(1));
    }

    #[test]
    fn test_clear_returns_to_unselected() {
        let mut s = SelectionState::default();
        s.select_object("a".to_string());
        s.select_part("a", 0);
        s.clear();
        assert_eq!(s.phase(), SelectionPhase::Unselected);
    }

    #[test]
    fn test_clear_part_keeps_object() {
        let mut s = SelectionState::default();
        s.select_object("a".to_string());
        s.select_part("a", 0);
        s.clear_part();
        assert_eq!(s.phase(), SelectionPhase::ObjectSelected);
        assert!(s.is_object_selected("a"));
    }

    #[test]
    fn test_prune_removes_dangling_selection() {
        let mut s = SelectionState::default();
        s.select_object("ghost".to_string());
        s.prune(|id| id == "real");
        assert_eq!(s.phase(), SelectionPhase::Unselected);

        s.select_object("real".to_string());
        s.prune(|id| id == "real");
        assert!(s.is_object_selected("real"));
    }

    #[test]
    fn test_version_increments_on_change() {
        let mut s = SelectionState::default();
        let v0 = s.version;
        s.select_object("a".to_string());
        assert!(s.version > v0);
        let v1 = s.version;
        s.clear();
        assert!(s.version > v1);
        // clearing an empty selection is a no-op
        let v2 = s.version;
        s.clear();
        assert_eq!(s.version, v2);
    }
}
