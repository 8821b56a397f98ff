use crate::domain::Topic;

use super::elements::ElementMap;

/// Expansion and highlight of the topic picker dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerState {
    pub expanded: bool,
    /// Index into [`Topic::ALL`] of the highlighted entry
    pub highlighted: usize,
}

impl PickerState {
    /// Opens the dropdown with the current topic highlighted.
    pub fn open(&mut self, current: Topic) {
        self.expanded = true;
        self.highlighted = current.index();
    }

    pub fn close(&mut self) {
        self.expanded = false;
    }

    pub fn highlight_previous(&mut self) {
        if self.highlighted > 0 {
            self.highlighted -= 1;
        }
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < Topic::ALL.len() {
            self.highlighted += 1;
        }
    }

    pub fn highlighted_topic(&self) -> Option<Topic> {
        Topic::from_index(self.highlighted)
    }
}

/// Presentation-only state that does not belong in the shared view state.
#[derive(Debug, Clone, Default)]
pub struct UiSession {
    pub picker: PickerState,
    /// Elements drawn in the most recent frame
    pub elements: ElementMap,
}
