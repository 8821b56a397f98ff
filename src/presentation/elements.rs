//! Stable identifiers for everything the renderer draws.
//!
//! Each frame records where its elements landed in an [`ElementMap`]. Mouse
//! clicks are hit-tested against it, and tests use it to find elements
//! without depending on layout.

use ratatui::layout::{Position, Rect};

use crate::domain::Topic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Logo,
    HomeTitle,
    RefreshButton,
    MainImage,
    LastUpdated,
    Subtitle,
    GoToButton,
    CurrentTopic,
    DropdownMenu,
    PickerItem(Topic),
    BreakingNewsButton,
    ErrorDialog,
    ErrorConfirmButton,
    LoadingSpinner,
    TvLicenseDialog,
    TvLicenseYesButton,
    TvLicenseNoButton,
    ContentTitle,
    ContentEndText,
    BackButton,
}

impl ElementId {
    /// Tag under which automated checks address this element.
    pub fn tag(&self) -> String {
        let tag = match self {
            ElementId::Logo => "bbc_logo",
            ElementId::HomeTitle => "home_page_title",
            ElementId::RefreshButton => "refresh_button",
            ElementId::MainImage => "bbc_image",
            ElementId::LastUpdated => "last_updated",
            ElementId::Subtitle => "page_subtitle",
            ElementId::GoToButton => "go_to_button",
            ElementId::CurrentTopic => "current_topic",
            ElementId::DropdownMenu => "dropdown_menu",
            ElementId::PickerItem(topic) => return format!("dropdown_menu_item_{topic}"),
            ElementId::BreakingNewsButton => "breaking_news_button",
            ElementId::ErrorDialog => "alert_dialog",
            ElementId::ErrorConfirmButton => "alert_confirm_button",
            ElementId::LoadingSpinner => "loading_spinner",
            ElementId::TvLicenseDialog => "tv_license_dialog",
            ElementId::TvLicenseYesButton => "alert_yes_button",
            ElementId::TvLicenseNoButton => "alert_no_button",
            ElementId::ContentTitle => "content_page_title",
            ElementId::ContentEndText => "end_of_page_text",
            ElementId::BackButton => "back_button",
        };
        tag.to_string()
    }
}

/// Screen areas of the elements drawn in the last frame.
#[derive(Debug, Clone, Default)]
pub struct ElementMap {
    entries: Vec<(ElementId, Rect)>,
    /// Entries before this index sit beneath a modal and cannot be hit.
    modal_start: usize,
}

impl ElementMap {
    pub fn clear(&mut self) {
        self.entries.clear();
        self.modal_start = 0;
    }

    pub fn record(&mut self, id: ElementId, area: Rect) {
        self.entries.push((id, area));
    }

    /// Marks everything recorded so far as covered by a modal layer.
    pub fn begin_modal(&mut self) {
        self.modal_start = self.entries.len();
    }

    pub fn get(&self, id: ElementId) -> Option<Rect> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| *entry == id)
            .map(|(_, area)| *area)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Looks an element up by its tag string, e.g. `"refresh_button"`.
    pub fn find_by_tag(&self, tag: &str) -> Option<(ElementId, Rect)> {
        self.entries
            .iter()
            .rev()
            .find(|(id, _)| id.tag() == tag)
            .copied()
    }

    /// Topmost element under the given cell, ignoring anything under a modal.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ElementId> {
        let position = Position::new(column, row);
        self.entries[self.modal_start..]
            .iter()
            .rev()
            .find(|(_, area)| area.contains(position))
            .map(|(id, _)| *id)
    }
}
