use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::trace;

use crate::application::ViewStateController;
use crate::domain::{HomeOverlay, Screen};

use super::elements::ElementId;
use super::session::UiSession;

/// Whether the event loop should keep running after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    /// Routes a key press. Open dialogs and the picker capture input before
    /// the page beneath them.
    pub fn handle_key_event(
        controller: &ViewStateController,
        session: &mut UiSession,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> InputOutcome {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return InputOutcome::Quit;
        }

        match controller.snapshot().screen {
            Screen::Home(HomeOverlay::None) if session.picker.expanded => {
                Self::handle_picker_keys(controller, session, key);
                InputOutcome::Continue
            }
            Screen::Home(HomeOverlay::None) => Self::handle_home_keys(controller, session, key),
            Screen::Home(HomeOverlay::ErrorDialog) => {
                if matches!(key, KeyCode::Enter | KeyCode::Char('c')) {
                    controller.acknowledge_error();
                }
                InputOutcome::Continue
            }
            Screen::Home(HomeOverlay::Loading) => match key {
                KeyCode::Char('q') => InputOutcome::Quit,
                _ => InputOutcome::Continue,
            },
            Screen::Home(HomeOverlay::TvLicenseConfirm) => {
                match key {
                    KeyCode::Char('y') => controller.confirm_tv_guide_navigation(),
                    KeyCode::Char('n') | KeyCode::Esc => controller.decline_tv_guide_navigation(),
                    _ => {}
                }
                InputOutcome::Continue
            }
            Screen::Content(_) => Self::handle_content_keys(controller, key),
        }
    }

    /// Turns a left click into a tap on whatever element lies under it.
    pub fn handle_mouse_event(
        controller: &ViewStateController,
        session: &mut UiSession,
        event: MouseEvent,
    ) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        match session.elements.hit_test(event.column, event.row) {
            Some(element) => Self::tap(controller, session, element),
            // Clicking away dismisses the picker
            None => session.picker.close(),
        }
    }

    /// Performs the action bound to an element, as if it had been tapped.
    pub fn tap(controller: &ViewStateController, session: &mut UiSession, element: ElementId) {
        trace!(tag = %element.tag(), "tap");
        match element {
            ElementId::RefreshButton => {
                session.picker.close();
                controller.refresh();
            }
            ElementId::CurrentTopic => {
                if session.picker.expanded {
                    session.picker.close();
                } else {
                    session.picker.open(controller.snapshot().selected_topic);
                }
            }
            ElementId::PickerItem(topic) => {
                controller.select_topic(topic);
                session.picker.close();
            }
            ElementId::GoToButton => {
                session.picker.close();
                controller.request_navigation();
            }
            ElementId::BreakingNewsButton => {
                session.picker.close();
                controller.request_breaking_news();
            }
            ElementId::ErrorConfirmButton => controller.acknowledge_error(),
            ElementId::TvLicenseYesButton => controller.confirm_tv_guide_navigation(),
            ElementId::TvLicenseNoButton => controller.decline_tv_guide_navigation(),
            ElementId::BackButton => controller.go_home(),
            ElementId::Logo
            | ElementId::HomeTitle
            | ElementId::MainImage
            | ElementId::LastUpdated
            | ElementId::Subtitle
            | ElementId::DropdownMenu
            | ElementId::ErrorDialog
            | ElementId::LoadingSpinner
            | ElementId::TvLicenseDialog
            | ElementId::ContentTitle
            | ElementId::ContentEndText => {}
        }
    }

    fn handle_home_keys(
        controller: &ViewStateController,
        session: &mut UiSession,
        key: KeyCode,
    ) -> InputOutcome {
        match key {
            KeyCode::Char('q') => return InputOutcome::Quit,
            KeyCode::Char('r') => Self::tap(controller, session, ElementId::RefreshButton),
            KeyCode::Char('g') | KeyCode::Enter => {
                Self::tap(controller, session, ElementId::GoToButton)
            }
            KeyCode::Char('b') => Self::tap(controller, session, ElementId::BreakingNewsButton),
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                Self::tap(controller, session, ElementId::CurrentTopic)
            }
            KeyCode::Char(digit @ '1'..='6') => {
                let index = digit as usize - '1' as usize;
                controller.select_topic_at(index);
            }
            _ => {}
        }
        InputOutcome::Continue
    }

    fn handle_picker_keys(
        controller: &ViewStateController,
        session: &mut UiSession,
        key: KeyCode,
    ) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => session.picker.highlight_previous(),
            KeyCode::Down | KeyCode::Char('j') => session.picker.highlight_next(),
            KeyCode::Enter => {
                if let Some(topic) = session.picker.highlighted_topic() {
                    Self::tap(controller, session, ElementId::PickerItem(topic));
                }
            }
            KeyCode::Esc | KeyCode::Char('p') => session.picker.close(),
            _ => {}
        }
    }

    fn handle_content_keys(controller: &ViewStateController, key: KeyCode) -> InputOutcome {
        match key {
            KeyCode::Char('q') => return InputOutcome::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                controller.go_home()
            }
            _ => {}
        }
        InputOutcome::Continue
    }
}
