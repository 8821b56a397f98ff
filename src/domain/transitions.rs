//! Pure transition function for the view state.
//!
//! Every intent is accepted in every state. Intents whose guard does not hold
//! leave the state untouched and report no change.

use chrono::{DateTime, Local};

use super::models::{AppState, HomeOverlay, Screen, Topic};

/// A user-triggered operation, or the timer completion of a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectTopic(Topic),
    RequestNavigation,
    ConfirmTvGuideNavigation,
    DeclineTvGuideNavigation,
    GoHome,
    RequestBreakingNews,
    AcknowledgeError,
    BeginRefresh,
    CompleteRefresh { at: DateTime<Local> },
}

impl AppState {
    /// Applies `intent` and returns whether the state changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::SelectTopic(topic) => {
                if self.selected_topic == topic {
                    return false;
                }
                self.selected_topic = topic;
                true
            }
            Intent::RequestNavigation => match self.screen {
                Screen::Home(_) if self.selected_topic.requires_tv_licence() => {
                    self.set_screen(Screen::Home(HomeOverlay::TvLicenseConfirm))
                }
                Screen::Home(_) => self.set_screen(Screen::Content(self.selected_topic)),
                // The go-to control only exists on the home page
                Screen::Content(_) => false,
            },
            Intent::ConfirmTvGuideNavigation => match self.screen {
                Screen::Home(HomeOverlay::TvLicenseConfirm) => {
                    self.set_screen(Screen::Content(self.selected_topic))
                }
                Screen::Home(_) | Screen::Content(_) => false,
            },
            Intent::DeclineTvGuideNavigation => match self.screen {
                Screen::Home(HomeOverlay::TvLicenseConfirm) => {
                    self.set_screen(Screen::Home(HomeOverlay::None))
                }
                Screen::Home(_) | Screen::Content(_) => false,
            },
            Intent::GoHome => self.set_screen(Screen::Home(HomeOverlay::None)),
            Intent::RequestBreakingNews => match self.screen {
                Screen::Home(_) => self.set_screen(Screen::Home(HomeOverlay::ErrorDialog)),
                Screen::Content(_) => false,
            },
            Intent::AcknowledgeError => match self.screen {
                Screen::Home(HomeOverlay::ErrorDialog) => {
                    self.set_screen(Screen::Home(HomeOverlay::None))
                }
                Screen::Home(_) | Screen::Content(_) => false,
            },
            Intent::BeginRefresh => match self.screen {
                Screen::Home(_) => self.set_screen(Screen::Home(HomeOverlay::Loading)),
                Screen::Content(_) => false,
            },
            Intent::CompleteRefresh { at } => match self.screen {
                // Anything other than the loader means the refresh was superseded
                Screen::Home(HomeOverlay::Loading) => {
                    self.screen = Screen::Home(HomeOverlay::None);
                    self.last_updated = at;
                    true
                }
                Screen::Home(_) | Screen::Content(_) => false,
            },
        }
    }

    fn set_screen(&mut self, screen: Screen) -> bool {
        if self.screen == screen {
            return false;
        }
        self.screen = screen;
        true
    }
}
