use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::errors::AppError;

/// A news topic offered by the home page picker.
///
/// The order of [`Topic::ALL`] is the display order of the picker and each
/// topic's [`index`](Topic::index) is its position in that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Topic {
    #[default]
    Politics,
    Uk,
    Sport,
    Technology,
    World,
    TvGuide,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Politics,
        Topic::Uk,
        Topic::Sport,
        Topic::Technology,
        Topic::World,
        Topic::TvGuide,
    ];

    pub fn index(self) -> usize {
        match self {
            Topic::Politics => 0,
            Topic::Uk => 1,
            Topic::Sport => 2,
            Topic::Technology => 3,
            Topic::World => 4,
            Topic::TvGuide => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Topic> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Topic::Politics => "Politics",
            Topic::Uk => "UK",
            Topic::Sport => "Sport",
            Topic::Technology => "Technology",
            Topic::World => "World",
            Topic::TvGuide => "TV Guide",
        }
    }

    /// Whether navigating to this topic must be confirmed first.
    pub fn requires_tv_licence(self) -> bool {
        matches!(self, Topic::TvGuide)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Topic {
    type Err = AppError;

    /// Parses a topic label, ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(*c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        Topic::ALL
            .into_iter()
            .find(|topic| topic.label().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| AppError::UnknownTopic(s.to_string()))
    }
}

impl TryFrom<String> for Topic {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.label().to_string()
    }
}

/// Modal layered over the home page. Only one can be shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeOverlay {
    #[default]
    None,
    ErrorDialog,
    Loading,
    TvLicenseConfirm,
}

/// The active screen. Overlays only exist on the home page; the content page
/// carries the topic it is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home(HomeOverlay),
    Content(Topic),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Home(HomeOverlay::None)
    }
}

/// Everything the renderer needs to draw a frame.
///
/// # Examples
///
/// ```
/// use chrono::Local;
/// use headlines::domain::{AppState, HomeOverlay, Screen, Topic};
///
/// let state = AppState::new(Topic::Politics, Local::now());
/// assert_eq!(state.screen, Screen::Home(HomeOverlay::None));
/// assert_eq!(state.go_to_label(), "Go to Politics");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    /// Topic shown in the picker and targeted by navigation
    pub selected_topic: Topic,
    /// When the home page was last refreshed
    pub last_updated: DateTime<Local>,
}

impl AppState {
    pub fn new(selected_topic: Topic, now: DateTime<Local>) -> Self {
        Self {
            screen: Screen::default(),
            selected_topic,
            last_updated: now,
        }
    }

    /// The active overlay, which is always `None` off the home page.
    pub fn overlay(&self) -> HomeOverlay {
        match self.screen {
            Screen::Home(overlay) => overlay,
            Screen::Content(_) => HomeOverlay::None,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self.screen, Screen::Home(_))
    }

    pub fn content_topic(&self) -> Option<Topic> {
        match self.screen {
            Screen::Home(_) => None,
            Screen::Content(topic) => Some(topic),
        }
    }

    pub fn go_to_label(&self) -> String {
        format!("Go to {}", self.selected_topic)
    }
}
