//! Page helpers for driving the rendered app the way a user would.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};

use headlines::application::{Clock, DEFAULT_REFRESH_DELAY, ViewStateController};
use headlines::domain::{AppState, HomeOverlay, Topic};
use headlines::presentation::{ElementId, InputHandler, UiSession, read_text, render_ui};

/// Moves forward a minute on every reading so refreshed timestamps always
/// render differently.
struct MinuteClock {
    minutes: AtomicI64,
}

impl Clock for MinuteClock {
    fn now(&self) -> DateTime<Local> {
        let minute = self.minutes.fetch_add(1, Ordering::SeqCst);
        Local.timestamp_opt(1_735_732_800 + minute * 60, 0).unwrap()
    }
}

pub struct AppDriver {
    pub controller: ViewStateController,
    session: UiSession,
    terminal: Terminal<TestBackend>,
}

impl AppDriver {
    /// Starts the app on the home page. Must run inside a tokio runtime.
    pub fn launch() -> Self {
        let clock = Arc::new(MinuteClock { minutes: AtomicI64::new(0) });
        let controller =
            ViewStateController::with_clock(Topic::Politics, DEFAULT_REFRESH_DELAY, clock)
                .expect("tokio runtime");
        let mut driver = Self {
            controller,
            session: UiSession::default(),
            terminal: Terminal::new(TestBackend::new(80, 30)).unwrap(),
        };
        driver.render();
        driver
    }

    pub fn render(&mut self) {
        let state = self.controller.snapshot();
        let session = &mut self.session;
        self.terminal
            .draw(|f| render_ui(f, &state, session))
            .unwrap();
    }

    /// Finds a drawn element by its tag, as an external UI driver would.
    fn locate(&mut self, element: ElementId) -> Option<Rect> {
        self.render();
        let tag = element.tag();
        self.session
            .elements
            .find_by_tag(&tag)
            .map(|(_, area)| area)
    }

    fn area_of(&mut self, element: ElementId) -> Rect {
        self.locate(element)
            .unwrap_or_else(|| panic!("{} is missing", element.tag()))
    }

    pub fn has_tag(&mut self, tag: &str) -> bool {
        self.render();
        self.session.elements.find_by_tag(tag).is_some()
    }

    pub fn is_displayed(&mut self, element: ElementId) -> bool {
        self.locate(element).is_some()
    }

    pub fn assert_displayed(&mut self, element: ElementId, message: &str) {
        assert!(self.is_displayed(element), "{message} ({})", element.tag());
    }

    pub fn text(&mut self, element: ElementId) -> String {
        let area = self.area_of(element);
        read_text(self.terminal.backend().buffer(), area)
    }

    /// Clicks the middle of an element.
    pub fn click(&mut self, element: ElementId) {
        let area = self.area_of(element);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + area.width / 2,
            row: area.y + area.height / 2,
            modifiers: KeyModifiers::NONE,
        };
        InputHandler::handle_mouse_event(&self.controller, &mut self.session, event);
        self.render();
    }

    /// Waits for the view state to satisfy `condition`, then redraws.
    pub async fn wait_until(&mut self, timeout: Duration, condition: impl Fn(&AppState) -> bool) {
        let mut states = self.controller.subscribe();
        tokio::time::timeout(timeout, states.wait_for(|state| condition(state)))
            .await
            .expect("condition not met before timeout")
            .expect("controller dropped");
        self.render();
    }
}

pub fn verify_user_is_on_home_page(app: &mut AppDriver) {
    app.assert_displayed(ElementId::Logo, "User is not on the home page; logo is missing");
    app.assert_displayed(ElementId::HomeTitle, "Page title is missing on the home page");
    app.assert_displayed(ElementId::MainImage, "Main image is missing on the home page");
    app.assert_displayed(ElementId::RefreshButton, "Refresh button is missing on the home page");
    app.assert_displayed(ElementId::Subtitle, "Subtitle text is missing on the home page");
    app.assert_displayed(ElementId::GoToButton, "Go To button is missing on the home page");
    app.assert_displayed(
        ElementId::BreakingNewsButton,
        "Breaking News button is missing on the home page",
    );
    assert_eq!(app.controller.snapshot().overlay(), HomeOverlay::None);
}

pub fn verify_topic_picker_updates_go_to_link(app: &mut AppDriver, topic: Topic) {
    app.click(ElementId::CurrentTopic);
    app.assert_displayed(ElementId::DropdownMenu, "Topic picker did not open");
    app.click(ElementId::PickerItem(topic));
    assert_eq!(
        app.text(ElementId::GoToButton),
        format!("Go to {topic}"),
        "Go to button did not update"
    );
}

pub async fn verify_refresh_button_updates_time(app: &mut AppDriver) {
    let initial = app.text(ElementId::LastUpdated);

    app.click(ElementId::RefreshButton);
    app.assert_displayed(ElementId::LoadingSpinner, "The loading spinner did not appear");

    app.wait_until(Duration::from_secs(5), |state| {
        state.overlay() != HomeOverlay::Loading
    })
    .await;
    assert!(!app.is_displayed(ElementId::LoadingSpinner), "The loading spinner did not go away");

    let updated = app.text(ElementId::LastUpdated);
    assert_ne!(initial, updated, "The last updated time did not change after refresh");
}

pub fn select_tv_guide_and_tap_go_to(app: &mut AppDriver) {
    verify_topic_picker_updates_go_to_link(app, Topic::TvGuide);
    app.click(ElementId::GoToButton);
}

pub fn verify_content_page_loaded(app: &mut AppDriver, topic: Topic) {
    assert_eq!(
        app.text(ElementId::ContentTitle),
        format!("{topic} Content Page"),
        "{topic} content page title is missing"
    );
    app.assert_displayed(ElementId::ContentEndText, "End of page text is missing");
}

pub fn navigate_back_to_home_page(app: &mut AppDriver) {
    app.click(ElementId::BackButton);
}
