//! The single owner of the view state.
//!
//! All intents funnel through [`ViewStateController`], which serializes them
//! behind a mutex and broadcasts every change on a watch channel. The
//! renderer holds a cheap clone of the controller and never mutates state
//! directly.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::{AppResult, AppState, Intent, Topic};

/// Default time the loader stays up after a refresh.
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(2000);

/// Source of wall-clock time for timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

struct StateCell {
    state: AppState,
    /// Bumped by every refresh; only the latest refresh may complete.
    refresh_epoch: u64,
}

struct Shared {
    cell: Mutex<StateCell>,
    tx: watch::Sender<AppState>,
    clock: Arc<dyn Clock>,
    refresh_delay: Duration,
    runtime: Handle,
}

impl Shared {
    /// Applies an intent while the cell is locked and publishes on change.
    fn apply_locked(&self, cell: &mut StateCell, intent: Intent) -> bool {
        let changed = cell.state.apply(intent);
        if changed {
            debug!(?intent, screen = ?cell.state.screen, "applied intent");
            self.tx.send_replace(cell.state.clone());
        } else {
            debug!(?intent, screen = ?cell.state.screen, "intent ignored");
        }
        changed
    }

    fn apply(&self, intent: Intent) -> bool {
        let mut cell = self.cell.lock();
        self.apply_locked(&mut cell, intent)
    }

    fn complete_refresh(&self, epoch: u64) {
        let mut cell = self.cell.lock();
        if cell.refresh_epoch != epoch {
            debug!(epoch, current = cell.refresh_epoch, "discarding superseded refresh");
            return;
        }

        let at = self.clock.now();
        if self.apply_locked(&mut cell, Intent::CompleteRefresh { at }) {
            info!(last_updated = %at, "refresh complete");
        }
    }
}

/// Handle to the application's view state.
///
/// Cloning is cheap and every clone drives the same state.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use headlines::application::ViewStateController;
/// use headlines::domain::{Screen, Topic};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let controller = ViewStateController::new(Topic::Politics, Duration::from_millis(10))?;
/// controller.select_topic(Topic::Sport);
/// controller.request_navigation();
/// assert_eq!(controller.snapshot().screen, Screen::Content(Topic::Sport));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ViewStateController {
    shared: Arc<Shared>,
}

impl fmt::Debug for ViewStateController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStateController")
            .field("state", &self.shared.cell.lock().state)
            .field("refresh_delay", &self.shared.refresh_delay)
            .finish()
    }
}

impl ViewStateController {
    /// Creates a controller on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Runtime`](crate::domain::AppError::Runtime) when
    /// called outside a tokio runtime, since refresh completions are spawned
    /// onto it.
    pub fn new(initial_topic: Topic, refresh_delay: Duration) -> AppResult<Self> {
        Self::with_clock(initial_topic, refresh_delay, Arc::new(SystemClock))
    }

    pub fn with_clock(
        initial_topic: Topic,
        refresh_delay: Duration,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let runtime = Handle::try_current()?;
        let state = AppState::new(initial_topic, clock.now());
        let (tx, _rx) = watch::channel(state.clone());

        Ok(Self {
            shared: Arc::new(Shared {
                cell: Mutex::new(StateCell {
                    state,
                    refresh_epoch: 0,
                }),
                tx,
                clock,
                refresh_delay,
                runtime,
            }),
        })
    }

    pub fn snapshot(&self) -> AppState {
        self.shared.cell.lock().state.clone()
    }

    /// Subscribes to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.shared.tx.subscribe()
    }

    pub fn refresh_delay(&self) -> Duration {
        self.shared.refresh_delay
    }

    pub fn select_topic(&self, topic: Topic) {
        self.shared.apply(Intent::SelectTopic(topic));
    }

    /// Selects the topic at `index` in picker order. Out of range is a no-op.
    pub fn select_topic_at(&self, index: usize) {
        match Topic::from_index(index) {
            Some(topic) => self.select_topic(topic),
            None => debug!(index, "no topic at picker index"),
        }
    }

    pub fn request_navigation(&self) {
        self.shared.apply(Intent::RequestNavigation);
    }

    pub fn confirm_tv_guide_navigation(&self) {
        self.shared.apply(Intent::ConfirmTvGuideNavigation);
    }

    pub fn decline_tv_guide_navigation(&self) {
        self.shared.apply(Intent::DeclineTvGuideNavigation);
    }

    pub fn go_home(&self) {
        self.shared.apply(Intent::GoHome);
    }

    pub fn request_breaking_news(&self) {
        self.shared.apply(Intent::RequestBreakingNews);
    }

    pub fn acknowledge_error(&self) {
        self.shared.apply(Intent::AcknowledgeError);
    }

    /// Shows the loader and schedules its completion after the refresh delay.
    ///
    /// Returns the handle of the scheduled completion, or `None` when there
    /// is no home page to refresh. Dropping the handle detaches the task.
    /// The completion only clears the loader if it is still showing and no
    /// newer refresh has started since.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        let epoch = {
            let mut cell = self.shared.cell.lock();
            if !cell.state.is_home() {
                debug!("refresh ignored off the home page");
                return None;
            }
            cell.refresh_epoch += 1;
            self.shared.apply_locked(&mut cell, Intent::BeginRefresh);
            cell.refresh_epoch
        };

        let shared = Arc::clone(&self.shared);
        let delay = shared.refresh_delay;
        debug!(epoch, ?delay, "refresh scheduled");
        Some(self.shared.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.complete_refresh(epoch);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppError, HomeOverlay, Screen};
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Advances one second on every reading.
    struct SteppingClock {
        ticks: AtomicI64,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Local> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            Local.timestamp_opt(1_700_000_000 + tick, 0).unwrap()
        }
    }

    fn controller() -> ViewStateController {
        let clock = Arc::new(SteppingClock { ticks: AtomicI64::new(0) });
        ViewStateController::with_clock(Topic::Politics, DEFAULT_REFRESH_DELAY, clock).unwrap()
    }

    #[test]
    fn test_new_requires_runtime() {
        let result = ViewStateController::new(Topic::Politics, DEFAULT_REFRESH_DELAY);
        assert!(matches!(result, Err(AppError::Runtime(_))));
    }

    #[tokio::test]
    async fn test_initial_state() {
        let state = controller().snapshot();
        assert_eq!(state.screen, Screen::Home(HomeOverlay::None));
        assert_eq!(state.selected_topic, Topic::Politics);
    }

    #[tokio::test]
    async fn test_select_topic_at() {
        let controller = controller();
        controller.select_topic_at(3);
        assert_eq!(controller.snapshot().selected_topic, Topic::Technology);

        controller.select_topic_at(42);
        assert_eq!(controller.snapshot().selected_topic, Topic::Technology);
    }

    #[tokio::test]
    async fn test_navigate_and_return() {
        let controller = controller();
        controller.select_topic(Topic::Technology);
        controller.request_navigation();
        assert_eq!(controller.snapshot().screen, Screen::Content(Topic::Technology));

        controller.go_home();
        controller.go_home();
        assert_eq!(controller.snapshot().screen, Screen::Home(HomeOverlay::None));
    }

    #[tokio::test]
    async fn test_tv_guide_flow() {
        let controller = controller();
        controller.select_topic(Topic::TvGuide);
        controller.request_navigation();
        assert_eq!(controller.snapshot().overlay(), HomeOverlay::TvLicenseConfirm);

        controller.decline_tv_guide_navigation();
        assert_eq!(controller.snapshot().screen, Screen::Home(HomeOverlay::None));

        controller.request_navigation();
        controller.confirm_tv_guide_navigation();
        assert_eq!(controller.snapshot().screen, Screen::Content(Topic::TvGuide));
    }

    #[tokio::test]
    async fn test_subscribers_see_each_change() {
        let controller = controller();
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());

        controller.request_breaking_news();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().overlay(), HomeOverlay::ErrorDialog);

        // Ignored intents do not wake observers
        controller.confirm_tv_guide_navigation();
        assert!(!rx.has_changed().unwrap());

        controller.acknowledge_error();
        assert_eq!(rx.borrow_and_update().overlay(), HomeOverlay::None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_shows_loader_then_updates_timestamp() {
        let controller = controller();
        let before = controller.snapshot().last_updated;

        let pending = controller.refresh().expect("refresh on home page");
        assert_eq!(controller.snapshot().overlay(), HomeOverlay::Loading);

        pending.await.unwrap();
        let after = controller.snapshot();
        assert_eq!(after.overlay(), HomeOverlay::None);
        assert!(after.last_updated > before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_waits_for_the_full_delay() {
        let controller = controller();
        let _pending = controller.refresh();

        tokio::time::sleep(DEFAULT_REFRESH_DELAY - Duration::from_millis(1)).await;
        assert_eq!(controller.snapshot().overlay(), HomeOverlay::Loading);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.snapshot().overlay(), HomeOverlay::None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_completion_does_not_stomp_newer_overlay() {
        let controller = controller();
        let before = controller.snapshot().last_updated;

        let pending = controller.refresh().unwrap();
        controller.request_breaking_news();
        pending.await.unwrap();

        let state = controller.snapshot();
        assert_eq!(state.overlay(), HomeOverlay::ErrorDialog);
        assert_eq!(state.last_updated, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_completion_does_not_stomp_navigation() {
        let controller = controller();
        let pending = controller.refresh().unwrap();
        controller.select_topic(Topic::World);
        controller.request_navigation();
        pending.await.unwrap();

        assert_eq!(controller.snapshot().screen, Screen::Content(Topic::World));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_completion_after_go_home_is_dropped() {
        let controller = controller();
        let before = controller.snapshot().last_updated;
        let pending = controller.refresh().unwrap();

        controller.go_home();
        assert_eq!(controller.snapshot().screen, Screen::Home(HomeOverlay::None));
        controller.request_breaking_news();
        controller.acknowledge_error();
        pending.await.unwrap();

        let state = controller.snapshot();
        assert_eq!(state.screen, Screen::Home(HomeOverlay::None));
        assert_eq!(state.last_updated, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_older_refresh_cannot_clear_newer_loader() {
        let controller = controller();
        let first = controller.refresh().unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        controller.request_breaking_news();
        controller.acknowledge_error();
        let second = controller.refresh().unwrap();

        first.await.unwrap();
        assert_eq!(controller.snapshot().overlay(), HomeOverlay::Loading);

        second.await.unwrap();
        assert_eq!(controller.snapshot().overlay(), HomeOverlay::None);
    }

    #[tokio::test]
    async fn test_refresh_is_ignored_on_content() {
        let controller = controller();
        controller.request_navigation();
        assert!(controller.refresh().is_none());
        assert_eq!(controller.snapshot().screen, Screen::Content(Topic::Politics));
    }
}
