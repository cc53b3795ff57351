//! Continuous position tracking
//!
//! The watcher owns the single standing subscription of the front-end and
//! moves between two states:
//!
//! - `Idle`: no subscription, the handle is the sentinel
//! - `Active`: subscription registered under a platform-issued handle
//!
//! Starting while active is a logged no-op, and a subscription the platform
//! refuses leaves the watcher `Idle`. Stopping always lands in `Idle`
//! and clears the display, whatever state it was called from. Delivery
//! failures raise an alert on every occurrence but never end the
//! subscription.

use crate::api::formatting::{JsonFormatter, PositionFormatter};
use crate::api::surface::DisplaySurface;
use crate::api::types::{ApiError, ApiResult, StartOutcome, WatchState};
use crate::core::{PositionSample, WatchId};
use crate::platform::{
    GeolocationProvider, PositionError, PositionOptions, UpdateCallback, UpdateErrorCallback,
};
use crate::utils::Messages;
use std::rc::Rc;

/// Start/stop controller for the continuous subscription
pub struct ContinuousWatcher {
    provider: Option<Rc<dyn GeolocationProvider>>,
    display: Rc<dyn DisplaySurface>,
    formatter: Rc<PositionFormatter>,
    options: PositionOptions,
    messages: Rc<Messages>,
    state: WatchState,
}

impl ContinuousWatcher {
    /// Create an idle watcher. `provider` is `None` when the host has no location capability.
    pub fn new(
        provider: Option<Rc<dyn GeolocationProvider>>,
        display: Rc<dyn DisplaySurface>,
        formatter: Rc<PositionFormatter>,
        options: PositionOptions,
        messages: Rc<Messages>,
    ) -> Self {
        Self {
            provider,
            display,
            formatter,
            options,
            messages,
            state: WatchState::Idle,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Current handle, or `WatchId::UNSET` when idle
    pub fn handle(&self) -> WatchId {
        self.state.handle()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Register the subscription unless one is already running
    pub fn start(&mut self) -> ApiResult<StartOutcome> {
        if let WatchState::Active(id) = self.state {
            tracing::info!(watch_id = %id, "{}", self.messages.already_watching);
            return Ok(StartOutcome::AlreadyWatching(id));
        }

        let Some(provider) = &self.provider else {
            tracing::warn!("geolocation capability absent, cannot watch");
            self.display.set_status(&self.messages.not_supported);
            return Err(ApiError::Unsupported);
        };

        let display = Rc::clone(&self.display);
        let formatter = Rc::clone(&self.formatter);
        let json = JsonFormatter::new();
        let on_update: UpdateCallback = Box::new(move |sample: PositionSample| {
            match json.format_json(&sample) {
                Ok(encoded) => tracing::debug!(sample = %encoded, "position updated"),
                Err(e) => tracing::debug!(error = %e, "position updated, sample not encodable"),
            }
            let formatted = formatter.format(&sample);
            display.set_status(&formatted.status_text);
            display.set_map_link(&formatted.map_link);
        });

        // Alerts on every failure; the subscription stays registered
        let display = Rc::clone(&self.display);
        let messages = Rc::clone(&self.messages);
        let on_error: UpdateErrorCallback = Box::new(move |error: PositionError| {
            tracing::warn!(code = error.code(), %error, "position update failed");
            display.alert(&messages.watch_failed);
        });

        let id = provider.watch_position(on_update, on_error, &self.options);
        if !id.is_set() {
            let error = PositionError::PositionUnavailable("subscription refused by the platform".to_string());
            tracing::warn!(reason = error.message(), "could not start watching position");
            return Err(ApiError::Position(error));
        }
        tracing::info!(watch_id = %id, options = ?self.options, "started watching position");
        self.state = WatchState::Active(id);
        Ok(StartOutcome::Started(id))
    }

    /// Cancel the subscription, clear the display and return to idle.
    /// Safe to call when idle.
    pub fn stop(&mut self) {
        match self.state {
            WatchState::Active(id) => {
                if let Some(provider) = &self.provider {
                    provider.clear_watch(id);
                }
                tracing::info!(watch_id = %id, "stopped watching position");
            }
            WatchState::Idle => tracing::debug!("stop requested while idle"),
        }

        self.display.clear_map_link();
        self.display.set_status("");
        self.state = WatchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::surface::MemoryDisplay;
    use crate::core::Coordinates;
    use crate::platform::MockGeolocation;

    fn watcher_with(mock: &Rc<MockGeolocation>) -> (ContinuousWatcher, Rc<MemoryDisplay>) {
        let display = Rc::new(MemoryDisplay::new());
        let watcher = ContinuousWatcher::new(
            Some(mock.clone() as Rc<dyn GeolocationProvider>),
            display.clone(),
            Rc::new(PositionFormatter::new().with_utc_offset_minutes(0)),
            PositionOptions::tracking(),
            Rc::new(Messages::default()),
        );
        (watcher, display)
    }

    fn sample(latitude: f64) -> PositionSample {
        PositionSample::new(Coordinates::new(latitude, 10.0, 5.0), 1_705_331_045_000)
    }

    #[test]
    fn test_initial_state_is_idle() {
        let mock = Rc::new(MockGeolocation::new());
        let (watcher, _) = watcher_with(&mock);
        assert_eq!(watcher.state(), WatchState::Idle);
        assert_eq!(watcher.handle(), WatchId::UNSET);
    }

    #[test]
    fn test_start_registers_with_tracking_options() {
        let mock = Rc::new(MockGeolocation::new());
        let (mut watcher, _) = watcher_with(&mock);

        let outcome = watcher.start().unwrap();
        let id = outcome.handle();
        assert_eq!(outcome, StartOutcome::Started(id));
        assert!(id.is_set());
        assert_eq!(watcher.state(), WatchState::Active(id));
        assert_eq!(mock.watch_options(id), Some(PositionOptions::tracking()));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mock = Rc::new(MockGeolocation::new());
        let (mut watcher, _) = watcher_with(&mock);

        let id = watcher.start().unwrap().handle();
        assert_eq!(watcher.start().unwrap(), StartOutcome::AlreadyWatching(id));
        assert_eq!(watcher.handle(), id);
        assert_eq!(mock.active_watches(), vec![id]);
    }

    #[test]
    fn test_updates_render_without_state_change() {
        let mock = Rc::new(MockGeolocation::new());
        let (mut watcher, display) = watcher_with(&mock);
        let id = watcher.start().unwrap().handle();

        assert!(mock.deliver_watch(id, sample(1.5)));
        assert_eq!(display.map_link().href, "https://www.google.com/maps/@1.5,10,20z");

        assert!(mock.deliver_watch(id, sample(2.5)));
        assert_eq!(display.map_link().href, "https://www.google.com/maps/@2.5,10,20z");
        assert!(display.status().starts_with("Last seen"));
        assert_eq!(watcher.state(), WatchState::Active(id));
    }

    #[test]
    fn test_failures_alert_every_time_and_stay_active() {
        let mock = Rc::new(MockGeolocation::new());
        let (mut watcher, display) = watcher_with(&mock);
        let id = watcher.start().unwrap().handle();

        for _ in 0..3 {
            assert!(mock.fail_watch(id, PositionError::from_code(2, "no fix")));
        }
        assert_eq!(display.alerts(), vec!["Sorry, no position available."; 3]);
        assert_eq!(watcher.state(), WatchState::Active(id));
        assert_eq!(mock.active_watches(), vec![id]);

        watcher.stop();
        assert_eq!(mock.cleared_watches(), vec![id]);
        assert_eq!(watcher.state(), WatchState::Idle);
    }

    #[test]
    fn test_stop_clears_display_and_handle() {
        let mock = Rc::new(MockGeolocation::new());
        let (mut watcher, display) = watcher_with(&mock);
        let id = watcher.start().unwrap().handle();
        mock.deliver_watch(id, sample(1.0));

        watcher.stop();
        assert_eq!(watcher.handle(), WatchId::UNSET);
        assert!(!watcher.is_active());
        assert!(display.map_link().is_empty());
        assert_eq!(display.status(), "");
        assert!(mock.active_watches().is_empty());
    }

    #[test]
    fn test_stop_while_idle_is_safe() {
        let mock = Rc::new(MockGeolocation::new());
        let (mut watcher, display) = watcher_with(&mock);
        display.set_status("stale");

        watcher.stop();
        watcher.stop();
        assert_eq!(watcher.state(), WatchState::Idle);
        assert_eq!(display.status(), "");
        assert!(display.map_link().is_empty());
        assert!(mock.cleared_watches().is_empty());
    }

    #[test]
    fn test_restart_after_stop_gets_new_handle() {
        let mock = Rc::new(MockGeolocation::new());
        let (mut watcher, _) = watcher_with(&mock);

        let first = watcher.start().unwrap().handle();
        watcher.stop();
        let second = watcher.start().unwrap().handle();
        assert_ne!(first, second);
        assert_eq!(mock.active_watches(), vec![second]);
    }

    /// Provider that never hands out a subscription handle
    struct RefusingGeolocation;

    impl GeolocationProvider for RefusingGeolocation {
        fn get_current_position(
            &self,
            _on_success: crate::platform::PositionCallback,
            on_error: crate::platform::ErrorCallback,
            _options: &PositionOptions,
        ) {
            on_error(PositionError::from_code(2, "refused"));
        }

        fn watch_position(
            &self,
            _on_update: UpdateCallback,
            _on_error: UpdateErrorCallback,
            _options: &PositionOptions,
        ) -> WatchId {
            WatchId::UNSET
        }

        fn clear_watch(&self, _id: WatchId) {}
    }

    #[test]
    fn test_refused_subscription_stays_idle() {
        let display = Rc::new(MemoryDisplay::new());
        let mut watcher = ContinuousWatcher::new(
            Some(Rc::new(RefusingGeolocation) as Rc<dyn GeolocationProvider>),
            display.clone(),
            Rc::new(PositionFormatter::new()),
            PositionOptions::tracking(),
            Rc::new(Messages::default()),
        );

        for _ in 0..2 {
            match watcher.start() {
                Err(ApiError::Position(error)) => assert_eq!(error.code(), 2),
                other => panic!("expected a position error, got {:?}", other),
            }
            assert_eq!(watcher.state(), WatchState::Idle);
            assert_eq!(watcher.handle(), WatchId::UNSET);
        }
    }

    #[test]
    fn test_start_without_capability() {
        let display = Rc::new(MemoryDisplay::new());
        let mut watcher = ContinuousWatcher::new(
            None,
            display.clone(),
            Rc::new(PositionFormatter::new()),
            PositionOptions::tracking(),
            Rc::new(Messages::default()),
        );

        assert!(matches!(watcher.start(), Err(ApiError::Unsupported)));
        assert_eq!(watcher.state(), WatchState::Idle);
        assert_eq!(display.status(), "Geolocation is not supported by your browser");
    }
}
