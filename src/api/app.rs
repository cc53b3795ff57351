//! Front-end composition of the user-triggered operations

use crate::api::formatting::PositionFormatter;
use crate::api::locator::OneShotLocator;
use crate::api::surface::DisplaySurface;
use crate::api::types::{ApiResult, StartOutcome, WatchState};
use crate::api::watcher::ContinuousWatcher;
use crate::core::WatchId;
use crate::platform::GeolocationProvider;
use crate::utils::AppConfig;
use std::rc::Rc;

/// The three user triggers ("find me", "watch me", "stop watching") wired to
/// one locator and one watcher sharing a formatter and display.
pub struct Geolocator {
    locator: OneShotLocator,
    watcher: ContinuousWatcher,
}

impl Geolocator {
    /// Build the front-end. `provider` is `None` when the host has no location capability.
    pub fn new(
        config: &AppConfig,
        provider: Option<Rc<dyn GeolocationProvider>>,
        display: Rc<dyn DisplaySurface>,
    ) -> ApiResult<Self> {
        config.validate()?;

        let formatter = Rc::new(PositionFormatter::from_config(config));
        let messages = Rc::new(config.messages.clone());

        let locator = OneShotLocator::new(
            provider.clone(),
            Rc::clone(&display),
            Rc::clone(&formatter),
            config.locate_options,
            Rc::clone(&messages),
        );
        let watcher = ContinuousWatcher::new(
            provider,
            display,
            formatter,
            config.watch_options,
            messages,
        );

        Ok(Self { locator, watcher })
    }

    /// Locate once
    pub fn find_me(&self) -> ApiResult<()> {
        self.locator.locate()
    }

    /// Start watching
    pub fn watch_me(&mut self) -> ApiResult<StartOutcome> {
        self.watcher.start()
    }

    /// Stop watching
    pub fn stop_watching(&mut self) {
        self.watcher.stop()
    }

    pub fn watch_state(&self) -> WatchState {
        self.watcher.state()
    }

    pub fn watch_handle(&self) -> WatchId {
        self.watcher.handle()
    }
}
