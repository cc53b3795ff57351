//! One-shot position lookup

use crate::api::formatting::PositionFormatter;
use crate::api::surface::DisplaySurface;
use crate::api::types::{ApiError, ApiResult};
use crate::core::PositionSample;
use crate::platform::{ErrorCallback, GeolocationProvider, PositionCallback, PositionError, PositionOptions};
use crate::utils::Messages;
use std::rc::Rc;

/// Requests a single position sample per invocation.
///
/// Holds no state between invocations; earlier requests are never cancelled.
pub struct OneShotLocator {
    provider: Option<Rc<dyn GeolocationProvider>>,
    display: Rc<dyn DisplaySurface>,
    formatter: Rc<PositionFormatter>,
    options: PositionOptions,
    messages: Rc<Messages>,
}

impl OneShotLocator {
    /// Create a locator. `provider` is `None` when the host has no location capability.
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
        }
    }

    /// Clear the map link and request the current position.
    ///
    /// Returns `ApiError::Unsupported` after reporting it when there is no
    /// location capability. Request failures arrive later and are reported
    /// through the status text only.
    pub fn locate(&self) -> ApiResult<()> {
        self.display.clear_map_link();

        let Some(provider) = &self.provider else {
            tracing::warn!("geolocation capability absent");
            self.display.set_status(&self.messages.not_supported);
            return Err(ApiError::Unsupported);
        };

        self.display.set_status(&self.messages.locating);
        tracing::debug!(options = ?self.options, "requesting current position");

        let display = Rc::clone(&self.display);
        let formatter = Rc::clone(&self.formatter);
        let on_success: PositionCallback = Box::new(move |sample: PositionSample| {
            let formatted = formatter.format(&sample);
            display.set_status(&formatted.status_text);
            display.set_map_link(&formatted.map_link);
        });

        let display = Rc::clone(&self.display);
        let messages = Rc::clone(&self.messages);
        let on_error: ErrorCallback = Box::new(move |error: PositionError| {
            tracing::warn!(code = error.code(), %error, "current position unavailable");
            display.set_status(&messages.unable_to_retrieve);
        });

        provider.get_current_position(on_success, on_error, &self.options);
        Ok(())
    }
}
