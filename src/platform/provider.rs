//! Location capability trait

use crate::core::{PositionSample, WatchId};
use crate::platform::{PositionError, PositionOptions};

/// Continuation for a successful one-shot request
pub type PositionCallback = Box<dyn FnOnce(PositionSample)>;

/// Continuation for a failed one-shot request
pub type ErrorCallback = Box<dyn FnOnce(PositionError)>;

/// Continuation invoked on every update of a subscription
pub type UpdateCallback = Box<dyn FnMut(PositionSample)>;

/// Continuation invoked on every failed delivery of a subscription
pub type UpdateErrorCallback = Box<dyn FnMut(PositionError)>;

/// Host capability that senses the device location.
///
/// All operations return immediately. Results arrive later through the
/// supplied continuations on the same thread.
pub trait GeolocationProvider {
    /// Request a single position sample.
    /// Exactly one of `on_success` / `on_error` is invoked, at most once.
    fn get_current_position(
        &self,
        on_success: PositionCallback,
        on_error: ErrorCallback,
        options: &PositionOptions,
    );

    /// Register a standing subscription and return its handle.
    /// The continuations may run any number of times until the handle is cleared.
    fn watch_position(
        &self,
        on_update: UpdateCallback,
        on_error: UpdateErrorCallback,
        options: &PositionOptions,
    ) -> WatchId;

    /// Cancel the subscription identified by `id`.
    /// Unknown or unset handles are ignored.
    fn clear_watch(&self, id: WatchId);
}
