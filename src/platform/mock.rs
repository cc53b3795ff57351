//! Mock location capability for testing and the terminal demo

use crate::core::{PositionSample, WatchId};
use crate::platform::{
    GeolocationProvider, PositionCallback, ErrorCallback, UpdateCallback,
    UpdateErrorCallback, PositionError, PositionOptions,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

/// A one-shot request waiting for the test to resolve it
struct PendingRequest {
    on_success: PositionCallback,
    on_error: ErrorCallback,
    options: PositionOptions,
}

/// A registered subscription
struct Subscription {
    on_update: UpdateCallback,
    on_error: UpdateErrorCallback,
    options: PositionOptions,
}

#[derive(Default)]
struct MockState {
    pending: VecDeque<PendingRequest>,
    watches: BTreeMap<WatchId, Subscription>,
    cleared: Vec<WatchId>,
    next_watch_id: i32,
}

/// In-memory location capability.
///
/// Requests are queued until the caller resolves them with one of the
/// `deliver_*` / `fail_*` methods, mimicking the asynchronous platform.
pub struct MockGeolocation {
    state: RefCell<MockState>,
}

impl MockGeolocation {
    /// Create a new mock with no pending requests
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MockState {
                next_watch_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Number of one-shot requests not yet resolved
    pub fn pending_requests(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Options of the oldest unresolved one-shot request
    pub fn pending_options(&self) -> Option<PositionOptions> {
        self.state.borrow().pending.front().map(|request| request.options)
    }

    /// Resolve the oldest one-shot request successfully.
    /// Returns false if nothing was pending.
    pub fn deliver_current(&self, sample: PositionSample) -> bool {
        // Release the borrow before running the continuation
        let request = self.state.borrow_mut().pending.pop_front();
        match request {
            Some(request) => {
                (request.on_success)(sample);
                true
            }
            None => false,
        }
    }

    /// Fail the oldest one-shot request.
    /// Returns false if nothing was pending.
    pub fn fail_current(&self, error: PositionError) -> bool {
        let request = self.state.borrow_mut().pending.pop_front();
        match request {
            Some(request) => {
                (request.on_error)(error);
                true
            }
            None => false,
        }
    }

    /// Deliver an update to an active subscription.
    /// Returns false if `id` is not active.
    pub fn deliver_watch(&self, id: WatchId, sample: PositionSample) -> bool {
        self.with_subscription(id, |subscription| (subscription.on_update)(sample))
    }

    /// Report a delivery failure to an active subscription.
    /// Returns false if `id` is not active.
    pub fn fail_watch(&self, id: WatchId, error: PositionError) -> bool {
        self.with_subscription(id, |subscription| (subscription.on_error)(error))
    }

    /// Handles of all subscriptions not yet cleared
    pub fn active_watches(&self) -> Vec<WatchId> {
        self.state.borrow().watches.keys().copied().collect()
    }

    /// Every handle passed to `clear_watch`, in call order
    pub fn cleared_watches(&self) -> Vec<WatchId> {
        self.state.borrow().cleared.clone()
    }

    /// Options a subscription was registered with
    pub fn watch_options(&self, id: WatchId) -> Option<PositionOptions> {
        self.state.borrow().watches.get(&id).map(|subscription| subscription.options)
    }

    fn with_subscription(&self, id: WatchId, deliver: impl FnOnce(&mut Subscription)) -> bool {
        // Take the subscription out so the continuation may call back into the mock
        let subscription = self.state.borrow_mut().watches.remove(&id);
        let Some(mut subscription) = subscription else {
            return false;
        };

        deliver(&mut subscription);

        let mut state = self.state.borrow_mut();
        if !state.cleared.contains(&id) {
            state.watches.insert(id, subscription);
        }
        true
    }
}

impl Default for MockGeolocation {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationProvider for MockGeolocation {
    fn get_current_position(
        &self,
        on_success: PositionCallback,
        on_error: ErrorCallback,
        options: &PositionOptions,
    ) {
        self.state.borrow_mut().pending.push_back(PendingRequest {
            on_success,
            on_error,
            options: *options,
        });
    }

    fn watch_position(
        &self,
        on_update: UpdateCallback,
        on_error: UpdateErrorCallback,
        options: &PositionOptions,
    ) -> WatchId {
        let mut state = self.state.borrow_mut();
        let id = WatchId::new(state.next_watch_id);
        state.next_watch_id += 1;
        state.watches.insert(id, Subscription {
            on_update,
            on_error,
            options: *options,
        });
        id
    }

    fn clear_watch(&self, id: WatchId) {
        let mut state = self.state.borrow_mut();
        state.watches.remove(&id);
        state.cleared.push(id);
    }
}
