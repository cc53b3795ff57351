//! End-to-end scenarios through the `Geolocator` front-end

use geolocator::{
    AppConfig, ApiError, Coordinates, GeolocationProvider, Geolocator, MemoryDisplay,
    MockGeolocation, PositionError, PositionSample, StartOutcome, WatchId, WatchState,
};
use std::rc::Rc;

fn app_with_mock() -> (Geolocator, Rc<MockGeolocation>, Rc<MemoryDisplay>) {
    let mut config = AppConfig::default();
    config.display.utc_offset_minutes = Some(0);

    let mock = Rc::new(MockGeolocation::new());
    let display = Rc::new(MemoryDisplay::new());
    let app = Geolocator::new(
        &config,
        Some(mock.clone() as Rc<dyn GeolocationProvider>),
        display.clone(),
    )
    .unwrap();
    (app, mock, display)
}

fn san_francisco() -> PositionSample {
    PositionSample::new(Coordinates::new(37.7749, -122.4194, 10.0), 1_705_331_045_000)
}

#[test]
fn capability_absent_reports_not_supported() {
    let display = Rc::new(MemoryDisplay::new());
    let app = Geolocator::new(&AppConfig::default(), None, display.clone()).unwrap();

    assert!(matches!(app.find_me(), Err(ApiError::Unsupported)));
    assert_eq!(display.status(), "Geolocation is not supported by your browser");
    assert!(display.map_link().is_empty());
}

#[test]
fn one_shot_success_renders_map_link() {
    let (app, mock, display) = app_with_mock();

    app.find_me().unwrap();
    assert!(mock.deliver_current(san_francisco()));

    let snapshot = display.snapshot();
    assert_eq!(snapshot.map_link.href, "https://www.google.com/maps/@37.7749,-122.4194,20z");
    assert_eq!(snapshot.map_link.label, "Latitude: 37.7749 °, Longitude: -122.4194 °");
    assert_eq!(
        snapshot.status,
        "Last seen 1/15/2024 3:04:05 PM\n  Accuracy: 10\n  Altitude: null\n  AltitudeAccuracy: null\n  Heading: null\n  Speed: null"
    );
}

#[test]
fn one_shot_failure_reports_unable_to_retrieve() {
    let (app, mock, display) = app_with_mock();

    app.find_me().unwrap();
    assert!(mock.fail_current(PositionError::Timeout("Timeout expired".to_string())));
    assert_eq!(display.status(), "Unable to retrieve your location");
    assert!(display.map_link().is_empty());
}

#[test]
fn start_is_idempotent() {
    let (mut app, mock, _display) = app_with_mock();
    assert_eq!(app.watch_state(), WatchState::Idle);

    let id = match app.watch_me().unwrap() {
        StartOutcome::Started(id) => id,
        other => panic!("expected a new subscription, got {:?}", other),
    };
    assert_ne!(id, WatchId::UNSET);

    assert_eq!(app.watch_me().unwrap(), StartOutcome::AlreadyWatching(id));
    assert_eq!(app.watch_handle(), id);
    assert_eq!(mock.active_watches().len(), 1);
}

#[test]
fn stop_while_active_returns_to_idle_and_clears() {
    let (mut app, mock, display) = app_with_mock();
    let id = app.watch_me().unwrap().handle();
    mock.deliver_watch(id, san_francisco());
    assert!(!display.map_link().is_empty());

    app.stop_watching();
    assert_eq!(app.watch_state(), WatchState::Idle);
    assert_eq!(app.watch_handle(), WatchId::UNSET);
    assert_eq!(display.status(), "");
    assert!(display.map_link().is_empty());
    assert_eq!(mock.cleared_watches(), vec![id]);
}

#[test]
fn stop_while_idle_is_idempotent() {
    let (mut app, _mock, display) = app_with_mock();

    app.stop_watching();
    app.stop_watching();
    assert_eq!(app.watch_state(), WatchState::Idle);
    assert_eq!(display.status(), "");
    assert!(display.map_link().is_empty());
}

#[test]
fn watch_failure_alerts_and_stays_active() {
    let (mut app, mock, display) = app_with_mock();
    let id = app.watch_me().unwrap().handle();

    assert!(mock.fail_watch(id, PositionError::PositionUnavailable("no fix".to_string())));
    assert_eq!(display.alerts(), vec!["Sorry, no position available."]);
    assert_eq!(app.watch_state(), WatchState::Active(id));

    // Updates still flow after a failure
    assert!(mock.deliver_watch(id, san_francisco()));
    assert!(display.status().starts_with("Last seen"));

    app.stop_watching();
    assert_eq!(app.watch_state(), WatchState::Idle);
    assert!(mock.active_watches().is_empty());
}

#[test]
fn locate_and_watch_are_independent() {
    let (mut app, mock, display) = app_with_mock();
    let id = app.watch_me().unwrap().handle();

    app.find_me().unwrap();
    assert_eq!(display.status(), "Locating…");
    assert_eq!(app.watch_state(), WatchState::Active(id));

    mock.fail_current(PositionError::PermissionDenied("denied".to_string()));
    assert_eq!(display.status(), "Unable to retrieve your location");
    assert_eq!(mock.active_watches(), vec![id]);
}
