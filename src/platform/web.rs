//! Browser bindings: `navigator.geolocation` and the DOM
//!
//! Enabled with the `web` feature. `mount` wires the page's three buttons to a
//! `Geolocator` backed by the browser's location capability.

use crate::api::{DisplaySurface, Geolocator, MapLink};
use crate::core::{Coordinates, PositionSample, WatchId};
use crate::platform::{
    ErrorCallback, GeolocationProvider, PositionCallback, PositionError, PositionOptions,
    UpdateCallback, UpdateErrorCallback,
};
use crate::utils::AppConfig;
use js_sys::{Object, Reflect};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const FIND_ME_BUTTON_ID: &str = "findMeButton";
const WATCH_ME_BUTTON_ID: &str = "watchMeButton";
const STOP_WATCH_BUTTON_ID: &str = "stopWatchButton";
const STATUS_TEXT_ID: &str = "statusText";
const MAPS_LINK_ID: &str = "mapsLink";

/// JS continuations of one subscription, kept alive until cleared
struct WatchClosures {
    _on_update: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

/// Location capability backed by `navigator.geolocation`
pub struct BrowserGeolocation {
    geolocation: web_sys::Geolocation,
    watches: RefCell<HashMap<WatchId, WatchClosures>>,
}

impl BrowserGeolocation {
    /// Returns `None` when the browser exposes no geolocation
    pub fn from_navigator(navigator: &web_sys::Navigator) -> Option<Self> {
        let present = Reflect::get(navigator, &JsValue::from_str("geolocation"))
            .map(|value| !value.is_undefined() && !value.is_null())
            .unwrap_or(false);
        if !present {
            return None;
        }

        let geolocation = navigator.geolocation().ok()?;
        Some(Self {
            geolocation,
            watches: RefCell::new(HashMap::new()),
        })
    }
}

impl GeolocationProvider for BrowserGeolocation {
    fn get_current_position(
        &self,
        on_success: PositionCallback,
        on_error: ErrorCallback,
        options: &PositionOptions,
    ) {
        let js_options = match options_to_js(options) {
            Ok(js_options) => js_options,
            Err(e) => {
                tracing::warn!(error = ?e, "could not build position options");
                on_error(PositionError::PositionUnavailable(format!("{:?}", e)));
                return;
            }
        };

        // Shared so whichever continuation runs first consumes both
        let callbacks = Rc::new(RefCell::new(Some((on_success, on_error))));

        let pending = Rc::clone(&callbacks);
        let success = Closure::once_into_js(move |position: JsValue| {
            if let Some((on_success, on_error)) = pending.borrow_mut().take() {
                match sample_from_js(&position) {
                    Some(sample) => on_success(sample),
                    None => {
                        tracing::warn!("malformed position reported as unavailable");
                        on_error(PositionError::PositionUnavailable("malformed position".to_string()));
                    }
                }
            }
        });

        let pending = Rc::clone(&callbacks);
        let failure = Closure::once_into_js(move |error: JsValue| {
            if let Some((_, on_error)) = pending.borrow_mut().take() {
                on_error(error_from_js(&error));
            }
        });

        let result = self.geolocation.get_current_position_with_error_callback_and_options(
            success.unchecked_ref(),
            Some(failure.unchecked_ref()),
            &js_options,
        );

        if let Err(e) = result {
            tracing::warn!(error = ?e, "getCurrentPosition threw");
            if let Some((_, on_error)) = callbacks.borrow_mut().take() {
                on_error(PositionError::PositionUnavailable(format!("{:?}", e)));
            }
        }
    }

    fn watch_position(
        &self,
        mut on_update: UpdateCallback,
        mut on_error: UpdateErrorCallback,
        options: &PositionOptions,
    ) -> WatchId {
        let js_options = match options_to_js(options) {
            Ok(js_options) => js_options,
            Err(e) => {
                tracing::warn!(error = ?e, "could not build position options");
                return WatchId::UNSET;
            }
        };

        let update = Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
            match sample_from_js(&position) {
                Some(sample) => on_update(sample),
                None => tracing::warn!("discarding malformed position"),
            }
        });
        let failure = Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
            on_error(error_from_js(&error));
        });

        let result = self.geolocation.watch_position_with_error_callback_and_options(
            update.as_ref().unchecked_ref(),
            Some(failure.as_ref().unchecked_ref()),
            &js_options,
        );

        match result {
            Ok(raw) => {
                let id = WatchId::new(raw);
                self.watches.borrow_mut().insert(id, WatchClosures {
                    _on_update: update,
                    _on_error: failure,
                });
                id
            }
            Err(e) => {
                tracing::warn!(error = ?e, "watchPosition threw");
                WatchId::UNSET
            }
        }
    }

    fn clear_watch(&self, id: WatchId) {
        self.geolocation.clear_watch(id.id());
        self.watches.borrow_mut().remove(&id);
    }
}

/// Display surface bound to `#statusText` and `#mapsLink`
pub struct DomDisplay {
    window: web_sys::Window,
    status_text: web_sys::HtmlElement,
    maps_link: web_sys::HtmlAnchorElement,
}

impl DomDisplay {
    pub fn from_document(window: web_sys::Window, document: &web_sys::Document) -> Result<Self, JsValue> {
        Ok(Self {
            window,
            status_text: element_by_id(document, STATUS_TEXT_ID)?,
            maps_link: element_by_id(document, MAPS_LINK_ID)?,
        })
    }
}

impl DisplaySurface for DomDisplay {
    fn set_status(&self, text: &str) {
        self.status_text.set_inner_text(text);
    }

    fn set_map_link(&self, link: &MapLink) {
        self.maps_link.set_href(&link.href);
        self.maps_link.set_text_content(Some(link.label.as_str()));
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::warn!(error = ?e, "alert failed");
        }
    }
}

/// Wire the page's buttons to a `Geolocator` using the default configuration
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    mount_with_config(&AppConfig::default())
}

/// Wire the page's buttons to a `Geolocator` built from `config`
pub fn mount_with_config(config: &AppConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let provider = BrowserGeolocation::from_navigator(&window.navigator())
        .map(|provider| Rc::new(provider) as Rc<dyn GeolocationProvider>);
    let display = Rc::new(DomDisplay::from_document(window.clone(), &document)?);

    let app = Geolocator::new(config, provider, display)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let app = Rc::new(RefCell::new(app));

    on_click(&document, FIND_ME_BUTTON_ID, {
        let app = Rc::clone(&app);
        move || {
            // Unsupported is already on screen
            let _ = app.borrow().find_me();
        }
    })?;
    on_click(&document, WATCH_ME_BUTTON_ID, {
        let app = Rc::clone(&app);
        move || {
            let _ = app.borrow_mut().watch_me();
        }
    })?;
    on_click(&document, STOP_WATCH_BUTTON_ID, move || {
        app.borrow_mut().stop_watching();
    })?;

    Ok(())
}

fn on_click(document: &web_sys::Document, id: &str, mut handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let button: web_sys::HtmlElement = element_by_id(document, id)?;
    let closure = Closure::<dyn FnMut()>::new(move || handler());
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn element_by_id<T: JsCast>(document: &web_sys::Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has the wrong type", id)))
}

fn options_to_js(options: &PositionOptions) -> Result<web_sys::PositionOptions, JsValue> {
    let object = Object::new();
    Reflect::set(&object, &"enableHighAccuracy".into(), &options.enable_high_accuracy.into())?;
    Reflect::set(&object, &"maximumAge".into(), &options.maximum_age_ms.into())?;
    if options.has_timeout() {
        Reflect::set(&object, &"timeout".into(), &options.timeout_ms.into())?;
    }
    Ok(object.unchecked_into())
}

fn sample_from_js(position: &JsValue) -> Option<PositionSample> {
    let coords = Reflect::get(position, &"coords".into()).ok()?;
    let timestamp = Reflect::get(position, &"timestamp".into()).ok()?.as_f64()?;

    let required = |name: &str| Reflect::get(&coords, &name.into()).ok()?.as_f64();
    let optional = |name: &str| Reflect::get(&coords, &name.into()).ok().and_then(|v| v.as_f64());

    Some(PositionSample {
        coords: Coordinates {
            latitude: required("latitude")?,
            longitude: required("longitude")?,
            accuracy: required("accuracy")?,
            altitude: optional("altitude"),
            altitude_accuracy: optional("altitudeAccuracy"),
            heading: optional("heading"),
            speed: optional("speed"),
        },
        timestamp_ms: timestamp as u64,
    })
}

fn error_from_js(error: &JsValue) -> PositionError {
    let code = Reflect::get(error, &"code".into())
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(2.0) as u16;
    let message = Reflect::get(error, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    PositionError::from_code(code, message)
}
