use std::{cell::RefCell, collections::HashMap, rc::Rc};

use leptos::window;
use time::OffsetDateTime;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{
    Geolocation, Position as DevicePosition, PositionError as DeviceError, PositionOptions,
};

use geotrack_core::{geo::MapPoint, tracking::*};

type Callbacks = (
    Closure<dyn FnMut(DevicePosition)>,
    Closure<dyn FnMut(DeviceError)>,
);

/// The positioning API of the browser.
///
/// The JS callbacks of a watch stay alive until the watch is cleared.
#[derive(Clone, Default)]
pub struct BrowserGeolocation {
    watches: Rc<RefCell<HashMap<i32, Callbacks>>>,
}

impl PositionSource for BrowserGeolocation {
    fn is_supported(&self) -> bool {
        geolocation().is_some()
    }

    fn watch(
        &self,
        options: &WatchOptions,
        events: PositionSender,
    ) -> Result<WatchId, TrackingError> {
        let geolocation = geolocation().ok_or(TrackingError::Unsupported)?;
        let tx = events.clone();
        let on_position = Closure::<dyn FnMut(DevicePosition)>::new(
            move |position: DevicePosition| {
                let Some(position) = device_position(&position) else {
                    log::warn!("Ignore invalid device position");
                    return;
                };
                _ = tx.unbounded_send(PositionEvent::Update(position));
            },
        );
        let on_error = Closure::<dyn FnMut(DeviceError)>::new(
            move |err: DeviceError| {
                let err = PositionError::from_code(err.code());
                _ = events.unbounded_send(PositionEvent::Error(err));
            },
        );
        let id = geolocation
            .watch_position_with_error_callback_and_options(
                on_position.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &position_options(options),
            )
            .map_err(|err| {
                log::error!("Unable to watch position: {err:?}");
                TrackingError::Failed
            })?;
        self.watches.borrow_mut().insert(id, (on_position, on_error));
        Ok(WatchId(id))
    }

    fn clear_watch(&self, id: WatchId) {
        if let Some(geolocation) = geolocation() {
            geolocation.clear_watch(id.0);
        }
        self.watches.borrow_mut().remove(&id.0);
    }
}

fn geolocation() -> Option<Geolocation> {
    let navigator = window().navigator();
    let available = js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation"))
        .unwrap_or_default();
    if !available {
        return None;
    }
    navigator.geolocation().ok()
}

fn position_options(options: &WatchOptions) -> PositionOptions {
    let WatchOptions {
        enable_high_accuracy,
        timeout,
        maximum_age,
    } = options;
    let millis = |d: &std::time::Duration| u32::try_from(d.as_millis()).unwrap_or(u32::MAX);
    let js_options = PositionOptions::new();
    js_options.set_enable_high_accuracy(*enable_high_accuracy);
    js_options.set_timeout(millis(timeout));
    js_options.set_maximum_age(millis(maximum_age));
    js_options
}

#[allow(clippy::cast_possible_truncation)]
fn device_position(position: &DevicePosition) -> Option<Position> {
    let coords = position.coords();
    let pos = MapPoint::try_from_lat_lng_deg(coords.latitude(), coords.longitude())?;
    // DOM timestamps are milliseconds since the epoch
    let nanos = (position.timestamp() * 1_000_000.0) as i128;
    let timestamp = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
    Some(Position {
        pos,
        accuracy: coords.accuracy(),
        timestamp,
    })
}
