use futures::StreamExt;
use leptos::*;

use geotrack_core::{
    tracking::{PositionSource, PositionStream},
    usecases::{lookup_ip, search_place, IpQuery},
    widget::Widget,
};
use geotrack_frontend_api as api;

mod components;
mod geolocation;

use self::{components::*, geolocation::BrowserGeolocation};

const MAPBOX_ACCESS_TOKEN: Option<&str> = option_env!("MAPBOX_ACCESS_TOKEN");

#[component]
#[must_use]
pub fn App() -> impl IntoView {
    // -- signals -- //

    let widget = RwSignal::new(Widget::default());
    let map_view = Signal::derive(move || widget.with(|w| w.map().clone()));
    let panel = Signal::derive(move || widget.with(|w| w.panel().clone()));
    let loading = Signal::derive(move || widget.with(|w| w.panel().is_loading()));
    let tracking = Signal::derive(move || widget.with(Widget::is_tracking));
    let last_fix = Signal::derive(move || widget.with(|w| w.last_fix().map(|p| p.timestamp)));

    // -- gateways -- //

    let ip_api = api::IpApi::default();
    let geocoding = api::MapboxGeocoding::new(MAPBOX_ACCESS_TOKEN.unwrap_or_default());
    let geolocation = BrowserGeolocation::default();

    // -- actions -- //

    let lookup = Action::new(move |input: &String| {
        let query = IpQuery::from_input(input);
        let ip_api = ip_api.clone();
        async move {
            log::debug!("Look up {query}");
            let Some(ticket) = widget.try_update(Widget::begin_ip_lookup) else {
                return;
            };
            let result = lookup_ip(&ip_api, &query).await;
            if let Err(err) = &result {
                log::warn!("IP lookup failed: {err}");
            }
            widget.update(|w| {
                w.finish_ip_lookup(ticket, result);
            });
        }
    });

    let search = Action::new(move |input: &String| {
        let input = input.clone();
        let geocoding = geocoding.clone();
        async move {
            let Some((ticket, query)) = widget
                .try_update(|w| w.begin_place_search(&input))
                .flatten()
            else {
                log::debug!("Ignore blank place search");
                return;
            };
            let result = search_place(&geocoding, &query).await;
            widget.update(|w| {
                w.finish_place_search(ticket, result);
            });
        }
    });

    // -- callbacks -- //

    let on_lookup = move |input: String| lookup.dispatch(input);
    let on_search = move |input: String| search.dispatch(input);

    let on_toggle = {
        let geolocation = geolocation.clone();
        move |()| {
            if widget.with_untracked(Widget::is_tracking) {
                widget.update(|w| {
                    w.stop_tracking(&geolocation);
                });
                return;
            }
            match widget.try_update(|w| w.start_tracking(&geolocation)) {
                Some(Ok(Some(stream))) => follow_positions(widget, geolocation.clone(), stream),
                Some(Ok(None)) | None => {}
                Some(Err(err)) => alert(&err.to_string()),
            }
        }
    };

    // -- init -- //

    lookup.dispatch(String::new());

    view! {
      <div class="min-h-screen">
        <header class="p-4 border-b border-gray-800">
          <h1 class="text-2xl font-bold">"IP & Location Tracker"</h1>
        </header>
        <main class="container mx-auto p-4 grid gap-4 lg:grid-cols-3">
          <aside class="space-y-4">
            <IpLookupForm on_lookup loading />
            <PlaceSearchForm on_search />
            <LiveTracking tracking last_fix on_toggle />
            <Status panel />
          </aside>
          <section id="map" class="lg:col-span-2 h-[70vh]">
            <Map map_view access_token=MAPBOX_ACCESS_TOKEN />
          </section>
        </main>
      </div>
    }
}

/// Feeds the events of a watch into the widget until the watch is cleared.
fn follow_positions<S>(widget: RwSignal<Widget>, source: S, stream: PositionStream)
where
    S: PositionSource + 'static,
{
    let PositionStream { id, mut events } = stream;
    spawn_local(async move {
        while let Some(event) = events.next().await {
            let err = widget
                .try_update(|w| w.handle_position_event(&source, id, event))
                .flatten();
            if let Some(err) = err {
                alert(&err.to_string());
            }
        }
        log::debug!("Position watch {} closed", id.0);
    });
}

fn alert(message: &str) {
    if let Err(err) = window().alert_with_message(message) {
        log::warn!("Unable to show alert: {err:?}");
    }
}

pub fn run() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("Start web application");
    mount_to_body(App);
}
