use std::collections::HashMap;

use leaflet::{DivIcon, DivIconOptions, LatLng, MarkerOptions, Point, PopupOptions};
use leptos::*;
use leptos_leaflet::{MapContainer, Position, TileLayer};
use wasm_bindgen::JsValue;

use geotrack_core::map::{
    Camera, MapView, Marker, MarkerKind, MarkerSlot, Popup, DEFAULT_CENTER, DEFAULT_ZOOM,
};

const MAPBOX_TILE_LAYER_URL: &str =
    "https://api.mapbox.com/styles/v1/mapbox/streets-v12/tiles/{z}/{x}/{y}?access_token=";
const MAPBOX_ATTRIBUTION: &str = "&copy; <a href=\"https://www.mapbox.com/about/maps/\">Mapbox</a> \
     &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a>";

const OSM_TILE_LAYER_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Renders a [`MapView`] with leaflet.
///
/// The camera only moves if the view has recorded a new camera move.
#[component]
pub fn Map(map_view: Signal<MapView>, access_token: Option<&'static str>) -> impl IntoView {
    let map = RwSignal::<Option<leaflet::Map>>::new(None);
    let layers = StoredValue::new(HashMap::<MarkerSlot, leaflet::Marker>::new());

    let camera = create_memo(move |_| map_view.with(|v| (v.camera(), v.camera_moves())));

    Effect::new(move |_| {
        if let Some(map) = map.get() {
            log::debug!("Leaflet map loaded");
            map.invalidate_size(false);
        }
    });

    Effect::new(move |_| {
        let (Camera { center, zoom }, moves) = camera.get();
        let Some(map) = map.get() else {
            return;
        };
        if moves == 0 {
            return;
        }
        map.fly_to(&LatLng::new(center.lat(), center.lng()), zoom);
    });

    for slot in MarkerSlot::ALL {
        let revision = create_memo(move |_| map_view.with(|v| v.marker_revision(slot)));
        Effect::new(move |_| {
            _ = revision.get();
            let marker = map_view.with_untracked(|v| v.marker(slot).cloned());
            let Some(map) = map.get() else {
                return;
            };
            layers.update_value(|layers| {
                if let Some(layer) = layers.remove(&slot) {
                    layer.remove();
                }
                if let Some(marker) = marker {
                    layers.insert(slot, add_marker(&map, &marker));
                }
            });
        });
    }

    let (url, attribution) = match access_token.filter(|t| !t.is_empty()) {
        Some(token) => (
            format!("{MAPBOX_TILE_LAYER_URL}{token}"),
            MAPBOX_ATTRIBUTION,
        ),
        None => {
            log::warn!("No Mapbox access token: use OpenStreetMap tiles");
            (OSM_TILE_LAYER_URL.to_string(), OSM_ATTRIBUTION)
        }
    };

    view! {
      <MapContainer
        class="h-full w-full rounded-lg"
        center=Position::new(DEFAULT_CENTER.lat(), DEFAULT_CENTER.lng())
        zoom=DEFAULT_ZOOM
        map=map.write_only()
        set_view=true
      >
        <TileLayer url attribution />
      </MapContainer>
    }
}

fn add_marker(map: &leaflet::Map, marker: &Marker) -> leaflet::Marker {
    let Marker {
        kind, pos, popup, ..
    } = marker;
    let options = MarkerOptions::new();
    options.set_icon(DivIcon::new(&icon_options(*kind)).into());
    let layer = leaflet::Marker::new_with_options(&LatLng::new(pos.lat(), pos.lng()), &options);

    let leaflet_popup = leaflet::Popup::new(&PopupOptions::new(), None);
    let content = popup_content(popup);
    leaflet_popup.set_content(&JsValue::from(content));
    layer.bind_popup(&leaflet_popup);
    layer.add_to(map);
    if popup.open {
        layer.open_popup();
    }
    layer
}

fn icon_options(kind: MarkerKind) -> DivIconOptions {
    let options = DivIconOptions::new();
    match kind {
        MarkerKind::Pin { color } => {
            options.set_class_name("marker-pin".to_string());
            options.set_html(format!(r#"<div style="background-color: {color}"></div>"#));
            options.set_icon_size(Point::new(24.0, 24.0));
            options.set_icon_anchor(Point::new(12.0, 24.0));
        }
        MarkerKind::PulseDot => {
            options.set_class_name("pulse-dot rounded-full bg-green-500".to_string());
            options.set_html(r#"<div class="w-5 h-5 m-2.5 bg-white rounded-full"></div>"#.to_string());
            options.set_icon_size(Point::new(40.0, 40.0));
        }
    }
    options
}

// Text nodes only: popup content must never be interpreted as markup.
fn popup_content(popup: &Popup) -> web_sys::HtmlDivElement {
    let Popup { title, lines, .. } = popup;
    let content = view! {
      <div class="text-sm">
        <strong>{ title.clone() }</strong>
        { lines.iter().map(|line| view! { <br/>{ line.clone() } }).collect_view() }
      </div>
    };
    (*content).clone()
}
