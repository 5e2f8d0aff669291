use leptos::*;

use geotrack_core::panel::{IpDetails, StatusPanel, PLACEHOLDER};

#[component]
pub fn Status(panel: Signal<StatusPanel>) -> impl IntoView {
    let field = move |select: fn(&IpDetails) -> &String| {
        move || {
            panel.with(|p| {
                p.result()
                    .map_or_else(|| PLACEHOLDER.to_string(), |d| select(d).clone())
            })
        }
    };

    view! {
      <div id="loading" class="text-blue-400 animate-pulse" class:hidden=move || !panel.with(StatusPanel::is_loading)>
        "Locating..."
      </div>
      <div id="error" class="p-3 bg-red-900/60 text-red-200 rounded" class:hidden=move || panel.with(|p| p.error().is_none())>
        { move || panel.with(|p| p.error().map(ToString::to_string)) }
      </div>
      <dl id="result-card" class="grid grid-cols-2 gap-2 p-4 bg-gray-800 rounded" class:hidden=move || panel.with(|p| p.result().is_none())>
        <dt class="text-gray-400">"IP Address"</dt>
        <dd id="ip-value">{ field(|d| &d.address) }</dd>
        <dt class="text-gray-400">"Location"</dt>
        <dd id="location-value">{ field(|d| &d.location) }</dd>
        <dt class="text-gray-400">"Timezone"</dt>
        <dd id="timezone-value">{ field(|d| &d.timezone) }</dd>
        <dt class="text-gray-400">"ISP"</dt>
        <dd id="isp-value">{ field(|d| &d.network) }</dd>
      </dl>
    }
}
