use leptos::*;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

const START_LABEL: &str = "Show Precise Live Location";
const STOP_LABEL: &str = "Stop Precise Tracking";

const FIX_TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

#[component]
pub fn LiveTracking(
    tracking: Signal<bool>,
    last_fix: Signal<Option<OffsetDateTime>>,
    #[prop(into)] on_toggle: Callback<()>,
) -> impl IntoView {
    let button_class = move || {
        let color = if tracking.get() {
            "bg-red-600 hover:bg-red-500"
        } else {
            "bg-green-600 hover:bg-green-500"
        };
        format!("w-full py-2 px-4 rounded font-semibold {color}")
    };

    view! {
      <div class="space-y-2">
        <button id="live-btn" class=button_class on:click=move |_| on_toggle.call(())>
          { move || if tracking.get() { STOP_LABEL } else { START_LABEL } }
        </button>
        <div id="live-status" class="flex items-center gap-2 text-sm text-green-400" class:hidden=move || !tracking.get()>
          <span class="pulse-dot inline-block w-3 h-3 rounded-full bg-green-500"></span>
          "Live tracking active"
          { move || last_fix.get().and_then(format_fix_time).map(|t| format!(" (last fix {t} UTC)")) }
        </div>
      </div>
    }
}

fn format_fix_time(timestamp: OffsetDateTime) -> Option<String> {
    timestamp.format(FIX_TIME_FORMAT).ok()
}
