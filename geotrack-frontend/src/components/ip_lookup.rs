use leptos::*;

#[component]
pub fn IpLookupForm(#[prop(into)] on_lookup: Callback<String>, loading: Signal<bool>) -> impl IntoView {
    let (address, set_address) = create_signal(String::new());
    let submit = move || on_lookup.call(address.get_untracked().trim().to_string());

    view! {
      <div class="flex gap-2">
        <input
          id="ip-input"
          type="text"
          class="flex-1 py-2 px-3 bg-gray-800 text-gray-100 rounded outline-none"
          placeholder="Enter an IP address (leave empty for yours)"
          prop:value=address
          on:input=move |ev| set_address.set(event_target_value(&ev))
          on:keydown=move |ev| {
            if ev.key() == "Enter" {
              submit();
            }
          }
        />
        <button
          id="track-ip-btn"
          class="py-2 px-4 bg-blue-600 hover:bg-blue-500 disabled:opacity-50 rounded font-semibold"
          disabled=loading
          on:click=move |_| submit()
        >
          "Track IP"
        </button>
      </div>
    }
}
