use leptos::*;

#[component]
pub fn PlaceSearchForm(#[prop(into)] on_search: Callback<String>) -> impl IntoView {
    let (text, set_text) = create_signal(String::new());
    let submit = move || on_search.call(text.get_untracked());

    view! {
      <div class="flex gap-2">
        <input
          id="place-input"
          type="search"
          class="flex-1 py-2 px-3 bg-gray-800 text-gray-100 rounded outline-none"
          placeholder="Search a place, e.g. Lekki"
          prop:value=text
          on:input=move |ev| set_text.set(event_target_value(&ev))
          on:keydown=move |ev| {
            match &*ev.key() {
              "Enter" => submit(),
              "Escape" => set_text.set(String::new()),
              _ => { /* nothing to do */ }
            }
          }
        />
        <button
          id="search-place-btn"
          class="py-2 px-4 bg-amber-500 hover:bg-amber-400 text-gray-900 rounded font-semibold"
          on:click=move |_| submit()
        >
          "Search"
        </button>
      </div>
    }
}
