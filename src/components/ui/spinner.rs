use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-5 animate-spin text-muted-foreground", class);

    view! { <LoaderCircle class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Translucent cover with a spinner, shown over a row while its request is in flight.
#[component]
pub fn LoaderOverlay(#[prop(into)] active: Signal<bool>) -> impl IntoView {
    view! {
        <div
            data-name="TodoLoader"
            class=move || {
                tw_merge!(
                    "absolute inset-0 hidden items-center justify-center bg-background/70",
                    if active.get() { "flex" } else { "" }
                )
            }
        >
            <Spinner />
        </div>
    }
}
