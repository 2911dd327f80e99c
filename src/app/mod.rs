use crate::api::{ApiClient, EnvConfig};
use crate::pages::{TodoPage, UserWarning};
use crate::state::TodoSnapshot;
use crate::sync::{BrowserRuntime, Intent, TodoController};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use std::rc::Rc;

/// View-side handle: the latest snapshot plus a way to report intents.
///
/// The controller is single-threaded, so it lives in local storage; the
/// handle itself is `Copy` and can go into any closure.
#[derive(Clone, Copy)]
pub(crate) struct AppContext {
    pub snapshot: ReadSignal<TodoSnapshot>,
    controller: StoredValue<TodoController, LocalStorage>,
}

impl AppContext {
    pub fn dispatch(&self, intent: Intent) {
        self.controller.with_value(|c| c.dispatch(intent));
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = EnvConfig::new();

    let Some(user_id) = config.user_id else {
        return view! { <UserWarning /> }.into_any();
    };

    let controller = TodoController::new(
        Rc::new(ApiClient::from_config(&config)),
        Rc::new(BrowserRuntime),
        user_id,
    );

    let (snapshot, set_snapshot) = signal(controller.snapshot());
    controller.subscribe(move |snap| set_snapshot.set(snap));
    controller.dispatch(Intent::Load);

    provide_context(AppContext {
        snapshot,
        controller: StoredValue::new_local(controller),
    });

    // The filter lives in the path so it survives reloads: `/`, `/active`, `/completed`.
    view! {
        <Router>
            <Routes fallback=|| view! { <TodoPage /> }>
                <Route path=path!("") view=TodoPage />
                <Route path=path!("active") view=TodoPage />
                <Route path=path!("completed") view=TodoPage />
            </Routes>
        </Router>
    }
    .into_any()
}
