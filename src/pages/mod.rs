use crate::app::AppContext;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, LoaderOverlay,
};
use crate::models::{Filter, Todo, TodoId};
use crate::sync::Intent;
use leptos::html;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;

#[component]
pub fn UserWarning() -> impl IntoView {
    view! {
        <section class="mx-auto max-w-md px-4 py-10">
            <Alert class="border-warning/40">
                <AlertDescription>
                    "Set a user id in "<code>"window.ENV.USER_ID"</code>
                    " before loading todos."
                </AlertDescription>
            </Alert>
        </section>
    }
}

#[component]
pub fn TodoPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let location = use_location();

    // Route -> filter; display only, storage is untouched.
    Effect::new(move |_| {
        let filter = Filter::from_path(&location.pathname.get());
        ctx.dispatch(Intent::SetFilter(filter));
    });

    let has_items = move || ctx.snapshot.with(|s| !s.items.is_empty());

    view! {
        <div class="mx-auto flex min-h-screen w-full max-w-xl flex-col px-4 py-10">
            <h1 class="mb-6 text-center text-6xl font-thin text-muted-foreground">"todos"</h1>

            <div class="rounded-md border bg-card shadow-sm">
                <TodoHeader />
                <TodoList />
                <Show when=has_items fallback=|| ().into_view()>
                    <TodoFooter />
                </Show>
            </div>

            <ErrorNotification />
        </div>
    }
}

#[component]
fn TodoHeader() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let new_ref = NodeRef::<html::Input>::new();

    // Focus returns to the field after every settled create (and on mount).
    let focus_token = Memo::new(move |_| ctx.snapshot.with(|s| s.focus_token));
    Effect::new(move |_| {
        focus_token.track();
        if let Some(el) = new_ref.get() {
            let _ = el.focus();
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = ctx.snapshot.with_untracked(|s| s.new_title.clone());
        ctx.dispatch(Intent::SubmitNew(text));
    };

    let toggle_all_class = move || {
        if ctx.snapshot.with(|s| s.all_completed()) {
            "absolute left-0 h-full w-12 text-xl text-foreground"
        } else {
            "absolute left-0 h-full w-12 text-xl text-muted-foreground/40"
        }
    };

    view! {
        <header class="relative flex items-center border-b">
            <Show when=move || ctx.snapshot.with(|s| !s.items.is_empty()) fallback=|| ().into_view()>
                <button
                    type="button"
                    data-name="ToggleAllButton"
                    class=toggle_all_class
                    on:click=move |_| ctx.dispatch(Intent::ToggleAll)
                >
                    "❯"
                </button>
            </Show>

            <form class="w-full pl-12" on:submit=on_submit>
                <Input
                    placeholder="What needs to be done?"
                    value=Signal::derive(move || ctx.snapshot.with(|s| s.new_title.clone()))
                    disabled=Signal::derive(move || ctx.snapshot.with(|s| s.input_disabled))
                    on_input=Callback::new(move |text: String| ctx.dispatch(Intent::NewTitleChanged(text)))
                    node_ref=new_ref
                />
            </form>
        </header>
    }
}

#[component]
fn TodoList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    // Rows are rebuilt only when what they show changes, not on every keystroke
    // in the edit field.
    let rows = Memo::new(move |_| {
        ctx.snapshot
            .with(|s| (s.visible_items(), s.edit.editing_id()))
    });

    view! {
        <section data-name="TodoList">
            {move || {
                rows.get()
                    .0
                    .into_iter()
                    .map(|todo| view! { <TodoRow todo=todo /> })
                    .collect_view()
            }}

            {move || {
                ctx.snapshot
                    .with(|s| s.ghost.clone())
                    .map(|ghost| view! { <GhostRow todo=ghost /> })
            }}
        </section>
    }
}

#[component]
fn TodoRow(todo: Todo) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let id = todo.id;
    let completed = todo.completed;
    let title = todo.title;

    let editing = move || ctx.snapshot.with(|s| s.is_editing(id));
    let loading = Signal::derive(move || ctx.snapshot.with(|s| s.is_loading(id)));

    let row_class = if completed {
        "group relative flex min-h-14 items-center border-b text-muted-foreground line-through"
    } else {
        "group relative flex min-h-14 items-center border-b"
    };

    view! {
        <div
            data-name="Todo"
            class=row_class
            on:dblclick=move |_| ctx.dispatch(Intent::StartEdit(id))
        >
            <label class="flex w-12 justify-center">
                <input
                    type="checkbox"
                    data-name="TodoStatus"
                    class="size-5"
                    prop:checked=completed
                    on:change=move |_| ctx.dispatch(Intent::ToggleOne(id))
                />
            </label>

            <Show
                when=editing
                fallback=move || {
                    let title = title.clone();
                    view! {
                        <span data-name="TodoTitle" class="flex-1 break-all px-2 py-3">{title}</span>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            class="mr-2 opacity-0 group-hover:opacity-100"
                            attr:data-name="TodoDelete"
                            on:click=move |_| ctx.dispatch(Intent::DeleteOne(id))
                        >
                            "×"
                        </Button>
                    }
                }
            >
                <TodoTitleField id=id />
            </Show>

            <LoaderOverlay active=loading />
        </div>
    }
}

#[component]
fn TodoTitleField(id: TodoId) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let field_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if let Some(el) = field_ref.get() {
            let _ = el.focus();
        }
    });

    let on_keyup = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Escape" => ctx.dispatch(Intent::EditCancel),
        "Enter" => ctx.dispatch(Intent::EditCommit),
        _ => {}
    };

    let on_input = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            ctx.dispatch(Intent::EditChanged(input.value()));
        }
    };

    view! {
        <input
            data-name="TodoTitleField"
            id=format!("todo-title-{id}")
            type="text"
            class="mr-2 flex-1 border px-2 py-2 shadow-inner outline-none"
            node_ref=field_ref
            prop:value=move || ctx.snapshot.with(|s| s.edit.draft().unwrap_or_default().to_string())
            on:input=on_input
            on:keyup=on_keyup
            on:blur=move |_| ctx.dispatch(Intent::EditCommit)
        />
    }
}

/// Placeholder for the todo being created; always shows the loader.
#[component]
fn GhostRow(todo: Todo) -> impl IntoView {
    view! {
        <div data-name="Todo" class="relative flex min-h-14 items-center border-b">
            <label class="flex w-12 justify-center">
                <input type="checkbox" class="size-5" prop:checked=todo.completed disabled=true />
            </label>
            <span data-name="TodoTitle" class="flex-1 break-all px-2 py-3">{todo.title}</span>
            <LoaderOverlay active=Signal::derive(|| true) />
        </div>
    }
}

#[component]
fn TodoFooter() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let items_left = move || format!("{} items left", ctx.snapshot.with(|s| s.active_count()));

    view! {
        <footer data-name="Footer" class="flex items-center justify-between px-4 py-2 text-sm text-muted-foreground">
            <span data-name="TodosCounter">{items_left}</span>

            <nav data-name="Filter" class="flex gap-1">
                {Filter::iter()
                    .map(move |filter| {
                        let link_class = move || {
                            if ctx.snapshot.with(|s| s.filter == filter) {
                                "rounded border px-2 py-0.5"
                            } else {
                                "rounded border border-transparent px-2 py-0.5 hover:border-border"
                            }
                        };
                        view! {
                            <a
                                href=filter.href()
                                class=link_class
                                data-name=format!("FilterLink{filter}")
                            >
                                {filter.to_string()}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>

            <Button
                variant=ButtonVariant::Link
                size=ButtonSize::Sm
                attr:data-name="ClearCompletedButton"
                attr:disabled=move || !ctx.snapshot.with(|s| s.has_completed())
                on:click=move |_| ctx.dispatch(Intent::ClearCompleted)
            >
                "Clear completed"
            </Button>
        </footer>
    }
}

#[component]
fn ErrorNotification() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let error = move || ctx.snapshot.with(|s| s.error);

    view! {
        <Show when=move || error().is_some() fallback=|| ().into_view()>
            <Alert class="mt-4 border-destructive/30" attr:data-name="ErrorNotification">
                <AlertDescription class="text-destructive">
                    {move || error().map(|e| e.to_string()).unwrap_or_default()}
                </AlertDescription>
                <button
                    type="button"
                    data-name="HideErrorButton"
                    class="text-destructive/70 hover:text-destructive"
                    on:click=move |_| ctx.dispatch(Intent::DismissError)
                >
                    "×"
                </button>
            </Alert>
        </Show>
    }
}
