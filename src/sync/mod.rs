mod runtime;
#[cfg(test)]
pub(crate) mod testing;

pub(crate) use runtime::{BrowserRuntime, Runtime};

use crate::api::TodoStore;
use crate::models::{ErrorMessage, Filter, NewTodo, Todo, TodoId, UserId};
use crate::state::{CommitAction, PendingKind, TodoSnapshot, TodoState, NOTIFICATION_TIMEOUT};
use futures::future::{join_all, AbortHandle, Abortable};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Discrete user intents reported by the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    Load,
    NewTitleChanged(String),
    SubmitNew(String),
    ToggleAll,
    ToggleOne(TodoId),
    DeleteOne(TodoId),
    ClearCompleted,
    StartEdit(TodoId),
    EditChanged(String),
    EditCommit,
    EditCancel,
    SetFilter(Filter),
    DismissError,
}

type Listener = Rc<dyn Fn(TodoSnapshot)>;

/// Keeps the local todo list consistent with the remote store across
/// overlapping requests.
///
/// Single-threaded: handlers run to completion between `.await`s, and the
/// state borrow is never held across one. After every mutation the listener
/// receives a fresh snapshot.
#[derive(Clone)]
pub(crate) struct TodoController {
    state: Rc<RefCell<TodoState>>,
    store: Rc<dyn TodoStore>,
    runtime: Rc<dyn Runtime>,
    user_id: UserId,
    listener: Rc<RefCell<Option<Listener>>>,
}

impl TodoController {
    pub fn new(store: Rc<dyn TodoStore>, runtime: Rc<dyn Runtime>, user_id: UserId) -> Self {
        Self {
            state: Rc::new(RefCell::new(TodoState::default())),
            store,
            runtime,
            user_id,
            listener: Rc::new(RefCell::new(None)),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(TodoSnapshot) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
        self.notify();
    }

    pub fn snapshot(&self) -> TodoSnapshot {
        self.state.borrow().snapshot()
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(self.snapshot());
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut TodoState) -> R) -> R {
        let out = f(&mut *self.state.borrow_mut());
        self.notify();
        out
    }

    /// Shows `message` and schedules its auto-clear, replacing whatever was shown.
    fn raise(&self, message: ErrorMessage) {
        let (timer, registration) = AbortHandle::new_pair();
        self.update(|s| s.notification.raise(message, timer));

        let sleep = self.runtime.sleep(NOTIFICATION_TIMEOUT);
        let this = self.clone();
        self.runtime.spawn(Box::pin(async move {
            if Abortable::new(sleep, registration).await.is_ok() {
                this.update(|s| s.notification.dismiss());
            }
        }));
    }

    /// Applies synchronous intents in place and runs the rest on the runtime.
    pub fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::NewTitleChanged(text) => self.set_new_title(text),
            Intent::StartEdit(id) => self.start_edit(id),
            Intent::EditChanged(text) => self.update(|s| s.edit.change(&text)),
            Intent::EditCancel => self.update(|s| s.edit.cancel()),
            Intent::SetFilter(filter) => self.update(|s| s.filter = filter),
            Intent::DismissError => self.dismiss_error(),
            intent => {
                let this = self.clone();
                self.runtime.spawn(Box::pin(async move { this.handle(intent).await }));
            }
        }
    }

    async fn handle(&self, intent: Intent) {
        match intent {
            Intent::Load => self.load().await,
            Intent::SubmitNew(text) => self.submit_new(text).await,
            Intent::ToggleAll => self.toggle_all().await,
            Intent::ToggleOne(id) => self.toggle_one(id).await,
            Intent::DeleteOne(id) => self.delete_one(id).await,
            Intent::ClearCompleted => self.clear_completed().await,
            Intent::EditCommit => self.commit_edit().await,
            sync => self.dispatch(sync),
        }
    }

    pub fn set_new_title(&self, text: String) {
        self.update(|s| {
            s.new_title = text;
            // Typing clears the banner.
            s.notification.dismiss();
        });
    }

    pub fn dismiss_error(&self) {
        self.update(|s| s.notification.dismiss());
    }

    pub fn start_edit(&self, id: TodoId) {
        self.update(|s| {
            if let Some(title) = s.items.get(id).map(|t| t.title.clone()) {
                s.edit.start(id, &title);
            }
        });
    }

    pub async fn load(&self) {
        debug!(user_id = self.user_id, "loading todos");
        match self.store.list(self.user_id).await {
            Ok(todos) => {
                debug!(count = todos.len(), "todos loaded");
                self.update(|s| s.items.replace_all(todos));
            }
            Err(e) => {
                warn!(kind = ?e.kind, error = %e, "load failed");
                self.raise(ErrorMessage::UnableToLoadTodos);
            }
        }
    }

    /// Optimistic creation: a ghost row is shown until the server answers.
    pub async fn submit_new(&self, text: String) {
        let busy = self.update(|s| {
            if !s.input_disabled {
                s.new_title = text;
            }
            s.input_disabled
        });
        if busy {
            return;
        }

        let title = self.state.borrow().new_title.trim().to_string();
        if title.is_empty() {
            self.raise(ErrorMessage::TitleShouldNotBeEmpty);
            return;
        }

        let ghost = Todo::ghost(self.user_id, &title);
        let body = NewTodo::from(&ghost);
        self.update(|s| {
            s.input_disabled = true;
            s.ghost = Some(ghost);
        });

        debug!(title = %body.title, "creating todo");
        match self.store.create(&body).await {
            Ok(created) => {
                debug!(id = created.id, "todo created");
                self.update(|s| {
                    s.items.append(created);
                    s.ghost = None;
                    s.new_title.clear();
                });
            }
            Err(e) => {
                warn!(kind = ?e.kind, error = %e, "create failed");
                // Keep the typed text for a retry.
                self.update(|s| s.ghost = None);
                self.raise(ErrorMessage::UnableToAddTodo);
            }
        }

        self.update(|s| {
            s.input_disabled = false;
            s.focus_token = s.focus_token.wrapping_add(1);
        });
    }

    /// Flips `completed` once the server has accepted it; never before.
    pub async fn toggle_one(&self, id: TodoId) {
        let target = self.update(|s| {
            s.edit.cancel();
            s.pending.mark_pending(id, PendingKind::Update);
            s.items.get(id).cloned()
        });

        let Some(mut todo) = target else {
            self.update(|s| s.pending.clear_pending(id, PendingKind::Update));
            return;
        };
        todo.completed = !todo.completed;
        let completed = todo.completed;

        debug!(id, completed, "toggling todo");
        let result = self.store.update(&todo).await;

        if let Err(e) = &result {
            warn!(id, kind = ?e.kind, error = %e, "toggle failed");
            self.raise(ErrorMessage::UnableToUpdateTodo);
        }
        self.update(|s| {
            if result.is_ok() {
                s.items.replace_where(id, |t| t.completed = completed);
            }
            s.pending.clear_pending(id, PendingKind::Update);
        });
    }

    pub async fn delete_one(&self, id: TodoId) {
        let duplicate = self.update(|s| {
            let duplicate = s.pending.is_pending_kind(id, PendingKind::Delete);
            s.pending.mark_pending(id, PendingKind::Delete);
            duplicate
        });
        if duplicate {
            return;
        }

        debug!(id, "deleting todo");
        match self.store.delete(id).await {
            Ok(()) => {
                self.update(|s| {
                    s.items.remove_where(id);
                    s.pending.clear_pending(id, PendingKind::Delete);
                });
            }
            Err(e) => {
                warn!(id, kind = ?e.kind, error = %e, "delete failed");
                self.raise(ErrorMessage::UnableToDeleteTodo);
                self.update(|s| s.pending.clear_pending(id, PendingKind::Delete));
            }
        }
    }

    /// Commit on Enter or blur.
    ///
    /// The session returns to `Idle` once the rename settles, whatever the
    /// outcome; a failed rename does not reopen the field.
    pub async fn commit_edit(&self) {
        let action = self.update(|s| s.edit.begin_commit(&s.items));

        let (id, title) = match action {
            CommitAction::Nothing => return,
            CommitAction::Delete(id) => return self.delete_one(id).await,
            CommitAction::Rename { id, title } => (id, title),
        };

        let target = self.update(|s| {
            s.pending.mark_pending(id, PendingKind::Update);
            s.items.get(id).cloned()
        });
        let Some(mut todo) = target else {
            self.update(|s| {
                s.pending.clear_pending(id, PendingKind::Update);
                s.edit.finish_commit(id);
            });
            return;
        };
        todo.title = title.clone();

        debug!(id, title = %title, "renaming todo");
        let result = self.store.update(&todo).await;

        if let Err(e) = &result {
            warn!(id, kind = ?e.kind, error = %e, "rename failed");
            self.raise(ErrorMessage::UnableToUpdateTodo);
        }
        self.update(|s| {
            if result.is_ok() {
                s.items.replace_where(id, |t| t.title = title);
            }
            s.pending.clear_pending(id, PendingKind::Update);
            s.edit.finish_commit(id);
        });
    }

    /// Completes every open todo, or reopens all when none is open. Each
    /// toggle settles on its own.
    pub async fn toggle_all(&self) {
        let ids = {
            let s = self.state.borrow();
            let open = s.items.ids_where(|t| !t.completed);
            if open.is_empty() {
                s.items.ids_where(|_| true)
            } else {
                open
            }
        };

        debug!(count = ids.len(), "toggle all");
        join_all(ids.into_iter().map(|id| self.toggle_one(id))).await;
    }

    /// Deletes the todos that are completed right now; later changes do not
    /// widen or narrow the batch.
    pub async fn clear_completed(&self) {
        let ids = self.state.borrow().items.ids_where(|t| t.completed);

        debug!(count = ids.len(), "clear completed");
        join_all(ids.into_iter().map(|id| self.delete_one(id))).await;
    }
}
