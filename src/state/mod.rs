mod edit;
mod items;
mod notification;
mod pending;

pub(crate) use edit::{CommitAction, EditSession};
pub(crate) use items::ItemStore;
pub(crate) use notification::{NotificationChannel, NOTIFICATION_TIMEOUT};
pub(crate) use pending::{PendingKind, PendingTracker};

use crate::models::{ErrorMessage, Filter, Todo, TodoId};
use std::sync::Arc;

/// Everything the todo page renders from. Owned by `TodoController`; only
/// mutated between suspension points.
#[derive(Debug, Default)]
pub(crate) struct TodoState {
    pub items: ItemStore,
    pub pending: PendingTracker,
    pub edit: EditSession,
    pub notification: NotificationChannel,
    pub filter: Filter,

    /// Not-yet-confirmed todo shown under the list while its create is in flight.
    pub ghost: Option<Todo>,

    /// New-todo field text and whether it accepts input.
    pub new_title: String,
    pub input_disabled: bool,

    /// Bumped whenever the new-todo field should take focus again.
    pub focus_token: u32,
}

impl TodoState {
    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            items: self.items.snapshot(),
            filter: self.filter,
            ghost: self.ghost.clone(),
            pending: self.pending.clone(),
            edit: self.edit.clone(),
            error: self.notification.message(),
            new_title: self.new_title.clone(),
            input_disabled: self.input_disabled,
            focus_token: self.focus_token,
        }
    }
}

/// Read-only copy of `TodoState` handed to the view after each mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TodoSnapshot {
    pub items: Arc<Vec<Todo>>,
    pub filter: Filter,
    pub ghost: Option<Todo>,
    pub pending: PendingTracker,
    pub edit: EditSession,
    pub error: Option<ErrorMessage>,
    pub new_title: String,
    pub input_disabled: bool,
    pub focus_token: u32,
}

impl TodoSnapshot {
    pub fn visible_items(&self) -> Vec<Todo> {
        self.items
            .iter()
            .filter(|t| self.filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|t| !t.completed).count()
    }

    pub fn has_completed(&self) -> bool {
        self.items.iter().any(|t| t.completed)
    }

    pub fn all_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|t| t.completed)
    }

    pub fn is_loading(&self, id: TodoId) -> bool {
        self.pending.is_pending(id)
    }

    pub fn is_editing(&self, id: TodoId) -> bool {
        self.edit.editing_id() == Some(id)
    }
}
