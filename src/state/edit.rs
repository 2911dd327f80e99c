use crate::models::TodoId;
use crate::state::items::ItemStore;

/// Inline rename session. At most one todo is editable at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum EditSession {
    #[default]
    Idle,
    Editing {
        id: TodoId,
        /// Free-form; trimmed only at commit time.
        draft: String,
        /// A rename request for this session is in flight.
        committing: bool,
    },
}

/// What the controller must do after a commit gesture (Enter or blur).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CommitAction {
    /// Nothing to send; session is back to `Idle`.
    Nothing,
    /// Draft was emptied: run the delete protocol.
    Delete(TodoId),
    /// Send a rename; session stays `Editing` until it settles.
    Rename { id: TodoId, title: String },
}

impl EditSession {
    pub fn editing_id(&self) -> Option<TodoId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { id, .. } => Some(*id),
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft.as_str()),
        }
    }

    pub fn is_committing(&self) -> bool {
        matches!(self, EditSession::Editing { committing: true, .. })
    }

    /// Starting again (same or another todo) replaces the session.
    pub fn start(&mut self, id: TodoId, title: &str) {
        *self = EditSession::Editing {
            id,
            draft: title.to_string(),
            committing: false,
        };
    }

    pub fn change(&mut self, text: &str) {
        if let EditSession::Editing { draft, .. } = self {
            *draft = text.to_string();
        }
    }

    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    pub fn begin_commit(&mut self, items: &ItemStore) -> CommitAction {
        let (id, title) = match self {
            EditSession::Idle | EditSession::Editing { committing: true, .. } => {
                return CommitAction::Nothing;
            }
            EditSession::Editing { id, draft, .. } => (*id, draft.trim().to_string()),
        };

        let Some(stored) = items.get(id) else {
            *self = EditSession::Idle;
            return CommitAction::Nothing;
        };

        if title == stored.title {
            *self = EditSession::Idle;
            return CommitAction::Nothing;
        }

        if title.is_empty() {
            *self = EditSession::Idle;
            return CommitAction::Delete(id);
        }

        if let EditSession::Editing { committing, .. } = self {
            *committing = true;
        }
        CommitAction::Rename { id, title }
    }

    /// Rename settled (either outcome). A session opened on another todo in
    /// the meantime is left alone.
    pub fn finish_commit(&mut self, id: TodoId) {
        if self.editing_id() == Some(id) && self.is_committing() {
            *self = EditSession::Idle;
        }
    }
}
