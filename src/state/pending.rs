use crate::models::TodoId;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PendingKind {
    Delete,
    Update,
}

/// Ids with a request in flight, per operation kind.
///
/// Marks are set semantics: marking twice equals marking once, and one clear
/// drops the membership.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PendingTracker {
    deleting: BTreeSet<TodoId>,
    updating: BTreeSet<TodoId>,
}

impl PendingTracker {
    fn set_mut(&mut self, kind: PendingKind) -> &mut BTreeSet<TodoId> {
        match kind {
            PendingKind::Delete => &mut self.deleting,
            PendingKind::Update => &mut self.updating,
        }
    }

    pub fn mark_pending(&mut self, id: TodoId, kind: PendingKind) {
        self.set_mut(kind).insert(id);
    }

    pub fn clear_pending(&mut self, id: TodoId, kind: PendingKind) {
        self.set_mut(kind).remove(&id);
    }

    pub fn is_pending_kind(&self, id: TodoId, kind: PendingKind) -> bool {
        match kind {
            PendingKind::Delete => self.deleting.contains(&id),
            PendingKind::Update => self.updating.contains(&id),
        }
    }

    /// Loading indicator does not distinguish delete vs update.
    pub fn is_pending(&self, id: TodoId) -> bool {
        self.deleting.contains(&id) || self.updating.contains(&id)
    }
}
