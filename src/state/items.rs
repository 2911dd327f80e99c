use crate::models::{Todo, TodoId};
use std::sync::Arc;

/// Ordered list of confirmed todos; insertion order is display order.
///
/// Every mutation swaps in a fresh `Arc<Vec<_>>`, so a snapshot handed out
/// earlier keeps seeing the list as it was when it was taken.
#[derive(Clone, Debug, Default)]
pub(crate) struct ItemStore {
    items: Arc<Vec<Todo>>,
}

impl ItemStore {
    pub fn snapshot(&self) -> Arc<Vec<Todo>> {
        Arc::clone(&self.items)
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids_where(&self, pred: impl Fn(&Todo) -> bool) -> Vec<TodoId> {
        self.items.iter().filter(|t| pred(t)).map(|t| t.id).collect()
    }

    pub fn replace_all(&mut self, items: Vec<Todo>) {
        self.items = Arc::new(items);
    }

    pub fn append(&mut self, item: Todo) {
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.extend(self.items.iter().cloned());
        next.push(item);
        self.items = Arc::new(next);
    }

    /// Applies `mutator` to the item with `id`. Returns false when it is gone.
    pub fn replace_where(&mut self, id: TodoId, mutator: impl FnOnce(&mut Todo)) -> bool {
        let Some(pos) = self.items.iter().position(|t| t.id == id) else {
            return false;
        };

        let mut next: Vec<Todo> = self.items.as_ref().clone();
        mutator(&mut next[pos]);
        self.items = Arc::new(next);
        true
    }

    pub fn remove_where(&mut self, id: TodoId) -> bool {
        if !self.contains(id) {
            return false;
        }

        let next: Vec<Todo> = self.items.iter().filter(|t| t.id != id).cloned().collect();
        self.items = Arc::new(next);
        true
    }
}
