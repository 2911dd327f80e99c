//! In-memory store and hand-driven runtime for controller tests.

use super::Runtime;
use crate::api::{ApiError, ApiResult, TodoStore};
use crate::models::{NewTodo, Todo, TodoId, UserId};
use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    List(UserId),
    Create(String),
    Update(Todo),
    Delete(TodoId),
}

type FailRule = Box<dyn Fn(&Call) -> bool>;

/// Remote store double: records calls, fails on demand, and can hold every
/// response until the test releases it.
#[derive(Default)]
pub(crate) struct FakeStore {
    todos: RefCell<Vec<Todo>>,
    next_id: Cell<TodoId>,
    calls: RefCell<Vec<Call>>,
    fail_rules: RefCell<Vec<FailRule>>,
    paused: Cell<bool>,
    gates: RefCell<Vec<Option<oneshot::Sender<()>>>>,
}

impl FakeStore {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let store = Self::default();
        *store.todos.borrow_mut() = todos;
        store.next_id.set(next);
        store
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn fail_when(&self, rule: impl Fn(&Call) -> bool + 'static) {
        self.fail_rules.borrow_mut().push(Box::new(rule));
    }

    /// Later requests wait until released.
    pub fn pause(&self) {
        self.paused.set(true);
    }

    /// Releases the `n`th held request (in issue order).
    pub fn release_at(&self, n: usize) {
        if let Some(tx) = self.gates.borrow_mut().get_mut(n).and_then(Option::take) {
            let _ = tx.send(());
        }
    }

    /// Releases everything held and stops pausing.
    pub fn release_all(&self) {
        self.paused.set(false);
        for tx in self.gates.borrow_mut().iter_mut().filter_map(Option::take) {
            let _ = tx.send(());
        }
    }

    async fn enter(&self, call: Call) -> ApiResult<()> {
        self.calls.borrow_mut().push(call.clone());

        if self.paused.get() {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push(Some(tx));
            let _ = rx.await;
        }

        if self.fail_rules.borrow().iter().any(|rule| rule(&call)) {
            return Err(ApiError::http(500, "injected".to_string(), "Request failed"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl TodoStore for FakeStore {
    async fn list(&self, user_id: UserId) -> ApiResult<Vec<Todo>> {
        self.enter(Call::List(user_id)).await?;
        Ok(self
            .todos
            .borrow()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, todo: &NewTodo) -> ApiResult<Todo> {
        self.enter(Call::Create(todo.title.clone())).await?;
        let id = self.next_id.get().max(1);
        self.next_id.set(id + 1);
        let created = Todo {
            id,
            user_id: todo.user_id,
            title: todo.title.clone(),
            completed: todo.completed,
        };
        self.todos.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update(&self, todo: &Todo) -> ApiResult<Todo> {
        self.enter(Call::Update(todo.clone())).await?;
        let mut todos = self.todos.borrow_mut();
        let Some(slot) = todos.iter_mut().find(|t| t.id == todo.id) else {
            return Err(ApiError::http(404, "not found".to_string(), "Request failed"));
        };
        *slot = todo.clone();
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> ApiResult<()> {
        self.enter(Call::Delete(id)).await?;
        self.todos.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }
}

/// Runs tasks on a `LocalPool`; every `sleep` waits until the test fires it.
pub(crate) struct ManualRuntime {
    spawner: LocalSpawner,
    timers: RefCell<Vec<(Duration, Option<oneshot::Sender<()>>)>>,
}

impl ManualRuntime {
    pub fn new(spawner: LocalSpawner) -> Self {
        Self {
            spawner,
            timers: RefCell::new(Vec::new()),
        }
    }

    /// Delays requested so far, in creation order.
    pub fn requested_sleeps(&self) -> Vec<Duration> {
        self.timers.borrow().iter().map(|(d, _)| *d).collect()
    }

    /// Fires the `n`th timer ever created.
    pub fn fire_timer(&self, n: usize) {
        if let Some(tx) = self.timers.borrow_mut().get_mut(n).and_then(|(_, tx)| tx.take()) {
            let _ = tx.send(());
        }
    }

    pub fn fire_timers(&self) {
        for tx in self.timers.borrow_mut().iter_mut().filter_map(|(_, tx)| tx.take()) {
            let _ = tx.send(());
        }
    }
}

impl Runtime for ManualRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner
            .spawn_local(task)
            .expect("local pool should accept tasks");
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        self.timers.borrow_mut().push((duration, Some(tx)));
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}
