use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Where controller tasks run and how they wait. The browser build uses the
/// Leptos local executor and `setTimeout`; tests drive both by hand.
pub(crate) trait Runtime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}
