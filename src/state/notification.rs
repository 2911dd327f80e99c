use crate::models::ErrorMessage;
use futures::future::AbortHandle;
use std::time::Duration;

pub(crate) const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Single-slot error banner. The auto-clear timer is an abortable task whose
/// handle lives here; raising again aborts it and a new one takes its place.
#[derive(Debug, Default)]
pub(crate) struct NotificationChannel {
    message: Option<ErrorMessage>,
    timer: Option<AbortHandle>,
}

impl NotificationChannel {
    pub fn message(&self) -> Option<ErrorMessage> {
        self.message
    }

    /// Last writer wins; there is no queue.
    pub fn raise(&mut self, message: ErrorMessage, timer: AbortHandle) {
        if let Some(prev) = self.timer.replace(timer) {
            prev.abort();
        }
        self.message = Some(message);
    }

    /// No-op when nothing is shown.
    pub fn dismiss(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.message = None;
    }
}
