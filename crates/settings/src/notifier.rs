//! User notifications for store and board operations.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, warn};

use crate::settings::UiSettings;
use crate::toast::{ToastKind, ToastQueue};

/// Receives user-facing outcome messages.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Pushes every notification onto a shared [`ToastQueue`].
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    queue: Arc<Mutex<ToastQueue>>,
}

impl ToastNotifier {
    pub fn new(queue: Arc<Mutex<ToastQueue>>) -> Self {
        Self { queue }
    }

    fn push(&self, kind: ToastKind, message: &str) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind, message);
    }
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(ToastKind::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }
}

/// Writes notifications to the log instead of showing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        debug!(%message, "notification");
    }

    fn warning(&self, message: &str) {
        warn!(%message, "notification");
    }

    fn error(&self, message: &str) {
        error!(%message, "notification");
    }
}

/// Toasts when `ui.habilitarToasts` is on, the log otherwise.
pub fn notifier_for(ui: &UiSettings, queue: Arc<Mutex<ToastQueue>>) -> Arc<dyn Notifier> {
    if ui.enable_toasts {
        Arc::new(ToastNotifier::new(queue))
    } else {
        Arc::new(LogNotifier)
    }
}
