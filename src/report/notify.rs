use std::cell::RefCell;
use tracing::warn;

/// Fire-and-forget user-facing alerts.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}

/// Collects error toasts so the page can render them once.
#[derive(Debug, Default)]
pub struct ToastNotifier {
    messages: RefCell<Vec<String>>,
}

impl ToastNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for ToastNotifier {
    fn notify_error(&self, message: &str) {
        warn!(toast = message, "Showing error notification");
        self.messages.borrow_mut().push(message.to_string());
    }
}
