use crate::components::toast::{Toast, ToastKind};
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::RwLock;
use std::time::Duration;

// Global queue drained by the main loop's tick; lets async service tasks
// report without threading a handle through every call.
static TOASTS: Lazy<RwLock<VecDeque<Toast>>> = Lazy::new(|| RwLock::new(VecDeque::new()));

fn push_toast(toast: Toast) {
    if let Ok(mut toasts) = TOASTS.write() {
        toasts.push_back(toast);
    }
}

/// Removes and returns the oldest queued toast, so a burst of toasts
/// displays in the order it was pushed.
pub fn pop_toast() -> Option<Toast> {
    TOASTS.write().ok()?.pop_front()
}

pub fn push_success<S: Into<String>>(message: S) {
    push_toast(Toast::new(
        ToastKind::Success,
        message.into(),
        Duration::from_secs(4),
    ));
}

pub fn push_error<E: Into<String>>(err: E) {
    push_toast(Toast::new(
        ToastKind::Error,
        err.into(),
        Duration::from_secs(4),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_drain_in_push_order() {
        push_success("first");
        push_error("second");

        let first = pop_toast().unwrap();
        let second = pop_toast().unwrap();
        assert_eq!(first.message, "first");
        assert_eq!(second.message, "second");
        assert!(pop_toast().is_none());
    }
}
