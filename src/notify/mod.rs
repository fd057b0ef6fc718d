//! User notifications
//!
//! Blocking messages shown to the operator, such as a failed lookup or a
//! confirmation after saving a record.

use std::sync::Mutex;

/// Receiver of user-facing notifications
pub trait Notifier: Send + Sync {
    /// Show `message` to the user
    fn alert(&self, message: &str);
}

/// Notifier that keeps alerts in memory, in arrival order.
///
/// The web front end collects the alerts of one request with it and shows
/// them on the page it renders.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts received so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Remove and return the alerts received so far
    pub fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.alert("first");
        notifier.alert("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.messages().is_empty());
    }
}
