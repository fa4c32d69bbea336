//! Toast notifications queued for the UI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    /// Errors: failed login, rejected form
    Destructive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// FIFO of toasts not yet shown.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    pending: Vec<Notification>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Hand every queued toast to the caller, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_order_and_drain() {
        let mut toaster = Toaster::new();
        toaster.push(Notification::success("Login successful", "Welcome to Mudra Clinic"));
        toaster.push(Notification::error("Login failed", "Invalid email or password"));

        assert!(toaster.pending()[1].is_destructive());
        let drained = toaster.drain();
        assert_eq!(drained[0].title, "Login successful");
        assert_eq!(drained.len(), 2);
        assert!(toaster.pending().is_empty());
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        let json = serde_json::to_string(&Notification::error("a", "b")).unwrap();
        assert!(json.contains(r#""variant":"destructive""#));
    }
}
