//! Side effects a view controller asks its host to perform.

use crate::session::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Error,
}

/// A transient toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::Error,
        }
    }
}

/// Host UI: routing, notifications and confirmation prompts.
pub trait Shell: Send + Sync {
    fn navigate(&self, route: Route);

    fn notify(&self, notification: Notification);

    /// Ask the user to confirm. `false` cancels the action.
    fn confirm(&self, prompt: &str) -> bool;
}
