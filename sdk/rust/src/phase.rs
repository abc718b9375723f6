//! Lifecycle of one async operation on a view.

/// Where one operation stands. Each operation on a view keeps its own
/// `Phase`, so a failed upload never clobbers a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Idle,
    Loading,
    Success(T),
    /// Holds the message shown to the user.
    Failure(String),
}

impl<T> Default for Phase<T> {
    fn default() -> Self {
        Phase::Idle
    }
}

impl<T> Phase<T> {
    /// Start a new attempt. Any earlier error or value is dropped.
    pub fn begin(&mut self) {
        *self = Phase::Loading;
    }

    pub fn succeed(&mut self, value: T) {
        *self = Phase::Success(value);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Phase::Failure(message.into());
    }

    pub fn reset(&mut self) {
        *self = Phase::Idle;
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Phase::Loading => true,
            Phase::Idle | Phase::Success(_) | Phase::Failure(_) => false,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Failure(message) => Some(message),
            Phase::Idle | Phase::Loading | Phase::Success(_) => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Phase::Success(value) => Some(value),
            Phase::Idle | Phase::Loading | Phase::Failure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.value().is_some()
    }
}
