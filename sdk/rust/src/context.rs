use std::sync::Arc;

use crate::api::AdminApi;
use crate::session::Session;
use crate::shell::Shell;

/// Collaborators handed to every view controller at construction.
#[derive(Clone)]
pub struct ViewContext {
    pub api: Arc<dyn AdminApi>,
    pub shell: Arc<dyn Shell>,
    pub session: Session,
}

impl ViewContext {
    pub fn new(api: Arc<dyn AdminApi>, shell: Arc<dyn Shell>, session: Session) -> Self {
        Self { api, shell, session }
    }
}

impl std::fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewContext")
            .field("api", &"<api>")
            .field("shell", &"<shell>")
            .field("session", &self.session)
            .finish()
    }
}
