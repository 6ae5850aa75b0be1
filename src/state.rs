use std::sync::Arc;

use crate::routes::tasks::TaskStore;

/// Shared handle passed to every handler.
#[derive(Clone, Default)]
pub struct AppState {
    pub tasks: Arc<TaskStore>,
}
