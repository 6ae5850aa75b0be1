//! Consumer side of the task API.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::routes::tasks::dto::{CreateTask, UpdateTask};
use crate::routes::tasks::validation::ValidationError;
use crate::routes::tasks::Task;

mod http;
mod view;

pub use http::HttpTaskClient;
pub use view::{TaskTracker, ViewQuery};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("no task {0} in the current view")]
    UnknownTask(Uuid),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Operations a client needs from the task API.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list(&self, query: &ViewQuery) -> Result<Vec<Task>, ClientError>;

    async fn create(&self, body: &CreateTask) -> Result<Task, ClientError>;

    async fn update(&self, id: Uuid, body: &UpdateTask) -> Result<Task, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}
