use url::form_urlencoded;
use uuid::Uuid;

use super::{ClientError, TaskApi};
use crate::routes::tasks::dto::{CreateTask, UpdateTask};
use crate::routes::tasks::validation::{normalize_description, normalize_title};
use crate::routes::tasks::{Task, TaskStatus};

/// Filter state shared between the list view and the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub status: TaskStatus,
    pub search: String,
}

impl ViewQuery {
    /// Accepts a leading `?`. The first `status` and `search` win; an
    /// unrecognised status leaves the default in place.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();
        let (mut seen_status, mut seen_search) = (false, false);
        for (key, value) in form_urlencoded::parse(raw.trim_start_matches('?').as_bytes()) {
            match &*key {
                "status" if !seen_status => {
                    seen_status = true;
                    if let Some(status) = TaskStatus::parse_strict(&value) {
                        query.status = status;
                    }
                }
                "search" if !seen_search => {
                    seen_search = true;
                    query.search = value.into_owned();
                }
                _ => {}
            }
        }
        query
    }

    /// Defaults are left out, so the unfiltered view is the empty string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.status != TaskStatus::All {
            serializer.append_pair("status", self.status.as_str());
        }
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        serializer.finish()
    }
}

/// Client-side task list.
///
/// Creation waits for the server and then re-fetches. Toggling and deleting
/// change the local list first; if the server call fails the list is
/// re-fetched to undo the local change and the error is returned.
pub struct TaskTracker<A> {
    api: A,
    query: ViewQuery,
    tasks: Vec<Task>,
}

impl<A: TaskApi> TaskTracker<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            query: ViewQuery::default(),
            tasks: Vec::new(),
        }
    }

    /// Restores the view encoded in `location` (a page query string) and loads it.
    pub async fn from_location(api: A, location: &str) -> Result<Self, ClientError> {
        let mut tracker = Self {
            api,
            query: ViewQuery::from_query_string(location),
            tasks: Vec::new(),
        };
        tracker.refresh().await?;
        Ok(tracker)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// Query string to mirror into the page URL.
    pub fn location(&self) -> String {
        self.query.to_query_string()
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.tasks = self.api.list(&self.query).await?;
        Ok(())
    }

    pub async fn set_status(&mut self, status: TaskStatus) -> Result<(), ClientError> {
        if self.query.status == status {
            return Ok(());
        }
        self.query.status = status;
        self.refresh().await
    }

    pub async fn set_search(&mut self, search: impl Into<String>) -> Result<(), ClientError> {
        let search = search.into();
        if self.query.search == search {
            return Ok(());
        }
        self.query.search = search;
        self.refresh().await
    }

    /// Checks the form locally, then creates on the server and reloads.
    pub async fn create(&mut self, title: &str, description: &str) -> Result<(), ClientError> {
        let title = normalize_title(title)?;
        let description = normalize_description(Some(description))?;

        self.api.create(&CreateTask::new(title, description)).await?;
        self.refresh().await
    }

    pub async fn toggle(&mut self, id: Uuid) -> Result<(), ClientError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ClientError::UnknownTask(id))?;
        task.done = !task.done;
        let done = task.done;

        if let Err(e) = self.api.update(id, &UpdateTask::done(done)).await {
            tracing::warn!(error = %e, %id, "Toggle failed, reloading tasks");
            self.reconcile().await;
            return Err(e);
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        if !self.tasks.iter().any(|t| t.id == id) {
            return Err(ClientError::UnknownTask(id));
        }
        self.tasks.retain(|t| t.id != id);

        if let Err(e) = self.api.delete(id).await {
            tracing::warn!(error = %e, %id, "Delete failed, reloading tasks");
            self.reconcile().await;
            return Err(e);
        }
        Ok(())
    }

    async fn reconcile(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Reload after failed change also failed");
        }
    }
}
