use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dto::{Patch, UpdateTask};
use super::model::{Task, TaskStatus};
use super::validation::{normalize_description, normalize_title, ValidationError};

// Insertion-ordered; each mutation applies under a single write guard.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first; equal timestamps keep insertion order.
    pub async fn list(&self, status: TaskStatus, search: &str) -> Vec<Task> {
        let needle = search.to_lowercase();
        let mut matched: Vec<Task> = self
            .tasks
            .read()
            .await
            .iter()
            .filter(|t| status.matches(t) && t.matches_search(&needle))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Task, ValidationError> {
        let title = normalize_title(title)?;
        let description = normalize_description(description)?;

        let mut task = Task {
            id: Uuid::new_v4(),
            title,
            description,
            done: false,
            created_at: Utc::now(),
        };

        let mut tasks = self.tasks.write().await;
        // v4 collisions are not expected, but ids must stay unique.
        while tasks.iter().any(|t| t.id == task.id) {
            task.id = Uuid::new_v4();
        }
        tasks.push(task.clone());

        Ok(task)
    }

    /// Applies the supplied fields. `Ok(None)` means no task has that id.
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UpdateTask,
    ) -> Result<Option<Task>, ValidationError> {
        let title = match changes.title.by_ref() {
            Patch::Unset => None,
            Patch::Null => return Err(ValidationError::TitleRequired),
            Patch::Value(title) => Some(normalize_title(title)?),
        };
        let description = match changes.description.by_ref() {
            Patch::Unset => None,
            Patch::Null => Some(None),
            Patch::Value(description) => {
                Some(normalize_description(Some(description.as_str()))?)
            }
        };

        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description;
        }
        if let Patch::Value(done) = changes.done {
            task.done = done;
        }

        Ok(Some(task.clone()))
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        let mut tasks = self.tasks.write().await;
        match tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                tasks.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Option<Task> {
        self.tasks.read().await.iter().find(|t| t.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }
}
