use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use super::{ClientError, TaskApi, ViewQuery};
use crate::routes::tasks::dto::{CreateTask, UpdateTask};
use crate::routes::tasks::Task;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// `TaskApi` over HTTP. `base` is the server root, e.g. `http://127.0.0.1:3000/`.
#[derive(Debug, Clone)]
pub struct HttpTaskClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpTaskClient {
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn parse(base: &str) -> Result<Self, ClientError> {
        Ok(Self::new(Url::parse(base)?))
    }

    fn tasks_url(&self) -> Result<Url, ClientError> {
        Ok(self.base.join("tasks")?)
    }

    fn task_url(&self, id: Uuid) -> Result<Url, ClientError> {
        Ok(self.base.join(&format!("tasks/{id}"))?)
    }

    // Turns a non-2xx response into `ClientError::Api` using the `{error}` body.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskClient {
    async fn list(&self, query: &ViewQuery) -> Result<Vec<Task>, ClientError> {
        let mut url = self.tasks_url()?;
        let query_string = query.to_query_string();
        if !query_string.is_empty() {
            url.set_query(Some(&query_string));
        }

        let response = self.http.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create(&self, body: &CreateTask) -> Result<Task, ClientError> {
        let response = self.http.post(self.tasks_url()?).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(&self, id: Uuid, body: &UpdateTask) -> Result<Task, ClientError> {
        let response = self.http.put(self.task_url(id)?).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self.http.delete(self.task_url(id)?).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
