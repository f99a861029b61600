use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::pagination::{Page, DEFAULT_PAGE_SIZE};
use crate::types::Project;
use futures::Stream;

pub struct ProjectOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> ProjectOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of projects.
    pub async fn list(&self, limit: usize, offset: usize) -> Result<Page<Project>, V7Error> {
        self.client
            .paginator("/projects")?
            .fetch_page_as(limit, offset)
            .await
    }

    /// Every project in the workspace.
    pub async fn list_all(&self) -> Result<Vec<Project>, V7Error> {
        self.client
            .paginator("/projects")?
            .collect_all_as(DEFAULT_PAGE_SIZE)
            .await
    }

    pub fn iterate(
        &self,
        page_size: usize,
    ) -> Result<impl Stream<Item = Result<Project, V7Error>> + Send + 'static, V7Error> {
        Ok(self.client.paginator("/projects")?.iterate_as(page_size))
    }

    pub async fn get(&self, project_id: &str) -> Result<Project, V7Error> {
        let response = self
            .client
            .workspace_get(&format!("/projects/{}", project_id))
            .await?;
        Project::from_record(response)
    }

    pub async fn delete(&self, project_id: &str) -> Result<(), V7Error> {
        self.client
            .workspace_delete(&format!("/projects/{}", project_id))
            .await?;
        Ok(())
    }
}
