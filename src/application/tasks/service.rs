use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, Task, TaskInput};

pub struct TaskService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TaskService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Task>> {
        self.repos.tasks().list().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Task> {
        self.repos
            .tasks()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", id))
    }

    pub async fn create(&self, input: TaskInput) -> DomainResult<Task> {
        let task = self.repos.tasks().create(input).await?;
        info!(task_id = task.id, "Task created");
        Ok(task)
    }

    pub async fn update(&self, id: i32, input: TaskInput) -> DomainResult<Task> {
        self.repos
            .tasks()
            .update(id, input)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", id))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.tasks().delete(id).await?;
        info!(task_id = id, "Task deleted");
        Ok(())
    }
}
