use async_trait::async_trait;

use super::model::{Task, TaskInput};
use crate::domain::DomainResult;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Task>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Task>>;
    async fn create(&self, input: TaskInput) -> DomainResult<Task>;
    async fn update(&self, id: i32, input: TaskInput) -> DomainResult<Option<Task>>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
