use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{DomainError, DomainResult, Task, TaskInput, TaskRepository};
use crate::infrastructure::database::entities::task;

pub struct SeaOrmTaskRepository {
    db: DatabaseConnection,
}

impl SeaOrmTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn task_model_to_domain(model: task::Model) -> Task {
    Task {
        id: model.id,
        name: model.name,
        prompt: model.prompt,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    async fn list(&self) -> DomainResult<Vec<Task>> {
        let models = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(task_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Task>> {
        let model = task::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(task_model_to_domain))
    }

    async fn create(&self, input: TaskInput) -> DomainResult<Task> {
        let now = Utc::now();
        let inserted = task::ActiveModel {
            name: Set(input.name),
            prompt: Set(input.prompt),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(task_model_to_domain(inserted))
    }

    async fn update(&self, id: i32, input: TaskInput) -> DomainResult<Option<Task>> {
        let Some(existing) = task::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: task::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.prompt = Set(input.prompt);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(task_model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = task::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Task", id));
        }
        Ok(())
    }
}
