use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::domain::{DomainError, DomainResult, NewUser, Role, User, UserRepository};
use crate::infrastructure::database::entities::{role, user};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn role_id(&self, role: Role) -> DomainResult<i32> {
        role::Entity::find()
            .filter(role::Column::Name.eq(role.as_str()))
            .one(&self.db)
            .await?
            .map(|r| r.id)
            .ok_or_else(|| DomainError::Database(format!("role {} is not seeded", role)))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model, role: Option<role::Model>) -> DomainResult<User> {
    let role = role
        .and_then(|r| Role::parse(&r.name))
        .ok_or_else(|| DomainError::Database(format!("user {} has an unknown role", model.id)))?;

    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.encrypted_password,
        image: model.image,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .find_also_related(role::Entity)
            .one(&self.db)
            .await?;

        found
            .map(|(model, role)| user_model_to_domain(model, role))
            .transpose()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .find_also_related(role::Entity)
            .one(&self.db)
            .await?;

        found
            .map(|(model, role)| user_model_to_domain(model, role))
            .transpose()
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let role_id = self.role_id(new_user.role).await?;
        let now = Utc::now();

        let inserted = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            encrypted_password: Set(new_user.password_hash),
            image: Set(new_user.image),
            role_id: Set(role_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(User {
            id: inserted.id,
            name: inserted.name,
            email: inserted.email,
            password_hash: inserted.encrypted_password,
            image: inserted.image,
            role: new_user.role,
            created_at: inserted.created_at,
            updated_at: inserted.updated_at,
        })
    }

    async fn count_with_role(&self, role: Role) -> DomainResult<u64> {
        let role_id = self.role_id(role).await?;
        let count = user::Entity::find()
            .filter(user::Column::RoleId.eq(role_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::migrated_db;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Andi".into(),
            email: email.into(),
            password_hash: "$2b$12$hash".into(),
            image: None,
            role,
        }
    }

    #[tokio::test]
    async fn created_user_is_found_with_role() {
        let repo = SeaOrmUserRepository::new(migrated_db().await);
        let created = repo.create(new_user("andi@mail.com", Role::Admin)).await.unwrap();

        let by_email = repo.find_by_email("andi@mail.com").await.unwrap().unwrap();
        assert_eq!(by_email, created);
        assert_eq!(by_email.role, Role::Admin);

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "andi@mail.com");
        assert!(repo.find_by_email("nobody@mail.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_validation_error() {
        let repo = SeaOrmUserRepository::new(migrated_db().await);
        repo.create(new_user("dup@mail.com", Role::Customer)).await.unwrap();

        let err = repo
            .create(new_user("dup@mail.com", Role::Customer))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn counts_users_per_role() {
        let repo = SeaOrmUserRepository::new(migrated_db().await);
        assert_eq!(repo.count_with_role(Role::Admin).await.unwrap(), 0);
        repo.create(new_user("a@mail.com", Role::Admin)).await.unwrap();
        repo.create(new_user("c@mail.com", Role::Customer)).await.unwrap();
        assert_eq!(repo.count_with_role(Role::Admin).await.unwrap(), 1);
    }
}
