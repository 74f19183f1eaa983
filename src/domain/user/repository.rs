use async_trait::async_trait;

use super::model::{NewUser, Role, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    /// Insert a user; an already registered email is a `Validation` error.
    async fn create(&self, user: NewUser) -> DomainResult<User>;
    async fn count_with_role(&self, role: Role) -> DomainResult<u64>;
}
