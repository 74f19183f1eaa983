//! Repository provider for the domain layer

use super::car::CarRepository;
use super::rental::RentalRepository;
use super::task::TaskRepository;
use super::user::UserRepository;
use crate::shared::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let car = repos.cars().find_by_id(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn cars(&self) -> &dyn CarRepository;
    fn rentals(&self) -> &dyn RentalRepository;
    fn tasks(&self) -> &dyn TaskRepository;
    fn users(&self) -> &dyn UserRepository;
}
