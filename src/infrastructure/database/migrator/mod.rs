//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_roles;
mod m20240101_000002_create_users;
mod m20240101_000003_create_cars;
mod m20240101_000004_create_user_cars;
mod m20240101_000005_create_tasks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_roles::Migration),
            Box::new(m20240101_000002_create_users::Migration),
            Box::new(m20240101_000003_create_cars::Migration),
            Box::new(m20240101_000004_create_user_cars::Migration),
            Box::new(m20240101_000005_create_tasks::Migration),
        ]
    }
}
