//! Create user_cars table
//!
//! One row per admitted rental. Rows go away with their car or user.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_users::Users;
use super::m20240101_000003_create_cars::Cars;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserCars::UserId).integer().not_null())
                    .col(ColumnDef::new(UserCars::CarId).integer().not_null())
                    .col(
                        ColumnDef::new(UserCars::RentStartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCars::RentEndedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCars::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_cars_user")
                            .from(UserCars::Table, UserCars::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_cars_car")
                            .from(UserCars::Table, UserCars::CarId)
                            .to(Cars::Table, Cars::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_cars_car_window")
                    .table(UserCars::Table)
                    .col(UserCars::CarId)
                    .col(UserCars::RentStartedAt)
                    .col(UserCars::RentEndedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserCars {
    Table,
    Id,
    UserId,
    CarId,
    RentStartedAt,
    RentEndedAt,
    CreatedAt,
    UpdatedAt,
}
