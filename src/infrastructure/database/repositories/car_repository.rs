use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{Car, CarFilter, CarInput, CarRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::{car, user_car};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmCarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn car_model_to_domain(model: car::Model) -> Car {
    Car {
        id: model.id,
        name: model.name,
        price: model.price,
        size: model.size,
        image: model.image,
        is_currently_rented: model.is_currently_rented,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Apply the listing predicate. Shared by the page query and the count query.
fn filtered(filter: &CarFilter) -> Select<car::Entity> {
    let mut query = car::Entity::find();

    if let Some(ref size) = filter.size {
        query = query.filter(car::Column::Size.eq(size.as_str()));
    }

    if let Some(available_at) = filter.available_at {
        let still_rented = Query::select()
            .column(user_car::Column::CarId)
            .from(user_car::Entity)
            .and_where(user_car::Column::RentEndedAt.gte(available_at))
            .to_owned();
        query = query.filter(car::Column::Id.not_in_subquery(still_rented));
    }

    query
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn list(
        &self,
        filter: &CarFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Car>> {
        page.ensure_in_range()?;
        let count = filtered(filter).count(&self.db).await?;

        let models = filtered(filter)
            .order_by_asc(car::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(car_model_to_domain).collect();
        Ok(PaginatedResult::new(items, count, page))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Car>> {
        let model = car::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(car_model_to_domain))
    }

    async fn create(&self, input: CarInput) -> DomainResult<Car> {
        let now = Utc::now();
        let model = car::ActiveModel {
            name: Set(input.name),
            price: Set(input.price),
            size: Set(input.size),
            image: Set(input.image),
            is_currently_rented: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await?;
        Ok(car_model_to_domain(inserted))
    }

    async fn update(&self, id: i32, input: CarInput) -> DomainResult<Option<Car>> {
        let Some(existing) = car::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: car::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.price = Set(input.price);
        active.size = Set(input.size);
        active.image = Set(input.image);
        active.is_currently_rented = Set(false);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(car_model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = car::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Car", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use sea_orm::{ActiveModelTrait, Set};

    use super::*;
    use crate::infrastructure::database::entities::{role, user};
    use crate::infrastructure::database::repositories::test_support::migrated_db;

    fn input(name: &str, size: &str) -> CarInput {
        CarInput {
            name: name.into(),
            price: 250_000,
            size: size.into(),
            image: format!("{}.png", name),
        }
    }

    async fn seed_rental(db: &DatabaseConnection, car_id: i32, ends: chrono::DateTime<Utc>) {
        let customer = role::Entity::find()
            .filter(role::Column::Name.eq("CUSTOMER"))
            .one(db)
            .await
            .unwrap()
            .unwrap();
        let now = Utc::now();
        let user = user::ActiveModel {
            name: Set("Sari".into()),
            email: Set(format!("sari{}@mail.com", car_id)),
            encrypted_password: Set("x".into()),
            image: Set(None),
            role_id: Set(customer.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        user_car::ActiveModel {
            user_id: Set(user.id),
            car_id: Set(car_id),
            rent_started_at: Set(ends - Duration::days(2)),
            rent_ended_at: Set(ends),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn create_starts_not_rented() {
        let repo = SeaOrmCarRepository::new(migrated_db().await);
        let car = repo.create(input("Avanza", "medium")).await.unwrap();
        assert!(car.id > 0);
        assert!(!car.is_currently_rented);
        assert_eq!(repo.find_by_id(car.id).await.unwrap(), Some(car));
    }

    #[tokio::test]
    async fn list_filters_by_size_and_counts_with_same_predicate() {
        let repo = SeaOrmCarRepository::new(migrated_db().await);
        for i in 0..3 {
            repo.create(input(&format!("small-{}", i), "small")).await.unwrap();
        }
        repo.create(input("big", "large")).await.unwrap();

        let filter = CarFilter {
            size: Some("small".into()),
            ..Default::default()
        };
        let page = repo.list(&filter, PaginationParams::new(2, 2)).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert!(page.items.iter().all(|c| c.size == "small"));
        assert_eq!(page.meta.count, 3);
        assert_eq!(page.meta.page_count, 2);

        let all = repo
            .list(&CarFilter::default(), PaginationParams::new(1, 10))
            .await
            .unwrap();
        assert_eq!(all.meta.count, 4);
    }

    #[tokio::test]
    async fn unbindable_offset_is_a_validation_error() {
        let db = migrated_db().await;
        let repo = SeaOrmCarRepository::new(db);
        repo.create(input("solo", "small")).await.unwrap();

        let err = repo
            .list(
                &CarFilter::default(),
                PaginationParams::new(100_000_000_000_000_000, 100),
            )
            .await
            .unwrap_err();
        assert_eq!(err.name(), "ValidationError");
    }

    #[tokio::test]
    async fn available_at_excludes_cars_rented_through_that_date() {
        let db = migrated_db().await;
        let repo = SeaOrmCarRepository::new(db.clone());
        let busy = repo.create(input("busy", "small")).await.unwrap();
        let free = repo.create(input("free", "small")).await.unwrap();

        let at = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        seed_rental(&db, busy.id, at + Duration::days(1)).await;
        seed_rental(&db, free.id, at - Duration::days(1)).await;

        let filter = CarFilter {
            available_at: Some(at),
            ..Default::default()
        };
        let page = repo.list(&filter, PaginationParams::new(1, 10)).await.unwrap();

        let ids: Vec<i32> = page.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![free.id]);
        assert_eq!(page.meta.count, 1);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_clears_rented_flag() {
        let repo = SeaOrmCarRepository::new(migrated_db().await);
        let car = repo.create(input("Brio", "small")).await.unwrap();

        let updated = repo
            .update(car.id, input("Brio RS", "medium"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Brio RS");
        assert_eq!(updated.size, "medium");
        assert!(!updated.is_currently_rented);

        assert!(repo.update(9999, input("x", "y")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_car_is_not_found() {
        let repo = SeaOrmCarRepository::new(migrated_db().await);
        let car = repo.create(input("Jazz", "small")).await.unwrap();

        repo.delete(car.id).await.unwrap();
        assert!(repo.find_by_id(car.id).await.unwrap().is_none());

        let err = repo.delete(car.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
