use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::domain::{
    ConflictPolicy, DomainError, DomainResult, NewRental, Rental, RentalAdmission,
    RentalRepository, RentalWindow,
};
use crate::infrastructure::database::entities::{car, user_car};

pub struct SeaOrmRentalRepository {
    db: DatabaseConnection,
}

impl SeaOrmRentalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn rental_model_to_domain(model: user_car::Model) -> Rental {
    Rental {
        id: model.id,
        user_id: model.user_id,
        car_id: model.car_id,
        rent_started_at: model.rent_started_at,
        rent_ended_at: model.rent_ended_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// SQL form of `ConflictPolicy::conflicts` against the requested window.
fn conflict_condition(policy: ConflictPolicy, window: &RentalWindow) -> Condition {
    match policy {
        ConflictPolicy::Overlap => Condition::all()
            .add(user_car::Column::RentStartedAt.lt(window.end))
            .add(user_car::Column::RentEndedAt.gt(window.start)),
        ConflictPolicy::Contained => Condition::all()
            .add(user_car::Column::RentStartedAt.gte(window.start))
            .add(user_car::Column::RentEndedAt.lte(window.end)),
    }
}

#[async_trait]
impl RentalRepository for SeaOrmRentalRepository {
    async fn admit(
        &self,
        rental: NewRental,
        policy: ConflictPolicy,
    ) -> DomainResult<RentalAdmission> {
        let txn = self.db.begin().await?;

        let Some(car_model) = car::Entity::find_by_id(rental.car_id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(DomainError::not_found("Car", rental.car_id));
        };

        let conflict = user_car::Entity::find()
            .filter(user_car::Column::CarId.eq(rental.car_id))
            .filter(conflict_condition(policy, &rental.window))
            .one(&txn)
            .await?;

        if let Some(existing) = conflict {
            debug!(car_id = rental.car_id, existing_id = existing.id, "Rental conflict");
            txn.rollback().await?;
            return Ok(RentalAdmission::Conflict(rental_model_to_domain(existing)));
        }

        let now = Utc::now();
        let inserted = user_car::ActiveModel {
            user_id: Set(rental.user_id),
            car_id: Set(rental.car_id),
            rent_started_at: Set(rental.window.start),
            rent_ended_at: Set(rental.window.end),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut car_active: car::ActiveModel = car_model.into();
        car_active.is_currently_rented = Set(true);
        car_active.updated_at = Set(now);
        car_active.update(&txn).await?;

        txn.commit().await?;
        Ok(RentalAdmission::Admitted(rental_model_to_domain(inserted)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone};
    use sea_orm::QueryOrder;

    use super::*;
    use crate::domain::{CarInput, CarRepository, NewUser, Role, UserRepository};
    use crate::infrastructure::database::repositories::car_repository::SeaOrmCarRepository;
    use crate::infrastructure::database::repositories::test_support::migrated_db;
    use crate::infrastructure::database::repositories::user_repository::SeaOrmUserRepository;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, d, 9, 0, 0).unwrap()
    }

    async fn setup() -> (SeaOrmRentalRepository, SeaOrmCarRepository, i32, i32) {
        let db = migrated_db().await;
        let cars = SeaOrmCarRepository::new(db.clone());
        let users = SeaOrmUserRepository::new(db.clone());

        let car = cars
            .create(CarInput {
                name: "Innova".into(),
                price: 500_000,
                size: "large".into(),
                image: "innova.png".into(),
            })
            .await
            .unwrap();
        let user = users
            .create(NewUser {
                name: "Rina".into(),
                email: "rina@mail.com".into(),
                password_hash: "hash".into(),
                image: None,
                role: Role::Customer,
            })
            .await
            .unwrap();

        (SeaOrmRentalRepository::new(db), cars, car.id, user.id)
    }

    async fn stored(rentals: &SeaOrmRentalRepository, car_id: i32) -> Vec<Rental> {
        user_car::Entity::find()
            .filter(user_car::Column::CarId.eq(car_id))
            .order_by_asc(user_car::Column::RentStartedAt)
            .all(&rentals.db)
            .await
            .unwrap()
            .into_iter()
            .map(rental_model_to_domain)
            .collect()
    }

    fn request(user_id: i32, car_id: i32, from: u32, to: u32) -> NewRental {
        NewRental {
            user_id,
            car_id,
            window: RentalWindow {
                start: day(from),
                end: day(to),
            },
        }
    }

    #[tokio::test]
    async fn admitted_rental_is_recorded_and_flags_car() {
        let (rentals, cars, car_id, user_id) = setup().await;

        let outcome = rentals
            .admit(request(user_id, car_id, 10, 12), ConflictPolicy::Overlap)
            .await
            .unwrap();
        let RentalAdmission::Admitted(rental) = outcome else {
            panic!("expected admission");
        };
        assert_eq!(rental.car_id, car_id);
        assert_eq!(rental.window().end, day(12));

        assert_eq!(stored(&rentals, car_id).await, vec![rental]);
        assert!(cars.find_by_id(car_id).await.unwrap().unwrap().is_currently_rented);
    }

    #[tokio::test]
    async fn window_containing_existing_rental_is_rejected() {
        let (rentals, _, car_id, user_id) = setup().await;
        rentals
            .admit(request(user_id, car_id, 10, 12), ConflictPolicy::Contained)
            .await
            .unwrap();

        let outcome = rentals
            .admit(request(user_id, car_id, 9, 13), ConflictPolicy::Contained)
            .await
            .unwrap();
        assert!(matches!(outcome, RentalAdmission::Conflict(_)));
        assert_eq!(stored(&rentals, car_id).await.len(), 1);
    }

    #[tokio::test]
    async fn partial_overlap_depends_on_policy() {
        let (rentals, _, car_id, user_id) = setup().await;
        rentals
            .admit(request(user_id, car_id, 10, 12), ConflictPolicy::Overlap)
            .await
            .unwrap();

        let overlap = rentals
            .admit(request(user_id, car_id, 11, 14), ConflictPolicy::Overlap)
            .await
            .unwrap();
        assert!(matches!(overlap, RentalAdmission::Conflict(_)));

        let contained = rentals
            .admit(request(user_id, car_id, 11, 14), ConflictPolicy::Contained)
            .await
            .unwrap();
        assert!(matches!(contained, RentalAdmission::Admitted(_)));
    }

    #[tokio::test]
    async fn back_to_back_rentals_are_admitted() {
        let (rentals, _, car_id, user_id) = setup().await;
        for (from, to) in [(10, 12), (12, 14)] {
            let outcome = rentals
                .admit(request(user_id, car_id, from, to), ConflictPolicy::Overlap)
                .await
                .unwrap();
            assert!(matches!(outcome, RentalAdmission::Admitted(_)));
        }
    }
}
