//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    Car, CarFilter, CarInput, CarRepository, ConflictPolicy, DomainError, DomainResult, NewRental,
    NewUser, RepositoryProvider, Rental, RentalAdmission, RentalRepository, Role, Task, TaskInput,
    TaskRepository, User, UserRepository,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    cars: DashMap<i32, Car>,
    rentals: DashMap<i32, Rental>,
    tasks: DashMap<i32, Task>,
    users: DashMap<i32, User>,
    car_counter: AtomicI32,
    rental_counter: AtomicI32,
    task_counter: AtomicI32,
    user_counter: AtomicI32,
    /// Serializes rental admissions so the conflict check and insert cannot interleave
    admission_lock: Mutex<()>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            cars: DashMap::new(),
            rentals: DashMap::new(),
            tasks: DashMap::new(),
            users: DashMap::new(),
            car_counter: AtomicI32::new(1),
            rental_counter: AtomicI32::new(1),
            task_counter: AtomicI32::new(1),
            user_counter: AtomicI32::new(1),
            admission_lock: Mutex::new(()),
        }
    }

    fn rental_ends(&self, car_id: i32) -> Vec<chrono::DateTime<Utc>> {
        self.rentals
            .iter()
            .filter(|r| r.car_id == car_id)
            .map(|r| r.rent_ended_at)
            .collect()
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn cars(&self) -> &dyn CarRepository {
        self
    }

    fn rentals(&self) -> &dyn RentalRepository {
        self
    }

    fn tasks(&self) -> &dyn TaskRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }
}

#[async_trait]
impl CarRepository for InMemoryRepositoryProvider {
    async fn list(
        &self,
        filter: &CarFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Car>> {
        page.ensure_in_range()?;
        let mut matching: Vec<Car> = self
            .cars
            .iter()
            .filter(|c| filter.matches(c.value(), &self.rental_ends(c.id)))
            .map(|c| c.value().clone())
            .collect();
        matching.sort_by_key(|c| c.id);

        let count = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(PaginatedResult::new(items, count, page))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Car>> {
        Ok(self.cars.get(&id).map(|c| c.clone()))
    }

    async fn create(&self, input: CarInput) -> DomainResult<Car> {
        let id = self.car_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let car = Car {
            id,
            name: input.name,
            price: input.price,
            size: input.size,
            image: input.image,
            is_currently_rented: false,
            created_at: now,
            updated_at: now,
        };
        self.cars.insert(id, car.clone());
        Ok(car)
    }

    async fn update(&self, id: i32, input: CarInput) -> DomainResult<Option<Car>> {
        let Some(mut car) = self.cars.get_mut(&id) else {
            return Ok(None);
        };
        car.name = input.name;
        car.price = input.price;
        car.size = input.size;
        car.image = input.image;
        car.is_currently_rented = false;
        car.updated_at = Utc::now();
        Ok(Some(car.clone()))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        if self.cars.remove(&id).is_none() {
            return Err(DomainError::not_found("Car", id));
        }
        self.rentals.retain(|_, r| r.car_id != id);
        Ok(())
    }
}

#[async_trait]
impl RentalRepository for InMemoryRepositoryProvider {
    async fn admit(
        &self,
        rental: NewRental,
        policy: ConflictPolicy,
    ) -> DomainResult<RentalAdmission> {
        let _guard = self
            .admission_lock
            .lock()
            .map_err(|_| DomainError::Internal("rental admission lock poisoned".to_string()))?;

        if !self.cars.contains_key(&rental.car_id) {
            return Err(DomainError::not_found("Car", rental.car_id));
        }

        let mut existing: Vec<Rental> = self
            .rentals
            .iter()
            .filter(|r| r.car_id == rental.car_id)
            .map(|r| r.value().clone())
            .collect();
        existing.sort_by_key(|r| r.id);
        if let Some(conflict) = existing
            .into_iter()
            .find(|r| policy.conflicts(&r.window(), &rental.window))
        {
            return Ok(RentalAdmission::Conflict(conflict));
        }

        let now = Utc::now();
        let id = self.rental_counter.fetch_add(1, Ordering::SeqCst);
        let record = Rental {
            id,
            user_id: rental.user_id,
            car_id: rental.car_id,
            rent_started_at: rental.window.start,
            rent_ended_at: rental.window.end,
            created_at: now,
            updated_at: now,
        };
        self.rentals.insert(id, record.clone());

        if let Some(mut car) = self.cars.get_mut(&rental.car_id) {
            car.is_currently_rented = true;
            car.updated_at = now;
        }

        Ok(RentalAdmission::Admitted(record))
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepositoryProvider {
    async fn list(&self) -> DomainResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.iter().map(|t| t.value().clone()).collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Task>> {
        Ok(self.tasks.get(&id).map(|t| t.clone()))
    }

    async fn create(&self, input: TaskInput) -> DomainResult<Task> {
        let id = self.task_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let task = Task {
            id,
            name: input.name,
            prompt: input.prompt,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: i32, input: TaskInput) -> DomainResult<Option<Task>> {
        let Some(mut task) = self.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.name = input.name;
        task.prompt = input.prompt;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Task", id))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepositoryProvider {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        if self.users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Validation(format!(
                "UNIQUE constraint failed: users.email ({})",
                new_user.email
            )));
        }
        let id = self.user_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            image: new_user.image,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn count_with_role(&self, role: Role) -> DomainResult<u64> {
        Ok(self.users.iter().filter(|u| u.role == role).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RentalWindow;
    use chrono::{Duration, TimeZone};

    fn input(name: &str, size: &str) -> CarInput {
        CarInput {
            name: name.into(),
            price: 250_000,
            size: size.into(),
            image: format!("{}.png", name.to_lowercase()),
        }
    }

    fn request(car_id: i32, from_day: u32, days: i64) -> NewRental {
        let start = Utc.with_ymd_and_hms(2024, 7, from_day, 0, 0, 0).unwrap();
        NewRental {
            user_id: 1,
            car_id,
            window: RentalWindow {
                start,
                end: start + Duration::days(days),
            },
        }
    }

    #[tokio::test]
    async fn list_filters_and_pages() {
        let repos = InMemoryRepositoryProvider::new();
        for i in 0..5 {
            repos.cars().create(input(&format!("Car{}", i), "small")).await.unwrap();
        }
        repos.cars().create(input("Fortuner", "large")).await.unwrap();

        let filter = CarFilter {
            size: Some("small".into()),
            ..Default::default()
        };
        let page = repos
            .cars()
            .list(&filter, PaginationParams::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.meta.count, 5);
        assert_eq!(page.meta.page_count, 3);
        assert_eq!(page.items.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[tokio::test]
    async fn admission_rejects_overlap_and_flags_car() {
        let repos = InMemoryRepositoryProvider::new();
        let car = repos.cars().create(input("Avanza", "medium")).await.unwrap();

        let first = repos
            .rentals()
            .admit(request(car.id, 10, 3), ConflictPolicy::Overlap)
            .await
            .unwrap();
        assert!(matches!(first, RentalAdmission::Admitted(_)));
        assert!(repos.cars().find_by_id(car.id).await.unwrap().unwrap().is_currently_rented);

        let second = repos
            .rentals()
            .admit(request(car.id, 11, 1), ConflictPolicy::Overlap)
            .await
            .unwrap();
        assert!(matches!(second, RentalAdmission::Conflict(_)));
        assert_eq!(repos.rental_ends(car.id).len(), 1);
    }

    #[tokio::test]
    async fn admission_for_unknown_car_is_not_found() {
        let repos = InMemoryRepositoryProvider::new();
        let err = repos
            .rentals()
            .admit(request(99, 1, 1), ConflictPolicy::Overlap)
            .await
            .unwrap_err();
        assert_eq!(err.name(), "NotFoundError");
    }

    #[tokio::test]
    async fn deleting_car_drops_its_rentals() {
        let repos = InMemoryRepositoryProvider::new();
        let car = repos.cars().create(input("Brio", "small")).await.unwrap();
        repos
            .rentals()
            .admit(request(car.id, 1, 1), ConflictPolicy::Overlap)
            .await
            .unwrap();

        repos.cars().delete(car.id).await.unwrap();
        assert!(repos.rental_ends(car.id).is_empty());
        assert!(repos.cars().delete(car.id).await.is_err());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repos = InMemoryRepositoryProvider::new();
        let user = NewUser {
            name: "Budi".into(),
            email: "budi@mail.com".into(),
            password_hash: "x".into(),
            image: None,
            role: Role::Customer,
        };
        repos.users().create(user.clone()).await.unwrap();
        assert!(repos.users().create(user).await.is_err());
        assert_eq!(repos.users().count_with_role(Role::Customer).await.unwrap(), 1);
    }
}
