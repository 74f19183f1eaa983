//! Database entities module

pub mod car;
pub mod role;
pub mod task;
pub mod user;
pub mod user_car;

pub use car::Entity as Car;
pub use role::Entity as Role;
pub use task::Entity as Task;
pub use user::Entity as User;
pub use user_car::Entity as UserCar;
