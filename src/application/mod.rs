//! Application layer: use-case orchestration on top of the repositories

pub mod cars;
pub mod identity;
pub mod tasks;

pub use cars::CarService;
pub use identity::{AdminSeed, AuthService};
pub use tasks::TaskService;
