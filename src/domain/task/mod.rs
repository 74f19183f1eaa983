//! Task aggregate

pub mod model;
pub mod repository;

pub use model::{Task, TaskInput};
pub use repository::TaskRepository;
