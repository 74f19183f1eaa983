//! Cars module: catalogue CRUD and renting

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
