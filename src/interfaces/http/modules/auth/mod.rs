//! Authentication module: login, register, whoami

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
