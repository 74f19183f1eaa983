//! Root status route and the catch-all 404

pub mod handlers;

pub use handlers::*;
