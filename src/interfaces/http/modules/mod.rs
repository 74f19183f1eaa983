pub mod application;
pub mod auth;
pub mod cars;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod tasks;
