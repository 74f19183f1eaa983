pub mod service;

pub use service::{AdminSeed, AuthService};
