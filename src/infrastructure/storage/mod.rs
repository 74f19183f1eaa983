//! Non-persistent storage implementations

mod memory;

pub use memory::InMemoryRepositoryProvider;
