//! # vpnhub-database
//!
//! PostgreSQL connection management, migrations, and the account store:
//! a trait with a PostgreSQL repository and an in-memory implementation.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryAccountStore;
pub use repositories::AccountRepository;
pub use store::AccountStore;
