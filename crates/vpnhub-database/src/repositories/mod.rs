//! Repository implementations backed by PostgreSQL.

pub mod account;

pub use account::AccountRepository;
