//! Generated login credentials.

pub mod generator;

pub use generator::CredentialGenerator;
