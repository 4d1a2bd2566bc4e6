//! Subscription package entities.

pub mod model;

pub use model::Package;
