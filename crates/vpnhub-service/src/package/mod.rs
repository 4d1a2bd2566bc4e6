//! The subscription package catalog.

pub mod catalog;

pub use catalog::PackageCatalog;
