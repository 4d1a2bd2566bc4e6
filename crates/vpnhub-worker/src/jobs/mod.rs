//! Periodic job implementations.

pub mod expiry;

pub use expiry::ExpirySweeper;
