//! Core type definitions used across the VPNHub workspace.

pub mod id;

pub use id::*;
