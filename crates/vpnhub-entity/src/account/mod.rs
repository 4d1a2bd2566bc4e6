//! Account domain entities.

pub mod expiry;
pub mod model;
pub mod role;
pub mod status;

pub use model::{Account, NewAccount};
pub use role::Role;
pub use status::AccountStatus;
