//! Account lifecycle services.

pub mod admin;
pub mod provision;
pub mod reseller;
pub mod service;

pub use admin::{AdminAccountService, CreateStaffRequest};
pub use provision::IssuedCredentials;
pub use reseller::ResellerService;
pub use service::{AccountService, LoginOutcome, SignupOutcome, SignupRequest};
