//! Identity module — accounts, roles & authentication
//!
//! Contains the `AccountService` which orchestrates all account-related
//! use-cases: role seeding, registration, login, profile and password
//! changes, and activity tracking.

pub mod service;

pub use service::AccountService;
