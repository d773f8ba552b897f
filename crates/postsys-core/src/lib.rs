//! # PostSystem Core
//!
//! The domain layer of the PostSystem backend.
//! Entities, ports, and the authorization / referential-integrity services
//! shared by every resource. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
