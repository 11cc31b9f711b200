//! Sample service layer for respkit: an in-memory company catalogue whose
//! operations all answer with result envelopes.
//!
//! Wraps `respkit_core` with a concrete record type, a concurrent store,
//! input validation, seed data and environment configuration.

pub mod company;
pub mod config;
pub mod error;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use respkit_core;
pub use respkit_core::{
    Envelope, IntoHttpResponse, ListEnvelope, ListFilter, Response, SortDirection,
    ValidationErrors,
};

pub use company::{Address, Company, CompanyInput, CompanyView};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use seed::SeedError;
pub use service::CompanyService;
pub use store::CompanyStore;
