//! # Blog Core
//!
//! The domain layer of the blog service.
//! Entities, the post visibility rules, the authorization policy and the
//! use cases live here, with no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod ports;
pub mod service;
pub mod validation;
pub mod visibility;

pub use error::DomainError;
pub use service::BlogService;
