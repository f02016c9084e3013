//! # Blog Shared
//!
//! Wire types of the blog API: form bodies, page payloads and error documents.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, PageResponse};
