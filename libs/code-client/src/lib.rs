//! Terminology Service Code Client
//!
//! This crate provides an async client for the code endpoints of the terminology
//! service: listing codes of a type page by page, fetching codes by id, and
//! creating or modifying codes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use snomed_code_client::{CodeApi, CodeClient, CodeTypeQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CodeClient::new("http://127.0.0.1:16043/rest/v1", "user", "secret")?;
//! let query = CodeTypeQuery {
//!     region: "be".to_string(),
//!     code_type: "BE-THESAURUS".to_string(),
//! };
//! let page = client.find_codes_by_type(&query, None, 100).await?;
//! println!("{} codes, more: {}", page.rows.len(), page.next_key_pair.is_some());
//! # Ok(())
//! # }
//! ```
//!
pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use api::CodeApi;
pub use auth::basic_auth;
pub use client::{CodeClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use models::{
    CodeDto, CodeTypeQuery, ListOfIds, PageCursor, PaginatedDocumentKeyIdPair, PaginatedList,
};
