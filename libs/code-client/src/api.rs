//! The code operations the importer relies on

use crate::error::Result;
use crate::models::{CodeDto, CodeTypeQuery, PageCursor, PaginatedList};
use async_trait::async_trait;

/// Remote code store.
///
/// This trait defines the four operations needed to enrich a thesaurus with
/// SNOMED codes. The HTTP client implements it; tests use an in-memory store.
#[async_trait]
pub trait CodeApi: Send + Sync {
    /// List codes of one region and type, one page at a time
    ///
    /// # Arguments
    /// * `query` - Region and code type to list
    /// * `cursor` - Position returned by the previous page, `None` for the first
    /// * `limit` - Page size
    async fn find_codes_by_type(
        &self,
        query: &CodeTypeQuery,
        cursor: Option<&PageCursor>,
        limit: u32,
    ) -> Result<PaginatedList<CodeDto>>;

    /// Fetch the codes with the given ids in a single call
    ///
    /// Ids that do not exist are simply absent from the result.
    async fn get_codes(&self, ids: &[String]) -> Result<Vec<CodeDto>>;

    /// Create a new code (the payload must not carry a revision)
    async fn create_code(&self, code: &CodeDto) -> Result<CodeDto>;

    /// Update an existing code
    ///
    /// # Errors
    /// The service rejects the update when `code.rev` is not the current revision.
    async fn modify_code(&self, code: &CodeDto) -> Result<CodeDto>;
}
