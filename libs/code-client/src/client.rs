//! HTTP client for the terminology service code API

use crate::api::CodeApi;
use crate::auth::basic_auth;
use crate::error::{Error, Result};
use crate::models::{CodeDto, CodeTypeQuery, ListOfIds, PageCursor, PaginatedList};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:16043/rest/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the `/code` endpoints, authenticated with HTTP Basic.
pub struct CodeClient {
    client: Client,
    base_url: String,
}

impl CodeClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>, username: &str, password: &str) -> Result<Self> {
        Self::with_timeout(base_url, username, password, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    ///
    /// `base_url` is the API root, e.g. `http://host:16043/rest/v1`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&basic_auth(username, password))
            .map_err(|e| Error::InvalidCredentials(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn codes_url(&self) -> String {
        format!("{}/code", self.base_url)
    }

    fn codes_by_ids_url(&self) -> String {
        format!("{}/code/byIds", self.base_url)
    }

    fn find_codes_url(
        &self,
        query: &CodeTypeQuery,
        cursor: Option<&PageCursor>,
        limit: u32,
    ) -> String {
        let mut query_params = vec![
            format!("region={}", urlencoding::encode(&query.region)),
            format!("type={}", urlencoding::encode(&query.code_type)),
        ];

        if let Some(cursor) = cursor {
            query_params.push(format!(
                "startKey={}",
                urlencoding::encode(&cursor.start_key)
            ));
            if let Some(doc_id) = &cursor.start_document_id {
                query_params.push(format!("startDocumentId={}", urlencoding::encode(doc_id)));
            }
        }
        query_params.push(format!("limit={}", limit));

        format!("{}?{}", self.codes_url(), query_params.join("&"))
    }
}

async fn read_json<T: DeserializeOwned>(method: &str, url: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

#[async_trait]
impl CodeApi for CodeClient {
    async fn find_codes_by_type(
        &self,
        query: &CodeTypeQuery,
        cursor: Option<&PageCursor>,
        limit: u32,
    ) -> Result<PaginatedList<CodeDto>> {
        let url = self.find_codes_url(query, cursor, limit);
        tracing::debug!(%url, "Listing codes");

        let response = self.client.get(&url).send().await?;
        read_json("GET", &url, response).await
    }

    async fn get_codes(&self, ids: &[String]) -> Result<Vec<CodeDto>> {
        let url = self.codes_by_ids_url();
        tracing::debug!(%url, count = ids.len(), "Fetching codes by id");

        let body = ListOfIds { ids: ids.to_vec() };
        let response = self.client.post(&url).json(&body).send().await?;
        read_json("POST", &url, response).await
    }

    async fn create_code(&self, code: &CodeDto) -> Result<CodeDto> {
        let url = self.codes_url();
        tracing::debug!(id = %code.id, "Creating code");

        let response = self.client.post(&url).json(code).send().await?;
        read_json("POST", &url, response).await
    }

    async fn modify_code(&self, code: &CodeDto) -> Result<CodeDto> {
        let url = self.codes_url();
        tracing::debug!(id = %code.id, rev = ?code.rev, "Modifying code");

        let response = self.client.put(&url).json(code).send().await?;
        read_json("PUT", &url, response).await
    }
}
