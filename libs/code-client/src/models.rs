//! Data models for the code endpoints

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;

/// A code record as stored by the terminology service.
///
/// Only the fields the importer reads or writes are typed. Everything else the
/// service sends back (regions, author, flags, ...) lands in `extra` and is sent
/// unchanged on update, so modifying a code never drops data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDto {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub code_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub label: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub search_terms: BTreeMap<String, BTreeSet<String>>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub qualified_links: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CodeDto {
    /// Same record carrying the given revision token.
    pub fn with_rev(mut self, rev: Option<String>) -> Self {
        self.rev = rev;
        self
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedList<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
    #[serde(default)]
    pub rows: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_key_pair: Option<PaginatedDocumentKeyIdPair>,
}

/// Raw continuation key returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocumentKeyIdPair {
    #[serde(default)]
    pub start_key: Option<Value>,
    #[serde(default)]
    pub start_key_doc_id: Option<String>,
}

/// Position from which the next page is requested.
///
/// The service expects the start key as a JSON document in the query string,
/// so it is kept here already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub start_key: String,
    pub start_document_id: Option<String>,
}

impl PageCursor {
    pub fn from_key_pair(pair: &PaginatedDocumentKeyIdPair) -> Result<Self> {
        Ok(Self {
            start_key: serde_json::to_string(&pair.start_key)?,
            start_document_id: pair.start_key_doc_id.clone(),
        })
    }
}

/// Body of the multi-id lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOfIds {
    pub ids: Vec<String>,
}

/// Filter for listing codes of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTypeQuery {
    pub region: String,
    pub code_type: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
