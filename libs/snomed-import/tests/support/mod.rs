use async_trait::async_trait;
use serde_json::Value;
use snomed_code_client::{
    CodeApi, CodeDto, CodeTypeQuery, Error, PageCursor, PaginatedDocumentKeyIdPair,
    PaginatedList, Result,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// A call received by the in-memory store.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find(Option<PageCursor>),
    GetCodes(Vec<String>),
    Create(CodeDto),
    Modify(CodeDto),
}

/// Code store serving canned pages and keeping codes in a map.
///
/// Revisions are counters rendered as strings; a modify with a stale revision
/// fails with 409 like the real service.
pub struct InMemoryCodeApi {
    pages: Vec<PaginatedList<CodeDto>>,
    codes: Mutex<HashMap<String, CodeDto>>,
    calls: Mutex<Vec<Call>>,
    fail_creates: bool,
}

impl InMemoryCodeApi {
    pub fn new(pages: Vec<PaginatedList<CodeDto>>) -> Self {
        let codes = pages
            .iter()
            .flat_map(|page| page.rows.iter())
            .map(|code| (code.id.clone(), code.clone()))
            .collect();

        Self {
            pages,
            codes: Mutex::new(codes),
            calls: Mutex::new(Vec::new()),
            fail_creates: false,
        }
    }

    pub fn with_code(self, code: CodeDto) -> Self {
        self.codes.lock().unwrap().insert(code.id.clone(), code);
        self
    }

    pub fn failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn code(&self, id: &str) -> Option<CodeDto> {
        self.codes.lock().unwrap().get(id).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn finds(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, Call::Find(_)))
            .count()
    }
}

fn conflict(method: &str, body: String) -> Error {
    Error::Api {
        method: method.to_string(),
        url: "memory://code".to_string(),
        status: 409,
        body,
    }
}

fn next_rev(rev: Option<&str>) -> String {
    let current: u64 = rev.and_then(|r| r.parse().ok()).unwrap_or(0);
    (current + 1).to_string()
}

#[async_trait]
impl CodeApi for InMemoryCodeApi {
    async fn find_codes_by_type(
        &self,
        _query: &CodeTypeQuery,
        cursor: Option<&PageCursor>,
        _limit: u32,
    ) -> Result<PaginatedList<CodeDto>> {
        let index = self.finds();
        self.record(Call::Find(cursor.cloned()));
        self.pages.get(index).cloned().ok_or_else(|| Error::Api {
            method: "GET".to_string(),
            url: "memory://code".to_string(),
            status: 404,
            body: format!("no page {index}"),
        })
    }

    async fn get_codes(&self, ids: &[String]) -> Result<Vec<CodeDto>> {
        self.record(Call::GetCodes(ids.to_vec()));
        let codes = self.codes.lock().unwrap();
        Ok(ids.iter().filter_map(|id| codes.get(id).cloned()).collect())
    }

    async fn create_code(&self, code: &CodeDto) -> Result<CodeDto> {
        self.record(Call::Create(code.clone()));
        if self.fail_creates {
            return Err(Error::Api {
                method: "POST".to_string(),
                url: "memory://code".to_string(),
                status: 500,
                body: "create refused".to_string(),
            });
        }

        let mut codes = self.codes.lock().unwrap();
        if codes.contains_key(&code.id) {
            return Err(conflict("POST", format!("{} already exists", code.id)));
        }
        let stored = code.clone().with_rev(Some(next_rev(None)));
        codes.insert(code.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn modify_code(&self, code: &CodeDto) -> Result<CodeDto> {
        self.record(Call::Modify(code.clone()));

        let mut codes = self.codes.lock().unwrap();
        let current_rev = codes
            .get(&code.id)
            .ok_or_else(|| conflict("PUT", format!("{} does not exist", code.id)))?
            .rev
            .clone();
        if current_rev != code.rev {
            return Err(conflict("PUT", format!("stale revision for {}", code.id)));
        }

        let stored = code.clone().with_rev(Some(next_rev(current_rev.as_deref())));
        codes.insert(code.id.clone(), stored.clone());
        Ok(stored)
    }
}

pub fn thesaurus_code(code: &str, links: &[(&str, &[&str])]) -> CodeDto {
    CodeDto {
        id: format!("BE-THESAURUS|{code}|1"),
        rev: Some("1".to_string()),
        code_type: Some("BE-THESAURUS".to_string()),
        code: Some(code.to_string()),
        version: Some("1".to_string()),
        qualified_links: links
            .iter()
            .map(|(kind, values)| {
                (
                    kind.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect::<BTreeMap<_, _>>(),
        ..Default::default()
    }
}

pub fn snomed_code(id: &str, rev: &str) -> CodeDto {
    let mut parts = id.split('|');
    CodeDto {
        id: id.to_string(),
        rev: Some(rev.to_string()),
        code_type: parts.next().map(str::to_string),
        code: parts.next().map(str::to_string),
        version: parts.next().map(str::to_string),
        ..Default::default()
    }
}

pub fn page(rows: Vec<CodeDto>, next: Option<(Value, &str)>) -> PaginatedList<CodeDto> {
    PaginatedList {
        total_size: None,
        rows,
        next_key_pair: next.map(|(start_key, doc_id)| PaginatedDocumentKeyIdPair {
            start_key: Some(start_key),
            start_key_doc_id: Some(doc_id.to_string()),
        }),
    }
}
