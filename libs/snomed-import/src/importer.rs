//! Pages through the thesaurus and upserts SNOMED codes and links

use std::collections::{BTreeSet, HashMap};

use snomed_code_client::{CodeApi, CodeDto, PageCursor};
use tracing::Instrument;

use crate::builder::build_code;
use crate::diff::diff_page;
use crate::error::Result;
use crate::settings::ImportSettings;
use crate::tables::SnomedTables;

/// Counters of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub pages: usize,
    pub codes_scanned: usize,
    pub codes_updated: usize,
    pub snomed_created: usize,
    pub snomed_updated: usize,
}

impl ImportReport {
    fn add(&mut self, page: &ImportReport) {
        self.pages += page.pages;
        self.codes_scanned += page.codes_scanned;
        self.codes_updated += page.codes_updated;
        self.snomed_created += page.snomed_created;
        self.snomed_updated += page.snomed_updated;
    }
}

/// Runs the import against a code store.
///
/// The tables are read-only for the whole run. Pages are processed one at a time
/// and every call is awaited before the next one is issued; the first failing
/// call aborts the run.
pub struct Importer<'a, A: CodeApi + ?Sized> {
    api: &'a A,
    tables: &'a SnomedTables,
    settings: &'a ImportSettings,
}

impl<'a, A: CodeApi + ?Sized> Importer<'a, A> {
    pub fn new(api: &'a A, tables: &'a SnomedTables, settings: &'a ImportSettings) -> Self {
        Self {
            api,
            tables,
            settings,
        }
    }

    pub async fn run(&self) -> Result<ImportReport> {
        let query = self.settings.query();
        let mut cursor: Option<PageCursor> = None;
        let mut report = ImportReport::default();

        loop {
            let number = report.pages + 1;
            let page = self
                .api
                .find_codes_by_type(&query, cursor.as_ref(), self.settings.page_size)
                .await?;

            let page_report = self
                .process_page(&page.rows)
                .instrument(tracing::info_span!("page", number))
                .await?;
            report.add(&page_report);

            match page.next_key_pair {
                Some(pair) => cursor = Some(PageCursor::from_key_pair(&pair)?),
                None => break,
            }
        }

        tracing::info!(
            pages = report.pages,
            scanned = report.codes_scanned,
            updated = report.codes_updated,
            snomed_created = report.snomed_created,
            snomed_updated = report.snomed_updated,
            "Import finished"
        );
        Ok(report)
    }

    async fn process_page(&self, rows: &[CodeDto]) -> Result<ImportReport> {
        let diff = diff_page(rows, &self.tables.map_targets, &self.settings.link_version);
        let (snomed_created, snomed_updated) = self.upsert_snomed_codes(&diff.snomed_ids).await?;

        for code in &diff.updated {
            self.api.modify_code(code).await?;
        }

        tracing::info!(
            scanned = rows.len(),
            updated = diff.updated.len(),
            snomed_created,
            snomed_updated,
            "Page processed"
        );

        Ok(ImportReport {
            pages: 1,
            codes_scanned: rows.len(),
            codes_updated: diff.updated.len(),
            snomed_created,
            snomed_updated,
        })
    }

    /// Create the SNOMED codes that do not exist yet, then refresh the others.
    ///
    /// Both passes work from one lookup made before any write. Returns the
    /// number of created and updated codes.
    async fn upsert_snomed_codes(&self, ids: &BTreeSet<String>) -> Result<(usize, usize)> {
        if ids.is_empty() {
            return Ok((0, 0));
        }

        let lookup: Vec<String> = ids.iter().cloned().collect();
        let existing: HashMap<String, CodeDto> = self
            .api
            .get_codes(&lookup)
            .await?
            .into_iter()
            .map(|code| (code.id.clone(), code))
            .collect();

        let mut created = 0;
        for id in ids.iter().filter(|id| !existing.contains_key(*id)) {
            let code = build_code(id, &self.tables.terms)?;
            self.api.create_code(&code).await?;
            created += 1;
        }

        let mut updated = 0;
        for (id, current) in ids
            .iter()
            .filter_map(|id| existing.get(id).map(|current| (id, current)))
        {
            let code = build_code(id, &self.tables.terms)?.with_rev(current.rev.clone());
            self.api.modify_code(&code).await?;
            updated += 1;
        }

        Ok((created, updated))
    }
}
