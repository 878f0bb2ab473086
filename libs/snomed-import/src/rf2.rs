//! Readers for the tab-separated RF2 release files
//!
//! Every line is a data row: there is no header detection. Real RF2 headers carry
//! the text `active` in the active column, so they are dropped like any inactive
//! row. A row with too few fields aborts the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::tables::{Acceptability, AcceptabilityIndex, MapTargets, SnomedTables, TermIndex};

const ACTIVE: &str = "1";

/// Paths of the three input files.
#[derive(Debug, Clone)]
pub struct Rf2Files {
    pub map_refset: PathBuf,
    pub language_refset: PathBuf,
    pub descriptions: PathBuf,
}

/// Row of a map refset: `id effectiveTime active moduleId refsetId referencedComponentId mapTarget`.
struct MapRow<'a> {
    active: bool,
    referenced_component_id: &'a str,
    map_target: &'a str,
}

impl<'a> MapRow<'a> {
    const FIELDS: usize = 7;

    fn from_fields(fields: &[&'a str]) -> Self {
        Self {
            active: fields[2] == ACTIVE,
            referenced_component_id: fields[5],
            map_target: fields[6],
        }
    }
}

/// Row of a language refset: `id effectiveTime active moduleId refsetId referencedComponentId acceptabilityId`.
struct LanguageRow<'a> {
    active: bool,
    description_id: &'a str,
    acceptability_id: &'a str,
}

impl<'a> LanguageRow<'a> {
    const FIELDS: usize = 7;

    fn from_fields(fields: &[&'a str]) -> Self {
        Self {
            active: fields[2] == ACTIVE,
            description_id: fields[5],
            acceptability_id: fields[6],
        }
    }
}

/// Row of a description file: `id effectiveTime active moduleId conceptId languageCode typeId term ...`.
struct DescriptionRow<'a> {
    id: &'a str,
    active: bool,
    concept_id: &'a str,
    language_code: &'a str,
    term: &'a str,
}

impl<'a> DescriptionRow<'a> {
    const FIELDS: usize = 8;

    fn from_fields(fields: &[&'a str]) -> Self {
        Self {
            id: fields[0],
            active: fields[2] == ACTIVE,
            concept_id: fields[4],
            language_code: fields[5],
            term: fields[7],
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })
}

/// Split every line of `reader` and hand the fields to `f`.
///
/// Returns the number of rows read.
fn for_each_row<R, F>(reader: R, source: &Path, min_fields: usize, mut f: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(&[&str]),
{
    let mut rows = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::FileRead {
            path: source.to_path_buf(),
            source: e,
        })?;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < min_fields {
            return Err(Error::MissingFields {
                path: source.to_path_buf(),
                line: index + 1,
                expected: min_fields,
                found: fields.len(),
            });
        }

        f(&fields);
        rows += 1;
    }
    Ok(rows)
}

/// Read active map refset rows into concept → targets.
pub fn read_map_targets<R: BufRead>(reader: R, source: &Path) -> Result<MapTargets> {
    let mut targets = MapTargets::default();
    let rows = for_each_row(reader, source, MapRow::FIELDS, |fields| {
        let row = MapRow::from_fields(fields);
        if row.active {
            targets.push(row.referenced_component_id, row.map_target);
        }
    })?;

    tracing::info!(
        file = %source.display(),
        rows,
        concepts = targets.len(),
        "Map refset loaded"
    );
    Ok(targets)
}

/// Read active language refset rows into description → acceptability.
pub fn read_acceptability<R: BufRead>(reader: R, source: &Path) -> Result<AcceptabilityIndex> {
    let mut index = AcceptabilityIndex::default();
    let rows = for_each_row(reader, source, LanguageRow::FIELDS, |fields| {
        let row = LanguageRow::from_fields(fields);
        if row.active {
            index.set(
                row.description_id,
                Acceptability::from_refset_id(row.acceptability_id),
            );
        }
    })?;

    tracing::info!(
        file = %source.display(),
        rows,
        descriptions = index.len(),
        "Language refset loaded"
    );
    Ok(index)
}

/// Read active, acceptable descriptions into concept → language → terms.
pub fn read_terms<R: BufRead>(
    reader: R,
    source: &Path,
    acceptability: &AcceptabilityIndex,
) -> Result<TermIndex> {
    let mut terms = TermIndex::default();
    let rows = for_each_row(reader, source, DescriptionRow::FIELDS, |fields| {
        let row = DescriptionRow::from_fields(fields);
        if row.active && acceptability.get(row.id).qualifies() {
            terms.push(row.concept_id, row.language_code, row.term);
        }
    })?;

    tracing::info!(
        file = %source.display(),
        rows,
        concepts = terms.len(),
        "Descriptions loaded"
    );
    Ok(terms)
}

pub fn load_map_targets(path: &Path) -> Result<MapTargets> {
    read_map_targets(open(path)?, path)
}

pub fn load_acceptability(path: &Path) -> Result<AcceptabilityIndex> {
    read_acceptability(open(path)?, path)
}

pub fn load_terms(path: &Path, acceptability: &AcceptabilityIndex) -> Result<TermIndex> {
    read_terms(open(path)?, path, acceptability)
}

/// Load the three files. The language refset is only needed to filter descriptions.
pub fn load_tables(files: &Rf2Files) -> Result<SnomedTables> {
    let map_targets = load_map_targets(&files.map_refset)?;
    let acceptability = load_acceptability(&files.language_refset)?;
    let terms = load_terms(&files.descriptions, &acceptability)?;

    Ok(SnomedTables { map_targets, terms })
}
