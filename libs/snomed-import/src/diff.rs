//! Computes the SNOMED links missing from a page of thesaurus codes

use std::collections::BTreeSet;

use snomed_code_client::CodeDto;

use crate::tables::MapTargets;

pub const SNOMED_PREFIX: &str = "SNOMED|";

/// Relation kinds that may hold SNOMED links.
pub const SNOMED_RELATIONS: [&str; 4] = ["exact", "narrower", "broader", "approximate"];

/// Relation that receives newly created links.
pub const NEW_LINK_RELATION: &str = "narrower";

/// A relation entry is SNOMED-typed when its kind may hold SNOMED links and
/// at least one of its links is one.
pub fn is_snomed_relation(kind: &str, links: &[String]) -> bool {
    SNOMED_RELATIONS.contains(&kind) && links.iter().any(|link| link.starts_with(SNOMED_PREFIX))
}

/// All links of the SNOMED-typed relation entries of a code.
fn snomed_relation_links(code: &CodeDto) -> impl Iterator<Item = &String> {
    code.qualified_links
        .iter()
        .filter(|(kind, links)| is_snomed_relation(kind, links))
        .flat_map(|(_, links)| links.iter())
}

/// Targets not yet linked from `code`.
///
/// A target `t` counts as linked when any SNOMED-typed link contains `|t|`.
pub fn missing_targets<'t>(code: &CodeDto, targets: &'t [String]) -> Vec<&'t str> {
    targets
        .iter()
        .filter(|target| {
            let needle = format!("|{target}|");
            !snomed_relation_links(code).any(|link| link.contains(&needle))
        })
        .map(String::as_str)
        .collect()
}

/// Copy of `code` with a `narrower` link appended for each missing target,
/// or `None` when nothing is missing.
pub fn add_missing_links(code: &CodeDto, targets: &[String], link_version: &str) -> Option<CodeDto> {
    let missing = missing_targets(code, targets);
    if missing.is_empty() {
        return None;
    }

    let mut updated = code.clone();
    updated
        .qualified_links
        .entry(NEW_LINK_RELATION.to_string())
        .or_default()
        .extend(
            missing
                .into_iter()
                .map(|target| format!("{SNOMED_PREFIX}{target}|{link_version}")),
        );
    Some(updated)
}

/// Outcome of diffing one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDiff {
    /// Thesaurus codes that gained links, in page order.
    pub updated: Vec<CodeDto>,
    /// Every SNOMED link held by the updated codes, sorted and deduplicated.
    pub snomed_ids: BTreeSet<String>,
}

pub fn diff_page(rows: &[CodeDto], map_targets: &MapTargets, link_version: &str) -> PageDiff {
    let updated: Vec<CodeDto> = rows
        .iter()
        .filter_map(|code| {
            let targets = code
                .code
                .as_deref()
                .map(|c| map_targets.targets(c))
                .unwrap_or(&[]);
            add_missing_links(code, targets, link_version)
        })
        .collect();

    let snomed_ids = updated
        .iter()
        .flat_map(snomed_relation_links)
        .filter(|link| link.starts_with(SNOMED_PREFIX))
        .cloned()
        .collect();

    PageDiff {
        updated,
        snomed_ids,
    }
}
