//! In-memory lookup tables built from the RF2 files

use std::collections::{BTreeMap, HashMap};

/// Acceptability id ranked 1.
pub const PREFERRED_ACCEPTABILITY_ID: &str = "900000000000549004";
/// Acceptability id ranked 2.
pub const ACCEPTABLE_ACCEPTABILITY_ID: &str = "900000000000548007";

/// Acceptability of a description in a language refset.
///
/// Only the rank matters downstream: any description ranked 1 or more
/// contributes its term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Acceptability {
    #[default]
    None = 0,
    Preferred = 1,
    Acceptable = 2,
}

impl Acceptability {
    pub fn from_refset_id(acceptability_id: &str) -> Self {
        match acceptability_id {
            PREFERRED_ACCEPTABILITY_ID => Acceptability::Preferred,
            ACCEPTABLE_ACCEPTABILITY_ID => Acceptability::Acceptable,
            _ => Acceptability::None,
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn qualifies(self) -> bool {
        self.rank() >= 1
    }
}

/// Concept id → SNOMED map targets, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapTargets {
    targets: HashMap<String, Vec<String>>,
}

impl MapTargets {
    pub fn push(&mut self, concept_id: impl Into<String>, target: impl Into<String>) {
        self.targets
            .entry(concept_id.into())
            .or_default()
            .push(target.into());
    }

    /// Targets of a concept, empty when it has none.
    pub fn targets(&self, concept_id: &str) -> &[String] {
        self.targets
            .get(concept_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Description id → acceptability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptabilityIndex {
    by_description: HashMap<String, Acceptability>,
}

impl AcceptabilityIndex {
    /// Record the acceptability of a description; a later entry replaces an earlier one.
    pub fn set(&mut self, description_id: impl Into<String>, acceptability: Acceptability) {
        self.by_description
            .insert(description_id.into(), acceptability);
    }

    /// Acceptability of a description, `None` when the description is unknown.
    pub fn get(&self, description_id: &str) -> Acceptability {
        self.by_description
            .get(description_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn rank(&self, description_id: &str) -> u8 {
        self.get(description_id).rank()
    }

    pub fn len(&self) -> usize {
        self.by_description.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_description.is_empty()
    }
}

/// Terms of a concept, per language, in first-seen order.
pub type LanguageTerms = BTreeMap<String, Vec<String>>;

/// Concept id → language → terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermIndex {
    by_concept: HashMap<String, LanguageTerms>,
}

impl TermIndex {
    pub fn push(
        &mut self,
        concept_id: impl Into<String>,
        language_code: impl Into<String>,
        term: impl Into<String>,
    ) {
        self.by_concept
            .entry(concept_id.into())
            .or_default()
            .entry(language_code.into())
            .or_default()
            .push(term.into());
    }

    pub fn terms(&self, concept_id: &str) -> Option<&LanguageTerms> {
        self.by_concept.get(concept_id)
    }

    pub fn len(&self) -> usize {
        self.by_concept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_concept.is_empty()
    }
}

/// Everything the import needs from the RF2 files.
#[derive(Debug, Clone, Default)]
pub struct SnomedTables {
    pub map_targets: MapTargets,
    pub terms: TermIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptability_ranks() {
        assert_eq!(
            Acceptability::from_refset_id("900000000000549004").rank(),
            1
        );
        assert_eq!(
            Acceptability::from_refset_id("900000000000548007").rank(),
            2
        );
        assert_eq!(Acceptability::from_refset_id("12345").rank(), 0);
        assert!(!Acceptability::None.qualifies());
        assert!(Acceptability::Acceptable.qualifies());
    }

    #[test]
    fn test_unknown_description_ranks_zero() {
        let index = AcceptabilityIndex::default();
        assert_eq!(index.rank("42"), 0);
    }

    #[test]
    fn test_later_acceptability_replaces_earlier() {
        let mut index = AcceptabilityIndex::default();
        index.set("42", Acceptability::Preferred);
        index.set("42", Acceptability::None);
        assert_eq!(index.get("42"), Acceptability::None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_map_targets_keep_order_and_duplicates() {
        let mut targets = MapTargets::default();
        targets.push("1000", "2000");
        targets.push("1000", "3000");
        targets.push("1000", "2000");

        assert_eq!(targets.targets("1000"), ["2000", "3000", "2000"]);
        assert!(targets.targets("9999").is_empty());
    }

    #[test]
    fn test_terms_grouped_by_language() {
        let mut terms = TermIndex::default();
        terms.push("123", "en", "foo");
        terms.push("123", "fr", "truc");
        terms.push("123", "en", "bar");

        let by_language = terms.terms("123").unwrap();
        assert_eq!(by_language["en"], ["foo", "bar"]);
        assert_eq!(by_language["fr"], ["truc"]);
    }
}
