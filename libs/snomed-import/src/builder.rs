//! Builds SNOMED code payloads from the parsed descriptions

use snomed_code_client::CodeDto;

use crate::error::{Error, Result};
use crate::tables::TermIndex;

/// A code id of the form `<type>|<code>|<version>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeId<'a> {
    pub code_type: &'a str,
    pub code: &'a str,
    pub version: &'a str,
}

impl<'a> CompositeId<'a> {
    pub fn parse(id: &'a str) -> Result<Self> {
        let mut parts = id.split('|');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(code_type), Some(code), Some(version), None) => Ok(Self {
                code_type,
                code,
                version,
            }),
            _ => Err(Error::InvalidCompositeId(id.to_string())),
        }
    }
}

/// Payload for the SNOMED code `id`.
///
/// The label of each language is its first term; the search terms are all of them.
/// A concept without terms gets an empty label and no search terms.
pub fn build_code(id: &str, terms: &TermIndex) -> Result<CodeDto> {
    let composite = CompositeId::parse(id)?;

    let mut code = CodeDto {
        id: id.to_string(),
        code_type: Some(composite.code_type.to_string()),
        code: Some(composite.code.to_string()),
        version: Some(composite.version.to_string()),
        ..Default::default()
    };

    if let Some(by_language) = terms.terms(composite.code) {
        for (language, language_terms) in by_language {
            if let Some(first) = language_terms.first() {
                code.label.insert(language.clone(), first.clone());
            }
            code.search_terms
                .insert(language.clone(), language_terms.iter().cloned().collect());
        }
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_parse_composite_id() {
        let id = CompositeId::parse("SNOMED|123|20220315").unwrap();
        assert_eq!(id.code_type, "SNOMED");
        assert_eq!(id.code, "123");
        assert_eq!(id.version, "20220315");
    }

    #[test]
    fn test_parse_rejects_wrong_part_count() {
        for id in ["SNOMED|123", "SNOMED|123|1|2", "SNOMED", ""] {
            assert!(
                matches!(CompositeId::parse(id), Err(Error::InvalidCompositeId(_))),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn test_label_is_first_term() {
        let mut terms = TermIndex::default();
        terms.push("123", "en", "foo");
        terms.push("123", "en", "bar");

        let code = build_code("SNOMED|123|20220315", &terms).unwrap();
        assert_eq!(code.id, "SNOMED|123|20220315");
        assert_eq!(code.code_type.as_deref(), Some("SNOMED"));
        assert_eq!(code.code.as_deref(), Some("123"));
        assert_eq!(code.version.as_deref(), Some("20220315"));
        assert_eq!(code.label["en"], "foo");
        assert_eq!(
            code.search_terms["en"],
            BTreeSet::from(["foo".to_string(), "bar".to_string()])
        );
        assert!(code.rev.is_none());
    }

    #[test]
    fn test_code_without_terms() {
        let code = build_code("SNOMED|999|20220315", &TermIndex::default()).unwrap();
        assert!(code.label.is_empty());
        assert!(code.search_terms.is_empty());
    }

    #[test]
    fn test_each_language_gets_its_own_label() {
        let mut terms = TermIndex::default();
        terms.push("123", "fr", "appendicite");
        terms.push("123", "nl", "appendicitis");
        terms.push("123", "fr", "inflammation de l'appendice");

        let code = build_code("SNOMED|123|20220315", &terms).unwrap();
        assert_eq!(code.label["fr"], "appendicite");
        assert_eq!(code.label["nl"], "appendicitis");
        assert_eq!(code.search_terms["fr"].len(), 2);
    }
}
