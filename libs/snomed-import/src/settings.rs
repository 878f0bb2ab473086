//! Import parameters

use serde::{Deserialize, Serialize};
use snomed_code_client::CodeTypeQuery;

pub const DEFAULT_REGION: &str = "be";
pub const DEFAULT_CODE_TYPE: &str = "BE-THESAURUS";
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
/// Version stamp written into every link the import creates.
pub const DEFAULT_LINK_VERSION: &str = "20220315";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Region of the thesaurus codes to enrich
    pub region: String,
    /// Type of the thesaurus codes to enrich
    pub code_type: String,
    pub page_size: u32,
    pub link_version: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            code_type: DEFAULT_CODE_TYPE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            link_version: DEFAULT_LINK_VERSION.to_string(),
        }
    }
}

impl ImportSettings {
    pub fn query(&self) -> CodeTypeQuery {
        CodeTypeQuery {
            region: self.region.clone(),
            code_type: self.code_type.clone(),
        }
    }
}
