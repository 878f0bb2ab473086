//! SNOMED CT import into a thesaurus
//!
//! Reads three RF2 files (a map refset, a language refset and a description
//! file), then walks every thesaurus code of the terminology service, adds the
//! SNOMED links it is missing, and creates or refreshes the linked SNOMED codes.
//!
//! # Example
//!
//! ```rust,no_run
//! use snomed_code_client::CodeClient;
//! use snomed_import::{load_tables, ImportSettings, Importer, Rf2Files};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = load_tables(&Rf2Files {
//!     map_refset: "der2_iisssccRefset_ExtendedMapSnapshot.txt".into(),
//!     language_refset: "der2_cRefset_LanguageSnapshot-fr.txt".into(),
//!     descriptions: "sct2_Description_Snapshot-fr.txt".into(),
//! })?;
//! let client = CodeClient::new("http://127.0.0.1:16043/rest/v1", "user", "secret")?;
//! let settings = ImportSettings::default();
//!
//! let report = Importer::new(&client, &tables, &settings).run().await?;
//! println!("{} thesaurus codes updated", report.codes_updated);
//! # Ok(())
//! # }
//! ```
pub mod builder;
pub mod diff;
pub mod error;
pub mod importer;
pub mod rf2;
pub mod settings;
pub mod tables;

pub use builder::{build_code, CompositeId};
pub use diff::{diff_page, PageDiff};
pub use error::{Error, Result};
pub use importer::{ImportReport, Importer};
pub use rf2::{load_tables, Rf2Files};
pub use settings::ImportSettings;
pub use tables::{Acceptability, AcceptabilityIndex, MapTargets, SnomedTables, TermIndex};
