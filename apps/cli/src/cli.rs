//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use snomed_import::Rf2Files;

#[derive(Debug, Parser)]
#[command(
    name = "snomed-importer",
    version,
    about = "Adds SNOMED CT links to thesaurus codes and upserts the linked SNOMED codes"
)]
pub struct Cli {
    /// RF2 map refset (referencedComponentId → mapTarget)
    pub map_refset: PathBuf,

    /// RF2 language refset (description acceptability)
    pub language_refset: PathBuf,

    /// RF2 description file
    pub descriptions: PathBuf,

    /// Terminology service user
    pub username: String,

    /// Terminology service password
    pub password: String,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Service root, e.g. http://127.0.0.1:16043
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Thesaurus codes fetched per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn rf2_files(&self) -> Rf2Files {
        Rf2Files {
            map_refset: self.map_refset.clone(),
            language_refset: self.language_refset.clone(),
            descriptions: self.descriptions.clone(),
        }
    }
}
