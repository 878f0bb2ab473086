//! SNOMED importer - command-line entry point
//!
//! Loads the three RF2 files, then enriches every thesaurus code of the
//! terminology service with its SNOMED links. Any failure aborts the run with a
//! non-zero exit code.

mod cli;
mod config;
mod logging;

use anyhow::Context;
use clap::Parser;
use std::time::Duration;

use crate::cli::Cli;
use crate::config::Config;
use snomed_code_client::CodeClient;
use snomed_import::{load_tables, Importer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(&cli);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    let api_root = config.api.api_root();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %api_root,
        region = %config.import.region,
        code_type = %config.import.code_type,
        page_size = config.import.page_size,
        "Starting SNOMED import"
    );

    let tables = load_tables(&cli.rf2_files()).context("Failed to load RF2 files")?;

    let client = CodeClient::with_timeout(
        api_root,
        &cli.username,
        &cli.password,
        Duration::from_secs(config.api.timeout_seconds),
    )
    .context("Failed to create code API client")?;

    match Importer::new(&client, &tables, &config.import).run().await {
        Ok(report) => {
            tracing::info!(
                pages = report.pages,
                updated = report.codes_updated,
                snomed_created = report.snomed_created,
                snomed_updated = report.snomed_updated,
                "SNOMED import complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "SNOMED import failed");
            Err(e).context("SNOMED import failed")
        }
    }
}
