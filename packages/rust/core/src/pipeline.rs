//! End-to-end document update: build links, then patch the target document.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use contriblinks_markdown::{Region, RegionOutcome};
use contriblinks_shared::{FormCatalog, GeneratedLink, Result, TitlePrefixes};

use crate::links;

// ---------------------------------------------------------------------------
// Pipeline config & result
// ---------------------------------------------------------------------------

/// Configuration for the `update_document` pipeline.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Base repository URL the issue links point at.
    pub repo_url: String,
    /// Markdown document holding the marker regions.
    pub document: PathBuf,
    /// Field tables and required sets.
    pub catalog: FormCatalog,
    /// Issue title prefixes.
    pub title_prefixes: TitlePrefixes,
    /// Patch in memory only; leave the file on disk untouched.
    pub dry_run: bool,
}

/// Result of the `update_document` pipeline.
#[derive(Debug)]
pub struct UpdateResult {
    /// One link per form, registration first.
    pub links: Vec<GeneratedLink>,
    /// Per-region outcome, in the same order as `links`.
    pub outcomes: Vec<(String, RegionOutcome)>,
    /// Whether the document was written back.
    pub written: bool,
}

impl UpdateResult {
    /// Names of regions whose markers were not found.
    pub fn skipped_regions(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == RegionOutcome::MarkersNotFound)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Build both issue links and splice them into the document.
///
/// Link generation happens before the document is read, so a config error
/// never touches the file. A read failure aborts before any write.
#[instrument(skip(config), fields(document = %config.document.display(), dry_run = config.dry_run))]
pub fn update_document(config: &UpdateConfig) -> Result<UpdateResult> {
    let generated = links::build_links(&config.repo_url, &config.catalog, &config.title_prefixes)?;

    for link in &generated {
        debug!(form = %link.form, url = %link.url, "generated issue link");
    }

    let regions: Vec<Region> = generated
        .iter()
        .map(|link| Region {
            name: link.form.to_string(),
            markers: link.form.markers(),
            body: links::render_link_markdown(link),
        })
        .collect();

    let patched = contriblinks_markdown::patch_file(&config.document, &regions, !config.dry_run)?;

    info!(
        replaced = patched.replaced_count(),
        total = regions.len(),
        written = !config.dry_run,
        "document update complete"
    );

    Ok(UpdateResult {
        links: generated,
        outcomes: patched.outcomes,
        written: !config.dry_run,
    })
}
