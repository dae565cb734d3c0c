//! Marker-delimited region patching for markdown documents.
//!
//! A region is owned by a pair of HTML comments. Everything between the
//! first start marker and the first end marker after it is replaced
//! wholesale; text outside the markers is never touched.

mod splice;

use std::path::Path;

use tracing::{debug, instrument, warn};

use contriblinks_shared::{ContriblinksError, MarkerPair, Result};

pub use splice::splice_region;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Replacement content for one marker-delimited region.
#[derive(Debug, Clone)]
pub struct Region {
    /// Name used in logs (e.g. `registration`).
    pub name: String,
    pub markers: MarkerPair,
    /// Text placed between the markers, without the surrounding newlines.
    pub body: String,
}

/// What happened to a single region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOutcome {
    /// The markers were found and the content between them replaced.
    Replaced,
    /// The start marker, or an end marker after it, was missing.
    MarkersNotFound,
}

/// Result of patching a document.
#[derive(Debug, Clone)]
pub struct PatchResult {
    /// Patched document text.
    pub text: String,
    /// One outcome per input region, in input order.
    pub outcomes: Vec<(String, RegionOutcome)>,
}

impl PatchResult {
    /// Number of regions whose markers were found.
    pub fn replaced_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == RegionOutcome::Replaced)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Patching
// ---------------------------------------------------------------------------

/// Apply every region to `text` in order.
pub fn patch_text(text: &str, regions: &[Region]) -> PatchResult {
    let mut current = text.to_string();
    let mut outcomes = Vec::with_capacity(regions.len());

    for region in regions {
        let (next, outcome) = splice_region(&current, region.markers, &region.body);
        if outcome == RegionOutcome::MarkersNotFound {
            warn!(
                region = %region.name,
                start = region.markers.start,
                end = region.markers.end,
                "markers not found, region left unchanged"
            );
        } else {
            debug!(region = %region.name, body_len = region.body.len(), "region replaced");
        }
        current = next;
        outcomes.push((region.name.clone(), outcome));
    }

    PatchResult {
        text: current,
        outcomes,
    }
}

/// Read `path`, patch every region, and write the result back when `write`
/// is set. Nothing is written if the read fails.
#[instrument(skip(path, regions), fields(path = %path.display()))]
pub fn patch_file(path: &Path, regions: &[Region], write: bool) -> Result<PatchResult> {
    let original = std::fs::read_to_string(path).map_err(|e| ContriblinksError::io(path, e))?;

    let result = patch_text(&original, regions);

    if write {
        std::fs::write(path, &result.text).map_err(|e| ContriblinksError::io(path, e))?;
        debug!(bytes = result.text.len(), "document written");
    }

    Ok(result)
}
