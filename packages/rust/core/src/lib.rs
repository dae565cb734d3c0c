//! Link generation and document update workflow for contrib-links.
//!
//! This crate renders the issue-form bodies, builds the pre-filled
//! "new issue" URLs, and drives the markdown patcher end to end
//! (`update_document`).

pub mod links;
pub mod pipeline;
