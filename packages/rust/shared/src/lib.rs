//! Shared types, error model, and configuration for contrib-links.
//!
//! This crate is the foundation depended on by all other contrib-links crates.
//! It provides:
//! - [`ContriblinksError`], the unified error type
//! - Domain types ([`FormType`], [`FieldDef`], [`FormCatalog`], [`GeneratedLink`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, DEFAULT_REPO_URL, FormConfig, FormsConfig, GithubConfig,
    TitlePrefixes, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{ContriblinksError, Result};
pub use types::{FieldDef, FormCatalog, FormType, GeneratedLink, MarkerPair};
