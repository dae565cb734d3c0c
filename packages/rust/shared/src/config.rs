//! Application configuration for contrib-links.
//!
//! The optional config file lives at `<repo root>/contrib-links.toml`.
//! The CLI repository URL argument overrides config file values, which
//! override the built-in defaults.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ContriblinksError, Result};
use crate::types::{FieldDef, FormCatalog, FormType, builtin_fields, builtin_required};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "contrib-links.toml";

/// Repository the links point at when nothing else is configured.
pub const DEFAULT_REPO_URL: &str = "https://github.com/casualhackathon/hackathon";

// ---------------------------------------------------------------------------
// Config structs (matching contrib-links.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// GitHub repository settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Issue form field tables.
    #[serde(default)]
    pub forms: FormsConfig,
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base repository URL, e.g. `https://github.com/org/repo`.
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    /// Issue title prefixes.
    #[serde(default)]
    pub title_prefixes: TitlePrefixes,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            repo_url: default_repo_url(),
            title_prefixes: TitlePrefixes::default(),
        }
    }
}

fn default_repo_url() -> String {
    DEFAULT_REPO_URL.into()
}

/// `[github.title_prefixes]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePrefixes {
    #[serde(default = "default_registration_prefix")]
    pub registration: String,

    #[serde(default = "default_submission_prefix")]
    pub submission: String,
}

impl TitlePrefixes {
    /// Prefix for `form`.
    pub fn get(&self, form: FormType) -> &str {
        match form {
            FormType::Registration => &self.registration,
            FormType::Submission => &self.submission,
        }
    }
}

impl Default for TitlePrefixes {
    fn default() -> Self {
        Self {
            registration: default_registration_prefix(),
            submission: default_submission_prefix(),
        }
    }
}

fn default_registration_prefix() -> String {
    FormType::Registration.default_title_prefix().into()
}
fn default_submission_prefix() -> String {
    FormType::Submission.default_title_prefix().into()
}

/// `[forms]` section. A form section, when present, replaces the built-in
/// table for that form and must list both `fields` and `required`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default = "default_registration_form")]
    pub registration: FormConfig,

    #[serde(default = "default_submission_form")]
    pub submission: FormConfig,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            registration: default_registration_form(),
            submission: default_submission_form(),
        }
    }
}

fn default_registration_form() -> FormConfig {
    FormConfig::builtin(FormType::Registration)
}
fn default_submission_form() -> FormConfig {
    FormConfig::builtin(FormType::Submission)
}

/// `[forms.<type>]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Fields in the order they appear in the issue body.
    pub fields: Vec<FieldDef>,
    /// Names of fields marked `Required`.
    pub required: Vec<String>,
}

impl FormConfig {
    fn builtin(form: FormType) -> Self {
        Self {
            fields: builtin_fields(form),
            required: builtin_required(form).into_iter().collect(),
        }
    }
}

impl AppConfig {
    /// Build the immutable form catalog, rejecting tables that mark
    /// unknown fields as required.
    pub fn catalog(&self) -> Result<FormCatalog> {
        let mut fields = BTreeMap::new();
        let mut required = BTreeMap::new();

        for (form, section) in [
            (FormType::Registration, &self.forms.registration),
            (FormType::Submission, &self.forms.submission),
        ] {
            if section.fields.is_empty() {
                return Err(ContriblinksError::config(format!(
                    "form '{form}' has no fields"
                )));
            }
            let names: BTreeSet<&str> = section.fields.iter().map(|f| f.name.as_str()).collect();
            if let Some(unknown) = section
                .required
                .iter()
                .find(|name| !names.contains(name.as_str()))
            {
                return Err(ContriblinksError::config(format!(
                    "form '{form}' marks unknown field '{unknown}' as required"
                )));
            }

            fields.insert(form, section.fields.clone());
            required.insert(form, section.required.iter().cloned().collect());
        }

        Ok(FormCatalog::new(fields, required))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file inside a repository root.
pub fn config_file_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CONFIG_FILE_NAME)
}

/// Load the config from `<repo_root>/contrib-links.toml`. Returns defaults if
/// the file does not exist.
pub fn load_config(repo_root: &Path) -> Result<AppConfig> {
    let path = config_file_path(repo_root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ContriblinksError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ContriblinksError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file into `repo_root`. Refuses to overwrite an
/// existing file. Returns the path to the created file.
pub fn init_config(repo_root: &Path) -> Result<PathBuf> {
    let path = config_file_path(repo_root);
    if path.exists() {
        return Err(ContriblinksError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ContriblinksError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ContriblinksError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
