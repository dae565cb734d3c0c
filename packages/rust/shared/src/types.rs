//! Core domain types for contrib-links: form types, field tables, and the
//! marker pairs that delimit generated regions in the target document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ContriblinksError, Result};

// ---------------------------------------------------------------------------
// FormType
// ---------------------------------------------------------------------------

/// One of the issue forms linked from the contributing guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormType {
    Registration,
    Submission,
}

impl FormType {
    /// Every form type, in the order links are generated and patched.
    pub const ALL: [FormType; 2] = [FormType::Registration, FormType::Submission];

    /// Lowercase tag used in error messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Submission => "submission",
        }
    }

    /// Built-in issue title prefix (the title is `<prefix> - New`).
    pub fn default_title_prefix(self) -> &'static str {
        match self {
            Self::Registration => "Registration",
            Self::Submission => "Submission",
        }
    }

    /// Heading on the first line of the issue body.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Registration => "## Registration Form",
            Self::Submission => "## Project Submission Form",
        }
    }

    /// Link text used when the URL is written into the document.
    pub fn link_label(self) -> &'static str {
        match self {
            Self::Registration => "Register ➡️",
            Self::Submission => "Submit ➡️",
        }
    }

    /// Comment markers owning this form's region of the document.
    pub fn markers(self) -> MarkerPair {
        match self {
            Self::Registration => MarkerPair {
                start: "<!-- Registration link start -->",
                end: "<!-- Registration link end -->",
            },
            Self::Submission => MarkerPair {
                start: "<!-- Submission link start -->",
                end: "<!-- Submission link end -->",
            },
        }
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MarkerPair
// ---------------------------------------------------------------------------

/// Start/end comment delimiters bracketing a generated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: &'static str,
    pub end: &'static str,
}

// ---------------------------------------------------------------------------
// Field tables
// ---------------------------------------------------------------------------

/// A single issue-form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, rendered in bold.
    pub name: String,
    /// Hint shown in parentheses after the name.
    pub description: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Ordered field tables and required-name sets, keyed by form type.
///
/// Built once from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCatalog {
    fields: BTreeMap<FormType, Vec<FieldDef>>,
    required: BTreeMap<FormType, BTreeSet<String>>,
}

impl FormCatalog {
    /// Assemble a catalog from explicit tables.
    pub fn new(
        fields: BTreeMap<FormType, Vec<FieldDef>>,
        required: BTreeMap<FormType, BTreeSet<String>>,
    ) -> Self {
        Self { fields, required }
    }

    /// The tables shipped with the tool.
    pub fn builtin() -> Self {
        let fields = FormType::ALL
            .into_iter()
            .map(|form| (form, builtin_fields(form)))
            .collect();
        let required = FormType::ALL
            .into_iter()
            .map(|form| (form, builtin_required(form)))
            .collect();
        Self { fields, required }
    }

    /// Ordered fields for `form`.
    pub fn fields(&self, form: FormType) -> Result<&[FieldDef]> {
        self.fields
            .get(&form)
            .map(Vec::as_slice)
            .ok_or_else(|| ContriblinksError::config(format!("no field table for form '{form}'")))
    }

    /// Required field names for `form`.
    pub fn required(&self, form: FormType) -> Result<&BTreeSet<String>> {
        self.required.get(&form).ok_or_else(|| {
            ContriblinksError::config(format!("no required-field entry for form '{form}'"))
        })
    }
}

/// Built-in ordered field table for a form.
pub fn builtin_fields(form: FormType) -> Vec<FieldDef> {
    match form {
        FormType::Registration => vec![
            FieldDef::new("Name", "Please enter your full name"),
            FieldDef::new(
                "Description",
                "Brief personal introduction including skills and experience",
            ),
            FieldDef::new(
                "Contact",
                "Format: Contact Method: Contact Account, e.g., Telegram: @username, WeChat: username, Email: email@example.com",
            ),
            FieldDef::new(
                "Wallet Address",
                "Your wallet address or ENS domain on Ethereum mainnet",
            ),
            FieldDef::new("Team Willingness", "Choose one: Yes | No | Maybe"),
        ],
        FormType::Submission => vec![
            FieldDef::new("Project Name", "Enter your project name"),
            FieldDef::new(
                "Project Description",
                "Brief description about your project in one sentence",
            ),
            FieldDef::new(
                "Repository URL",
                "Open source repository URL - project must be open source",
            ),
            FieldDef::new("Project Leader", "Project leader name"),
            FieldDef::new("Project Members", "List all team members, comma-separated"),
            FieldDef::new(
                "Team Members Wallet",
                "List all team members wallet, comma-separated e.g., Alice:0x12345... , Bob:0x12345...",
            ),
        ],
    }
}

/// Built-in required field names for a form.
pub fn builtin_required(form: FormType) -> BTreeSet<String> {
    let names: &[&str] = match form {
        FormType::Registration => &["Name", "Contact", "Wallet Address"],
        FormType::Submission => &[
            "Project Name",
            "Project Description",
            "Repository URL",
            "Project Leader",
        ],
    };
    names.iter().map(|n| (*n).to_string()).collect()
}

// ---------------------------------------------------------------------------
// GeneratedLink
// ---------------------------------------------------------------------------

/// A pre-filled "new issue" link for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLink {
    pub form: FormType,
    /// Unencoded issue title.
    pub title: String,
    /// Unencoded issue body.
    pub body: String,
    /// Final URL with `title` and `body` query parameters.
    pub url: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_required_names_exist_in_field_tables() {
        let catalog = FormCatalog::builtin();
        for form in FormType::ALL {
            let names: BTreeSet<&str> = catalog
                .fields(form)
                .unwrap()
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            for required in catalog.required(form).unwrap() {
                assert!(names.contains(required.as_str()), "{form}: {required}");
            }
        }
    }

    #[test]
    fn missing_required_entry_is_config_error() {
        let mut fields = BTreeMap::new();
        fields.insert(FormType::Submission, builtin_fields(FormType::Submission));
        let catalog = FormCatalog::new(fields, BTreeMap::new());

        assert!(catalog.fields(FormType::Submission).is_ok());
        let err = catalog.required(FormType::Submission).unwrap_err();
        assert!(matches!(err, ContriblinksError::Config { .. }));
        assert!(err.to_string().contains("submission"));
    }

    #[test]
    fn markers_are_distinct_per_form() {
        let reg = FormType::Registration.markers();
        let sub = FormType::Submission.markers();
        assert_ne!(reg, sub);
        assert!(reg.start.starts_with("<!--") && reg.end.ends_with("-->"));
    }

    #[test]
    fn form_type_display_uses_lowercase_tag() {
        assert_eq!(FormType::Registration.to_string(), "registration");
        assert_eq!(FormType::Submission.to_string(), FormType::Submission.as_str());
    }
}
