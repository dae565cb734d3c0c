//! Issue-form rendering and "new issue" URL construction.
//!
//! Everything here is pure: the same repository URL, catalog, and title
//! prefixes always produce byte-identical links.

use std::collections::BTreeSet;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, instrument};
use url::Url;

use contriblinks_shared::{
    ContriblinksError, FieldDef, FormCatalog, FormType, GeneratedLink, Result, TitlePrefixes,
};

/// Instruction line placed above the fields of every form.
pub const NOTE: &str = "> 📝 **Please fill in the content after \">\"**";

/// Suffix appended to every issue title prefix.
pub const TITLE_SUFFIX: &str = " - New";

/// Placeholder line the reporter types their answer after.
const PLACEHOLDER: &str = ">";

/// Marker appended inside the parentheses of required fields.
const REQUIRED_MARK: &str = " | Required";

/// Characters left unescaped in query values: the `encodeURIComponent` set
/// minus `'`, which `Url` escapes in special-scheme queries anyway.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

// ---------------------------------------------------------------------------
// Body rendering
// ---------------------------------------------------------------------------

/// Render one field block: `**<name>** (<description>[ | Required])`.
pub fn render_field(field: &FieldDef, required: &BTreeSet<String>) -> String {
    let mark = if required.contains(&field.name) {
        REQUIRED_MARK
    } else {
        ""
    };
    format!("**{}** ({}{mark})", field.name, field.description)
}

/// Render the full issue body for `form`.
///
/// Fails with a config error when the catalog has no field table or no
/// required-field entry for the form.
pub fn render_body(form: FormType, catalog: &FormCatalog) -> Result<String> {
    let fields = catalog.fields(form)?;
    let required = catalog.required(form)?;

    let blocks: Vec<String> = fields
        .iter()
        .map(|field| format!("{}\n{PLACEHOLDER}", render_field(field, required)))
        .collect();

    Ok(format!(
        "{}\n\n{NOTE}\n\n{}",
        form.heading(),
        blocks.join("\n\n")
    ))
}

/// Issue title for `form`: the configured prefix plus ` - New`.
pub fn issue_title(form: FormType, prefixes: &TitlePrefixes) -> String {
    format!("{}{TITLE_SUFFIX}", prefixes.get(form))
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Build `<repo_url>/issues/new?title=..&body=..`.
///
/// Both values are percent-encoded (spaces as `%20`, never `+`). A trailing
/// `/` on `repo_url` is ignored. Only `http` and `https` base URLs are
/// accepted.
pub fn issue_url(repo_url: &str, title: &str, body: &str) -> Result<Url> {
    let base = repo_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}/issues/new"))
        .map_err(|e| ContriblinksError::invalid_url(repo_url, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ContriblinksError::invalid_url(
            repo_url,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    let query = format!(
        "title={}&body={}",
        utf8_percent_encode(title, QUERY_VALUE),
        utf8_percent_encode(body, QUERY_VALUE)
    );
    url.set_query(Some(&query));

    Ok(url)
}

/// Build the pre-filled link for a single form.
#[instrument(skip(catalog, prefixes))]
pub fn build_link(
    repo_url: &str,
    form: FormType,
    catalog: &FormCatalog,
    prefixes: &TitlePrefixes,
) -> Result<GeneratedLink> {
    let title = issue_title(form, prefixes);
    let body = render_body(form, catalog)?;
    let url = issue_url(repo_url, &title, &body)?;

    debug!(title = %title, body_len = body.len(), url_len = url.as_str().len(), "link built");

    Ok(GeneratedLink {
        form,
        title,
        body,
        url,
    })
}

/// Build one link per form, in [`FormType::ALL`] order.
pub fn build_links(
    repo_url: &str,
    catalog: &FormCatalog,
    prefixes: &TitlePrefixes,
) -> Result<Vec<GeneratedLink>> {
    FormType::ALL
        .into_iter()
        .map(|form| build_link(repo_url, form, catalog, prefixes))
        .collect()
}

/// Markdown placed between the form's markers in the document.
///
/// The submission region keeps a blank line above and below its link.
pub fn render_link_markdown(link: &GeneratedLink) -> String {
    let anchor = format!("[{}]({})", link.form.link_label(), link.url);
    match link.form {
        FormType::Registration => anchor,
        FormType::Submission => format!("\n{anchor}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const REPO: &str = "https://github.com/org/repo";

    /// Strict percent-decoding: `+` stays a literal plus.
    fn query_param(url: &Url, key: &str) -> String {
        url.query()
            .unwrap_or_default()
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| {
                percent_encoding::percent_decode_str(v)
                    .decode_utf8()
                    .expect("valid utf-8")
                    .into_owned()
            })
            .unwrap_or_else(|| panic!("missing query param {key}"))
    }

    #[test]
    fn registration_scenario() {
        let link = build_link(
            REPO,
            FormType::Registration,
            &FormCatalog::builtin(),
            &TitlePrefixes::default(),
        )
        .unwrap();

        assert!(
            link.url
                .as_str()
                .starts_with("https://github.com/org/repo/issues/new?")
        );
        assert_eq!(query_param(&link.url, "title"), "Registration - New");
        assert_eq!(query_param(&link.url, "body"), link.body);
    }

    #[test]
    fn required_marker_matches_required_set() {
        let catalog = FormCatalog::builtin();
        for link in build_links(REPO, &catalog, &TitlePrefixes::default()).unwrap() {
            let body = query_param(&link.url, "body");
            let required = catalog.required(link.form).unwrap();
            for field in catalog.fields(link.form).unwrap() {
                let line = body
                    .lines()
                    .find(|l| l.starts_with(&format!("**{}**", field.name)))
                    .expect("field line present");
                assert_eq!(
                    line.ends_with("| Required)"),
                    required.contains(&field.name),
                    "{}: {line}",
                    link.form
                );
            }
        }
    }

    #[test]
    fn body_layout_matches_template() {
        let mut fields = BTreeMap::new();
        fields.insert(
            FormType::Registration,
            vec![FieldDef::new("A", "first"), FieldDef::new("B", "second")],
        );
        let mut required = BTreeMap::new();
        required.insert(FormType::Registration, BTreeSet::from(["B".to_string()]));
        let catalog = FormCatalog::new(fields, required);

        let body = render_body(FormType::Registration, &catalog).unwrap();
        assert_eq!(
            body,
            "## Registration Form\n\n\
             > 📝 **Please fill in the content after \">\"**\n\n\
             **A** (first)\n>\n\n\
             **B** (second | Required)\n>"
        );
    }

    #[test]
    fn builtin_submission_body_lists_fields_in_order() {
        let body = render_body(FormType::Submission, &FormCatalog::builtin()).unwrap();
        assert!(body.starts_with("## Project Submission Form\n\n"));
        let name = body.find("**Project Name**").unwrap();
        let wallet = body.find("**Team Members Wallet**").unwrap();
        assert!(name < wallet);
        assert!(body.contains("**Project Members** (List all team members, comma-separated)\n>"));
    }

    #[test]
    fn generation_is_deterministic() {
        let catalog = FormCatalog::builtin();
        let prefixes = TitlePrefixes::default();
        let a = build_links(REPO, &catalog, &prefixes).unwrap();
        let b = build_links(REPO, &catalog, &prefixes).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].form, FormType::Registration);
    }

    #[test]
    fn missing_required_entry_fails_fast() {
        let mut fields = BTreeMap::new();
        fields.insert(FormType::Submission, vec![FieldDef::new("X", "y")]);
        let catalog = FormCatalog::new(fields, BTreeMap::new());

        let err = build_link(REPO, FormType::Submission, &catalog, &TitlePrefixes::default())
            .unwrap_err();
        assert!(matches!(err, ContriblinksError::Config { .. }));
    }

    #[test]
    fn title_is_percent_encoded_with_percent20_spaces() {
        let link = build_link(
            REPO,
            FormType::Registration,
            &FormCatalog::builtin(),
            &TitlePrefixes::default(),
        )
        .unwrap();

        let query = link.url.query().unwrap();
        assert!(query.starts_with("title=Registration%20-%20New&body="), "{query}");
        assert!(!query.contains('+'));
        assert!(query.contains("%23%23%20Registration%20Form%0A%0A"));
    }

    #[test]
    fn plus_and_quote_are_escaped() {
        let url = issue_url(REPO, "a+b", "it's (ok)!").unwrap();
        assert_eq!(url.query(), Some("title=a%2Bb&body=it%27s%20(ok)!"));
        assert_eq!(query_param(&url, "title"), "a+b");
        assert_eq!(query_param(&url, "body"), "it's (ok)!");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let a = issue_url("https://github.com/org/repo/", "t", "b").unwrap();
        let b = issue_url(REPO, "t", "b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.path(), "/org/repo/issues/new");
    }

    #[test]
    fn special_characters_survive_encoding() {
        let body = "a & b = c?\n> #1 | 100%";
        let url = issue_url(REPO, "T & T", body).unwrap();
        assert!(!url.as_str().contains('\n'));
        assert_eq!(query_param(&url, "title"), "T & T");
        assert_eq!(query_param(&url, "body"), body);
    }

    #[test]
    fn invalid_repo_url_is_rejected() {
        let err = issue_url("not a url", "t", "b").unwrap_err();
        assert!(matches!(err, ContriblinksError::InvalidUrl { .. }));

        let err = issue_url("ftp://example.com/repo", "t", "b").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn custom_title_prefix_is_used() {
        let prefixes = TitlePrefixes {
            registration: "Signup".into(),
            submission: "Project".into(),
        };
        assert_eq!(issue_title(FormType::Registration, &prefixes), "Signup - New");
        assert_eq!(issue_title(FormType::Submission, &prefixes), "Project - New");
    }

    #[test]
    fn link_markdown_per_form() {
        let links =
            build_links(REPO, &FormCatalog::builtin(), &TitlePrefixes::default()).unwrap();

        let reg = render_link_markdown(&links[0]);
        assert!(reg.starts_with("[Register ➡️](https://github.com/org/repo/issues/new?"));
        assert!(reg.ends_with(')'));

        let sub = render_link_markdown(&links[1]);
        assert!(sub.starts_with("\n[Submit ➡️]("));
        assert!(sub.ends_with(")\n"));
    }
}
