//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use contriblinks_core::pipeline::{UpdateConfig, update_document};
use contriblinks_shared::{AppConfig, init_config, load_config, load_config_from};
use tracing::info;

/// Name of the document the links are written into.
const DOCUMENT_NAME: &str = "CONTRIBUTING.md";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// contrib-links: refresh the issue links in CONTRIBUTING.md.
#[derive(Parser)]
#[command(
    name = "contrib-links",
    version,
    about = "Generate pre-filled GitHub issue links and write them into CONTRIBUTING.md.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Base repository URL (e.g. https://github.com/org/repo). Defaults to the configured URL.
    pub repo_url: Option<String>,

    /// Document to patch (defaults to CONTRIBUTING.md at the repository root).
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file (defaults to contrib-links.toml next to the document).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the links and region outcomes without writing the document.
    #[arg(long)]
    pub dry_run: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Subcommands besides the default update.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write contrib-links.toml with the built-in defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout only
/// carries the progress lines.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "contrib_links=info,contriblinks=info",
        1 => "contrib_links=debug,contriblinks=debug",
        _ => "contrib_links=trace,contriblinks=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Path & config resolution
// ---------------------------------------------------------------------------

/// Repository root: two directories above this crate.
fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Target document, either the `--file` override or `<repo root>/CONTRIBUTING.md`.
fn resolve_document(file: Option<&Path>) -> PathBuf {
    match file {
        Some(p) => p.to_path_buf(),
        None => repo_root().join(DOCUMENT_NAME),
    }
}

/// Directory searched for `contrib-links.toml`.
fn config_root(document: &Path) -> PathBuf {
    match document.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load the explicit config file, or fall back to the one next to the document.
fn resolve_config(explicit: Option<&Path>, document: &Path) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config(&config_root(document))?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(cli.file.as_deref()),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref(), cli.file.as_deref()),
        },
        None => cmd_update(
            cli.repo_url.as_deref(),
            cli.file.as_deref(),
            cli.config.as_deref(),
            cli.dry_run,
        ),
    }
}

fn cmd_update(
    repo_url: Option<&str>,
    file: Option<&Path>,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let document = resolve_document(file);
    let config = resolve_config(config_path, &document)?;

    let repo_url = repo_url
        .map(String::from)
        .unwrap_or_else(|| config.github.repo_url.clone());

    println!("Updating links in {DOCUMENT_NAME}...");
    println!("Repository URL: {repo_url}");

    let update = UpdateConfig {
        repo_url,
        document: document.clone(),
        catalog: config.catalog()?,
        title_prefixes: config.github.title_prefixes.clone(),
        dry_run,
    };

    info!(document = %document.display(), dry_run, "updating document");

    let result = update_document(&update)?;

    println!();
    println!("Generated links:");
    for link in &result.links {
        println!("  {} link: {}", link.form.default_title_prefix(), link.url);
    }

    let skipped = result.skipped_regions();
    if !skipped.is_empty() {
        println!();
        println!("  Markers not found, left unchanged: {}", skipped.join(", "));
    }

    println!();
    if result.written {
        println!("{DOCUMENT_NAME} links update completed!");
    } else {
        println!("Dry run: {DOCUMENT_NAME} was not written.");
    }
    println!("File path: {}", document.display());

    Ok(())
}

fn cmd_config_init(file: Option<&Path>) -> Result<()> {
    let document = resolve_document(file);
    let path = init_config(&config_root(&document))?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>, file: Option<&Path>) -> Result<()> {
    let document = resolve_document(file);
    let config = resolve_config(config_path, &document)?;
    config
        .catalog()
        .map_err(|e| eyre!("configuration is invalid: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
