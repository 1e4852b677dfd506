//! CLI command implementations
//!
//! Top-level commands (fmt, config) live in this file; terminal rendering
//! helpers live in `output`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, error};
use tstidy_core::{
    ConfigLoader, DefaultFileDiscovery, FileDiscovery, FormatMode, FormatterConfig, Result,
    ResultExt, SourceFormatter, TstidyError,
};

use crate::ConfigFormat;
use crate::output::{self, FormatSummary};

/// Per-file outcome collected across the parallel formatting run
struct FileOutcome {
    path: PathBuf,
    changed: bool,
    /// Formatted content, present only when it differs from the original
    formatted: Option<String>,
    error: Option<TstidyError>,
}

/// Fmt command implementation
#[allow(clippy::too_many_arguments)]
pub fn fmt_command(
    paths: Vec<PathBuf>,
    write: bool,
    check: bool,
    diff: bool,
    include: Vec<String>,
    exclude: Vec<String>,
    indent_size: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    debug!("Running fmt command on paths: {:?}", paths);

    let mut config = load_config(&paths, config_path.as_deref())?;

    // Apply CLI overrides to configuration
    if let Some(size) = indent_size {
        config.indentation.size = size;
    }

    let mode = if check {
        FormatMode::Check
    } else if diff {
        FormatMode::Diff
    } else {
        FormatMode::Format
    };

    let start_time = Instant::now();

    let files = collect_files(&paths, &include, &exclude)?;

    if files.is_empty() {
        println!("No TypeScript files found in specified paths.");
        return Ok(());
    }

    debug!("Found {} files to format", files.len());

    let formatter = SourceFormatter::new(config);

    // Stdout mode: a single explicit file without a mode flag prints the
    // formatted content and nothing else.
    if mode == FormatMode::Format && !write && paths.len() == 1 && paths[0].is_file() {
        let result = formatter.format_file(&files[0])?;
        print!("{}", result.content);
        return Ok(());
    }

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| match formatter.format_file(path) {
            Ok(result) => FileOutcome {
                path: path.clone(),
                changed: result.changed,
                formatted: result.changed.then_some(result.content),
                error: None,
            },
            Err(e) => FileOutcome {
                path: path.clone(),
                changed: false,
                formatted: None,
                error: Some(e),
            },
        })
        .collect();

    let use_colors = output::stdout_supports_color();

    let mut summary = FormatSummary::new();
    summary.files_checked = outcomes.len();

    for outcome in &outcomes {
        if let Some(e) = &outcome.error {
            error!("Error processing {}: {}", outcome.path.display(), e);
            summary.failed += 1;
            continue;
        }
        if !outcome.changed {
            continue;
        }
        summary.changed += 1;

        let Some(formatted) = &outcome.formatted else {
            continue;
        };

        match mode {
            FormatMode::Diff => {
                let original = std::fs::read_to_string(&outcome.path)
                    .map_err(|e| TstidyError::io_error(&outcome.path, e))
                    .log_and_continue();
                match original {
                    Some(original) => {
                        println!("\n{}", outcome.path.display());
                        print!("{}", output::render_diff(&original, formatted, use_colors));
                    }
                    None => summary.failed += 1,
                }
            }
            FormatMode::Format if write => match std::fs::write(&outcome.path, formatted) {
                Ok(()) => summary.written += 1,
                Err(e) => {
                    error!("Failed to write {}: {}", outcome.path.display(), e);
                    summary.failed += 1;
                }
            },
            _ => output::print_unformatted_file(&outcome.path, use_colors),
        }
    }

    output::print_summary(&summary, write, check, use_colors);
    println!(
        "Completed in {}",
        output::format_duration(start_time.elapsed())
    );

    if summary.has_failures() || (mode == FormatMode::Check && summary.changed > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve the configuration for a run.
///
/// An explicit path wins; otherwise discovery starts next to the first
/// target (its parent for a file) and walks upward, falling back to the
/// built-in defaults when nothing is found.
fn load_config(paths: &[PathBuf], config_path: Option<&Path>) -> Result<FormatterConfig> {
    let start_path = if !paths.is_empty() && paths[0].is_file() {
        match paths[0].parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    } else if !paths.is_empty() && paths[0].is_dir() {
        &paths[0]
    } else {
        Path::new(".")
    };

    ConfigLoader::load(config_path, Some(start_path))
}

/// Expand the positional paths into the set of files to format.
///
/// Directories are walked through `DefaultFileDiscovery` with the include
/// and exclude patterns applied; arguments containing `*` are treated as
/// glob patterns. Missing files with a source extension stay in the set so
/// they surface as per-file failures at read time.
fn collect_files(
    paths: &[PathBuf],
    include: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let discovery = DefaultFileDiscovery::new(path);
            files.extend(discovery.discover_with_patterns(include, exclude)?);
        } else if path.to_string_lossy().contains('*') {
            let pattern = path.to_string_lossy();
            let entries = glob::glob(&pattern).map_err(|e| {
                TstidyError::discovery_error(format!("Invalid glob pattern '{pattern}': {e}"))
            })?;
            for entry in entries {
                match entry {
                    Ok(p) if DefaultFileDiscovery::is_source_file(&p) => files.push(p),
                    _ => {}
                }
            }
        } else if DefaultFileDiscovery::is_source_file(path) {
            files.push(path.clone());
        } else if path.exists() {
            debug!("Skipping unsupported file: {}", path.display());
        } else {
            error!("Path does not exist: {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Config init command implementation
pub fn config_init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".tstidyrc.json",
        ConfigFormat::Toml => ".tstidyrc.toml",
    };
    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        return Err(TstidyError::config_error(format!(
            "Configuration file '{filename}' already exists. Use --force to overwrite."
        )));
    }

    let default_config = FormatterConfig::default();
    let content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&default_config)?,
        ConfigFormat::Toml => toml::to_string_pretty(&default_config)
            .map_err(|e| TstidyError::config_error(format!("Failed to serialize TOML: {e}")))?,
    };

    std::fs::write(&config_path, content).map_err(|e| TstidyError::io_error(&config_path, e))?;

    println!("Created configuration file: {filename}");
    println!("Edit the file to customize the formatting style.");

    Ok(())
}

/// Config validate command implementation
pub fn config_validate_command(path: Option<PathBuf>) -> Result<()> {
    debug!("Validating configuration file: {:?}", path);

    match if let Some(p) = path {
        ConfigLoader::load_from_file(&p)
    } else {
        ConfigLoader::load(None, None)
    } {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  Indentation size: {}", config.indentation.size);
            println!("  Max line length: {}", config.max_line_length);
        }
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            return Err(e);
        }
    }

    Ok(())
}

/// Config show command implementation
pub fn config_show_command(config_path: Option<PathBuf>) -> Result<()> {
    debug!("Showing resolved configuration");

    let config = ConfigLoader::load(config_path.as_deref(), None)?;

    println!("Configuration:");
    println!("==============");
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
