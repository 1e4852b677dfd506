//! Terminal reporting for formatting runs
//!
//! Per-file status lines, unified diff rendering, and the run summary.

use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

/// Summary statistics for a formatting run
#[derive(Debug, Clone, Default)]
pub struct FormatSummary {
    pub files_checked: usize,
    pub changed: usize,
    pub written: usize,
    pub failed: usize,
}

impl FormatSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Whether stdout should carry colors for this run
pub fn stdout_supports_color() -> bool {
    std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal()
}

/// One line naming a file whose content deviates from the configured style
pub fn print_unformatted_file(path: &Path, use_colors: bool) {
    if use_colors {
        println!("  {} {}", "would reformat".yellow(), path.display());
    } else {
        println!("  would reformat {}", path.display());
    }
}

/// Render a line-based diff between original and formatted content.
///
/// Deletions are marked `-` and additions `+`, with one-based line numbers
/// counting over the merged change sequence.
pub fn render_diff(original: &str, formatted: &str, use_colors: bool) -> String {
    let diff = TextDiff::from_lines(original, formatted);
    let mut out = String::new();

    for (idx, change) in diff.iter_all_changes().enumerate() {
        let line_num = idx + 1;

        match change.tag() {
            ChangeTag::Delete => {
                push_marked(&mut out, "- ", line_num, change.value(), use_colors, true)
            }
            ChangeTag::Insert => {
                push_marked(&mut out, "+ ", line_num, change.value(), use_colors, false)
            }
            ChangeTag::Equal => {
                out.push_str("  ");
                out.push_str(&format!("{line_num:>4} | "));
                out.push_str(change.value());
            }
        }

        // Keep one change per output line even when the source lacks a
        // trailing newline.
        if !change.value().ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

fn push_marked(
    out: &mut String,
    marker: &str,
    line_num: usize,
    value: &str,
    use_colors: bool,
    is_delete: bool,
) {
    if use_colors {
        let (marker, value) = if is_delete {
            (marker.red().to_string(), value.red().to_string())
        } else {
            (marker.green().to_string(), value.green().to_string())
        };
        out.push_str(&marker);
        out.push_str(&format!("{line_num:>4} | "));
        out.push_str(&value);
    } else {
        out.push_str(marker);
        out.push_str(&format!("{line_num:>4} | "));
        out.push_str(value);
    }
}

/// Print the end-of-run summary
pub fn print_summary(summary: &FormatSummary, write: bool, check: bool, use_colors: bool) {
    println!("{} files checked", summary.files_checked);

    if write {
        if summary.written > 0 {
            print_ok(
                &format!(
                    "Applied formatting to {} file{}",
                    summary.written,
                    plural(summary.written)
                ),
                use_colors,
            );
        } else {
            print_ok("All files are formatted correctly", use_colors);
        }
    } else if summary.changed == 0 {
        print_ok("All files are formatted correctly", use_colors);
    } else {
        let mut line = format!(
            "{} file{} would be reformatted",
            summary.changed,
            plural(summary.changed)
        );
        if !check {
            line.push_str(" (run with --write to apply)");
        }
        println!("{line}");
    }

    if summary.has_failures() {
        let line = format!(
            "{} file{} failed to format",
            summary.failed,
            plural(summary.failed)
        );
        if use_colors {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

fn print_ok(message: &str, use_colors: bool) {
    if use_colors {
        println!("{} {}", "✓".green(), message);
    } else {
        println!("{message}");
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Format a duration for the summary line
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.1}s", total_ms as f64 / 1000.0)
    } else {
        let minutes = total_ms / 60_000;
        let seconds = (total_ms % 60_000) as f64 / 1000.0;
        format!("{minutes}m {seconds:.1}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_marks_deletions_and_insertions() {
        let rendered = render_diff("const x = {a: 1};\n", "const x = { a: 1 };\n", false);
        assert!(rendered.contains("- "));
        assert!(rendered.contains("{a: 1}"));
        assert!(rendered.contains("+ "));
        assert!(rendered.contains("{ a: 1 }"));
    }

    #[test]
    fn diff_of_identical_content_has_no_markers() {
        let rendered = render_diff("same\n", "same\n", false);
        assert!(rendered.contains("same"));
        assert!(!rendered.contains("- "));
        assert!(!rendered.contains("+ "));
    }

    #[test]
    fn diff_terminates_unterminated_last_line() {
        let rendered = render_diff("a", "b", false);
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn summary_tracks_failures() {
        let mut summary = FormatSummary::new();
        assert!(!summary.has_failures());
        summary.failed = 2;
        assert!(summary.has_failures());
    }

    #[test]
    fn durations_scale_by_unit() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_millis(65_000)), "1m 5.0s");
    }
}
