//! tstidy CLI
//!
//! Command-line interface for the tstidy TypeScript formatter

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::error;
use tstidy_core::{Result, init_tracing};

#[derive(Parser)]
#[command(name = "tstidy")]
#[command(about = "tstidy: a configurable formatter for TypeScript sources")]
#[command(version = tstidy_core::VERSION)]
#[command(
    long_about = "tstidy normalizes the layout of TypeScript sources: block indentation,\n\
object literal and type annotation expansion, array elements, and named imports.\n\
\n\
Examples:\n  \
tstidy fmt src/main.ts       # Print formatted source to stdout\n  \
tstidy fmt --write src/      # Format files in src/ in place\n  \
tstidy fmt --check .         # Check formatting without changes\n  \
tstidy config init           # Initialize configuration file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.tstidyrc.json/.tstidyrc.toml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format TypeScript files according to the configured style
    #[command(alias = "format")]
    Fmt {
        /// Files or directories to format
        #[arg(help = "Files or directories to format (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Write formatted output back to files
        #[arg(long, help = "Write formatted output back to files")]
        write: bool,

        /// Check formatting without modifying files
        #[arg(
            long,
            help = "Check if files are formatted correctly without modifying them",
            conflicts_with = "write"
        )]
        check: bool,

        /// Show diff of proposed changes without applying them
        #[arg(long, help = "Show diff of proposed formatting changes")]
        diff: bool,

        /// Include patterns (glob syntax)
        #[arg(
            long,
            help = "Include files matching pattern (can be used multiple times)"
        )]
        include: Vec<String>,

        /// Exclude patterns (glob syntax)
        #[arg(
            long,
            help = "Exclude files matching pattern (can be used multiple times)"
        )]
        exclude: Vec<String>,

        /// Indentation size
        #[arg(long, help = "Number of indentation characters per nesting level")]
        indent_size: Option<usize>,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize a new configuration file
    Init {
        /// Configuration file format
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: search for .tstidyrc)")]
        path: Option<PathBuf>,
    },

    /// Show resolved configuration
    Show,
}

#[derive(ValueEnum, Clone, Debug)]
enum ConfigFormat {
    /// JSON configuration format
    Json,
    /// TOML configuration format
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize colored output
    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "tstidy=error", // Only errors by default
        1 => "tstidy=warn",  // Warnings on first -v
        2 => "tstidy=info",  // Info on -vv
        3 => "tstidy=debug", // Debug on -vvv
        _ => "tstidy=trace", // Trace on -vvvv+
    };
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(2);
    }

    match run_command(cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("tstidy failed: {}", e);
            std::process::exit(2);
        }
    }
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Fmt {
            paths,
            write,
            check,
            diff,
            include,
            exclude,
            indent_size,
        }) => {
            let paths = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths
            };

            commands::fmt_command(
                paths,
                write,
                check,
                diff,
                include,
                exclude,
                indent_size,
                cli.config,
            )
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config_init_command(format, force),
            ConfigAction::Validate { path } => commands::config_validate_command(path),
            ConfigAction::Show => commands::config_show_command(cli.config),
        },

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("tstidy {}", tstidy_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
                if let Ok(profile) = std::env::var("PROFILE") {
                    println!("  Profile: {profile}");
                }
            } else {
                println!("{}", tstidy_core::VERSION);
            }
            Ok(())
        }

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
