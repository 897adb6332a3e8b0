//! Injector CLI tool
//!
//! Command-line interface for the constructor-injection lint rule:
//! reporting readonly fields no constructor assigns and fixing them.

mod commands;
mod config;
mod output;
mod tracing_config;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "injector")]
#[command(about = "Constructor injection checks for C# sources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint C# files
    Lint {
        /// Files or directories to lint
        #[arg(default_value = ".")]
        paths: Vec<String>,
        /// Apply code fixes in place
        #[arg(long)]
        fix: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        /// When to use colors
        #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
        color: ColorArg,
    },

    /// List available lint rules
    Rules {
        /// When to use colors
        #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
        color: ColorArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Annotated source snippets
    Pretty,
    /// One JSON array of files and their diagnostics
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl ColorArg {
    fn as_str(&self) -> &'static str {
        match self {
            ColorArg::Auto => "auto",
            ColorArg::Always => "always",
            ColorArg::Never => "never",
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_config::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Lint {
            paths,
            fix,
            format,
            color,
        } => {
            let options = commands::lint::LintOptions {
                paths,
                fix,
                format,
                color: output::resolve_color_choice(Some(color.as_str())),
            };
            let outcome = commands::lint::execute(&options)?;
            if outcome.failed() {
                std::process::exit(1);
            }
        }

        Commands::Rules { color } => {
            commands::rules::execute(output::resolve_color_choice(Some(color.as_str())))?;
        }
    }

    Ok(())
}
