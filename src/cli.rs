//! CLI definitions for wireframe.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Wireframe CLI.
#[derive(Parser)]
#[command(name = "wireframe")]
#[command(about = "Render web page snapshots as ASCII wireframes with actionable reference ids")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a snapshot and print the wireframe
    Render {
        /// Path to a recorded snapshot (JSON)
        snapshot: PathBuf,

        /// Glyph width in pixels (overrides render.char_width)
        #[arg(long)]
        char_width: Option<f64>,

        /// Line height in pixels (overrides render.char_height)
        #[arg(long)]
        char_height: Option<f64>,
    },

    /// List the reference ids of a rendered snapshot
    Refs {
        /// Path to a recorded snapshot (JSON)
        snapshot: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Apply an action to a ref id and print the resolved target
    Act {
        /// Path to a recorded snapshot (JSON)
        snapshot: PathBuf,

        /// Action to perform
        #[arg(value_enum)]
        action: ActionKind,

        /// Reference id from the wireframe
        #[arg(value_name = "REF")]
        ref_id: u32,

        /// Text for fill/type, value for select
        text: Option<String>,
    },

    /// Validate the configuration file
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ActionKind {
    Click,
    Dblclick,
    Hover,
    Fill,
    Type,
    Select,
    Check,
    Uncheck,
}

impl ActionKind {
    /// Actions that need a text argument.
    pub fn needs_text(&self) -> bool {
        matches!(self, ActionKind::Fill | ActionKind::Type | ActionKind::Select)
    }
}
