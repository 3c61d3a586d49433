use clap::{Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `aud` binary.
#[derive(Debug, Parser)]
#[command(name = "aud", version, about = "Audit management service - local operator tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Database path, overriding `database.path` (":memory:" allowed)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            db: self.db.clone(),
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Invoke a procedure, e.g. `aud call audits.get '{"id":1}'`.
    Call {
        /// Dotted procedure path.
        procedure: String,
        /// JSON input; omitted means `null`.
        input: Option<String>,
    },
    /// List callable procedure paths.
    Procedures,
    /// Print a JSON Schema, or list schema names when none is given.
    Schema {
        /// Schema name, e.g. `finding` or `new_finding`.
        name: Option<String>,
    },
}
