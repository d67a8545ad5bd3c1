use std::path::PathBuf;

use clap::Parser;

/// Command-line interface of the `rollcalld` binary.
#[derive(Debug, Parser)]
#[command(name = "rollcalld", version, about = "rollcall - school attendance backend")]
pub struct Cli {
    /// Extra TOML config file, layered above rollcall.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default log filter when `ROLLCALL_LOG` is unset.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
