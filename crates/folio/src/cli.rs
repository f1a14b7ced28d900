use std::path::PathBuf;

use clap::Parser;

use crate::config::FolioConfig;
use crate::error::Result;

#[derive(Debug, Default, Clone, Parser)]
#[command(
    name = "folio",
    about = "Terminal portfolio with scroll-synchronized section navigation",
    version
)]
pub struct Cli {
    /// Text-art asset. Line 1 is the nav marker; the rest is the header portrait.
    #[arg(long, value_name = "PATH")]
    pub avatar: Option<PathBuf>,

    /// Do not capture the mouse.
    #[arg(long)]
    pub no_mouse: bool,

    /// Disable section tracking; the first nav entry stays highlighted.
    #[arg(long)]
    pub no_scroll_spy: bool,

    /// Animation frame interval in milliseconds (1-1000).
    #[arg(long, value_name = "MS")]
    pub frame_ms: Option<u64>,

    /// Write logs to this file. Logging is off otherwise.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the whole portfolio as plain text and exit.
    #[arg(long)]
    pub print: bool,

    /// Wrap width for --print (at least 20).
    #[arg(long, value_name = "COLS")]
    pub width: Option<u16>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let config = FolioConfig::resolve(&cli)?;
    crate::app::run(&config)
}
