//! Runtime configuration.
//!
//! Layering, lowest to highest precedence: built-in defaults, `FOLIO_*`
//! environment variables, command-line flags. Validation runs once on the
//! merged result.

use std::path::PathBuf;
use std::time::Duration;

use folio_runtime::ProgramConfig;

use crate::cli::Cli;
use crate::error::{FolioError, Result};

pub const DEFAULT_AVATAR_PATH: &str = "assets/avatar.txt";
pub const DEFAULT_FRAME_MS: u64 = 16;
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_PRINT_WIDTH: u16 = 80;
pub const MIN_WIDTH: u16 = 20;
const FRAME_MS_RANGE: std::ops::RangeInclusive<u64> = 1..=1000;

pub const ENV_AVATAR: &str = "FOLIO_AVATAR";
pub const ENV_MOUSE: &str = "FOLIO_MOUSE";
pub const ENV_SCROLL_SPY: &str = "FOLIO_SCROLL_SPY";
pub const ENV_FRAME_MS: &str = "FOLIO_FRAME_MS";
pub const ENV_LOG_FILE: &str = "FOLIO_LOG_FILE";
pub const ENV_LOG: &str = "FOLIO_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    /// Text-art asset for the marker and header portrait.
    pub avatar: PathBuf,
    pub mouse: bool,
    /// Track the section in the focal band. When off, the active section
    /// stays on the first entry and only click navigation works.
    pub scroll_spy: bool,
    /// Animation frame interval.
    pub frame_ms: u64,
    /// Logging is off unless this is set; the TUI owns stdout.
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    /// Print the document as plain text and exit.
    pub print: bool,
    /// Wrap width for `print`.
    pub width: Option<u16>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            avatar: PathBuf::from(DEFAULT_AVATAR_PATH),
            mouse: true,
            scroll_spy: true,
            frame_ms: DEFAULT_FRAME_MS,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            print: false,
            width: None,
        }
    }
}

impl FolioConfig {
    /// Defaults, then the process environment, then `cli`.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an explicit env lookup.
    pub fn resolve_with(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self::default().with_env(lookup)?.with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_AVATAR) {
            self.avatar = PathBuf::from(path);
        }
        if let Some(value) = get(ENV_MOUSE) {
            self.mouse = parse_bool(ENV_MOUSE, &value)?;
        }
        if let Some(value) = get(ENV_SCROLL_SPY) {
            self.scroll_spy = parse_bool(ENV_SCROLL_SPY, &value)?;
        }
        if let Some(value) = get(ENV_FRAME_MS) {
            self.frame_ms = value.trim().parse().map_err(|_| {
                FolioError::invalid(format!("{ENV_FRAME_MS} must be an integer, got {value:?}"))
            })?;
        }
        if let Some(path) = get(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(path));
        }
        if let Some(filter) = get(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.avatar {
            self.avatar = path.clone();
        }
        if cli.no_mouse {
            self.mouse = false;
        }
        if cli.no_scroll_spy {
            self.scroll_spy = false;
        }
        if let Some(ms) = cli.frame_ms {
            self.frame_ms = ms;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = Some(path.clone());
        }
        if cli.print {
            self.print = true;
        }
        if let Some(width) = cli.width {
            self.width = Some(width);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !FRAME_MS_RANGE.contains(&self.frame_ms) {
            return Err(FolioError::invalid(format!(
                "frame_ms must be between {} and {}, got {}",
                FRAME_MS_RANGE.start(),
                FRAME_MS_RANGE.end(),
                self.frame_ms
            )));
        }
        if let Some(width) = self.width
            && width < MIN_WIDTH
        {
            return Err(FolioError::invalid(format!(
                "width must be at least {MIN_WIDTH}, got {width}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    #[must_use]
    pub fn print_width(&self) -> u16 {
        self.width.unwrap_or(DEFAULT_PRINT_WIDTH)
    }

    #[must_use]
    pub fn program_config(&self) -> ProgramConfig {
        ProgramConfig {
            mouse: self.mouse,
            ..ProgramConfig::default()
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FolioError::invalid(format!(
            "{key} must be a boolean (1/0, true/false, yes/no, on/off), got {value:?}"
        ))),
    }
}
