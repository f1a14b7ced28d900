#![forbid(unsafe_code)]

//! A terminal portfolio whose side navigation follows the section being
//! read. The scroll-spy machinery lives in `folio-nav`; this crate owns
//! the content, layout, and the interactive shell.

pub mod app;
pub mod avatar;
pub mod cli;
pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod links;
pub mod logging;
pub mod shell;
pub mod theme;

pub use cli::run_from_env;
pub use config::FolioConfig;
pub use error::{FolioError, Result};
pub use shell::{Shell, ShellOptions};
