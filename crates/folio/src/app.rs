//! Entry point once configuration is resolved.

use std::io::{self, Write};

use folio_runtime::Program;
use tracing::info;

use crate::avatar::Avatar;
use crate::config::FolioConfig;
use crate::content::{self, PORTFOLIO, Portfolio};
use crate::document::Document;
use crate::error::{FolioError, Result};
use crate::links::SystemOpener;
use crate::logging;
use crate::shell::{Shell, ShellOptions};

pub fn run(config: &FolioConfig) -> Result<()> {
    logging::init(config)?;
    let sections = content::sections()?;

    if config.print {
        let document = Document::build(&PORTFOLIO, &sections, config.print_width());
        let mut out = io::stdout().lock();
        out.write_all(render_plain(&PORTFOLIO, &document).as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    let avatar = Avatar::load(&config.avatar);
    let shell = Shell::new(
        &PORTFOLIO,
        sections,
        avatar,
        Box::new(SystemOpener),
        ShellOptions {
            scroll_spy: config.scroll_spy,
            frame_interval: config.frame_interval(),
        },
    );
    info!(
        mouse = config.mouse,
        scroll_spy = config.scroll_spy,
        frame_ms = config.frame_ms,
        "starting"
    );
    let program = Program::with_config(shell, config.program_config()).map_err(FolioError::terminal)?;
    program.run().map_err(FolioError::terminal)?;
    info!("exited");
    Ok(())
}

/// Header and document as plain text.
#[must_use]
pub fn render_plain(portfolio: &Portfolio, document: &Document) -> String {
    let profile = &portfolio.profile;
    let mut text = format!("{}\n{} · {}\n\n", profile.name, profile.title, profile.location);
    text.push_str(&document.plain_text());
    text
}
