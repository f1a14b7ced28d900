//! Outbound links.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::content::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Email,
    Profile,
}

impl Link {
    /// URL handed to the platform opener.
    #[must_use]
    pub fn url(self, contact: &Contact) -> String {
        match self {
            Self::Email => format!("mailto:{}", contact.email),
            Self::Profile => contact.profile_url.to_string(),
        }
    }

    /// Text shown for the link.
    #[must_use]
    pub fn label(self, contact: &Contact) -> &'static str {
        match self {
            Self::Email => contact.email,
            Self::Profile => contact.profile_url,
        }
    }

    pub(crate) fn to_hit(self) -> u64 {
        match self {
            Self::Email => 0,
            Self::Profile => 1,
        }
    }

    pub(crate) fn from_hit(data: u64) -> Option<Self> {
        match data {
            0 => Some(Self::Email),
            1 => Some(Self::Profile),
            _ => None,
        }
    }
}

/// Hands URLs to whatever the platform uses for mail and web links.
pub trait LinkOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Spawns `xdg-open`, `open`, or `cmd /C start` and reaps it in the background.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn program() -> &'static str {
        if cfg!(target_os = "windows") {
            "cmd"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }

    fn command(program: PathBuf, url: &str) -> Command {
        let mut cmd = Command::new(program);
        if cfg!(target_os = "windows") {
            cmd.args(["/C", "start", ""]);
        }
        cmd.arg(url);
        cmd
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        let name = Self::program();
        let program = which::which(name)
            .map_err(|err| io::Error::new(io::ErrorKind::NotFound, format!("{name}: {err}")))?;
        spawn_reaped(Self::command(program, url)).map(|_reaper| ())
    }
}

/// Spawn `cmd` with null stdio and wait for it on a background thread,
/// so finished openers do not linger as zombies.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    thread::Builder::new()
        .name("link-opener".to_string())
        .spawn(move || {
            let status = child.wait();
            match &status {
                Ok(status) => debug!(%status, "link opener exited"),
                Err(err) => debug!(error = %err, "link opener wait failed"),
            }
            status
        })
}

/// Open `url`, logging the outcome. Never fails.
pub fn open_logged(opener: &dyn LinkOpener, url: &str) -> bool {
    match opener.open(url) {
        Ok(()) => {
            info!(url, "opened link");
            true
        }
        Err(err) => {
            warn!(url, error = %err, "could not open link");
            false
        }
    }
}
