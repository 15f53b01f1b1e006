//! External link opener.
//!
//! Hands the URL to the platform opener and returns immediately; the child
//! is never awaited so the session keeps running.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use tracing::info;

pub trait LinkOpener {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Uses `xdg-open`, `open` or `cmd /C start` depending on the platform.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        let mut cmd = platform_command(url);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch opener for {url}"))?;
        info!(url, "Opened external link");
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Remembers every URL instead of launching anything.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    pub opened: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_command_passes_url() {
        let cmd = platform_command("https://instagram.com/harimu");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args.last().map(String::as_str), Some("https://instagram.com/harimu"));
    }

    #[test]
    fn recording_opener_shares_log() {
        let opener = RecordingOpener::default();
        let mut handle = opener.clone();
        handle.open("https://example.test").unwrap();
        assert_eq!(opener.opened.borrow().as_slice(), ["https://example.test"]);
    }
}
