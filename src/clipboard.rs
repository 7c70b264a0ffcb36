//! Clipboard capability - external collaborator that receives copied text.
//!
//! The app layer only produces the text; writing it is behind this trait so
//! a failing clipboard can never touch request or response state.

use std::io::Write;
use std::process::{Child, Command, Stdio};

use anyhow::{anyhow, Context, Result};

pub trait Clipboard: Send {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// Writes through the platform clipboard utility
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut child = spawn_clipboard_command()?;
        child
            .stdin
            .as_mut()
            .context("clipboard utility has no stdin")?
            .write_all(text.as_bytes())?;
        let status = child.wait()?;
        if !status.success() {
            return Err(anyhow!("clipboard utility exited with {}", status));
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn spawn_clipboard_command() -> Result<Child> {
    Command::new("pbcopy")
        .stdin(Stdio::piped())
        .spawn()
        .context("failed to launch pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn spawn_clipboard_command() -> Result<Child> {
    // Wayland first, then X11
    if let Ok(child) = Command::new("wl-copy").stdin(Stdio::piped()).spawn() {
        return Ok(child);
    }
    Command::new("xclip")
        .args(["-selection", "clipboard"])
        .stdin(Stdio::piped())
        .spawn()
        .context("no clipboard utility found (tried wl-copy, xclip)")
}
