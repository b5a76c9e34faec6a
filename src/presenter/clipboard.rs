//! Write-only clipboard backends.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use base64::Engine;

use crate::{Result, SolsieveError};

/// Destination for copy actions.
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Copies through the OSC 52 terminal escape sequence.
///
/// Works in most modern terminals (kitty, WezTerm, iTerm2, Ghostty,
/// tmux with `set-clipboard on`). The sequence is written to the wrapped
/// writer, normally the controlling terminal's stderr.
pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{encoded}\x07")
            .and_then(|()| self.out.flush())
            .map_err(|e| SolsieveError::Clipboard(e.to_string()))
    }
}

/// In-process clipboard that records every write.
///
/// Clones share storage, so a handle kept outside a presenter sees the
/// presenter's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent write.
    pub fn last(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    /// All writes, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.writes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.lock().push(text.to_string());
        Ok(())
    }
}
