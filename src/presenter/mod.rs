//! Result presenter: display and copy actions.
//!
//! Rendering reads the session and nothing else. The two copy actions
//! write to a [`Clipboard`] and leave a short-lived acknowledgment behind;
//! the session itself is never touched from here.

pub mod clipboard;

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::warn;

use crate::Result;
use crate::session::Session;
use crate::telemetry;
use crate::types::{ClassificationResult, NON_SOLAR_FIELD, SessionState};

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};

/// How long a copy acknowledgment stays visible.
pub const ACK_WINDOW: Duration = Duration::from_secs(2);

/// Shown while a request is in flight.
pub const LOADING_MESSAGE: &str = "Filtering keywords...";

/// Shown before anything has been submitted.
pub const PLACEHOLDER_MESSAGE: &str = "Your filtered keywords will appear here.";

/// Which copy action produced an acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    /// Newline-separated keyword list.
    List,
    /// Full payload text.
    All,
}

impl CopyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyKind::List => "list",
            CopyKind::All => "all",
        }
    }
}

/// What copy-list will actually put on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopySelection {
    /// `non_solar_keywords` was found; its entries joined by `\n`.
    List(String),
    /// The payload did not carry a usable keyword array; copy it verbatim.
    Raw(String),
}

/// Choose what copy-list writes for `payload`.
///
/// A well-formed result goes through [`ClassificationResult::to_lines`].
/// Arrays holding other JSON values are joined the way a browser joins
/// them: `null` becomes empty, nested arrays are comma-joined.
pub fn select_list(payload: &str) -> CopySelection {
    if let Ok(result) = ClassificationResult::parse(payload) {
        return CopySelection::List(result.to_lines());
    }

    let keywords = serde_json::from_str::<Value>(payload)
        .ok()
        .and_then(|mut value| value.get_mut(NON_SOLAR_FIELD).map(Value::take));

    match keywords {
        Some(Value::Array(items)) => CopySelection::List(join_values(&items, "\n")),
        _ => CopySelection::Raw(payload.to_string()),
    }
}

fn join_values(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(value_text)
        .collect::<Vec<_>>()
        .join(separator)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Array(items) => join_values(items, ","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// What the result pane shows for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    Placeholder,
    Loading,
    Error(&'a str),
    Result {
        payload: &'a str,
        acknowledged: Option<CopyKind>,
    },
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Placeholder => f.write_str(PLACEHOLDER_MESSAGE),
            View::Loading => f.write_str(LOADING_MESSAGE),
            View::Error(message) => f.write_str(message),
            View::Result { payload, .. } => f.write_str(payload),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Acknowledgment {
    kind: CopyKind,
    sequence: u64,
    expires_at: Instant,
}

/// Renders session state and performs copy actions.
pub struct ResultPresenter {
    clipboard: Box<dyn Clipboard>,
    ack: Option<Acknowledgment>,
}

impl ResultPresenter {
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            clipboard,
            ack: None,
        }
    }

    pub fn render<'s>(&self, session: &'s Session) -> View<'s> {
        match session.state() {
            SessionState::Idle => View::Placeholder,
            SessionState::Loading => View::Loading,
            SessionState::Failed(message) => View::Error(message),
            SessionState::Succeeded(payload) => View::Result {
                payload,
                acknowledged: self.acknowledgment(session),
            },
        }
    }

    /// The live acknowledgment, if any.
    ///
    /// Expires [`ACK_WINDOW`] after the copy, and never outlives the
    /// submission whose result was copied.
    pub fn acknowledgment(&self, session: &Session) -> Option<CopyKind> {
        self.ack
            .filter(|ack| ack.sequence == session.sequence())
            .filter(|_| session.state().payload().is_some())
            .filter(|ack| Instant::now() < ack.expires_at)
            .map(|ack| ack.kind)
    }

    /// Copy the keyword list, one per line.
    ///
    /// Falls back to [`copy_all`](Self::copy_all) when the payload has no
    /// `non_solar_keywords` array. Returns the action actually performed,
    /// or `None` when there is no result to copy.
    pub fn copy_list(&mut self, session: &Session) -> Result<Option<CopyKind>> {
        let Some(payload) = session.state().payload() else {
            return Ok(None);
        };

        match select_list(payload) {
            CopySelection::List(lines) => self.write(session, CopyKind::List, &lines),
            CopySelection::Raw(raw) => {
                warn!("result has no keyword list, copying the full payload instead");
                self.write(session, CopyKind::All, &raw)
            }
        }
    }

    /// Copy the full payload verbatim.
    pub fn copy_all(&mut self, session: &Session) -> Result<Option<CopyKind>> {
        let Some(payload) = session.state().payload() else {
            return Ok(None);
        };
        self.write(session, CopyKind::All, payload)
    }

    fn write(&mut self, session: &Session, kind: CopyKind, text: &str) -> Result<Option<CopyKind>> {
        self.clipboard.write_text(text)?;
        metrics::counter!(telemetry::COPIES_TOTAL, "kind" => kind.as_str()).increment(1);
        self.ack = Some(Acknowledgment {
            kind,
            sequence: session.sequence(),
            expires_at: Instant::now() + ACK_WINDOW,
        });
        Ok(Some(kind))
    }
}
