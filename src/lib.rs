//! Solsieve - filter solar-energy keywords out of a keyword list
//!
//! The actual judgment of what counts as "solar-related" belongs to a
//! hosted language model (the *oracle*). This crate builds the request,
//! makes exactly one call per submission, tracks the session state and
//! formats the result for display and copying.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use std::sync::Arc;
//! use solsieve::{Config, GeminiClient, MemoryClipboard, ResultPresenter, Session};
//!
//! # async fn run() -> solsieve::Result<()> {
//!     let config = Config::load(None)?;
//!     let oracle = GeminiClient::from_config(&config)?;
//!
//!     let mut session = Session::new(Arc::new(oracle));
//!     session.set_input("solar panels for home\nweekend trip ideas");
//!     session.submit().await?;
//!
//!     let mut presenter = ResultPresenter::new(Box::new(MemoryClipboard::new()));
//!     println!("{}", presenter.render(&session));
//!     presenter.copy_list(&session)?;
//!     Ok(())
//! # }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod oracle;
pub mod presenter;
pub mod prompt;
pub mod session;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use config::Config;
pub use error::{Result, SolsieveError};
#[cfg(feature = "gemini")]
pub use oracle::GeminiClient;
pub use oracle::ClassificationOracle;
pub use presenter::{
    Clipboard, CopyKind, CopySelection, MemoryClipboard, Osc52Clipboard, ResultPresenter, View,
};
pub use session::{Completion, Session, Submission};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};

pub use types::{
    ClassificationRequest, ClassificationResult, KeywordBatch, SessionState,
};
