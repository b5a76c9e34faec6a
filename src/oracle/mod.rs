//! Classification oracles.
//!
//! The trait lives in [`traits`]; concrete HTTP backends sit beside it
//! behind cargo features.

#[cfg(feature = "gemini")]
pub mod gemini;
pub mod traits;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
pub use traits::ClassificationOracle;
