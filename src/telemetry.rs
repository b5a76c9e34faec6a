//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus,
//! statsd); without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `solsieve_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `oracle` — oracle name (e.g. "gemini")
//! - `status` — outcome: "ok" or "error"
//! - `kind` — copy mode: "list" or "all"

/// Total classification calls dispatched to an oracle.
///
/// Labels: `oracle`, `status` ("ok" | "error").
pub const CLASSIFICATIONS_TOTAL: &str = "solsieve_classifications_total";

/// Classification call duration in seconds.
///
/// Labels: `oracle`.
pub const CLASSIFICATION_DURATION_SECONDS: &str = "solsieve_classification_duration_seconds";

/// Oracle payloads that could not be normalized as JSON.
pub const MALFORMED_RESPONSES_TOTAL: &str = "solsieve_malformed_responses_total";

/// Completions discarded because a newer submission superseded them.
pub const STALE_COMPLETIONS_TOTAL: &str = "solsieve_stale_completions_total";

/// Clipboard writes.
///
/// Labels: `kind` ("list" | "all").
pub const COPIES_TOTAL: &str = "solsieve_copies_total";
