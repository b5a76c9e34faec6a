//! Session controller.
//!
//! Owns the one piece of mutable request state and drives a submission
//! through prompt building, the oracle call and payload normalization.
//!
//! ```text
//! Idle ──submit──▶ Loading ──▶ Succeeded | Failed ──submit──▶ Loading …
//! ```
//!
//! A submission can be driven in one go with [`Session::submit`], or split
//! for event-loop front-ends: [`Session::begin`] enters `Loading` and hands
//! out a [`Submission`], which can be run on any task; its [`Completion`]
//! is fed back through [`Session::complete`]. Each submission carries a
//! sequence number, and completions whose number is no longer current are
//! dropped.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, error};

use crate::oracle::ClassificationOracle;
use crate::prompt;
use crate::telemetry;
use crate::types::{ClassificationRequest, KeywordBatch, SessionState};
use crate::{Result, SolsieveError};

/// Shown when a submission is attempted with blank input.
pub const VALIDATION_MESSAGE: &str = "Please enter some keywords to filter.";

/// Shown for every oracle or payload failure.
pub const FAILURE_MESSAGE: &str =
    "Failed to filter keywords. Please check your input or try again later.";

/// Interactive classification session.
pub struct Session {
    oracle: Arc<dyn ClassificationOracle>,
    input: KeywordBatch,
    state: SessionState,
    sequence: u64,
    timeout: Option<Duration>,
}

impl Session {
    /// Create a session around a caller-owned oracle.
    pub fn new(oracle: Arc<dyn ClassificationOracle>) -> Self {
        Self {
            oracle,
            input: KeywordBatch::default(),
            state: SessionState::Idle,
            sequence: 0,
            timeout: None,
        }
    }

    /// Abandon oracle calls that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the keyword input. Previous input is not retained.
    pub fn set_input(&mut self, text: impl Into<KeywordBatch>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &KeywordBatch {
        &self.input
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Sequence number of the latest submission (0 before the first).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading()
    }

    /// Start a submission.
    ///
    /// Rejected with `SubmissionInFlight` while loading (state untouched),
    /// or with `Validation` when the input is blank (state becomes
    /// `Failed` with [`VALIDATION_MESSAGE`]; the oracle is not contacted).
    /// Otherwise enters `Loading`, clearing any previous result or error.
    pub fn begin(&mut self) -> Result<Submission> {
        if self.state.is_loading() {
            return Err(SolsieveError::SubmissionInFlight);
        }
        if self.input.is_blank() {
            self.state = SessionState::Failed(VALIDATION_MESSAGE.to_string());
            return Err(SolsieveError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        self.sequence += 1;
        self.state = SessionState::Loading;
        debug!(sequence = self.sequence, "submission started");

        Ok(Submission {
            sequence: self.sequence,
            request: prompt::build_request(&self.input),
            oracle: Arc::clone(&self.oracle),
            timeout: self.timeout,
        })
    }

    /// Apply a finished submission.
    ///
    /// Returns `false` (and leaves state alone) when the completion belongs
    /// to a superseded submission.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if completion.sequence != self.sequence || !self.state.is_loading() {
            debug!(
                stale = completion.sequence,
                current = self.sequence,
                "discarding stale completion"
            );
            metrics::counter!(telemetry::STALE_COMPLETIONS_TOTAL).increment(1);
            return false;
        }

        self.state = match completion.outcome.and_then(|raw| normalize_payload(&raw)) {
            Ok(pretty) => SessionState::Succeeded(pretty),
            Err(e) => {
                if matches!(e, SolsieveError::MalformedResponse(_)) {
                    metrics::counter!(telemetry::MALFORMED_RESPONSES_TOTAL).increment(1);
                }
                error!(sequence = completion.sequence, error = %e, "keyword filtering failed");
                SessionState::Failed(FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Run a whole submission: validate, call the oracle once, settle state.
    ///
    /// Oracle and payload failures never surface here; they end in
    /// `Failed`. Only rejected submissions return an error.
    pub async fn submit(&mut self) -> Result<()> {
        let submission = self.begin()?;
        let completion = submission.run().await;
        self.complete(completion);
        Ok(())
    }

    /// Return to `Idle`, abandoning any in-flight submission.
    ///
    /// The abandoned call still runs to completion; its result is ignored.
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            self.sequence += 1;
        }
        self.state = SessionState::Idle;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("oracle", &self.oracle.name())
            .field("state", &self.state)
            .field("sequence", &self.sequence)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// An accepted submission, ready to call the oracle.
pub struct Submission {
    sequence: u64,
    request: ClassificationRequest,
    oracle: Arc<dyn ClassificationOracle>,
    timeout: Option<Duration>,
}

impl Submission {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn request(&self) -> &ClassificationRequest {
        &self.request
    }

    /// Make the single oracle call for this submission.
    pub async fn run(self) -> Completion {
        let oracle = self.oracle.name().to_owned();
        let start = Instant::now();

        let call = self.oracle.classify(&self.request);
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(SolsieveError::Communication(format!(
                    "no response within {}s",
                    limit.as_secs_f64()
                )))
            }),
            None => call.await,
        };

        let status = if outcome.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::CLASSIFICATIONS_TOTAL,
            "oracle" => oracle.clone(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::CLASSIFICATION_DURATION_SECONDS,
            "oracle" => oracle,
        )
        .record(start.elapsed().as_secs_f64());

        Completion {
            sequence: self.sequence,
            outcome,
        }
    }
}

/// Outcome of one oracle call, tagged with its submission.
#[derive(Debug)]
pub struct Completion {
    sequence: u64,
    outcome: Result<String>,
}

impl Completion {
    /// Wrap an outcome obtained outside [`Submission::run`].
    pub fn new(sequence: u64, outcome: Result<String>) -> Self {
        Self { sequence, outcome }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn outcome(&self) -> &Result<String> {
        &self.outcome
    }
}

/// Re-serialize an oracle payload with two-space indentation.
///
/// Any valid JSON is accepted; conformance to the output schema is left to
/// the presenter. Key order is preserved.
pub fn normalize_payload(raw: &str) -> Result<String> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SolsieveError::MalformedResponse(e.to_string()))?;
    Ok(serde_json::to_string_pretty(&value)?)
}
